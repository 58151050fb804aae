//! imgplug: inspect images and convert them to PNG.
//!
//! Every file goes through the same importer and converter plugins a host
//! would instantiate from `imageplugins::PluginRegistry`.

mod convert;
mod info;
mod inputs;
mod output;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "imgplug", version, about = "Inspect images and convert them to PNG")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import images and display what the importer produces.
    Info(InfoArgs),

    /// Import images and export them as PNG.
    Convert(ConvertArgs),
}

/// Arguments for the `info` subcommand.
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Input files, directories or glob patterns.
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,

    /// Importer plugin name or alias.
    #[arg(long, default_value = "CodecImageImporter")]
    pub importer: String,
}

/// Arguments for the `convert` subcommand.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Input files, directories or glob patterns.
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Output file, or directory (dir/ with trailing slash) for batches.
    /// Defaults to the input path with a .png extension.
    #[arg(short, long)]
    pub output: Option<String>,

    /// Allow overwriting existing files.
    #[arg(long)]
    pub force: bool,

    /// Show what would be done without writing files.
    #[arg(long)]
    pub dry_run: bool,

    /// PNG compression level.
    #[arg(long, value_enum)]
    pub compression: Option<CompressionArg>,

    /// PNG filter strategy.
    #[arg(long, value_enum)]
    pub filter: Option<FilterArg>,

    /// Refuse images wider or taller than this many pixels.
    #[arg(long, env = "IMGPLUG_MAX_DIMENSION")]
    pub max_dimension: Option<u32>,

    /// Number of parallel workers (default: CPU count).
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,
}

/// PNG compression level.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompressionArg {
    Fast,
    Balanced,
    High,
}

impl CompressionArg {
    pub fn to_png(self) -> imageplugins::config::png_codec::Compression {
        use imageplugins::config::png_codec::Compression;
        match self {
            CompressionArg::Fast => Compression::Fast,
            CompressionArg::Balanced => Compression::Balanced,
            CompressionArg::High => Compression::High,
        }
    }
}

/// PNG filter strategy.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FilterArg {
    NoFilter,
    Sub,
    Up,
    Avg,
    Paeth,
    Adaptive,
}

impl FilterArg {
    pub fn to_png(self) -> imageplugins::config::png_codec::Filter {
        use imageplugins::config::png_codec::Filter;
        match self {
            FilterArg::NoFilter => Filter::NoFilter,
            FilterArg::Sub => Filter::Sub,
            FilterArg::Up => Filter::Up,
            FilterArg::Avg => Filter::Avg,
            FilterArg::Paeth => Filter::Paeth,
            FilterArg::Adaptive => Filter::Adaptive,
        }
    }
}

fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        Command::Info(args) => info::run(args),
        Command::Convert(args) => convert::run(args),
    }
}
