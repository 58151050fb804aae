//! Import then export as PNG, one file or a parallel batch.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use imageplugins::{
    CodecImageImporter, ConverterConfig, ImageConverter, ImageImporter, Limits, PngImageConverter,
};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::ConvertArgs;
use crate::inputs;
use crate::output::OutputConfig;

/// Outcome of converting a single file.
struct FileResult {
    input_path: PathBuf,
    output: Result<(PathBuf, u64), String>,
}

/// Run the `convert` subcommand.
pub fn run(args: ConvertArgs) -> anyhow::Result<()> {
    let files = inputs::expand_inputs(&args.files)?;
    if files.is_empty() {
        anyhow::bail!("no image files found");
    }

    let output_config = OutputConfig::new(args.output.as_deref(), args.force, args.dry_run);
    let converter = PngImageConverter::with_config(converter_config(&args));
    let limits = match args.max_dimension {
        Some(max) => Limits::none().with_max_width(max).with_max_height(max),
        None => Limits::none(),
    };
    let input_count = files.len();

    let results = if input_count == 1 {
        vec![convert_one(&files[0], &converter, &limits, &output_config, input_count)]
    } else {
        let jobs = args.jobs.unwrap_or_else(rayon::current_num_threads);
        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

        let pb = ProgressBar::new(input_count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                .progress_chars("=>-"),
        );

        let results = Mutex::new(Vec::with_capacity(input_count));
        pool.install(|| {
            files.par_iter().for_each(|path| {
                let result = convert_one(path, &converter, &limits, &output_config, input_count);
                if let Err(ref err) = result.output {
                    pb.println(format!("error: {}: {}", path.display(), err));
                }
                if let Ok(mut results) = results.lock() {
                    results.push(result);
                }
                pb.inc(1);
            });
        });
        pb.finish_and_clear();

        results
            .into_inner()
            .map_err(|_| anyhow::anyhow!("worker panicked"))?
    };

    let mut errors = 0;
    for result in &results {
        match &result.output {
            Ok((path, size)) if input_count == 1 || args.dry_run => {
                let verb = if args.dry_run { "would write" } else { "wrote" };
                eprintln!(
                    "{} -> {} {} ({})",
                    result.input_path.display(),
                    verb,
                    path.display(),
                    inputs::format_size(*size)
                );
            }
            Ok(_) => {}
            Err(err) => {
                errors += 1;
                if input_count == 1 {
                    eprintln!("error: {}: {}", result.input_path.display(), err);
                }
            }
        }
    }

    if errors > 0 {
        anyhow::bail!("{errors} of {input_count} files had errors");
    }
    Ok(())
}

fn converter_config(args: &ConvertArgs) -> ConverterConfig {
    let mut config = ConverterConfig::default();
    if let Some(compression) = args.compression {
        config = config.with_png_compression(compression.to_png());
    }
    if let Some(filter) = args.filter {
        config = config.with_png_filter(filter.to_png());
    }
    config
}

fn convert_one(
    input: &Path,
    converter: &PngImageConverter,
    limits: &Limits,
    output_config: &OutputConfig,
    input_count: usize,
) -> FileResult {
    FileResult {
        input_path: input.to_path_buf(),
        output: convert_inner(input, converter, limits, output_config, input_count)
            .map_err(|e| format!("{e:#}")),
    }
}

/// Returns the output path and encoded size.
fn convert_inner(
    input: &Path,
    converter: &PngImageConverter,
    limits: &Limits,
    output_config: &OutputConfig,
    input_count: usize,
) -> anyhow::Result<(PathBuf, u64)> {
    let output = output_config.resolve(input, input_count)?;
    output_config.check_writable(input, &output)?;

    let mut importer = CodecImageImporter::with_limits(limits.clone());
    importer.open_file(input)?;
    let image = importer.image2d(0, 0)?;

    let png = converter.export_to_data(&image.as_view())?;
    let size = png.len() as u64;

    if !output_config.dry_run {
        OutputConfig::ensure_parent(&output)?;
        std::fs::write(&output, &png)
            .with_context(|| format!("writing {}", output.display()))?;
    }

    Ok((output, size))
}
