//! Image inspection: import each file and report what the importer yields.

use std::path::Path;

use anyhow::Context;
use imageplugins::{ImageFormat, PluginRegistry};
use serde::Serialize;

use crate::InfoArgs;
use crate::inputs;

/// Run the `info` subcommand.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let files = inputs::expand_inputs(&args.files)?;

    if files.is_empty() {
        anyhow::bail!("no image files found");
    }

    let registry = PluginRegistry::default();
    let multi = files.len() > 1;

    for (i, path) in files.iter().enumerate() {
        if multi && !args.json {
            if i > 0 {
                println!();
            }
            println!("{}:", path.display());
        }

        match inspect_file(&registry, &args.importer, path) {
            Ok(info) => {
                if args.json {
                    println!("{}", serde_json::to_string_pretty(&info)?);
                } else {
                    print_info(&info);
                }
            }
            Err(e) => {
                eprintln!("  error: {e:#}");
            }
        }
    }

    Ok(())
}

/// Import a single file and return structured info.
fn inspect_file(
    registry: &PluginRegistry,
    importer_name: &str,
    path: &Path,
) -> anyhow::Result<ImageInfoDisplay> {
    let mut importer = registry
        .instantiate_importer(importer_name)
        .with_context(|| format!("no importer named {importer_name}"))?;

    importer.open_file(path)?;
    let image_count = importer.image2d_count();
    let level_count = importer.image2d_level_count(0)?;
    let image = importer.image2d(0, 0)?;
    let file_size = path.metadata().map(|m| m.len()).unwrap_or(0);

    let format = ImageFormat::from_path(path);

    Ok(ImageInfoDisplay {
        path: path.display().to_string(),
        importer: importer.name().to_string(),
        format: format.map(|f| format!("{f:?}")),
        mime_type: format.map(|f| f.mime_type().to_string()),
        width: image.width(),
        height: image.height(),
        pixel_format: format!("{:?}", image.format()),
        pixel_size: image.format().pixel_size(),
        alignment: image.storage().alignment(),
        data_size: image.data().len(),
        image_count,
        level_count,
        first_of_several: format.is_some_and(ImageFormat::is_multi_image),
        file_size,
    })
}

#[derive(Debug, Serialize)]
struct ImageInfoDisplay {
    path: String,
    importer: String,
    format: Option<String>,
    mime_type: Option<String>,
    width: u32,
    height: u32,
    pixel_format: String,
    pixel_size: usize,
    alignment: u8,
    data_size: usize,
    image_count: u32,
    level_count: u32,
    first_of_several: bool,
    file_size: u64,
}

fn print_info(info: &ImageInfoDisplay) {
    if let (Some(format), Some(mime)) = (&info.format, &info.mime_type) {
        println!("  Format:       {} ({})", format, mime);
    }
    println!("  Importer:     {}", info.importer);
    println!("  Dimensions:   {}x{}", info.width, info.height);
    println!(
        "  Pixels:       {} ({} bytes/pixel)",
        info.pixel_format, info.pixel_size
    );
    println!("  Alignment:    {}", info.alignment);
    if info.image_count != 1 || info.level_count != 1 {
        println!(
            "  Images:       {} ({} levels)",
            info.image_count, info.level_count
        );
    }
    if info.first_of_several {
        println!("  Entry:        first in file");
    }
    println!("  Decoded size: {}", inputs::format_size(info.data_size as u64));
    println!("  File size:    {}", inputs::format_size(info.file_size));
}
