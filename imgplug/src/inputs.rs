//! Input expansion and size formatting.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use imageplugins::ImageFormat;

/// Expand input patterns into a deduplicated list of image files.
///
/// Handles glob patterns (containing `*`, `?`, `[`), plain file paths and
/// directories (recursive image discovery). Files keep the order they were
/// named in; directory contents are sorted by path.
pub fn expand_inputs(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for pattern in patterns {
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            for entry in glob::glob(pattern)? {
                let path = entry?;
                if path.is_file() && is_image(&path) {
                    push_unique(path, &mut seen, &mut files);
                }
            }
        } else {
            let path = PathBuf::from(pattern);
            if path.is_dir() {
                let mut found = Vec::new();
                images_in_dir(&path, &mut found);
                found.sort();
                for path in found {
                    push_unique(path, &mut seen, &mut files);
                }
            } else if path.is_file() {
                push_unique(path, &mut seen, &mut files);
            } else {
                anyhow::bail!("not a file or directory: {}", path.display());
            }
        }
    }

    Ok(files)
}

fn push_unique(path: PathBuf, seen: &mut HashSet<PathBuf>, files: &mut Vec<PathBuf>) {
    if let Ok(canonical) = path.canonicalize() {
        if seen.insert(canonical) {
            files.push(path);
        }
    }
}

/// Check if a file path has an extension the importer recognizes.
pub fn is_image(path: &Path) -> bool {
    ImageFormat::from_path(path).is_some()
}

fn images_in_dir(dir: &Path, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            images_in_dir(&path, files);
        } else if path.is_file() && is_image(&path) {
            files.push(path);
        }
    }
}

/// Format a byte size into a human-readable string.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
