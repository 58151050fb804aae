//! Output path resolution for PNG exports.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};

/// Where converted files go.
pub struct OutputConfig {
    pub target_dir: Option<PathBuf>,
    pub target_file: Option<PathBuf>,
    pub force: bool,
    pub dry_run: bool,
}

impl OutputConfig {
    pub fn new(output: Option<&str>, force: bool, dry_run: bool) -> Self {
        let (target_dir, target_file) = match output {
            Some(o) => {
                let path = PathBuf::from(o);
                if o.ends_with('/') || o.ends_with('\\') || path.is_dir() {
                    (Some(path), None)
                } else {
                    (None, Some(path))
                }
            }
            None => (None, None),
        };

        Self {
            target_dir,
            target_file,
            force,
            dry_run,
        }
    }

    /// Resolve the output path for a given input file.
    pub fn resolve(&self, input: &Path, input_count: usize) -> anyhow::Result<PathBuf> {
        // -o file: only valid for single-file input
        if let Some(ref target) = self.target_file {
            if input_count > 1 {
                bail!("-o with a file path only works for a single input file (got {input_count})");
            }
            return Ok(target.clone());
        }

        let filename = png_filename(input);
        if let Some(ref dir) = self.target_dir {
            return Ok(dir.join(filename));
        }

        let parent = input.parent().unwrap_or(Path::new("."));
        Ok(parent.join(filename))
    }

    /// Refuse to clobber the input, or an existing file without --force.
    pub fn check_writable(&self, input: &Path, output: &Path) -> anyhow::Result<()> {
        if self.dry_run {
            return Ok(());
        }

        if let (Ok(ci), Ok(co)) = (input.canonicalize(), output.canonicalize()) {
            if ci == co {
                bail!("output would overwrite input: {}", input.display());
            }
        }

        if output.exists() && !self.force {
            bail!(
                "output already exists: {}\nUse --force to overwrite",
                output.display()
            );
        }

        Ok(())
    }

    /// Create parent directories for the output path.
    pub fn ensure_parent(output: &Path) -> anyhow::Result<()> {
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating directory: {}", parent.display()))?;
            }
        }
        Ok(())
    }
}

fn png_filename(input: &Path) -> String {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    format!("{stem}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sibling_png() {
        let config = OutputConfig::new(None, false, false);
        let out = config.resolve(Path::new("art/logo.tga"), 1).unwrap();
        assert_eq!(out, PathBuf::from("art/logo.png"));
    }

    #[test]
    fn directory_target() {
        let config = OutputConfig::new(Some("out/"), false, false);
        let out = config.resolve(Path::new("art/logo.bmp"), 3).unwrap();
        assert_eq!(out, PathBuf::from("out/logo.png"));
    }

    #[test]
    fn file_target_single_input_only() {
        let config = OutputConfig::new(Some("result.png"), false, false);
        assert_eq!(
            config.resolve(Path::new("a.jpg"), 1).unwrap(),
            PathBuf::from("result.png")
        );
        assert!(config.resolve(Path::new("a.jpg"), 2).is_err());
    }
}
