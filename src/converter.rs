//! The converter contract.

use std::path::Path;

use crate::{ImageView, TradeError};

/// Capabilities a converter declares up front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ConverterFeatures(u8);

impl ConverterFeatures {
    pub const EMPTY: Self = ConverterFeatures(0);
    /// Can encode an image into an in-memory buffer.
    pub const CONVERT_DATA: Self = ConverterFeatures(1 << 0);
    /// Can encode an image straight to a file.
    pub const CONVERT_FILE: Self = ConverterFeatures(1 << 1);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        ConverterFeatures(self.0 | other.0)
    }
}

impl core::ops::BitOr for ConverterFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Encodes [`ImageView`]s into a container format.
pub trait ImageConverter: Send {
    /// Plugin name, used as the diagnostic prefix.
    fn name(&self) -> &'static str;

    fn features(&self) -> ConverterFeatures;

    /// Encode an image into a new buffer.
    fn export_to_data(&self, image: &ImageView<'_>) -> Result<Vec<u8>, TradeError>;

    /// Encode an image and write it to `path`.
    ///
    /// Converters that only declare [`ConverterFeatures::CONVERT_DATA`] get
    /// this for free: the buffer from [`export_to_data`](Self::export_to_data)
    /// is written out as-is.
    fn export_to_file(&self, image: &ImageView<'_>, path: &Path) -> Result<(), TradeError> {
        if !self.features().contains(ConverterFeatures::CONVERT_DATA) {
            return Err(TradeError::NotSupported {
                plugin: self.name(),
                operation: "export_to_file",
            });
        }

        let data = self.export_to_data(image)?;
        std::fs::write(path, data).map_err(|source| {
            tracing::error!(plugin = self.name(), path = %path.display(), error = %source, "cannot write file");
            TradeError::Io {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_contain() {
        let both = ConverterFeatures::CONVERT_DATA | ConverterFeatures::CONVERT_FILE;
        assert!(both.contains(ConverterFeatures::CONVERT_DATA));
        assert!(both.contains(ConverterFeatures::CONVERT_FILE));
        assert!(!ConverterFeatures::CONVERT_DATA.contains(ConverterFeatures::CONVERT_FILE));
    }
}
