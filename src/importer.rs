//! The importer contract.

use std::path::Path;

use crate::{ErrorCode, ImageData, TradeError};

/// Capabilities an importer declares up front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ImporterFeatures(u8);

impl ImporterFeatures {
    pub const EMPTY: Self = ImporterFeatures(0);
    /// Can open images from an in-memory buffer.
    pub const OPEN_DATA: Self = ImporterFeatures(1 << 0);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        ImporterFeatures(self.0 | other.0)
    }
}

impl core::ops::BitOr for ImporterFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Decodes encoded images into [`ImageData`].
///
/// An importer is a small state machine: closed, or holding one opened
/// image. Every `open_*` call first discards what was open before; a failed
/// open leaves the importer closed and ready for another attempt.
pub trait ImageImporter: Send {
    /// Plugin name, used as the diagnostic prefix.
    fn name(&self) -> &'static str;

    fn features(&self) -> ImporterFeatures;

    /// Open an image from an in-memory buffer.
    fn open_data(&mut self, data: &[u8]) -> Result<(), TradeError>;

    /// Open an image from a file.
    ///
    /// The default reads the whole file and forwards to
    /// [`open_data`](Self::open_data).
    fn open_file(&mut self, path: &Path) -> Result<(), TradeError> {
        self.close();
        match std::fs::read(path) {
            Ok(data) => self.open_data(&data),
            Err(err) => {
                tracing::error!(plugin = self.name(), path = %path.display(), error = %err, "cannot read file");
                Err(TradeError::Open {
                    plugin: self.name(),
                    operation: "open_file",
                    code: ErrorCode::CouldNotOpenFile,
                })
            }
        }
    }

    /// Release the opened image, if any.
    fn close(&mut self);

    fn is_opened(&self) -> bool;

    /// Number of 2D images in the opened file; 0 when nothing is open.
    fn image2d_count(&self) -> u32;

    /// Number of levels of a 2D image.
    fn image2d_level_count(&self, index: u32) -> Result<u32, TradeError>;

    /// Import one level of a 2D image.
    fn image2d(&self, index: u32, level: u32) -> Result<ImageData, TradeError>;
}
