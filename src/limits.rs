//! Resource limits for importers.

use crate::ErrorCode;

/// Resource limits checked before pixel buffers are allocated.
///
/// All limits are optional. A breach fails the open call with
/// [`ErrorCode::BadDimensions`] or [`ErrorCode::OutOfMemory`].
#[derive(Clone, Debug, Default)]
pub struct Limits {
    /// Maximum image width in pixels.
    pub max_width: Option<u32>,
    /// Maximum image height in pixels.
    pub max_height: Option<u32>,
    /// Maximum total pixels (width × height).
    pub max_pixels: Option<u64>,
    /// Maximum decoded buffer size in bytes.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Create a new Limits with no restrictions.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_max_width(mut self, width: u32) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn with_max_height(mut self, height: u32) -> Self {
        self.max_height = Some(height);
        self
    }

    pub fn with_max_pixels(mut self, pixels: u64) -> Self {
        self.max_pixels = Some(pixels);
        self
    }

    pub fn with_max_memory(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    /// Check if dimensions are within limits.
    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<(), ErrorCode> {
        if width == 0 || height == 0 {
            return Err(ErrorCode::BadDimensions);
        }

        if self.max_width.is_some_and(|max| width > max) {
            tracing::warn!(width, max = self.max_width, "image width exceeds limit");
            return Err(ErrorCode::BadDimensions);
        }

        if self.max_height.is_some_and(|max| height > max) {
            tracing::warn!(height, max = self.max_height, "image height exceeds limit");
            return Err(ErrorCode::BadDimensions);
        }

        let pixels = u64::from(width) * u64::from(height);
        if self.max_pixels.is_some_and(|max| pixels > max) {
            tracing::warn!(pixels, max = self.max_pixels, "pixel count exceeds limit");
            return Err(ErrorCode::BadDimensions);
        }

        Ok(())
    }

    /// Check if a decoded buffer of `bytes` is within limits.
    pub fn check_memory(&self, bytes: u64) -> Result<(), ErrorCode> {
        if self.max_memory_bytes.is_some_and(|max| bytes > max) {
            tracing::warn!(bytes, max = self.max_memory_bytes, "allocation exceeds limit");
            return Err(ErrorCode::OutOfMemory);
        }
        Ok(())
    }
}
