//! Host pixel formats and row storage.
//!
//! Typed pixels for [`ImageData::pixels`](crate::ImageData::pixels) come from
//! the `rgb` crate and are re-exported here.

use core::fmt;

pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb::{Gray, Rgb, Rgba};

/// Pixel format in the host's vocabulary.
#[non_exhaustive]
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    R8Unorm,
    RG8Unorm,
    RGB8Unorm,
    RGBA8Unorm,
    R8Snorm,
    RG8Snorm,
    RGB8Snorm,
    RGBA8Snorm,
    R16Unorm,
    RG16Unorm,
    RGB16Unorm,
    RGBA16Unorm,
    R32F,
    RG32F,
    RGB32F,
    RGBA32F,
}

impl PixelFormat {
    /// Number of channels.
    pub fn channel_count(self) -> usize {
        match self {
            Self::R8Unorm | Self::R8Snorm | Self::R16Unorm | Self::R32F => 1,
            Self::RG8Unorm | Self::RG8Snorm | Self::RG16Unorm | Self::RG32F => 2,
            Self::RGB8Unorm | Self::RGB8Snorm | Self::RGB16Unorm | Self::RGB32F => 3,
            Self::RGBA8Unorm | Self::RGBA8Snorm | Self::RGBA16Unorm | Self::RGBA32F => 4,
        }
    }

    /// Bytes per channel.
    pub fn channel_size(self) -> usize {
        match self {
            Self::R8Unorm
            | Self::RG8Unorm
            | Self::RGB8Unorm
            | Self::RGBA8Unorm
            | Self::R8Snorm
            | Self::RG8Snorm
            | Self::RGB8Snorm
            | Self::RGBA8Snorm => 1,
            Self::R16Unorm | Self::RG16Unorm | Self::RGB16Unorm | Self::RGBA16Unorm => 2,
            Self::R32F | Self::RG32F | Self::RGB32F | Self::RGBA32F => 4,
        }
    }

    /// Bytes per pixel.
    pub fn pixel_size(self) -> usize {
        self.channel_count() * self.channel_size()
    }

    /// Whether this is one of the 8-bit unsigned normalized formats.
    pub fn is_unorm8(self) -> bool {
        matches!(
            self,
            Self::R8Unorm | Self::RG8Unorm | Self::RGB8Unorm | Self::RGBA8Unorm
        )
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PixelFormat::{:?}", self)
    }
}

/// Row storage parameters of an image buffer.
///
/// Each row starts at a multiple of `alignment` bytes from the previous one.
/// `swap_bytes` marks multi-byte channels stored in the opposite endianness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelStorage {
    alignment: u8,
    swap_bytes: bool,
}

impl Default for PixelStorage {
    fn default() -> Self {
        Self {
            alignment: 4,
            swap_bytes: false,
        }
    }
}

impl PixelStorage {
    /// Storage with the given row alignment. Must be 1, 2, 4 or 8.
    pub fn new(alignment: u8) -> Option<Self> {
        matches!(alignment, 1 | 2 | 4 | 8).then_some(Self {
            alignment,
            swap_bytes: false,
        })
    }

    pub fn with_swap_bytes(mut self, swap_bytes: bool) -> Self {
        self.swap_bytes = swap_bytes;
        self
    }

    pub fn alignment(&self) -> u8 {
        self.alignment
    }

    pub fn swap_bytes(&self) -> bool {
        self.swap_bytes
    }

    /// Row length rounded up to the alignment, or `None` on overflow.
    pub fn row_stride(&self, row_len: usize) -> Option<usize> {
        let align = self.alignment as usize;
        row_len.div_ceil(align).checked_mul(align)
    }

    /// Minimum buffer size for `height` rows of `row_len` bytes, or `None`
    /// on overflow.
    ///
    /// The last row doesn't need its padding.
    pub fn required_len(&self, row_len: usize, height: usize) -> Option<usize> {
        match height {
            0 => Some(0),
            h => self
                .row_stride(row_len)?
                .checked_mul(h - 1)?
                .checked_add(row_len),
        }
    }
}
