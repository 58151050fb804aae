//! Host image buffers: [`ImageView`] and [`ImageData`].
//!
//! Rows are stored bottom-to-top: the first row in memory is the bottom row
//! of the picture. Each row begins at a multiple of the storage alignment.

use crate::pixel::{ImgVec, PixelFormat, PixelStorage};
use crate::TradeError;

/// Check that `len` bytes hold the image and return its row stride.
fn validate(
    storage: &PixelStorage,
    format: PixelFormat,
    width: u32,
    height: u32,
    len: usize,
) -> Result<usize, TradeError> {
    let too_large = || {
        TradeError::InvalidInput(format!(
            "a {width}x{height} {format} image doesn't fit in memory"
        ))
    };
    let row_len = (width as usize)
        .checked_mul(format.pixel_size())
        .ok_or_else(too_large)?;
    let stride = storage.row_stride(row_len).ok_or_else(too_large)?;
    let needed = storage
        .required_len(row_len, height as usize)
        .ok_or_else(too_large)?;
    if len < needed {
        return Err(TradeError::InvalidInput(format!(
            "data too small for a {width}x{height} {format} image: need {needed} bytes, got {len}"
        )));
    }
    Ok(stride)
}

/// Borrowed 2D image, the input to converters.
#[derive(Clone, Copy, Debug)]
pub struct ImageView<'a> {
    storage: PixelStorage,
    format: PixelFormat,
    width: u32,
    height: u32,
    stride: usize,
    data: &'a [u8],
}

impl<'a> ImageView<'a> {
    /// View with default storage (4-byte row alignment).
    pub fn new(
        format: PixelFormat,
        width: u32,
        height: u32,
        data: &'a [u8],
    ) -> Result<Self, TradeError> {
        Self::with_storage(PixelStorage::default(), format, width, height, data)
    }

    pub fn with_storage(
        storage: PixelStorage,
        format: PixelFormat,
        width: u32,
        height: u32,
        data: &'a [u8],
    ) -> Result<Self, TradeError> {
        let stride = validate(&storage, format, width, height, data.len())?;
        Ok(Self {
            storage,
            format,
            width,
            height,
            stride,
            data,
        })
    }

    pub fn storage(&self) -> PixelStorage {
        self.storage
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Bytes of pixel data in one row, without padding.
    pub fn row_len(&self) -> usize {
        self.width as usize * self.format.pixel_size()
    }

    /// Distance in bytes between the starts of two consecutive rows.
    pub fn row_stride(&self) -> usize {
        self.stride
    }

    /// Rows in memory order (bottom row first), padding stripped.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &'a [u8]> + ExactSizeIterator {
        let data = self.data;
        let row_len = self.row_len();
        let stride = self.row_stride();
        (0..self.height as usize).map(move |y| &data[y * stride..y * stride + row_len])
    }
}

/// Owned 2D image, produced by importers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageData {
    storage: PixelStorage,
    format: PixelFormat,
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl ImageData {
    pub fn new(
        storage: PixelStorage,
        format: PixelFormat,
        width: u32,
        height: u32,
        data: Vec<u8>,
    ) -> Result<Self, TradeError> {
        let stride = validate(&storage, format, width, height, data.len())?;
        Ok(Self {
            storage,
            format,
            width,
            height,
            stride,
            data,
        })
    }

    pub fn storage(&self) -> PixelStorage {
        self.storage
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Take ownership of the pixel bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Borrow as an [`ImageView`] for feeding into a converter.
    pub fn as_view(&self) -> ImageView<'_> {
        ImageView {
            storage: self.storage,
            format: self.format,
            width: self.width,
            height: self.height,
            stride: self.stride,
            data: &self.data,
        }
    }

    /// Copy the pixels out as a typed, tightly packed 2D buffer.
    ///
    /// Row 0 of the result is the bottom row. Fails if `P` doesn't have the
    /// size of one pixel of this image's format.
    pub fn pixels<P: bytemuck::AnyBitPattern>(&self) -> Result<ImgVec<P>, TradeError> {
        let pixel_size = self.format.pixel_size();
        if core::mem::size_of::<P>() != pixel_size {
            return Err(TradeError::InvalidInput(format!(
                "pixel type of {} bytes doesn't match {} ({} bytes)",
                core::mem::size_of::<P>(),
                self.format,
                pixel_size
            )));
        }

        let mut pixels = Vec::with_capacity(self.width as usize * self.height as usize);
        for row in self.as_view().rows() {
            pixels.extend(row.chunks_exact(pixel_size).map(bytemuck::pod_read_unaligned::<P>));
        }
        Ok(ImgVec::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }
}
