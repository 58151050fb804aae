//! Codec adapters for format-specific implementations.
//!
//! Each module is a thin adapter between the importer/converter plugins and
//! a codec crate. Adapters report failures as [`ErrorCode`]s; the plugins
//! turn those into diagnostics.

pub(crate) mod bmp;
pub(crate) mod ico;
pub(crate) mod jpeg;
pub(crate) mod png;
pub(crate) mod tga;

use std::io::Cursor;

use ::image::{ColorType, DynamicImage, ImageDecoder, ImageError};

use crate::pixel::PixelFormat;
use crate::{ErrorCode, ImageFormat, Limits};

/// Channel layout of a decoded frame, 8 bits per channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NativeLayout {
    Luminance,
    LuminanceAlpha,
    Rgb,
    Rgba,
}

impl NativeLayout {
    pub(crate) fn channels(self) -> usize {
        match self {
            NativeLayout::Luminance => 1,
            NativeLayout::LuminanceAlpha => 2,
            NativeLayout::Rgb => 3,
            NativeLayout::Rgba => 4,
        }
    }

    /// Host format for this layout.
    pub(crate) fn pixel_format(self) -> PixelFormat {
        match self {
            NativeLayout::Luminance => PixelFormat::R8Unorm,
            NativeLayout::LuminanceAlpha => PixelFormat::RG8Unorm,
            NativeLayout::Rgb => PixelFormat::RGB8Unorm,
            NativeLayout::Rgba => PixelFormat::RGBA8Unorm,
        }
    }

    /// Layout for a host format, if one exists.
    pub(crate) fn from_pixel_format(format: PixelFormat) -> Option<Self> {
        match format {
            PixelFormat::R8Unorm => Some(NativeLayout::Luminance),
            PixelFormat::RG8Unorm => Some(NativeLayout::LuminanceAlpha),
            PixelFormat::RGB8Unorm => Some(NativeLayout::Rgb),
            PixelFormat::RGBA8Unorm => Some(NativeLayout::Rgba),
            _ => None,
        }
    }
}

/// A decoded frame as the codec hands it over: tightly packed,
/// top row first.
#[derive(Debug)]
pub(crate) struct DecodedFrame {
    pub(crate) pixels: Vec<u8>,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) layout: NativeLayout,
}

impl DecodedFrame {
    pub(crate) fn row_len(&self) -> usize {
        self.width as usize * self.layout.channels()
    }
}

/// Dispatch to format-specific decoder.
pub(crate) fn decode(
    format: ImageFormat,
    data: &[u8],
    limits: &Limits,
) -> Result<DecodedFrame, ErrorCode> {
    match format {
        ImageFormat::Png => self::png::decode(data, limits),
        ImageFormat::Jpeg => self::jpeg::decode(data, limits),
        ImageFormat::Tga => self::tga::decode(data, limits),
        ImageFormat::Bmp => self::bmp::decode(data, limits),
        ImageFormat::Ico => self::ico::decode(data, limits),
    }
}

pub(crate) fn cursor(data: &[u8]) -> Cursor<&[u8]> {
    Cursor::new(data)
}

/// Run an `image` crate decoder to completion and reduce its output to
/// 8-bit channels.
pub(crate) fn decode_with<D: ImageDecoder>(
    decoder: D,
    limits: &Limits,
) -> Result<DecodedFrame, ErrorCode> {
    let (width, height) = decoder.dimensions();
    limits.check_dimensions(width, height)?;
    limits.check_memory(decoder.total_bytes())?;

    let image = DynamicImage::from_decoder(decoder).map_err(image_error)?;
    Ok(frame_from_dynamic(image))
}

fn frame_from_dynamic(image: DynamicImage) -> DecodedFrame {
    let (width, height) = (image.width(), image.height());
    let (pixels, layout) = match image {
        DynamicImage::ImageLuma8(buf) => (buf.into_raw(), NativeLayout::Luminance),
        DynamicImage::ImageLumaA8(buf) => (buf.into_raw(), NativeLayout::LuminanceAlpha),
        DynamicImage::ImageRgb8(buf) => (buf.into_raw(), NativeLayout::Rgb),
        DynamicImage::ImageRgba8(buf) => (buf.into_raw(), NativeLayout::Rgba),
        // Deeper formats are narrowed to 8 bits per channel
        other => match other.color() {
            ColorType::L16 => (other.to_luma8().into_raw(), NativeLayout::Luminance),
            ColorType::La16 => (other.to_luma_alpha8().into_raw(), NativeLayout::LuminanceAlpha),
            color if color.has_alpha() => (other.to_rgba8().into_raw(), NativeLayout::Rgba),
            _ => (other.to_rgb8().into_raw(), NativeLayout::Rgb),
        },
    };

    DecodedFrame {
        pixels,
        width,
        height,
        layout,
    }
}

/// Map an `image` crate error onto the codec error table.
pub(crate) fn image_error(err: ImageError) -> ErrorCode {
    tracing::debug!(error = %err, "image decoder failed");
    #[allow(unreachable_patterns)]
    match err {
        ImageError::Decoding(_) => ErrorCode::IllegalFileValue,
        ImageError::Encoding(_) => ErrorCode::InternalError,
        ImageError::Parameter(_) => ErrorCode::InvalidParam,
        ImageError::Limits(_) => ErrorCode::OutOfMemory,
        ImageError::Unsupported(_) => ErrorCode::FormatNotSupported,
        ImageError::IoError(_) => ErrorCode::FileReadError,
        _ => ErrorCode::InternalError,
    }
}
