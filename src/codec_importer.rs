//! Importer backed by the codec adapters in [`crate::codecs`].

use std::path::Path;

use crate::codecs::{self, DecodedFrame};
use crate::importer::{ImageImporter, ImporterFeatures};
use crate::pixel::PixelStorage;
use crate::{ErrorCode, ImageData, ImageFormat, Limits, TradeError};

struct OpenedImage {
    format: ImageFormat,
    image: ImageData,
}

/// Imports PNG, JPEG, TGA, BMP and ICO images.
///
/// Decoding happens in full at open time; [`image2d`](ImageImporter::image2d)
/// hands out copies of the decoded buffer. Rows come out bottom row first,
/// 8 bits per channel, with row alignment 4 for RGBA and 1 otherwise.
///
/// ```no_run
/// use std::path::Path;
/// use imageplugins::{CodecImageImporter, ImageImporter};
///
/// let mut importer = CodecImageImporter::new();
/// importer.open_file(Path::new("texture.tga"))?;
/// let image = importer.image2d(0, 0)?;
/// println!("{}x{} {}", image.width(), image.height(), image.format());
/// # Ok::<(), imageplugins::TradeError>(())
/// ```
#[derive(Default)]
pub struct CodecImageImporter {
    limits: Limits,
    opened: Option<OpenedImage>,
}

impl CodecImageImporter {
    pub const NAME: &'static str = "CodecImageImporter";

    pub fn new() -> Self {
        Self::default()
    }

    /// Importer that refuses images exceeding `limits`.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            limits,
            opened: None,
        }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Container format of the opened image.
    pub fn format(&self) -> Option<ImageFormat> {
        self.opened.as_ref().map(|opened| opened.format)
    }

    fn open_error(&self, operation: &'static str, code: ErrorCode) -> TradeError {
        let err = TradeError::Open {
            plugin: Self::NAME,
            operation,
            code,
        };
        tracing::error!("{err}");
        err
    }

    fn load(
        &mut self,
        operation: &'static str,
        format: ImageFormat,
        data: &[u8],
    ) -> Result<(), TradeError> {
        let frame = codecs::decode(format, data, &self.limits)
            .map_err(|code| self.open_error(operation, code))?;

        tracing::debug!(
            ?format,
            width = frame.width,
            height = frame.height,
            layout = ?frame.layout,
            "opened image"
        );

        let image = to_host(frame).map_err(|err| {
            tracing::error!("{}::{operation}(): {err}", Self::NAME);
            err
        })?;
        self.opened = Some(OpenedImage { format, image });
        Ok(())
    }

    fn opened(&self, operation: &'static str) -> Result<&OpenedImage, TradeError> {
        self.opened.as_ref().ok_or_else(|| {
            let err = TradeError::NoImageOpen {
                plugin: Self::NAME,
                operation,
            };
            tracing::warn!("{err}");
            err
        })
    }

    fn check_index(&self, operation: &'static str, index: u32) -> Result<(), TradeError> {
        if index >= 1 {
            let err = TradeError::OutOfRange {
                plugin: Self::NAME,
                operation,
                what: "image",
                index,
                count: 1,
            };
            tracing::warn!("{err}");
            return Err(err);
        }
        Ok(())
    }
}

/// Flip a top-first codec frame into bottom-first host storage.
fn to_host(frame: DecodedFrame) -> Result<ImageData, TradeError> {
    let format = frame.layout.pixel_format();
    let alignment = if format.pixel_size() % 4 == 0 { 4 } else { 1 };
    // Tightly packed rows satisfy either alignment
    let storage = PixelStorage::new(alignment).unwrap_or_default();

    let row_len = frame.row_len();
    let mut data = Vec::with_capacity(frame.pixels.len());
    if row_len > 0 {
        for row in frame.pixels.chunks_exact(row_len).rev() {
            data.extend_from_slice(row);
        }
    }

    ImageData::new(storage, format, frame.width, frame.height, data)
}

impl ImageImporter for CodecImageImporter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn features(&self) -> ImporterFeatures {
        ImporterFeatures::OPEN_DATA
    }

    fn open_data(&mut self, data: &[u8]) -> Result<(), TradeError> {
        self.close();

        if data.is_empty() {
            return Err(self.open_error("open_data", ErrorCode::InvalidParam));
        }
        let format = ImageFormat::detect(data)
            .ok_or_else(|| self.open_error("open_data", ErrorCode::FileReadError))?;

        self.load("open_data", format, data)
    }

    fn open_file(&mut self, path: &Path) -> Result<(), TradeError> {
        self.close();

        let format = ImageFormat::from_path(path)
            .ok_or_else(|| self.open_error("open_file", ErrorCode::InvalidExtension))?;
        let data = std::fs::read(path).map_err(|err| {
            tracing::debug!(path = %path.display(), error = %err, "read failed");
            self.open_error("open_file", ErrorCode::CouldNotOpenFile)
        })?;

        self.load("open_file", format, &data)
    }

    fn close(&mut self) {
        self.opened = None;
    }

    fn is_opened(&self) -> bool {
        self.opened.is_some()
    }

    fn image2d_count(&self) -> u32 {
        u32::from(self.opened.is_some())
    }

    fn image2d_level_count(&self, index: u32) -> Result<u32, TradeError> {
        self.opened("image2d_level_count")?;
        self.check_index("image2d_level_count", index)?;
        Ok(1)
    }

    fn image2d(&self, index: u32, level: u32) -> Result<ImageData, TradeError> {
        let opened = self.opened("image2d")?;
        self.check_index("image2d", index)?;
        if level >= 1 {
            let err = TradeError::OutOfRange {
                plugin: Self::NAME,
                operation: "image2d",
                what: "level",
                index: level,
                count: 1,
            };
            tracing::warn!("{err}");
            return Err(err);
        }
        Ok(opened.image.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::NativeLayout;
    use crate::pixel::PixelFormat;

    #[test]
    fn rows_are_flipped() {
        let frame = DecodedFrame {
            pixels: vec![1, 2, 3, 4, 5, 6],
            width: 3,
            height: 2,
            layout: NativeLayout::Luminance,
        };
        let image = to_host(frame).unwrap();
        assert_eq!(image.format(), PixelFormat::R8Unorm);
        assert_eq!(image.storage().alignment(), 1);
        assert_eq!(image.data(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn rgba_gets_four_byte_alignment() {
        let frame = DecodedFrame {
            pixels: vec![0; 8],
            width: 1,
            height: 2,
            layout: NativeLayout::Rgba,
        };
        let image = to_host(frame).unwrap();
        assert_eq!(image.format(), PixelFormat::RGBA8Unorm);
        assert_eq!(image.storage().alignment(), 4);
    }

    #[test]
    fn queries_without_open_image() {
        let importer = CodecImageImporter::new();
        assert!(!importer.is_opened());
        assert_eq!(importer.image2d_count(), 0);
        assert_eq!(importer.format(), None);
        assert!(matches!(
            importer.image2d(0, 0),
            Err(TradeError::NoImageOpen { operation: "image2d", .. })
        ));
        assert!(matches!(
            importer.image2d_level_count(0),
            Err(TradeError::NoImageOpen { .. })
        ));
    }

    #[test]
    fn empty_data_is_invalid_param() {
        let mut importer = CodecImageImporter::new();
        let err = importer.open_data(&[]).unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::InvalidParam));
        assert_eq!(
            err.to_string(),
            "CodecImageImporter::open_data(): cannot open the image: 0x509"
        );
    }

    #[test]
    fn garbage_is_file_read_error() {
        let mut importer = CodecImageImporter::new();
        let err = importer.open_data(b"invalid").unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::FileReadError));
        assert!(!importer.is_opened());
    }
}
