//! PNG converter using the png crate encoder.

use crate::codecs::{self, NativeLayout};
use crate::converter::{ConverterFeatures, ImageConverter};
use crate::{ConverterConfig, ImageView, TradeError};

/// Encodes 8-bit grayscale, gray+alpha, RGB and RGBA images to PNG.
///
/// Input rows are bottom row first; the PNG is written top row first with
/// any row padding dropped.
#[derive(Clone, Debug, Default)]
pub struct PngImageConverter {
    config: ConverterConfig,
}

impl PngImageConverter {
    pub const NAME: &'static str = "PngImageConverter";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }
}

impl ImageConverter for PngImageConverter {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn features(&self) -> ConverterFeatures {
        ConverterFeatures::CONVERT_DATA
    }

    fn export_to_data(&self, image: &ImageView<'_>) -> Result<Vec<u8>, TradeError> {
        if image.storage().swap_bytes() {
            let err = TradeError::ByteSwapUnsupported { plugin: Self::NAME };
            tracing::error!("{err}");
            return Err(err);
        }

        let layout = NativeLayout::from_pixel_format(image.format()).ok_or_else(|| {
            let err = TradeError::UnsupportedFormat {
                plugin: Self::NAME,
                format: image.format(),
            };
            tracing::error!("{err}");
            err
        })?;

        if image.width() == 0 || image.height() == 0 {
            return Err(TradeError::InvalidInput(format!(
                "cannot encode a {}x{} image",
                image.width(),
                image.height()
            )));
        }

        let mut pixels = Vec::with_capacity(image.row_len() * image.height() as usize);
        for row in image.rows().rev() {
            pixels.extend_from_slice(row);
        }

        let encoded = codecs::png::encode(
            &pixels,
            image.width(),
            image.height(),
            layout,
            &self.config,
        )
        .map_err(|source| {
            tracing::error!(error = %source, "{}::export_to_data(): encoding failed", Self::NAME);
            TradeError::Encode {
                plugin: Self::NAME,
                source,
            }
        })?;

        tracing::debug!(
            width = image.width(),
            height = image.height(),
            format = %image.format(),
            bytes = encoded.len(),
            "encoded png"
        );
        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::{PixelFormat, PixelStorage};

    fn decode_rows(png: &[u8]) -> (png::OutputInfo, Vec<u8>) {
        let decoder = png::Decoder::new(std::io::Cursor::new(png));
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size().unwrap()];
        let info = reader.next_frame(&mut buf).unwrap();
        buf.truncate(info.buffer_size());
        (info, buf)
    }

    #[test]
    fn rows_written_top_first_without_padding() {
        // 1x2 RGB, bottom row first, each row padded to 4 bytes
        let data = [1, 2, 3, 0, 4, 5, 6, 0];
        let view = ImageView::new(PixelFormat::RGB8Unorm, 1, 2, &data).unwrap();
        let png = PngImageConverter::new().export_to_data(&view).unwrap();

        let (info, pixels) = decode_rows(&png);
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(pixels, vec![4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn rejects_wide_formats() {
        let data = [0u8; 8];
        let view = ImageView::new(PixelFormat::RGBA16Unorm, 1, 1, &data).unwrap();
        let err = PngImageConverter::new().export_to_data(&view).unwrap_err();
        assert!(matches!(
            err,
            TradeError::UnsupportedFormat {
                format: PixelFormat::RGBA16Unorm,
                ..
            }
        ));
    }

    #[test]
    fn rejects_swapped_bytes() {
        let data = [0u8; 4];
        let storage = PixelStorage::default().with_swap_bytes(true);
        let view = ImageView::with_storage(storage, PixelFormat::RGBA8Unorm, 1, 1, &data).unwrap();
        let err = PngImageConverter::new().export_to_data(&view).unwrap_err();
        assert!(matches!(err, TradeError::ByteSwapUnsupported { .. }));
    }

    #[test]
    fn rejects_empty_image() {
        let view = ImageView::new(PixelFormat::R8Unorm, 0, 0, &[]).unwrap();
        let err = PngImageConverter::new().export_to_data(&view).unwrap_err();
        assert!(matches!(err, TradeError::InvalidInput(_)));
    }
}
