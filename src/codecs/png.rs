//! PNG codec adapter using png crate.
//!
//! Decoding expands palettes and low bit depths and strips 16-bit channels,
//! so the output is always 8 bits per channel.

use super::{DecodedFrame, NativeLayout, cursor};
use crate::{ConverterConfig, ErrorCode, Limits};

/// Decode PNG to pixels.
pub(crate) fn decode(data: &[u8], limits: &Limits) -> Result<DecodedFrame, ErrorCode> {
    let mut decoder = ::png::Decoder::new(cursor(data));
    decoder.set_transformations(::png::Transformations::EXPAND | ::png::Transformations::STRIP_16);

    let mut reader = decoder.read_info().map_err(decoding_error)?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    limits.check_dimensions(width, height)?;

    let buffer_size = reader.output_buffer_size().ok_or(ErrorCode::BadDimensions)?;
    limits.check_memory(buffer_size as u64)?;
    let mut pixels = vec![0u8; buffer_size];

    let output_info = reader.next_frame(&mut pixels).map_err(decoding_error)?;
    pixels.truncate(output_info.buffer_size());

    if output_info.bit_depth != ::png::BitDepth::Eight {
        return Err(ErrorCode::FormatNotSupported);
    }

    let layout = match output_info.color_type {
        ::png::ColorType::Grayscale => NativeLayout::Luminance,
        ::png::ColorType::GrayscaleAlpha => NativeLayout::LuminanceAlpha,
        ::png::ColorType::Rgb => NativeLayout::Rgb,
        ::png::ColorType::Rgba => NativeLayout::Rgba,
        // EXPAND turns palettes into RGB/RGBA
        ::png::ColorType::Indexed => return Err(ErrorCode::FormatNotSupported),
    };

    // Rows could carry per-line padding if line_size disagrees
    let row_len = width as usize * layout.channels();
    if output_info.line_size != row_len {
        pixels = pixels
            .chunks_exact(output_info.line_size)
            .flat_map(|line| &line[..row_len])
            .copied()
            .collect();
    }

    Ok(DecodedFrame {
        pixels,
        width,
        height,
        layout,
    })
}

/// Encode tightly packed, top-row-first 8-bit pixels to PNG.
pub(crate) fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: NativeLayout,
    config: &ConverterConfig,
) -> Result<Vec<u8>, ::png::EncodingError> {
    let color = match layout {
        NativeLayout::Luminance => ::png::ColorType::Grayscale,
        NativeLayout::LuminanceAlpha => ::png::ColorType::GrayscaleAlpha,
        NativeLayout::Rgb => ::png::ColorType::Rgb,
        NativeLayout::Rgba => ::png::ColorType::Rgba,
    };

    let mut output = Vec::new();
    let mut encoder = ::png::Encoder::new(&mut output, width, height);
    encoder.set_color(color);
    encoder.set_depth(::png::BitDepth::Eight);
    if let Some(compression) = config.png_compression {
        encoder.set_compression(compression);
    }
    if let Some(filter) = config.png_filter {
        encoder.set_filter(filter);
    }

    let mut writer = encoder.write_header()?;
    writer.write_image_data(pixels)?;
    writer.finish()?;

    Ok(output)
}

fn decoding_error(err: ::png::DecodingError) -> ErrorCode {
    tracing::debug!(error = %err, "png decoder failed");
    #[allow(unreachable_patterns)]
    match err {
        ::png::DecodingError::IoError(_) => ErrorCode::FileReadError,
        ::png::DecodingError::Format(_) => ErrorCode::IllegalFileValue,
        ::png::DecodingError::Parameter(_) => ErrorCode::InvalidParam,
        ::png::DecodingError::LimitsExceeded => ErrorCode::OutOfMemory,
        _ => ErrorCode::InternalError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_decode_gray_alpha() {
        let pixels = [10, 255, 20, 128, 30, 0, 40, 64];
        let encoded = encode(
            &pixels,
            2,
            2,
            NativeLayout::LuminanceAlpha,
            &ConverterConfig::default(),
        )
        .unwrap();

        let frame = decode(&encoded, &Limits::none()).unwrap();
        assert_eq!((frame.width, frame.height), (2, 2));
        assert_eq!(frame.layout, NativeLayout::LuminanceAlpha);
        assert_eq!(frame.pixels, pixels);
    }

    #[test]
    fn sixteen_bit_is_stripped() {
        let mut encoded = Vec::new();
        {
            let mut encoder = ::png::Encoder::new(&mut encoded, 1, 1);
            encoder.set_color(::png::ColorType::Grayscale);
            encoder.set_depth(::png::BitDepth::Sixteen);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0xAB, 0xCD]).unwrap();
            writer.finish().unwrap();
        }

        let frame = decode(&encoded, &Limits::none()).unwrap();
        assert_eq!(frame.layout, NativeLayout::Luminance);
        assert_eq!(frame.pixels, vec![0xAB]);
    }

    #[test]
    fn truncated_stream() {
        let encoded = encode(&[1, 2, 3], 1, 1, NativeLayout::Rgb, &ConverterConfig::default())
            .unwrap();
        let result = decode(&encoded[..encoded.len() / 2], &Limits::none());
        assert!(result.is_err());
    }

    #[test]
    fn limits_checked_before_allocation() {
        let encoded = encode(
            &[0; 12],
            2,
            2,
            NativeLayout::Rgb,
            &ConverterConfig::default(),
        )
        .unwrap();
        let limits = Limits::none().with_max_pixels(3);
        assert_eq!(
            decode(&encoded, &limits).unwrap_err(),
            ErrorCode::BadDimensions
        );
    }
}
