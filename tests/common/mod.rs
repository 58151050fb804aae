//! Fixture images built in memory.

#![allow(dead_code)]

use std::path::PathBuf;

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::{ExtendedColorType, ImageEncoder};

/// Encode top-row-first 8-bit pixels as PNG.
pub fn png(pixels: &[u8], width: u32, height: u32, color: png::ColorType) -> Vec<u8> {
    let mut out = Vec::new();
    let mut encoder = png::Encoder::new(&mut out, width, height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().unwrap();
    writer.write_image_data(pixels).unwrap();
    writer.finish().unwrap();
    out
}

/// 3x2 grayscale PNG. Top row `88 00 ff`, bottom row `ff 88 00`.
pub fn gray_png() -> Vec<u8> {
    png(&[0x88, 0x00, 0xff, 0xff, 0x88, 0x00], 3, 2, png::ColorType::Grayscale)
}

/// 3x2 RGB PNG.
pub fn rgb_png() -> Vec<u8> {
    png(
        &[
            0xca, 0xfe, 0x77, 0xde, 0xad, 0xb5, 0xca, 0xfe, 0x77, //
            0xde, 0xad, 0xb5, 0xca, 0xfe, 0x77, 0xde, 0xad, 0xb5,
        ],
        3,
        2,
        png::ColorType::Rgb,
    )
}

/// 3x2 RGBA PNG.
pub fn rgba_png() -> Vec<u8> {
    png(
        &[
            0xde, 0xad, 0xb5, 0xff, 0xca, 0xfe, 0x77, 0xff, 0x00, 0x00, 0x00, 0x00, //
            0xca, 0xfe, 0x77, 0xff, 0x00, 0x00, 0x00, 0x00, 0xde, 0xad, 0xb5, 0xff,
        ],
        3,
        2,
        png::ColorType::Rgba,
    )
}

/// Solid-color JPEG at maximum quality.
pub fn jpeg(value: &[u8], width: u32, height: u32, color: ExtendedColorType) -> Vec<u8> {
    let pixels: Vec<u8> = value
        .iter()
        .copied()
        .cycle()
        .take(value.len() * (width * height) as usize)
        .collect();
    let mut out = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, 100)
        .write_image(&pixels, width, height, color)
        .unwrap();
    out
}

/// 2x3 24-bit TGA, bottom-left origin. Stored BGR, bottom row first.
pub fn bgr_tga() -> Vec<u8> {
    vec![
        0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 3, 0, 24, 0, //
        1, 2, 3, 2, 3, 4, //
        3, 4, 5, 4, 5, 6, //
        5, 6, 7, 6, 7, 8,
    ]
}

/// 2x3 32-bit TGA with 8 alpha bits. Stored BGRA, bottom row first.
pub fn bgra_tga() -> Vec<u8> {
    vec![
        0, 0, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2, 0, 3, 0, 32, 8, //
        1, 2, 3, 4, 2, 3, 4, 5, //
        3, 4, 5, 6, 4, 5, 6, 7, //
        5, 6, 7, 8, 6, 7, 8, 9,
    ]
}

/// 2x2 24-bit BMP, bottom-up rows padded to 4 bytes.
pub fn bgr_bmp() -> Vec<u8> {
    let mut data = Vec::new();
    // File header
    data.extend_from_slice(b"BM");
    data.extend_from_slice(&70u32.to_le_bytes());
    data.extend_from_slice(&[0, 0, 0, 0]);
    data.extend_from_slice(&54u32.to_le_bytes());
    // BITMAPINFOHEADER
    data.extend_from_slice(&40u32.to_le_bytes());
    data.extend_from_slice(&2i32.to_le_bytes());
    data.extend_from_slice(&2i32.to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&24u16.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&16u32.to_le_bytes());
    data.extend_from_slice(&2835i32.to_le_bytes());
    data.extend_from_slice(&2835i32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    // Pixels
    data.extend_from_slice(&[1, 2, 3, 4, 5, 6, 0, 0]);
    data.extend_from_slice(&[7, 8, 9, 10, 11, 12, 0, 0]);
    data
}

/// Opaque red RGBA pixels, top row first, with a green top-left pixel.
fn icon_pixels(width: u32, height: u32) -> Vec<u8> {
    let mut pixels = [255u8, 0, 0, 255].repeat((width * height) as usize);
    pixels[..4].copy_from_slice(&[0, 255, 0, 255]);
    pixels
}

/// 16x8 RGBA icon with a single PNG entry. Top-left pixel is green, the
/// rest opaque red.
pub fn rgba_ico() -> Vec<u8> {
    let mut out = Vec::new();
    IcoEncoder::new(&mut out)
        .write_image(&icon_pixels(16, 8), 16, 8, ExtendedColorType::Rgba8)
        .unwrap();
    out
}

/// 32-bit DIB icon payload: BITMAPINFOHEADER with doubled height, BGRA rows
/// bottom row first, then a fully opaque AND mask.
fn dib_payload(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&40u32.to_le_bytes());
    data.extend_from_slice(&(width as i32).to_le_bytes());
    data.extend_from_slice(&(2 * height as i32).to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&32u16.to_le_bytes());
    data.extend_from_slice(&[0; 24]);

    let pixels = icon_pixels(width, height);
    for row in pixels.chunks_exact(width as usize * 4).rev() {
        for rgba in row.chunks_exact(4) {
            data.extend_from_slice(&[rgba[2], rgba[1], rgba[0], rgba[3]]);
        }
    }

    let mask_stride = (width as usize).div_ceil(32) * 4;
    data.resize(data.len() + mask_stride * height as usize, 0);
    data
}

fn png_frame(width: u32, height: u32) -> IcoFrame<'static> {
    IcoFrame::as_png(&icon_pixels(width, height), width, height, ExtendedColorType::Rgba8).unwrap()
}

fn bmp_frame(width: u32, height: u32) -> IcoFrame<'static> {
    IcoFrame::with_encoded(dib_payload(width, height), width, height, ExtendedColorType::Rgba8)
        .unwrap()
}

fn ico(frames: &[IcoFrame<'_>]) -> Vec<u8> {
    let mut out = Vec::new();
    IcoEncoder::new(&mut out).encode_images(frames).unwrap();
    out
}

/// 16x8 icon with a single BMP entry. Top-left pixel is green.
pub fn bmp_ico() -> Vec<u8> {
    ico(&[bmp_frame(16, 8)])
}

/// 16x8 BMP entry followed by a larger 32x16 PNG entry.
pub fn bmp_then_png_ico() -> Vec<u8> {
    ico(&[bmp_frame(16, 8), png_frame(32, 16)])
}

/// 16x8 PNG entry followed by a larger 32x16 PNG entry.
pub fn two_png_ico() -> Vec<u8> {
    ico(&[png_frame(16, 8), png_frame(32, 16)])
}

/// Scratch file path unique to this process and test.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("imageplugins-{}-{name}", std::process::id()))
}

/// Write `data` to a scratch file and return its path.
pub fn temp_file(name: &str, data: &[u8]) -> PathBuf {
    let path = temp_path(name);
    std::fs::write(&path, data).unwrap();
    path
}
