//! Container format detection.

use std::path::Path;

/// Image container formats the importer can open.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Tga,
    Bmp,
    Ico,
}

impl ImageFormat {
    /// Every format the importer can open.
    pub const ALL: [ImageFormat; 5] = [
        ImageFormat::Png,
        ImageFormat::Jpeg,
        ImageFormat::Tga,
        ImageFormat::Bmp,
        ImageFormat::Ico,
    ];

    /// Detect format from magic bytes. Returns None if unrecognized.
    ///
    /// TGA has no signature, so it is tried last using a header sanity check.
    pub fn detect(data: &[u8]) -> Option<Self> {
        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(ImageFormat::Png);
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }

        // BMP: "BM" followed by the 14-byte file header
        if data.len() >= 14 && data.starts_with(b"BM") {
            return Some(ImageFormat::Bmp);
        }

        // ICO: reserved 0, type 1, at least one directory entry
        if data.len() >= 6
            && data[..4] == [0, 0, 1, 0]
            && u16::from_le_bytes([data[4], data[5]]) > 0
        {
            return Some(ImageFormat::Ico);
        }

        if looks_like_tga(data) {
            return Some(ImageFormat::Tga);
        }

        None
    }

    /// Detect format from file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    /// Detect format from the extension of a path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// MIME type string.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Tga => "image/x-tga",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Ico => "image/vnd.microsoft.icon",
        }
    }

    /// Common file extensions.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ImageFormat::Png => &["png"],
            ImageFormat::Jpeg => &["jpg", "jpeg", "jpe"],
            ImageFormat::Tga => &["tga", "icb", "vda", "vst"],
            ImageFormat::Bmp => &["bmp", "dib"],
            ImageFormat::Ico => &["ico"],
        }
    }

    /// Whether the container can hold more than one image.
    ///
    /// Only the first image is ever exposed.
    pub fn is_multi_image(self) -> bool {
        matches!(self, ImageFormat::Ico)
    }
}

/// Sanity-check an 18-byte TGA header.
fn looks_like_tga(data: &[u8]) -> bool {
    if data.len() < 18 {
        return false;
    }
    let color_map_type = data[1];
    let image_type = data[2];
    let width = u16::from_le_bytes([data[12], data[13]]);
    let height = u16::from_le_bytes([data[14], data[15]]);
    let pixel_depth = data[16];

    let type_ok = match color_map_type {
        0 => matches!(image_type, 2 | 3 | 10 | 11),
        1 => matches!(image_type, 1 | 9),
        _ => false,
    };

    type_ok && width != 0 && height != 0 && matches!(pixel_depth, 8 | 15 | 16 | 24 | 32)
}
