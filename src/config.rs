//! Converter configuration.
//!
//! [`ConverterConfig`] carries the encoder knobs a converter passes to its
//! codec. Fields left `None` keep the codec's own defaults.

/// PNG encoder settings, re-exported from the `png` crate.
pub mod png_codec {
    pub use png::{Compression, Filter};
}

/// Encoder overrides for [`PngImageConverter`](crate::PngImageConverter).
///
/// # Example
///
/// ```
/// use imageplugins::{ConverterConfig, PngImageConverter};
/// use imageplugins::config::png_codec::Compression;
///
/// let config = ConverterConfig::default().with_png_compression(Compression::Fast);
/// let converter = PngImageConverter::with_config(config);
/// ```
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub struct ConverterConfig {
    /// PNG compression level.
    pub png_compression: Option<png::Compression>,

    /// PNG filter strategy.
    pub png_filter: Option<png::Filter>,
}

impl ConverterConfig {
    /// Set PNG compression level.
    pub fn with_png_compression(mut self, compression: png::Compression) -> Self {
        self.png_compression = Some(compression);
        self
    }

    /// Set PNG filter strategy.
    pub fn with_png_filter(mut self, filter: png::Filter) -> Self {
        self.png_filter = Some(filter);
        self
    }
}
