//! # imageplugins
//!
//! Image importer and converter plugins that delegate to codec crates.
//!
//! [`CodecImageImporter`] opens PNG, JPEG, TGA, BMP and ICO files or buffers
//! and hands out the decoded image as [`ImageData`]. [`PngImageConverter`]
//! encodes an [`ImageView`] to PNG. Both speak the host's conventions:
//! rows are stored bottom row first, with a configurable row alignment.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use imageplugins::{CodecImageImporter, ImageConverter, ImageImporter, PngImageConverter};
//!
//! let data: &[u8] = &[]; // your image bytes
//! let mut importer = CodecImageImporter::new();
//! importer.open_data(data)?;
//! let image = importer.image2d(0, 0)?;
//!
//! let png = PngImageConverter::new().export_to_data(&image.as_view())?;
//! # Ok::<(), imageplugins::TradeError>(())
//! ```
//!
//! Plugins can also be looked up by name through [`PluginRegistry`].

#![forbid(unsafe_code)]

mod buffer;
mod codec_importer;
mod codecs;
pub mod config;
mod converter;
mod error;
mod format;
mod importer;
mod limits;
pub mod pixel;
mod png_converter;
mod registry;

pub use buffer::{ImageData, ImageView};
pub use codec_importer::CodecImageImporter;
pub use config::ConverterConfig;
pub use converter::{ConverterFeatures, ImageConverter};
pub use error::{ErrorCode, TradeError};
pub use format::ImageFormat;
pub use importer::{ImageImporter, ImporterFeatures};
pub use limits::Limits;
pub use pixel::{PixelFormat, PixelStorage};
pub use png_converter::PngImageConverter;
pub use registry::{ConverterFactory, ImporterFactory, PluginRegistry};
