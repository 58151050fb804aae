//! Error types for importer and converter operations.

use core::fmt;
use std::path::PathBuf;

use crate::pixel::PixelFormat;

/// Numeric error codes reported by the decoding layer.
///
/// The values follow the classic image-library error table, so diagnostics
/// printed by this crate carry the same hexadecimal codes hosts already know
/// how to interpret.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    InvalidEnum = 0x0501,
    OutOfMemory = 0x0502,
    FormatNotSupported = 0x0503,
    InternalError = 0x0504,
    InvalidValue = 0x0505,
    IllegalOperation = 0x0506,
    IllegalFileValue = 0x0507,
    InvalidFileHeader = 0x0508,
    InvalidParam = 0x0509,
    CouldNotOpenFile = 0x050A,
    InvalidExtension = 0x050B,
    BadDimensions = 0x0511,
    FileReadError = 0x0512,
}

impl ErrorCode {
    /// Raw numeric value.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Short human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::InvalidEnum => "invalid enum",
            ErrorCode::OutOfMemory => "out of memory",
            ErrorCode::FormatNotSupported => "format not supported",
            ErrorCode::InternalError => "internal error",
            ErrorCode::InvalidValue => "invalid value",
            ErrorCode::IllegalOperation => "illegal operation",
            ErrorCode::IllegalFileValue => "illegal file value",
            ErrorCode::InvalidFileHeader => "invalid file header",
            ErrorCode::InvalidParam => "invalid parameter",
            ErrorCode::CouldNotOpenFile => "could not open file",
            ErrorCode::InvalidExtension => "invalid extension",
            ErrorCode::BadDimensions => "bad dimensions",
            ErrorCode::FileReadError => "file read error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.code())
    }
}

/// Error type for importer and converter operations.
///
/// The `Display` output is the diagnostic line a host prints, prefixed with
/// the plugin name and the operation that failed, e.g.
/// `CodecImageImporter::open_data(): cannot open the image: 0x509`.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TradeError {
    /// Opening a file or buffer failed in the codec layer.
    #[error("{plugin}::{operation}(): cannot open the image: {code}")]
    Open {
        plugin: &'static str,
        operation: &'static str,
        code: ErrorCode,
    },

    /// A query or import was issued with nothing opened.
    #[error("{plugin}::{operation}(): no file opened")]
    NoImageOpen {
        plugin: &'static str,
        operation: &'static str,
    },

    /// An image or level index past the number the opened file holds.
    #[error("{plugin}::{operation}(): {what} {index} out of range for {count} entries")]
    OutOfRange {
        plugin: &'static str,
        operation: &'static str,
        what: &'static str,
        index: u32,
        count: u32,
    },

    /// Converter was given a pixel format it can't encode.
    #[error("{plugin}::export_to_data(): unsupported pixel format {format}")]
    UnsupportedFormat {
        plugin: &'static str,
        format: PixelFormat,
    },

    /// Converter was given a byte-swapped storage configuration.
    #[error("{plugin}::export_to_data(): pixel byte swap is not supported")]
    ByteSwapUnsupported { plugin: &'static str },

    /// The plugin lacks the feature the operation needs.
    #[error("{plugin}::{operation}(): feature not supported")]
    NotSupported {
        plugin: &'static str,
        operation: &'static str,
    },

    /// Caller-supplied image description is inconsistent with its data,
    /// or too large to address.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The PNG encoder rejected the image.
    #[error("{plugin}::export_to_data(): encoding failed: {source}")]
    Encode {
        plugin: &'static str,
        #[source]
        source: png::EncodingError,
    },

    #[error("cannot write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TradeError {
    /// Codec error code, if this is an open failure.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            TradeError::Open { code, .. } => Some(*code),
            _ => None,
        }
    }
}
