//! JPEG codec adapter using the `image` crate's JPEG decoder.

use ::image::codecs::jpeg::JpegDecoder;

use super::{DecodedFrame, cursor, decode_with, image_error};
use crate::{ErrorCode, Limits};

/// Decode JPEG to pixels. Grayscale stays single-channel, CMYK becomes RGB.
pub(crate) fn decode(data: &[u8], limits: &Limits) -> Result<DecodedFrame, ErrorCode> {
    let decoder = JpegDecoder::new(cursor(data)).map_err(image_error)?;
    decode_with(decoder, limits)
}
