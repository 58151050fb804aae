//! BMP codec adapter using the `image` crate's BMP decoder.
//!
//! Like TGA, BMP pixels are stored BGR/BGRA and bottom row first; the decoder
//! reorders to RGB/RGBA, top row first.

use ::image::codecs::bmp::BmpDecoder;

use super::{DecodedFrame, cursor, decode_with, image_error};
use crate::{ErrorCode, Limits};

pub(crate) fn decode(data: &[u8], limits: &Limits) -> Result<DecodedFrame, ErrorCode> {
    let decoder = BmpDecoder::new(cursor(data)).map_err(image_error)?;
    decode_with(decoder, limits)
}
