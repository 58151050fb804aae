//! TGA codec adapter using the `image` crate's TGA decoder.
//!
//! TGA stores true-color pixels as BGR/BGRA and usually bottom row first.
//! The decoder reorders channels to RGB/RGBA and emits the top row first.

use ::image::codecs::tga::TgaDecoder;

use super::{DecodedFrame, cursor, decode_with, image_error};
use crate::{ErrorCode, Limits};

pub(crate) fn decode(data: &[u8], limits: &Limits) -> Result<DecodedFrame, ErrorCode> {
    let decoder = TgaDecoder::new(cursor(data)).map_err(image_error)?;
    decode_with(decoder, limits)
}
