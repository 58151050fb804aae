//! ICO codec adapter using the `image` crate's ICO decoder.
//!
//! An icon holds several entries, each an embedded BMP or PNG. Only the first
//! directory entry is exposed. The decoder on its own would pick the largest,
//! so multi-entry icons are cut down to a one-entry icon before decoding.

use std::borrow::Cow;

use ::image::codecs::ico::IcoDecoder;

use super::{DecodedFrame, cursor, decode_with, image_error};
use crate::{ErrorCode, Limits};

const DIR_LEN: usize = 6;
const ENTRY_LEN: usize = 16;

pub(crate) fn decode(data: &[u8], limits: &Limits) -> Result<DecodedFrame, ErrorCode> {
    let icon = first_entry(data)?;
    let decoder = IcoDecoder::new(cursor(&icon)).map_err(image_error)?;
    decode_with(decoder, limits)
}

fn le_u32(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Icon containing only the first directory entry of `data`.
fn first_entry(data: &[u8]) -> Result<Cow<'_, [u8]>, ErrorCode> {
    let header = data
        .get(..DIR_LEN + ENTRY_LEN)
        .ok_or(ErrorCode::InvalidFileHeader)?;
    let count = u16::from_le_bytes([header[4], header[5]]);
    match count {
        0 => return Err(ErrorCode::InvalidFileHeader),
        1 => return Ok(Cow::Borrowed(data)),
        _ => {}
    }

    let entry = &header[DIR_LEN..];
    let size = le_u32(&entry[8..12]) as usize;
    let offset = le_u32(&entry[12..16]) as usize;
    let payload = offset
        .checked_add(size)
        .and_then(|end| data.get(offset..end))
        .ok_or(ErrorCode::FileReadError)?;
    tracing::debug!(entries = count, size, offset, "using first icon entry");

    let mut icon = Vec::with_capacity(DIR_LEN + ENTRY_LEN + payload.len());
    icon.extend_from_slice(&header[..4]);
    icon.extend_from_slice(&1u16.to_le_bytes());
    icon.extend_from_slice(&entry[..12]);
    icon.extend_from_slice(&((DIR_LEN + ENTRY_LEN) as u32).to_le_bytes());
    icon.extend_from_slice(payload);
    Ok(Cow::Owned(icon))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon(entries: &[(u8, u8, &[u8])]) -> Vec<u8> {
        let mut data = vec![0, 0, 1, 0];
        data.extend_from_slice(&(entries.len() as u16).to_le_bytes());
        let mut offset = DIR_LEN + ENTRY_LEN * entries.len();
        for (width, height, payload) in entries {
            data.extend_from_slice(&[*width, *height, 0, 0, 1, 0, 32, 0]);
            data.extend_from_slice(&(payload.len() as u32).to_le_bytes());
            data.extend_from_slice(&(offset as u32).to_le_bytes());
            offset += payload.len();
        }
        for (_, _, payload) in entries {
            data.extend_from_slice(payload);
        }
        data
    }

    #[test]
    fn single_entry_is_borrowed() {
        let data = icon(&[(16, 8, &b"payload"[..])]);
        assert!(matches!(first_entry(&data), Ok(Cow::Borrowed(_))));
    }

    #[test]
    fn first_of_several_entries() {
        let data = icon(&[(16, 8, &b"first"[..]), (32, 16, &b"second entry"[..])]);
        let cut = first_entry(&data).unwrap();
        assert_eq!(&*cut, icon(&[(16, 8, &b"first"[..])]).as_slice());
    }

    #[test]
    fn entry_past_end_of_data() {
        let mut data = icon(&[(16, 8, &b"first"[..]), (32, 16, &b"second"[..])]);
        data.truncate(data.len() - 8);
        assert_eq!(first_entry(&data).unwrap_err(), ErrorCode::FileReadError);
    }

    #[test]
    fn truncated_directory() {
        assert_eq!(
            first_entry(&[0, 0, 1, 0, 2, 0, 16]).unwrap_err(),
            ErrorCode::InvalidFileHeader
        );
        let mut data = icon(&[(16, 8, &b"first"[..])]);
        data[4] = 0;
        assert_eq!(first_entry(&data).unwrap_err(), ErrorCode::InvalidFileHeader);
    }
}
