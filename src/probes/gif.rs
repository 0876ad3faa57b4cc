//! GIF: "GIF87a"/"GIF89a" + logical screen descriptor.
//!
//! Width and height are unsigned 16-bit little-endian at offsets 6 and 8.

use std::io;

use super::Parsed;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 10 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 10)?;
    if !buffer.matches_any(0, &[b"GIF87a", b"GIF89a"]) {
        return Ok(None);
    }

    Ok(Some(Parsed::new(
        ImageFormat::Gif,
        i64::from(buffer.read_u16_le(6)),
        i64::from(buffer.read_u16_le(8)),
    )))
}
