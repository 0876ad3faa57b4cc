//! DDS: "DDS " magic; height then width as 32-bit little-endian at fixed
//! offsets 12 and 16.

use std::io;

use super::Parsed;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 20 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 20)?;
    if !buffer.matches(0, b"DDS ") {
        return Ok(None);
    }

    Ok(Some(Parsed::new(
        ImageFormat::Dds,
        i64::from(buffer.read_u32_le(16)),
        i64::from(buffer.read_u32_le(12)),
    )))
}
