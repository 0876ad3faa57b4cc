//! QOI: "qoif" magic; width then height as 32-bit big-endian at offsets
//! 4 and 8.

use std::io;

use super::Parsed;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 12 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 12)?;
    if !buffer.matches(0, b"qoif") {
        return Ok(None);
    }

    Ok(Some(Parsed::new(
        ImageFormat::Qoi,
        i64::from(buffer.read_u32_be(4)),
        i64::from(buffer.read_u32_be(8)),
    )))
}
