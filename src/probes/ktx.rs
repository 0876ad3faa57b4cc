//! KTX 1: 12-byte magic; pixelWidth/pixelHeight as 32-bit little-endian at
//! offsets 36 and 40.

use std::io;

use super::Parsed;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

const MAGIC: &[u8] = b"\xABKTX 11\xBB\r\n\x1A\n";

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 44 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 44)?;
    if !buffer.matches(0, MAGIC) {
        return Ok(None);
    }

    Ok(Some(Parsed::new(
        ImageFormat::Ktx,
        i64::from(buffer.read_u32_le(36)),
        i64::from(buffer.read_u32_le(40)),
    )))
}
