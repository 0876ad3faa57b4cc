//! TIFF: byte-order marker ("II*\0" little, "MM\0*" big), then an offset to
//! the first IFD, whose 12-byte entries are scanned for tag 256
//! (ImageWidth) and 257 (ImageLength). The entry's type field decides the
//! read width: SHORT (3) or LONG (4).

use std::io;

use super::Parsed;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 8 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 8)?;
    if !buffer.matches_any(0, &[b"\x49\x49\x2A\x00", b"\x4D\x4D\x00\x2A"]) {
        return Ok(None);
    }
    let big_endian = buffer.read_u8(0) == 0x4D;

    let mut offset = u64::from(buffer.read_u32_with(4, big_endian));
    if length < offset + 2 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(offset, 2)?;
    let entry_count = buffer.read_u16_with(0, big_endian);
    offset += 2;

    let mut width: i64 = -1;
    let mut height: i64 = -1;
    for _ in 0..entry_count {
        if width != -1 && height != -1 {
            break;
        }
        if offset + 12 > length {
            break;
        }
        let entry = ri.read_buffer(offset, 12)?;
        let tag = entry.read_u16_with(0, big_endian);
        let field_type = entry.read_u16_with(2, big_endian);
        let value = match field_type {
            3 => Some(i64::from(entry.read_u16_with(8, big_endian))),
            4 => Some(i64::from(entry.read_u32_with(8, big_endian))),
            _ => None,
        };
        match (tag, value) {
            (256, Some(v)) => width = v,
            (257, Some(v)) => height = v,
            _ => {}
        }
        offset += 12;
    }

    if width == -1 || height == -1 {
        return Ok(None);
    }
    Ok(Some(Parsed::new(ImageFormat::Tiff, width, height)))
}
