//! JPEG: SOI then a run of marker segments, each FF-marker plus a 16-bit
//! big-endian length. The first SOF0/SOF1/SOF2 segment carries height then
//! width. An APP1/Exif segment seen before it is walked for the Orientation
//! tag (274); orientations 5–8 are 90-degree rotations and swap the
//! reported dimensions. Bytes that are not a marker are skipped one at a
//! time — cameras pad and concatenate with abandon.

use std::io;

use super::Parsed;
use crate::buffer::Buffer;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 2 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 2)?;
    if !buffer.matches(0, b"\xFF\xD8") {
        return Ok(None);
    }

    let mut orientation: u16 = 1;
    let mut offset: u64 = 2;
    while offset + 9 <= length {
        let buffer = ri.read_buffer(offset, 9)?;
        if buffer.read_u8(0) != 0xFF {
            // garbage between segments; resynchronize byte by byte
            offset += 1;
            continue;
        }
        let section_size = u64::from(buffer.read_u16_be(2));

        if buffer.matches(0, b"\xFF\xE1") {
            if offset + section_size + 2 > length {
                return Ok(None);
            }
            let segment = ri.read_buffer(offset, (section_size + 2) as usize)?;
            if segment.len() >= 18 && segment.matches(4, b"Exif\0") {
                if let Some(value) = exif_orientation(&segment) {
                    orientation = value;
                } else {
                    return Ok(None);
                }
            }
            offset += section_size + 2;
            continue;
        }

        if buffer.matches_any(0, &[b"\xFF\xC0", b"\xFF\xC1", b"\xFF\xC2"]) {
            let mut width = i64::from(buffer.read_u16_be(7));
            let mut height = i64::from(buffer.read_u16_be(5));
            if matches!(orientation, 5..=8) {
                std::mem::swap(&mut width, &mut height);
            }
            return Ok(Some(Parsed::new(ImageFormat::Jpeg, width, height)));
        }

        offset += section_size + 2;
    }

    Ok(None)
}

/// Walk the main IFD of an Exif APP1 segment for tag 274 (Orientation).
///
/// Offsets are absolute into the segment buffer; the TIFF header starts at
/// byte 10 and declares its own endianness. Returns `None` when the IFD
/// claims run outside the segment — the caller rejects the file.
fn exif_orientation(segment: &Buffer) -> Option<u16> {
    let big_endian = !segment.matches(10, b"I");
    let segment_len = segment.len();

    let first_ifd = segment.read_u32_with(14, big_endian) as usize;
    if first_ifd < 8 || first_ifd.checked_add(12)? > segment_len {
        return None;
    }
    let entry_count = segment.read_u16_with(first_ifd + 10, big_endian);

    let mut orientation = 1;
    for i in 0..usize::from(entry_count) {
        let entry = first_ifd + 12 + i * 12;
        if entry + 12 > segment_len {
            return None;
        }
        if segment.read_u16_with(entry, big_endian) == 274 {
            orientation = segment.read_u16_with(entry + 8, big_endian);
        }
    }
    Some(orientation)
}
