//! TGA: the weakest signature here, so this probe runs last in the
//! registry. New-style files carry a "TRUEVISION-XFILE.\0" footer in the
//! last 18 bytes; without it the 18-byte header's color-map and image-type
//! fields are validated against the combinations the format allows before
//! the width/height words are trusted. That second path is a heuristic —
//! false results are an accepted limitation of the format.

use std::io;

use super::Parsed;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 18 {
        return Ok(None);
    }

    let footer = ri.read_buffer(length - 18, 18)?;
    if footer.matches(0, b"TRUEVISION-XFILE.\x00") {
        if length < 18 + 16 {
            return Ok(None);
        }
        let header = ri.read_buffer(0, 18)?;
        return Ok(Some(Parsed::new(
            ImageFormat::Tga,
            i64::from(header.read_u16_le(12)),
            i64::from(header.read_u16_le(14)),
        )));
    }

    let header = ri.read_buffer(0, 18)?;
    let id_length = header.read_u8(0);
    if length < u64::from(id_length) + 18 {
        return Ok(None);
    }

    let color_map_type = header.read_u8(1);
    let image_type = header.read_u8(2);
    let first_color_map_entry = header.read_u16_le(3);
    let color_map_length = header.read_u16_le(5);
    let color_map_entry_size = header.read_u8(7);
    let width = i64::from(header.read_u16_le(12));
    let height = i64::from(header.read_u16_le(14));

    match color_map_type {
        0 => {
            // no color map: map parameters must be zeroed
            if matches!(image_type, 0 | 2 | 3 | 10 | 11 | 32 | 33)
                && first_color_map_entry == 0
                && color_map_length == 0
                && color_map_entry_size == 0
            {
                return Ok(Some(Parsed::new(ImageFormat::Tga, width, height)));
            }
        }
        1 => {
            if matches!(image_type, 1 | 9) {
                return Ok(Some(Parsed::new(ImageFormat::Tga, width, height)));
            }
        }
        _ => {}
    }

    Ok(None)
}
