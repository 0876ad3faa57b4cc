//! ICNS: "icns" magic + big-endian total length that must equal the actual
//! file length exactly. The body is a run of (4-byte type, 4-byte length)
//! chunks; each known type implies a fixed square icon size, and any
//! unknown type rejects the whole file — the table is strict, not
//! permissive.

use std::io;

use super::Parsed;
use crate::info::ImageSize;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

/// Icon size implied by a chunk type, or `None` for foreign chunks.
fn icon_size(chunk_type: &[u8]) -> Option<i64> {
    let size = match chunk_type {
        b"ICON" | b"ICN#" => 32,
        b"icm#" | b"icm4" | b"icm8" => 16,
        b"ics#" | b"ics4" | b"ics8" | b"is32" | b"s8mk" => 16,
        b"icl4" | b"icl8" | b"il32" | b"l8mk" => 32,
        b"ich#" | b"ich4" | b"ich8" | b"ih32" | b"h8mk" => 48,
        b"it32" | b"t8mk" => 128,
        b"icp4" => 16,
        b"icp5" => 32,
        b"icp6" => 64,
        b"ic07" => 128,
        b"ic08" => 256,
        b"ic09" => 512,
        b"ic10" => 1024,
        b"ic11" => 32,
        b"ic12" => 64,
        b"ic13" => 256,
        b"ic14" => 512,
        b"ic04" => 16,
        b"ic05" => 32,
        b"icsB" => 36,
        b"icsb" => 18,
        _ => return None,
    };
    Some(size)
}

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 8 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 8)?;
    if !buffer.matches(0, b"icns") || u64::from(buffer.read_u32_be(4)) != length {
        return Ok(None);
    }

    let mut max_size: i64 = 0;
    let mut entry_sizes = Vec::new();

    let mut offset: u64 = 8;
    while offset + 8 <= length {
        let buffer = ri.read_buffer(offset, 8)?;
        let Some(size) = icon_size(buffer.bytes(0, 4)) else {
            return Ok(None);
        };
        entry_sizes.push(ImageSize::new(size, size));
        max_size = max_size.max(size);

        let entry_length = u64::from(buffer.read_u32_be(4));
        // a chunk claiming less than its own header would stall the walk
        if entry_length < 8 {
            return Ok(None);
        }
        offset += entry_length;
    }

    Ok(Some(Parsed::with_entries(
        ImageFormat::Icns,
        ImageSize::new(max_size, max_size),
        entry_sizes,
    )))
}
