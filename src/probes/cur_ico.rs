//! ICO/CUR: shared directory grammar, distinguished by the type word in the
//! 4-byte magic (1 = icon, 2 = cursor). 16-byte directory entries follow;
//! a zero in a byte-sized dimension field means 256. The sum of each
//! entry's declared byte size is checked against the file length to catch
//! truncated containers.

use std::io;

use super::Parsed;
use crate::info::ImageSize;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

const ENTRY_SIZE: usize = 16;

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 6 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 6)?;
    let format = if buffer.matches(0, b"\x00\x00\x01\x00") {
        ImageFormat::Ico
    } else if buffer.matches(0, b"\x00\x00\x02\x00") {
        ImageFormat::Cur
    } else {
        return Ok(None);
    };

    let entry_count = buffer.read_u16_le(4);
    if entry_count == 0 {
        return Ok(None);
    }
    let entry_total = u64::from(entry_count) * ENTRY_SIZE as u64;

    let mut offset: u64 = 6;
    if length < offset + entry_total {
        return Ok(None);
    }
    let buffer = ri.read_buffer(offset, entry_total as usize)?;
    offset += entry_total;

    let mut sizes = Vec::with_capacity(usize::from(entry_count));
    for i in 0..usize::from(entry_count) {
        let w = buffer.read_u8(i * ENTRY_SIZE);
        let h = buffer.read_u8(i * ENTRY_SIZE + 1);
        sizes.push(ImageSize::new(
            if w == 0 { 256 } else { i64::from(w) },
            if h == 0 { 256 } else { i64::from(h) },
        ));

        let bytes = buffer.read_u32_le(i * ENTRY_SIZE + 8);
        offset += u64::from(bytes);
    }

    // declared payload sizes must fit in the file
    if length < offset {
        return Ok(None);
    }

    let primary = sizes[0];
    Ok(Some(Parsed::with_entries(format, primary, sizes)))
}

#[cfg(test)]
mod tests {
    use super::super::run;
    use super::*;

    /// Directory with entries of (width, height, payload bytes). Payload
    /// data is appended zero-filled so the declared sizes are satisfied.
    fn sample(type_word: u16, entries: &[(u8, u8, u32)]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&[0x00, 0x00]);
        data.extend_from_slice(&type_word.to_le_bytes());
        data.extend_from_slice(&(entries.len() as u16).to_le_bytes());
        let mut payload_total = 0usize;
        for &(w, h, bytes) in entries {
            data.push(w);
            data.push(h);
            data.extend_from_slice(&[0u8; 6]);
            data.extend_from_slice(&bytes.to_le_bytes());
            data.extend_from_slice(&0u32.to_le_bytes()); // payload offset
            payload_total += bytes as usize;
        }
        data.extend(std::iter::repeat(0u8).take(payload_total));
        data
    }

    #[test]
    fn ico_collects_every_entry() {
        let data = sample(1, &[(16, 16, 8), (32, 32, 8)]);
        let parsed = run(probe, &data).unwrap();
        assert_eq!(parsed.format, ImageFormat::Ico);
        assert_eq!(parsed.size, ImageSize::new(16, 16));
        assert_eq!(
            parsed.entry_sizes,
            vec![ImageSize::new(16, 16), ImageSize::new(32, 32)]
        );
    }

    #[test]
    fn cur_type_word_discriminates() {
        let data = sample(2, &[(32, 32, 4)]);
        let parsed = run(probe, &data).unwrap();
        assert_eq!(parsed.format, ImageFormat::Cur);
    }

    #[test]
    fn zero_dimension_byte_means_256() {
        let data = sample(1, &[(0, 0, 4)]);
        let parsed = run(probe, &data).unwrap();
        assert_eq!(parsed.size, ImageSize::new(256, 256));
    }

    #[test]
    fn rejects_empty_directory() {
        let data = sample(1, &[]);
        assert!(run(probe, &data).is_none());
    }

    #[test]
    fn rejects_declared_sizes_past_end_of_file() {
        let mut data = sample(1, &[(16, 16, 8)]);
        // claim a payload far larger than the file
        data[14..18].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());
        assert!(run(probe, &data).is_none());
    }

    #[test]
    fn rejects_truncated_directory() {
        let data = sample(1, &[(16, 16, 8), (32, 32, 8)]);
        assert!(run(probe, &data[..20]).is_none());
    }
}
