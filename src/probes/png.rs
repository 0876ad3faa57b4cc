//! PNG: 8-byte signature, then chunks of (length, type, data, crc).
//!
//! The first chunk is normally IHDR with big-endian width/height at offsets
//! 16 and 20. Apple-optimized PNGs ("fried" PNGs from pngcrush -iphone)
//! prepend a CgBI chunk, pushing IHDR one chunk further in.

use std::io;

use super::Parsed;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 24 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, length.min(40) as usize)?;
    if !buffer.matches(0, b"\x89PNG") {
        return Ok(None);
    }

    if buffer.matches(12, b"IHDR") {
        return Ok(Some(Parsed::new(
            ImageFormat::Png,
            i64::from(buffer.read_u32_be(16)),
            i64::from(buffer.read_u32_be(20)),
        )));
    }
    if buffer.matches(12, b"CgBI") && buffer.len() >= 40 && buffer.matches(28, b"IHDR") {
        return Ok(Some(Parsed::new(
            ImageFormat::Png,
            i64::from(buffer.read_u32_be(32)),
            i64::from(buffer.read_u32_be(36)),
        )));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::super::run;
    use super::*;

    const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn ihdr_sample(width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0u8; 33];
        data[..8].copy_from_slice(&SIGNATURE);
        data[8..12].copy_from_slice(&13u32.to_be_bytes());
        data[12..16].copy_from_slice(b"IHDR");
        data[16..20].copy_from_slice(&width.to_be_bytes());
        data[20..24].copy_from_slice(&height.to_be_bytes());
        data
    }

    #[test]
    fn reads_ihdr_dimensions() {
        let parsed = run(probe, &ihdr_sample(123, 456)).unwrap();
        assert_eq!(parsed.format, ImageFormat::Png);
        assert_eq!(parsed.size.width, 123);
        assert_eq!(parsed.size.height, 456);
    }

    #[test]
    fn reads_apple_cgbi_variant() {
        // signature + CgBI chunk (4 data bytes) + IHDR
        let mut data = vec![0u8; 44];
        data[..8].copy_from_slice(&SIGNATURE);
        data[8..12].copy_from_slice(&4u32.to_be_bytes());
        data[12..16].copy_from_slice(b"CgBI");
        // 4 data bytes + 4 crc bytes, then the real IHDR chunk at 24
        data[24..28].copy_from_slice(&13u32.to_be_bytes());
        data[28..32].copy_from_slice(b"IHDR");
        data[32..36].copy_from_slice(&128u32.to_be_bytes());
        data[36..40].copy_from_slice(&68u32.to_be_bytes());

        let parsed = run(probe, &data).unwrap();
        assert_eq!(parsed.size.width, 128);
        assert_eq!(parsed.size.height, 68);
    }

    #[test]
    fn rejects_truncated_ihdr() {
        let mut data = ihdr_sample(123, 456);
        data.truncate(20);
        assert!(run(probe, &data).is_none());
    }

    #[test]
    fn rejects_unexpected_first_chunk() {
        let mut data = ihdr_sample(123, 456);
        data[12..16].copy_from_slice(b"pLTE");
        assert!(run(probe, &data).is_none());
    }
}
