//! JPEG 2000 raw codestream: SOC (FF 4F) immediately followed by SIZ
//! (FF 51). Xsiz/Ysiz are big-endian 32-bit at offsets 8 and 12.

use std::io;

use super::Parsed;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 16 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 16)?;
    if !buffer.matches(0, b"\xFF\x4F") || !buffer.matches(2, b"\xFF\x51") {
        return Ok(None);
    }

    let siz_length = u64::from(buffer.read_u16_be(4));
    if length < siz_length + 4 {
        return Ok(None);
    }

    Ok(Some(Parsed::new(
        ImageFormat::J2k,
        i64::from(buffer.read_u32_be(8)),
        i64::from(buffer.read_u32_be(12)),
    )))
}

#[cfg(test)]
mod tests {
    use super::super::run;
    use super::*;

    fn sample(width: u32, height: u32) -> Vec<u8> {
        let mut data = vec![0u8; 50];
        data[..2].copy_from_slice(b"\xFF\x4F");
        data[2..4].copy_from_slice(b"\xFF\x51");
        data[4..6].copy_from_slice(&41u16.to_be_bytes()); // SIZ length
        data[8..12].copy_from_slice(&width.to_be_bytes());
        data[12..16].copy_from_slice(&height.to_be_bytes());
        data
    }

    #[test]
    fn reads_siz_dimensions() {
        let parsed = run(probe, &sample(123, 456)).unwrap();
        assert_eq!(parsed.format, ImageFormat::J2k);
        assert_eq!(parsed.size.width, 123);
        assert_eq!(parsed.size.height, 456);
    }

    #[test]
    fn rejects_siz_claim_past_end() {
        let mut data = sample(123, 456);
        data[4..6].copy_from_slice(&60000u16.to_be_bytes());
        assert!(run(probe, &data).is_none());
    }

    #[test]
    fn rejects_missing_siz_marker() {
        let mut data = sample(123, 456);
        data[2..4].copy_from_slice(b"\xFF\x52");
        assert!(run(probe, &data).is_none());
    }
}
