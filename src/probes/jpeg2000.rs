//! JPEG 2000 box container (JP2/JPH/JPX): signature box "jP  ", an "ftyp"
//! box whose brand picks the specific format, then a box walk for
//! "jp2h" → "ihdr" holding big-endian height then width.

use std::io;

use super::Parsed;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 8 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 8)?;
    if !buffer.matches(4, b"jP  ") {
        return Ok(None);
    }

    let mut offset = u64::from(buffer.read_u32_be(0));
    if length < offset + 12 {
        return Ok(None);
    }

    let buffer = ri.read_buffer(offset, 12)?;
    if !buffer.matches(4, b"ftyp") {
        return Ok(None);
    }
    let format = if buffer.matches(8, b"jp2 ") {
        ImageFormat::Jp2
    } else if buffer.matches(8, b"jph ") {
        ImageFormat::Jph
    } else if buffer.matches(8, b"jpx ") {
        ImageFormat::Jpx
    } else {
        return Ok(None);
    };

    let ftyp_length = u64::from(buffer.read_u32_be(0));
    offset += ftyp_length;

    while offset + 24 <= length {
        let buffer = ri.read_buffer(offset, 24)?;
        if buffer.matches(4, b"jp2h") {
            if buffer.matches(12, b"ihdr") {
                return Ok(Some(Parsed::new(
                    format,
                    i64::from(buffer.read_u32_be(20)),
                    i64::from(buffer.read_u32_be(16)),
                )));
            }
            return Ok(None);
        }
        let box_length = u64::from(buffer.read_u32_be(0));
        // a zero-length claim would stall the walk
        if box_length == 0 {
            return Ok(None);
        }
        offset += box_length;
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::super::run;
    use super::*;

    fn sample(brand: &[u8; 4], width: u32, height: u32) -> Vec<u8> {
        let mut data = Vec::new();
        // signature box
        data.extend_from_slice(&12u32.to_be_bytes());
        data.extend_from_slice(b"jP  ");
        data.extend_from_slice(&[0x0D, 0x0A, 0x87, 0x0A]);
        // ftyp box
        data.extend_from_slice(&20u32.to_be_bytes());
        data.extend_from_slice(b"ftyp");
        data.extend_from_slice(brand);
        data.extend_from_slice(&0u32.to_be_bytes());
        data.extend_from_slice(brand);
        // jp2h box wrapping ihdr
        data.extend_from_slice(&22u32.to_be_bytes());
        data.extend_from_slice(b"jp2h");
        data.extend_from_slice(&14u32.to_be_bytes());
        data.extend_from_slice(b"ihdr");
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&width.to_be_bytes());
        // padding so the 24-byte window read always fits
        data.extend_from_slice(&[0u8; 8]);
        data
    }

    #[test]
    fn discriminates_brands() {
        let parsed = run(probe, &sample(b"jp2 ", 123, 456)).unwrap();
        assert_eq!(parsed.format, ImageFormat::Jp2);
        assert_eq!(parsed.size.width, 123);
        assert_eq!(parsed.size.height, 456);

        assert_eq!(
            run(probe, &sample(b"jph ", 1, 1)).unwrap().format,
            ImageFormat::Jph
        );
        assert_eq!(
            run(probe, &sample(b"jpx ", 1, 1)).unwrap().format,
            ImageFormat::Jpx
        );
        assert!(run(probe, &sample(b"mjp2", 1, 1)).is_none());
    }

    #[test]
    fn skips_boxes_before_jp2h() {
        let mut data = sample(b"jp2 ", 123, 456);
        // splice an unrelated 16-byte box between ftyp and jp2h
        let mut boxed = data[..32].to_vec();
        boxed.extend_from_slice(&16u32.to_be_bytes());
        boxed.extend_from_slice(b"uuid");
        boxed.extend_from_slice(&[0u8; 8]);
        boxed.extend_from_slice(&data[32..]);
        data = boxed;

        let parsed = run(probe, &data).unwrap();
        assert_eq!(parsed.size.width, 123);
        assert_eq!(parsed.size.height, 456);
    }

    #[test]
    fn rejects_zero_length_box_claim() {
        let mut data = sample(b"jp2 ", 123, 456);
        // turn the jp2h box into a zero-length unrelated box
        data[32..36].copy_from_slice(&0u32.to_be_bytes());
        data[36..40].copy_from_slice(b"uuid");
        assert!(run(probe, &data).is_none());
    }

    #[test]
    fn rejects_jp2h_without_ihdr() {
        let mut data = sample(b"jp2 ", 123, 456);
        data[44..48].copy_from_slice(b"colr");
        assert!(run(probe, &data).is_none());
    }
}
