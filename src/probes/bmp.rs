//! BMP: "BM" + file header (14) + the first fields of the info header.
//!
//! Width and height are signed 32-bit little-endian at offsets 18 and 22.
//! A negative height means a top-down row order, not a negative size.

use std::io;

use super::Parsed;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 26 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 26)?;
    if !buffer.matches(0, b"BM") {
        return Ok(None);
    }

    let width = i64::from(buffer.read_i32_le(18));
    let height = i64::from(buffer.read_i32_le(22)).abs();
    Ok(Some(Parsed::new(ImageFormat::Bmp, width, height)))
}

#[cfg(test)]
mod tests {
    use super::super::run;
    use super::*;

    fn sample(width: i32, height: i32) -> Vec<u8> {
        let mut data = vec![0u8; 26];
        data[..2].copy_from_slice(b"BM");
        data[18..22].copy_from_slice(&width.to_le_bytes());
        data[22..26].copy_from_slice(&height.to_le_bytes());
        data
    }

    #[test]
    fn reads_dimensions() {
        let parsed = run(probe, &sample(123, 456)).unwrap();
        assert_eq!(parsed.format, ImageFormat::Bmp);
        assert_eq!(parsed.size.width, 123);
        assert_eq!(parsed.size.height, 456);
    }

    #[test]
    fn negative_height_is_flipped_to_positive() {
        let parsed = run(probe, &sample(123, -456)).unwrap();
        assert_eq!(parsed.size.width, 123);
        assert_eq!(parsed.size.height, 456);
    }

    #[test]
    fn rejects_wrong_magic_and_truncation() {
        assert!(run(probe, b"XX").is_none());
        let mut data = sample(1, 1);
        data.truncate(20);
        assert!(run(probe, &data).is_none());
    }
}
