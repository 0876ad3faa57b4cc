//! PSD: "8BPS" + version 1; height then width as 32-bit big-endian at
//! offsets 14 and 18.

use std::io;

use super::Parsed;
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 22 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 22)?;
    if !buffer.matches(0, b"8BPS\x00\x01") {
        return Ok(None);
    }

    Ok(Some(Parsed::new(
        ImageFormat::Psd,
        i64::from(buffer.read_u32_be(18)),
        i64::from(buffer.read_u32_be(14)),
    )))
}

#[cfg(test)]
mod tests {
    use super::super::run;
    use super::*;

    #[test]
    fn reads_dimensions() {
        let mut data = vec![0u8; 22];
        data[..6].copy_from_slice(b"8BPS\x00\x01");
        data[14..18].copy_from_slice(&456u32.to_be_bytes()); // height
        data[18..22].copy_from_slice(&123u32.to_be_bytes()); // width

        let parsed = run(probe, &data).unwrap();
        assert_eq!(parsed.format, ImageFormat::Psd);
        assert_eq!(parsed.size.width, 123);
        assert_eq!(parsed.size.height, 456);
    }

    #[test]
    fn rejects_psb_version() {
        // version 2 is PSB, not PSD
        let mut data = vec![0u8; 22];
        data[..6].copy_from_slice(b"8BPS\x00\x02");
        assert!(run(probe, &data).is_none());
    }
}
