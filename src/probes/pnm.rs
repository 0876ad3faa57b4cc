//! PNM family: a "P?" magic picks the specific format, then a text header.
//!
//! - P1/P4 (PBM), P2/P5 (PGM), P3/P6 (PPM) and PF/Pf (PFM): the first two
//!   whitespace-delimited numeric tokens after the magic are width and
//!   height; `#` starts a comment running to end of line.
//! - P7 (PAM): keyed header lines, `WIDTH n` / `HEIGHT n`, terminated by
//!   `ENDHDR`.
//!
//! Headers are scanned in fixed-size chunks like the HDR probe — the raster
//! behind them may be arbitrarily large.

use std::io;

use super::{parse_decimal, Parsed};
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

const PIECE: usize = 64;
// tokens and the PAM header are tiny in any well-formed file
const MAX_TOKEN: usize = 16;
const MAX_PAM_HEADER: usize = 4096;

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    // smallest viable header: magic, separator, "1 1"
    if length < 6 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 3)?;
    if buffer.read_u8(0) != b'P' {
        return Ok(None);
    }
    let format = match buffer.read_u8(1) {
        b'1' | b'4' => ImageFormat::Pbm,
        b'2' | b'5' => ImageFormat::Pgm,
        b'3' | b'6' => ImageFormat::Ppm,
        b'7' => ImageFormat::Pam,
        b'F' | b'f' => ImageFormat::Pfm,
        _ => return Ok(None),
    };
    if !buffer.read_u8(2).is_ascii_whitespace() {
        return Ok(None);
    }

    let dimensions = if format == ImageFormat::Pam {
        scan_pam_header(ri, length)?
    } else {
        scan_tokens(ri, length)?
    };
    let Some((width, height)) = dimensions else {
        return Ok(None);
    };
    if width == 0 || height == 0 {
        return Ok(None);
    }

    Ok(Some(Parsed::new(
        format,
        i64::from(width),
        i64::from(height),
    )))
}

/// First two numeric tokens after the magic (P1–P6, PF).
fn scan_tokens(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<(u32, u32)>> {
    let mut dims: Vec<u32> = Vec::with_capacity(2);
    let mut token: Vec<u8> = Vec::new();
    let mut in_comment = false;

    let mut offset: u64 = 2;
    'chunks: while offset < length {
        let take = (length - offset).min(PIECE as u64) as usize;
        let buffer = ri.read_buffer(offset, take)?;
        offset += take as u64;

        for &b in buffer.as_slice() {
            if in_comment {
                in_comment = b != b'\n';
                continue;
            }
            if b == b'#' || b.is_ascii_whitespace() {
                in_comment = b == b'#';
                if !token.is_empty() {
                    let Some(value) = parse_decimal(&token) else {
                        return Ok(None);
                    };
                    dims.push(value);
                    token.clear();
                    if dims.len() == 2 {
                        break 'chunks;
                    }
                }
                continue;
            }
            token.push(b);
            if token.len() > MAX_TOKEN {
                return Ok(None);
            }
        }
    }

    // a token cut off by end of input still counts
    if dims.len() < 2 && !token.is_empty() {
        match parse_decimal(&token) {
            Some(value) => dims.push(value),
            None => return Ok(None),
        }
    }

    if dims.len() < 2 {
        return Ok(None);
    }
    Ok(Some((dims[0], dims[1])))
}

/// `WIDTH` / `HEIGHT` lines of a PAM header, up to `ENDHDR` (P7).
fn scan_pam_header(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<(u32, u32)>> {
    let mut header: Vec<u8> = Vec::new();
    let mut consumed = 0usize;
    let mut width: Option<u32> = None;
    let mut height: Option<u32> = None;

    let mut offset: u64 = 3;
    'chunks: while offset < length {
        let take = (length - offset).min(PIECE as u64) as usize;
        let buffer = ri.read_buffer(offset, take)?;
        offset += take as u64;
        header.extend_from_slice(buffer.as_slice());
        if header.len() > MAX_PAM_HEADER {
            return Ok(None);
        }

        let at_end = offset >= length;
        loop {
            let line_end = header[consumed..].iter().position(|&b| b == b'\n');
            let line = match line_end {
                Some(pos) => {
                    let line = &header[consumed..consumed + pos];
                    consumed += pos + 1;
                    line
                }
                None if at_end && consumed < header.len() => {
                    let line = &header[consumed..];
                    consumed = header.len();
                    line
                }
                None => continue 'chunks,
            };

            let mut fields = line
                .split(|b: &u8| b.is_ascii_whitespace())
                .filter(|t| !t.is_empty());
            match fields.next() {
                Some(b"WIDTH") => match fields.next().and_then(parse_decimal) {
                    Some(value) => width = Some(value),
                    None => return Ok(None),
                },
                Some(b"HEIGHT") => match fields.next().and_then(parse_decimal) {
                    Some(value) => height = Some(value),
                    None => return Ok(None),
                },
                Some(b"ENDHDR") => break 'chunks,
                _ => {}
            }
            if consumed >= header.len() {
                continue 'chunks;
            }
        }
    }

    match (width, height) {
        (Some(w), Some(h)) => Ok(Some((w, h))),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::super::run;
    use super::*;

    #[test]
    fn magic_discriminates_the_family() {
        let cases: [(&[u8], ImageFormat); 7] = [
            (b"P1\n123 456\n", ImageFormat::Pbm),
            (b"P2\n123 456 255\n", ImageFormat::Pgm),
            (b"P3\n123 456 255\n", ImageFormat::Ppm),
            (b"P4\n123 456\n", ImageFormat::Pbm),
            (b"P5\n123 456 255\n", ImageFormat::Pgm),
            (b"P6\n123 456 255\n", ImageFormat::Ppm),
            (b"PF\n123 456\n-1.0\n", ImageFormat::Pfm),
        ];
        for (data, format) in cases {
            let parsed = run(probe, data).unwrap();
            assert_eq!(parsed.format, format, "input {:?}", data);
            assert_eq!(parsed.size.width, 123);
            assert_eq!(parsed.size.height, 456);
        }
    }

    #[test]
    fn skips_comment_lines() {
        let data = b"P6\n# made by hand\n# two comments, why not\n123 456\n255\n";
        let parsed = run(probe, data).unwrap();
        assert_eq!(parsed.size.width, 123);
        assert_eq!(parsed.size.height, 456);
    }

    #[test]
    fn accepts_tight_single_space_header() {
        let parsed = run(probe, b"P1 4 2 ").unwrap();
        assert_eq!(parsed.size.width, 4);
        assert_eq!(parsed.size.height, 2);
    }

    #[test]
    fn pam_reads_keyed_header() {
        let data = b"P7\nWIDTH 123\nDEPTH 3\nHEIGHT 456\nMAXVAL 255\nTUPLTYPE RGB\nENDHDR\n";
        let parsed = run(probe, data).unwrap();
        assert_eq!(parsed.format, ImageFormat::Pam);
        assert_eq!(parsed.size.width, 123);
        assert_eq!(parsed.size.height, 456);
    }

    #[test]
    fn pam_rejects_header_missing_a_dimension() {
        let data = b"P7\nWIDTH 123\nDEPTH 3\nENDHDR\n";
        assert!(run(probe, data).is_none());
    }

    #[test]
    fn rejects_non_numeric_dimension_token() {
        assert!(run(probe, b"P6\n12a 456\n").is_none());
        assert!(run(probe, b"P7\nWIDTH abc\nHEIGHT 1\nENDHDR\n").is_none());
    }

    #[test]
    fn rejects_foreign_magic_and_missing_separator() {
        assert!(run(probe, b"P8\n123 456\n").is_none());
        assert!(run(probe, b"P6123 456\n").is_none());
        assert!(run(probe, b"Q6\n123 456\n").is_none());
    }

    #[test]
    fn rejects_zero_sized_image() {
        assert!(run(probe, b"P6\n0 456\n").is_none());
    }

    #[test]
    fn header_spanning_many_chunks_still_parses() {
        let mut data = b"P6\n".to_vec();
        for i in 0..8 {
            data.extend_from_slice(format!("# filler comment line number {i}\n").as_bytes());
        }
        data.extend_from_slice(b"123 456\n255\n");
        let parsed = run(probe, &data).unwrap();
        assert_eq!(parsed.size.width, 123);
        assert_eq!(parsed.size.height, 456);
    }
}
