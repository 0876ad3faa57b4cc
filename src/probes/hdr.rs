//! Radiance HDR: text header starting "#?RGBE", "#?XYZE", or "#?RADIANCE".
//! A blank line ends the variable list; the next line is the resolution,
//! normally "-Y <height> +X <width>". The header is scanned in fixed-size
//! chunks so an arbitrarily large file is never loaded whole.

use std::io;

use super::{parse_decimal, Parsed};
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

const PIECE: usize = 64;

pub(crate) fn probe(ri: &mut ReadInterface<'_>, length: u64) -> io::Result<Option<Parsed>> {
    if length < 6 {
        return Ok(None);
    }
    let buffer = ri.read_buffer(0, 6)?;
    if !buffer.matches_any(0, &[b"#?RGBE", b"#?XYZE"]) {
        if length < 10 {
            return Ok(None);
        }
        let buffer = ri.read_buffer(0, 10)?;
        if !buffer.matches(0, b"#?RADIANCE") {
            return Ok(None);
        }
    }

    let mut header: Vec<u8> = Vec::new();
    let mut resolution_start: Option<usize> = None;
    let mut resolution: Option<Vec<u8>> = None;
    let mut offset: u64 = 0;
    while offset < length {
        let take = (length - offset).min(PIECE as u64) as usize;
        let buffer = ri.read_buffer(offset, take)?;
        offset += take as u64;
        // resume one byte back so a "\n\n" spanning two chunks is seen
        let scan_from = header.len().saturating_sub(1);
        header.extend_from_slice(buffer.as_slice());

        if resolution_start.is_none() {
            match find(&header, scan_from, b"\n\n") {
                Some(pos) => resolution_start = Some(pos + 2),
                None => continue,
            }
        }
        let start = resolution_start.unwrap_or(0);
        if let Some(pos) = find(&header, start, b"\n") {
            resolution = Some(header[start..pos].to_vec());
            break;
        }
    }

    let Some(line) = resolution else {
        return Ok(None);
    };

    // "-Y 456 +X 123": height after the first space, width after the third
    let Some(p0) = find(&line, 0, b" ") else {
        return Ok(None);
    };
    let Some(p1) = find(&line, p0 + 1, b" ") else {
        return Ok(None);
    };
    let Some(p2) = find(&line, p1 + 1, b" ") else {
        return Ok(None);
    };
    let Some(height) = parse_decimal(&line[p0 + 1..p1]) else {
        return Ok(None);
    };
    let Some(width) = parse_decimal(&line[p2 + 1..]) else {
        return Ok(None);
    };
    if width == 0 || height == 0 {
        return Ok(None);
    }

    Ok(Some(Parsed::new(
        ImageFormat::Hdr,
        i64::from(width),
        i64::from(height),
    )))
}

/// First occurrence of `needle` at or after `from`.
fn find(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + from)
}
