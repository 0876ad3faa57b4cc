//! Per-format header probes.
//!
//! Each probe reads a bounded window of the source through a
//! [`ReadInterface`] and either recognizes the format — returning the
//! dimensions (and entry sizes for multi-image containers) — or rejects
//! with `Ok(None)` so the dispatcher can try the next candidate. Rejection
//! covers both "wrong signature" and "signature matched but the internal
//! structure is inconsistent": header fields are corruption- and
//! attacker-controlled, so every offset or length claim is validated in
//! widened arithmetic against the total length before it is used.
//!
//! All probes are pure byte parsing — no codec crate dependencies.

use std::io;

use crate::info::{EntrySizes, ImageSize};
use crate::read_interface::ReadInterface;
use crate::ImageFormat;

pub(crate) mod avif_heic;
pub(crate) mod bmp;
pub(crate) mod cur_ico;
pub(crate) mod dds;
pub(crate) mod gif;
pub(crate) mod hdr;
pub(crate) mod icns;
pub(crate) mod j2k;
pub(crate) mod jpeg;
pub(crate) mod jpeg2000;
pub(crate) mod ktx;
pub(crate) mod png;
pub(crate) mod pnm;
pub(crate) mod psd;
pub(crate) mod qoi;
pub(crate) mod tga;
pub(crate) mod tiff;
pub(crate) mod webp;

/// A probe routine: match/no-match plus extracted sizes on match.
pub(crate) type ProbeFn = fn(&mut ReadInterface<'_>, u64) -> io::Result<Option<Parsed>>;

/// Identity of a probe routine, used by the dispatcher to avoid running a
/// shared probe twice (CUR/ICO, AVIF/HEIC, the JPEG 2000 box family, and
/// the PNM family each share one).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ProbeId {
    AvifHeic,
    Bmp,
    CurIco,
    Dds,
    Gif,
    Hdr,
    Icns,
    J2k,
    Jpeg,
    Jpeg2000,
    Ktx,
    Png,
    Pnm,
    Psd,
    Qoi,
    Tga,
    Tiff,
    Webp,
}

impl ProbeId {
    pub(crate) const COUNT: usize = 18;

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Successful probe output. Shared probes report the specific tag they
/// discriminated (e.g. `Ico` vs `Cur`).
#[derive(Clone, Debug)]
pub(crate) struct Parsed {
    pub format: ImageFormat,
    pub size: ImageSize,
    pub entry_sizes: EntrySizes,
}

impl Parsed {
    pub(crate) fn new(format: ImageFormat, width: i64, height: i64) -> Self {
        Self {
            format,
            size: ImageSize::new(width, height),
            entry_sizes: Vec::new(),
        }
    }

    pub(crate) fn with_entries(format: ImageFormat, size: ImageSize, entry_sizes: EntrySizes) -> Self {
        Self {
            format,
            size,
            entry_sizes,
        }
    }
}

/// Overflow-safe decimal parse for the text-based headers (HDR, PNM).
///
/// Accepts ASCII digits only; anything else — empty input, signs, locale
/// separators, overflow past `u32` — is a rejection.
pub(crate) fn parse_decimal(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() {
        return None;
    }
    let mut value: u32 = 0;
    for &b in bytes {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value
            .checked_mul(10)?
            .checked_add(u32::from(b - b'0'))?;
    }
    Some(value)
}

#[cfg(test)]
pub(crate) fn run(probe: ProbeFn, data: &[u8]) -> Option<Parsed> {
    let mut reader: &[u8] = data;
    let mut ri = ReadInterface::new(&mut reader).expect("in-memory interface");
    let length = ri.length();
    probe(&mut ri, length).expect("in-memory probe I/O")
}
