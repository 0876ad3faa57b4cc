//! Byte-source abstraction.
//!
//! The detection core needs exactly two capabilities from a source: its
//! total length, and "read exactly N bytes at absolute offset O". Anything
//! seekable can provide both; in-memory slices get a zero-copy-in impl.

use std::io::{self, Read, Seek, SeekFrom};

/// Random-access byte source.
///
/// `read_at` must fill `buf` completely when
/// `offset + buf.len() <= total_len()`; behavior outside that range is the
/// implementation's choice (error or short read) — the core never issues
/// such a read without having bounds-checked first.
pub trait Reader {
    /// Total byte count of the source, stable for the duration of a
    /// detection call.
    fn total_len(&mut self) -> io::Result<u64>;

    /// Read exactly `buf.len()` bytes starting at `offset`.
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()>;
}

impl Reader for &[u8] {
    fn total_len(&mut self) -> io::Result<u64> {
        Ok(self.len() as u64)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        let start = usize::try_from(offset)
            .ok()
            .filter(|&s| s.checked_add(buf.len()).is_some_and(|end| end <= self.len()))
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "read past end of slice")
            })?;
        buf.copy_from_slice(&self[start..start + buf.len()]);
        Ok(())
    }
}

/// Adapter turning any `Read + Seek` (an open [`std::fs::File`], a
/// `Cursor`, …) into a [`Reader`].
///
/// Seeks on every read; the windowed cache above this layer keeps the seek
/// count low in practice.
pub struct SeekReader<R: Read + Seek> {
    inner: R,
    len: Option<u64>,
}

impl<R: Read + Seek> SeekReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, len: None }
    }

    /// Consume the adapter, returning the wrapped stream.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> Reader for SeekReader<R> {
    fn total_len(&mut self) -> io::Result<u64> {
        if let Some(len) = self.len {
            return Ok(len);
        }
        let len = self.inner.seek(SeekFrom::End(0))?;
        self.len = Some(len);
        Ok(len)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(offset))?;
        self.inner.read_exact(buf)
    }
}
