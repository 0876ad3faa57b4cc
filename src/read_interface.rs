//! Windowed read layer between probes and the byte source.
//!
//! Nearly every probe's signature check and most header fields live in the
//! first kilobyte, so the interface caches that prefix eagerly. The common
//! case — a non-match, or a small fixed-header format — then touches the
//! source zero or one time beyond the initial fill.

use std::io;

use crate::buffer::Buffer;
use crate::reader::Reader;

/// Default prefix cache size in bytes.
pub const DEFAULT_CACHE_SIZE: usize = 1024;

/// Prefix-cached view over a [`Reader`], scoped to one detection call.
pub struct ReadInterface<'r> {
    reader: &'r mut dyn Reader,
    length: u64,
    cache: Vec<u8>,
    cache_capacity: usize,
}

impl<'r> ReadInterface<'r> {
    /// Wrap `reader`, eagerly caching its first
    /// [`DEFAULT_CACHE_SIZE`] bytes.
    pub fn new(reader: &'r mut dyn Reader) -> io::Result<Self> {
        Self::with_cache_size(reader, DEFAULT_CACHE_SIZE)
    }

    /// Wrap `reader` with a caller-chosen prefix cache size. A size of 0
    /// disables caching (every request becomes a direct read).
    pub fn with_cache_size(reader: &'r mut dyn Reader, cache_size: usize) -> io::Result<Self> {
        let length = reader.total_len()?;
        let prefix = length.min(cache_size as u64) as usize;
        let mut cache = vec![0u8; prefix];
        if prefix > 0 {
            reader.read_at(0, &mut cache)?;
        }
        Ok(Self {
            reader,
            length,
            cache,
            cache_capacity: cache_size,
        })
    }

    /// Total length of the underlying source.
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Read `size` bytes at absolute `offset` into an owned [`Buffer`].
    ///
    /// Probes must bounds-check `offset + size` against
    /// [`length`](Self::length) before calling; a request past the end is a
    /// contract violation and comes back as `UnexpectedEof` rather than a
    /// panic, so a missed check on attacker-shaped input degrades to a
    /// clean failure.
    pub fn read_buffer(&mut self, offset: u64, size: usize) -> io::Result<Buffer> {
        let end = offset.checked_add(size as u64).ok_or_else(out_of_range)?;
        if end > self.length {
            return Err(out_of_range());
        }

        let mut data = vec![0u8; size];
        let cached = self.cache.len() as u64;
        if end <= cached {
            let start = offset as usize;
            data.copy_from_slice(&self.cache[start..start + size]);
        } else if offset < cached && cached - offset >= (self.cache_capacity / 4) as u64 {
            // Enough of the request sits in the cache to be worth splicing:
            // copy the cached head, one I/O read for the tail.
            let start = offset as usize;
            let head = self.cache.len() - start;
            data[..head].copy_from_slice(&self.cache[start..]);
            self.reader.read_at(offset + head as u64, &mut data[head..])?;
        } else {
            self.reader.read_at(offset, &mut data)?;
        }
        Ok(Buffer::new(data))
    }
}

fn out_of_range() -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "read_buffer request outside the source bounds",
    )
}
