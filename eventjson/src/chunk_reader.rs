// SPDX-License-Identifier: Apache-2.0

//! Convenience [`Reader`] implementations.
//!
//! [`ChunkReader`] serves an in-memory byte slice, optionally in fixed-size
//! chunks to exercise the refill path of [`StreamCursor`]. [`IoReader`] adapts
//! any [`std::io::Read`].
//!
//! # Examples
//!
//! ```rust
//! use eventjson::{ChunkReader, Decode, Event, StreamCursor};
//!
//! let json = br#"{"platform": "go", "level": "error"}"#;
//! // Simulate a transport that delivers 4 bytes at a time
//! let mut cursor = StreamCursor::new(ChunkReader::new(json, 4));
//! let event = Event::decode(&mut cursor).unwrap();
//! assert_eq!(event.platform, "go");
//! ```
//!
//! [`StreamCursor`]: crate::StreamCursor

use crate::Reader;

/// A [`Reader`] that reads from a byte slice, optionally in fixed-size chunks.
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: usize,
    chunk_size: usize,
}

impl<'a> ChunkReader<'a> {
    /// Create a new chunked reader from a byte slice.
    ///
    /// Each call to `read()` will return at most `chunk_size` bytes (minimum 1),
    /// even if more data is available and the buffer can hold more.
    pub fn new(data: &'a [u8], chunk_size: usize) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Create a new reader that hands out as much of the slice as the buffer holds.
    pub fn full_slice(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: usize::MAX,
        }
    }
}

impl Reader for ChunkReader<'_> {
    type Error = ();

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = self.data.get(self.pos..).unwrap_or_default();
        let to_copy = remaining.len().min(buf.len()).min(self.chunk_size);
        if let (Some(dest), Some(src)) = (buf.get_mut(..to_copy), remaining.get(..to_copy)) {
            dest.copy_from_slice(src);
        }
        self.pos += to_copy;
        Ok(to_copy)
    }
}

/// Adapter that lets a [`std::io::Read`] feed a [`StreamCursor`](crate::StreamCursor).
#[derive(Debug)]
pub struct IoReader<R> {
    inner: R,
}

impl<R: std::io::Read> IoReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: std::io::Read> Reader for IoReader<R> {
    type Error = std::io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            match self.inner.read(buf) {
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }
}
