// SPDX-License-Identifier: Apache-2.0

use crate::input::Input;
use crate::ParseError;

/// Trait for input sources that can provide data to the streaming cursor
pub trait Reader {
    /// The error type returned by read operations
    type Error: core::fmt::Debug;

    /// Read data into the provided buffer.
    /// Returns the number of bytes read, or an error.
    ///
    /// # Contract
    /// - A return value of 0 **MUST** indicate true end of stream
    /// - Implementations **MUST NOT** return 0 unless no more data will ever be available
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

impl<R: Reader + ?Sized> Reader for &mut R {
    type Error = R::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read(buf)
    }
}

/// Input that pulls bytes from a [`Reader`] through a fixed-size refill buffer.
///
/// Tokens may straddle refills, so captured bytes are copied into a separate
/// growable buffer while a capture is active.
pub struct StreamInput<R> {
    reader: R,
    buffer: Vec<u8>,
    /// Next unread byte in `buffer`
    pos: usize,
    /// Number of valid bytes in `buffer`
    filled: usize,
    /// Absolute offset of `buffer[0]`
    base: usize,
    at_eof: bool,
    capturing: bool,
    capture: Vec<u8>,
}

impl<R: Reader> StreamInput<R> {
    /// Create an input with a refill buffer of `buffer_size` bytes (at least 1).
    pub fn new(reader: R, buffer_size: usize) -> Self {
        Self {
            reader,
            buffer: vec![0; buffer_size.max(1)],
            pos: 0,
            filled: 0,
            base: 0,
            at_eof: false,
            capturing: false,
            capture: Vec::new(),
        }
    }

    /// Swap in a new reader, keeping the buffer allocations.
    pub fn reset(&mut self, reader: R) {
        self.reader = reader;
        self.pos = 0;
        self.filled = 0;
        self.base = 0;
        self.at_eof = false;
        self.capturing = false;
        self.capture.clear();
    }

    /// Consume the input and return the underlying reader.
    pub fn into_reader(self) -> R {
        self.reader
    }

    fn refill(&mut self) -> Result<(), ParseError> {
        self.base += self.filled;
        self.pos = 0;
        self.filled = 0;
        let bytes_read = self.reader.read(&mut self.buffer).map_err(|e| {
            log::debug!("reader failed after {} bytes: {:?}", self.base, e);
            ParseError::ReaderError
        })?;
        if bytes_read == 0 {
            self.at_eof = true;
        }
        self.filled = bytes_read.min(self.buffer.len());
        Ok(())
    }
}

impl<R: Reader> Input for StreamInput<R> {
    fn peek(&mut self) -> Result<Option<u8>, ParseError> {
        if self.pos >= self.filled {
            if self.at_eof {
                return Ok(None);
            }
            self.refill()?;
        }
        if self.pos < self.filled {
            Ok(self.buffer.get(self.pos).copied())
        } else {
            Ok(None)
        }
    }

    fn advance(&mut self) {
        if self.capturing {
            if let Some(&byte) = self.buffer.get(self.pos) {
                self.capture.push(byte);
            }
        }
        self.pos += 1;
    }

    fn begin_capture(&mut self) {
        self.capture.clear();
        self.capturing = true;
    }

    fn end_capture(&mut self) {
        self.capturing = false;
    }

    fn captured(&self) -> &[u8] {
        &self.capture
    }

    fn offset(&self) -> usize {
        self.base + self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChunkReader;
    use test_log::test;

    struct FailingReader;

    impl Reader for FailingReader {
        type Error = &'static str;

        fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
            Err("device unplugged")
        }
    }

    fn drain<R: Reader>(input: &mut StreamInput<R>) -> Vec<u8> {
        let mut out = Vec::new();
        while let Ok(Some(byte)) = input.peek() {
            out.push(byte);
            input.advance();
        }
        out
    }

    #[test]
    fn test_refills_across_small_buffer() {
        let data = b"{\"key\": [1, 2, 3]}";
        let mut input = StreamInput::new(ChunkReader::new(data, 3), 2);
        assert_eq!(drain(&mut input), data.to_vec());
        assert_eq!(input.offset(), data.len());
        assert_eq!(input.peek(), Ok(None));
    }

    #[test]
    fn test_capture_spans_refills() {
        let mut input = StreamInput::new(ChunkReader::new(b"abcdef", 1), 1);
        input.advance_after_peek();
        input.begin_capture();
        for _ in 0..4 {
            input.advance_after_peek();
        }
        input.end_capture();
        input.advance_after_peek();
        assert_eq!(input.captured(), b"bcde");
    }

    #[test]
    fn test_reader_error_is_reported() {
        let mut input = StreamInput::new(FailingReader, 16);
        assert_eq!(input.peek(), Err(ParseError::ReaderError));
    }

    #[test]
    fn test_reset_reuses_buffer() {
        let mut input = StreamInput::new(ChunkReader::full_slice(b"first"), 8);
        assert_eq!(drain(&mut input), b"first".to_vec());
        input.reset(ChunkReader::full_slice(b"second"));
        assert_eq!(input.offset(), 0);
        assert_eq!(drain(&mut input), b"second".to_vec());
    }

    impl<R: Reader> StreamInput<R> {
        fn advance_after_peek(&mut self) {
            assert!(matches!(self.peek(), Ok(Some(_))));
            self.advance();
        }
    }
}
