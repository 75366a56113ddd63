// SPDX-License-Identifier: Apache-2.0

use crate::ParseError;

/// Byte source driven by the cursor's lexer.
///
/// The lexer looks at one byte at a time and records the raw bytes of string and
/// number tokens through the capture methods, so the same lexer works whether the
/// whole document is in memory or arrives through a refill buffer.
pub trait Input {
    /// Next byte without consuming it, `None` at end of input.
    fn peek(&mut self) -> Result<Option<u8>, ParseError>;

    /// Consume the byte last returned by [`peek`](Self::peek).
    ///
    /// Must only be called after `peek` returned `Some`.
    fn advance(&mut self);

    /// Start recording consumed bytes.
    fn begin_capture(&mut self);

    /// Stop recording; bytes consumed afterwards are not part of the capture.
    fn end_capture(&mut self);

    /// Bytes consumed between `begin_capture` and `end_capture`.
    fn captured(&self) -> &[u8];

    /// Absolute offset of the next byte.
    fn offset(&self) -> usize;
}

/// Input over a byte slice that is fully in memory.
///
/// Captures are sub-slices of the input, so unescaped strings never get copied.
#[derive(Debug)]
pub struct SliceInput<'a> {
    data: &'a [u8],
    pos: usize,
    capture_start: usize,
    capture_end: usize,
}

impl<'a> SliceInput<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            capture_start: 0,
            capture_end: 0,
        }
    }

    /// Point the input at a new document, starting from its first byte.
    pub fn reset(&mut self, data: &'a [u8]) {
        *self = Self::new(data);
    }

    /// The bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }
}

impl Input for SliceInput<'_> {
    #[inline]
    fn peek(&mut self) -> Result<Option<u8>, ParseError> {
        Ok(self.data.get(self.pos).copied())
    }

    #[inline]
    fn advance(&mut self) {
        self.pos += 1;
    }

    fn begin_capture(&mut self) {
        self.capture_start = self.pos;
        self.capture_end = self.pos;
    }

    fn end_capture(&mut self) {
        self.capture_end = self.pos;
    }

    fn captured(&self) -> &[u8] {
        self.data
            .get(self.capture_start..self.capture_end)
            .unwrap_or_default()
    }

    fn offset(&self) -> usize {
        self.pos
    }
}
