// SPDX-License-Identifier: Apache-2.0

use crate::chunk_reader::IoReader;
use crate::error::Expected;
use crate::{DecodeError, Kind, SliceCursor, StreamCursor, TokenCursor};

/// A record that decodes itself from the value under a [`TokenCursor`].
pub trait Decode: Sized {
    /// Decode one value, leaving the cursor right after it.
    fn decode<C: TokenCursor + ?Sized>(cursor: &mut C) -> Result<Self, DecodeError>;
}

/// Decode a complete document: one value followed only by whitespace.
pub fn decode_document<T: Decode, C: TokenCursor + ?Sized>(
    cursor: &mut C,
) -> Result<T, DecodeError> {
    let value = T::decode(cursor).inspect_err(|e| log::debug!("decode failed: {e}"))?;
    match cursor.peek_kind()? {
        Kind::EndOfInput => {
            log::debug!("decoded {}", core::any::type_name::<T>());
            Ok(value)
        }
        found => Err(DecodeError::unexpected_kind(Expected::EndOfInput, found)),
    }
}

/// Decode a document held in memory.
pub fn from_slice<T: Decode>(data: &[u8]) -> Result<T, DecodeError> {
    decode_document(&mut SliceCursor::new(data))
}

/// Decode a document pulled from an [`std::io::Read`].
pub fn from_reader<T: Decode, R: std::io::Read>(reader: R) -> Result<T, DecodeError> {
    decode_document(&mut StreamCursor::new(IoReader::new(reader)))
}
