// SPDX-License-Identifier: Apache-2.0

//! Callback-driven traversal on top of any [`TokenCursor`].

use crate::error::Expected;
use crate::{DecodeError, Kind, Token, TokenCursor};

/// Consume the opening delimiter of a container, or fail without consuming anything.
pub(crate) fn expect_start<C: TokenCursor + ?Sized>(
    cursor: &mut C,
    start: Kind,
    expected: Expected,
) -> Result<(), DecodeError> {
    let found = cursor.peek_kind()?;
    if found != start {
        return Err(DecodeError::unexpected_kind(expected, found));
    }
    cursor.read_token()?;
    Ok(())
}

/// Object-member and array-element iteration for every [`TokenCursor`].
///
/// Both methods check the opening delimiter, call `f` once per member or
/// element with the cursor positioned on its value, and consume the closing
/// delimiter once `f` has been called for everything. An error returned by `f`
/// stops the iteration and is propagated; `for_each_member` prefixes it with
/// the member key.
pub trait CursorExt: TokenCursor {
    fn for_each_member<F>(&mut self, mut f: F) -> Result<(), DecodeError>
    where
        F: FnMut(&mut Self, &str) -> Result<(), DecodeError>,
    {
        expect_start(self, Kind::ObjectStart, Expected::Object)?;
        // One key buffer per object, reused across its members
        let mut key = String::new();
        loop {
            match self.peek_kind()? {
                Kind::ObjectEnd => break,
                Kind::String => {}
                found => return Err(DecodeError::unexpected_kind(Expected::String, found)),
            }
            key.clear();
            match self.read_token()? {
                Token::String(name) => key.push_str(name),
                other => {
                    return Err(DecodeError::unexpected_kind(
                        Expected::String,
                        other.kind(),
                    ))
                }
            }
            f(self, &key).map_err(|e| e.at_key(&key))?;
        }
        self.read_token()?;
        Ok(())
    }

    /// Like [`for_each_member`](Self::for_each_member), passing the zero-based
    /// element index. Errors are not prefixed; callers add the index they own.
    fn for_each_element<F>(&mut self, mut f: F) -> Result<(), DecodeError>
    where
        F: FnMut(&mut Self, usize) -> Result<(), DecodeError>,
    {
        expect_start(self, Kind::ArrayStart, Expected::Array)?;
        let mut index = 0;
        while self.peek_kind()? != Kind::ArrayEnd {
            f(self, index)?;
            index += 1;
        }
        self.read_token()?;
        Ok(())
    }
}

impl<C: TokenCursor + ?Sized> CursorExt for C {}
