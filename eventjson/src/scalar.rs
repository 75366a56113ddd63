// SPDX-License-Identifier: Apache-2.0

//! Scalar extractors.
//!
//! Each extractor peeks first, so on a kind mismatch the offending value is
//! left unconsumed.

use chrono::{DateTime, Utc};

use crate::error::{ErrorKind, Expected};
use crate::{DecodeError, Kind, Token, TokenCursor};

fn expect_kind<C: TokenCursor + ?Sized>(
    cursor: &mut C,
    kind: Kind,
    expected: Expected,
) -> Result<(), DecodeError> {
    match cursor.peek_kind()? {
        found if found == kind => Ok(()),
        found => Err(DecodeError::unexpected_kind(expected, found)),
    }
}

pub fn read_string<C: TokenCursor + ?Sized>(cursor: &mut C) -> Result<String, DecodeError> {
    expect_kind(cursor, Kind::String, Expected::String)?;
    match cursor.read_token()? {
        Token::String(s) => Ok(s.to_owned()),
        other => Err(DecodeError::unexpected_kind(Expected::String, other.kind())),
    }
}

/// Reads an integer literal that fits in `i64`.
///
/// Fractional and overflowing numbers are reported as a kind mismatch.
pub fn read_i64<C: TokenCursor + ?Sized>(cursor: &mut C) -> Result<i64, DecodeError> {
    expect_kind(cursor, Kind::Number, Expected::Integer)?;
    let token = cursor.read_token()?;
    token
        .as_i64()
        .ok_or_else(|| DecodeError::unexpected_kind(Expected::Integer, token.kind()))
}

pub fn read_bool<C: TokenCursor + ?Sized>(cursor: &mut C) -> Result<bool, DecodeError> {
    expect_kind(cursor, Kind::Bool, Expected::Bool)?;
    let token = cursor.read_token()?;
    token
        .as_bool()
        .ok_or_else(|| DecodeError::unexpected_kind(Expected::Bool, token.kind()))
}

/// Reads a string and parses it as an RFC 3339 timestamp, fractional seconds allowed.
pub fn read_timestamp<C: TokenCursor + ?Sized>(
    cursor: &mut C,
) -> Result<DateTime<Utc>, DecodeError> {
    let text = read_string(cursor)?;
    match DateTime::parse_from_rfc3339(&text) {
        Ok(timestamp) => Ok(timestamp.with_timezone(&Utc)),
        Err(source) => Err(DecodeError::new(ErrorKind::TimestampParse { text, source })),
    }
}
