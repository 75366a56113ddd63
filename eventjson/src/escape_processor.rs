// SPDX-License-Identifier: Apache-2.0

use crate::ParseError;

/// Shared utilities for processing JSON escape sequences.
pub(crate) struct EscapeProcessor;

impl EscapeProcessor {
    /// Map the byte following a backslash to the byte it stands for.
    ///
    /// `u` is not handled here; Unicode escapes go through [`Self::unescape_into`].
    pub fn process_simple_escape(escape_char: u8) -> Result<u8, ParseError> {
        match escape_char {
            b'n' => Ok(b'\n'),
            b't' => Ok(b'\t'),
            b'r' => Ok(b'\r'),
            b'b' => Ok(b'\x08'),
            b'f' => Ok(b'\x0C'),
            b'\\' => Ok(b'\\'),
            b'/' => Ok(b'/'),
            b'"' => Ok(b'"'),
            _ => Err(ParseError::InvalidEscapeSequence),
        }
    }

    /// Validate that a byte is a valid hexadecimal digit and return its value.
    pub fn validate_hex_digit(byte: u8) -> Result<u32, ParseError> {
        match byte {
            b'0'..=b'9' => Ok((byte - b'0') as u32),
            b'a'..=b'f' => Ok((byte - b'a' + 10) as u32),
            b'A'..=b'F' => Ok((byte - b'A' + 10) as u32),
            _ => Err(ParseError::InvalidUnicodeHex),
        }
    }

    /// Check if a Unicode codepoint is a high surrogate (0xD800-0xDBFF)
    pub fn is_high_surrogate(codepoint: u32) -> bool {
        (0xD800..=0xDBFF).contains(&codepoint)
    }

    /// Check if a Unicode codepoint is a low surrogate (0xDC00-0xDFFF)
    pub fn is_low_surrogate(codepoint: u32) -> bool {
        (0xDC00..=0xDFFF).contains(&codepoint)
    }

    /// Combine a high and low surrogate pair into a single Unicode codepoint
    pub fn combine_surrogate_pair(high: u32, low: u32) -> Result<u32, ParseError> {
        if !Self::is_high_surrogate(high) || !Self::is_low_surrogate(low) {
            return Err(ParseError::InvalidUnicodeCodepoint);
        }
        Ok(0x10000 + ((high & 0x3FF) << 10) + (low & 0x3FF))
    }

    fn hex_codepoint(hex: &[u8]) -> Result<u32, ParseError> {
        if hex.len() != 4 {
            return Err(ParseError::InvalidUnicodeHex);
        }
        hex.iter().try_fold(0u32, |acc, &byte| {
            Ok((acc << 4) | Self::validate_hex_digit(byte)?)
        })
    }

    /// Unescape the raw content of a JSON string (without the quotes) into `out`.
    ///
    /// `out` is cleared first. Surrogate pairs written as two `\uXXXX` escapes are
    /// combined; a lone surrogate is an error.
    pub fn unescape_into(raw: &str, out: &mut String) -> Result<(), ParseError> {
        out.clear();
        out.reserve(raw.len());

        let bytes = raw.as_bytes();
        let mut pending_high_surrogate: Option<u32> = None;
        let mut literal_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] != b'\\' {
                i += 1;
                continue;
            }
            if pending_high_surrogate.is_some() && i > literal_start {
                return Err(ParseError::InvalidUnicodeCodepoint);
            }
            out.push_str(&raw[literal_start..i]);

            let escape_char = *bytes.get(i + 1).ok_or(ParseError::InvalidEscapeSequence)?;
            if escape_char == b'u' {
                let hex = bytes.get(i + 2..i + 6).ok_or(ParseError::InvalidUnicodeHex)?;
                let codepoint = Self::hex_codepoint(hex)?;
                match pending_high_surrogate.take() {
                    Some(high) => {
                        let combined = Self::combine_surrogate_pair(high, codepoint)?;
                        out.push(
                            char::from_u32(combined).ok_or(ParseError::InvalidUnicodeCodepoint)?,
                        );
                    }
                    None if Self::is_high_surrogate(codepoint) => {
                        pending_high_surrogate = Some(codepoint);
                    }
                    None => {
                        out.push(
                            char::from_u32(codepoint).ok_or(ParseError::InvalidUnicodeCodepoint)?,
                        );
                    }
                }
                i += 6;
            } else {
                if pending_high_surrogate.is_some() {
                    return Err(ParseError::InvalidUnicodeCodepoint);
                }
                out.push(char::from(Self::process_simple_escape(escape_char)?));
                i += 2;
            }
            literal_start = i;
        }

        if pending_high_surrogate.is_some() {
            return Err(ParseError::InvalidUnicodeCodepoint);
        }
        out.push_str(&raw[literal_start..]);
        Ok(())
    }
}
