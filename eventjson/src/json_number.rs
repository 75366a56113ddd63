// SPDX-License-Identifier: Apache-2.0

use core::ops::Deref;

use crate::ParseError;

/// Represents the parsed result of a JSON number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberResult {
    /// Integer literal that fits in an `i64`
    Integer(i64),
    /// Integer literal too large for `i64` (use raw string for exact representation)
    IntegerOverflow,
    /// Literal with a fraction or exponent
    Float(f64),
}

/// A JSON number with both its exact text and a parsed value.
///
/// The raw text borrows from the cursor that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JsonNumber<'a> {
    raw: &'a str,
    parsed: NumberResult,
}

impl<'a> JsonNumber<'a> {
    /// Create a JsonNumber from the raw bytes of a lexed number literal.
    ///
    /// The bytes are expected to already follow the JSON number grammar; only the
    /// conversion to `i64`/`f64` happens here.
    pub fn from_slice(bytes: &'a [u8]) -> Result<Self, ParseError> {
        let raw = core::str::from_utf8(bytes)?;
        let parsed = if is_integer(bytes) {
            match raw.parse::<i64>() {
                Ok(val) => NumberResult::Integer(val),
                Err(_) => NumberResult::IntegerOverflow,
            }
        } else {
            NumberResult::Float(raw.parse::<f64>().map_err(|_| ParseError::InvalidNumber)?)
        };
        Ok(JsonNumber { raw, parsed })
    }

    /// Get the parsed NumberResult.
    pub fn parsed(&self) -> &NumberResult {
        &self.parsed
    }

    /// Get the number as an `i64` if it is an integer literal that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self.parsed {
            NumberResult::Integer(val) => Some(val),
            _ => None,
        }
    }

    /// Get the number as an `f64`.
    ///
    /// Integers are converted; overflowing integers are re-read from the raw text.
    pub fn as_f64(&self) -> f64 {
        match self.parsed {
            NumberResult::Float(val) => val,
            NumberResult::Integer(val) => val as f64,
            // The lexer only admits grammar-valid literals, which always parse as f64
            NumberResult::IntegerOverflow => self.raw.parse().unwrap_or(f64::NAN),
        }
    }

    /// Always available: get the exact string representation.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Check if this number represents an integer (no decimal point or exponent).
    pub fn is_integer(&self) -> bool {
        matches!(
            self.parsed,
            NumberResult::Integer(_) | NumberResult::IntegerOverflow
        )
    }
}

impl AsRef<str> for JsonNumber<'_> {
    fn as_ref(&self) -> &str {
        self.raw
    }
}

impl Deref for JsonNumber<'_> {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.raw
    }
}

impl core::fmt::Display for JsonNumber<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.raw)
    }
}

/// Detects if a number byte slice represents an integer (no decimal point or exponent).
/// JSON numbers are pure ASCII, so this avoids unnecessary UTF-8 string processing.
pub fn is_integer(bytes: &[u8]) -> bool {
    !bytes.iter().any(|&b| b == b'.' || b == b'e' || b == b'E')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_literal() {
        let num = JsonNumber::from_slice(b"-42").unwrap();
        assert_eq!(num.parsed(), &NumberResult::Integer(-42));
        assert_eq!(num.as_i64(), Some(-42));
        assert_eq!(num.as_f64(), -42.0);
        assert!(num.is_integer());
        assert_eq!(&*num, "-42");
    }

    #[test]
    fn test_float_literal() {
        let num = JsonNumber::from_slice(b"6.25e1").unwrap();
        assert_eq!(num.parsed(), &NumberResult::Float(62.5));
        assert_eq!(num.as_i64(), None);
        assert!(!num.is_integer());
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float_view() {
        let num = JsonNumber::from_slice(b"18446744073709551616").unwrap();
        assert_eq!(num.parsed(), &NumberResult::IntegerOverflow);
        assert_eq!(num.as_i64(), None);
        assert_eq!(num.as_f64(), 18446744073709551616.0);
        assert_eq!(num.to_string(), "18446744073709551616");
    }

    #[test]
    fn test_is_integer_bytes() {
        assert!(is_integer(b"123"));
        assert!(!is_integer(b"1.0"));
        assert!(!is_integer(b"1E5"));
    }
}
