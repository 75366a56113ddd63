// SPDX-License-Identifier: Apache-2.0

use crate::JsonNumber;

/// The kind of the next token, as reported by [`TokenCursor::peek_kind`].
///
/// [`TokenCursor::peek_kind`]: crate::TokenCursor::peek_kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// The start of an object (e.g., `{`).
    ObjectStart,
    /// The end of an object (e.g., `}`).
    ObjectEnd,
    /// The start of an array (e.g., `[`).
    ArrayStart,
    /// The end of an array (e.g., `]`).
    ArrayEnd,
    /// A string value or an object key.
    String,
    /// A number value (e.g., `42` or `3.14`).
    Number,
    /// A boolean value.
    Bool,
    /// A null value.
    Null,
    /// Nothing but whitespace remains after the top-level value.
    EndOfInput,
}

impl core::fmt::Display for Kind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Kind::ObjectStart => "'{'",
            Kind::ObjectEnd => "'}'",
            Kind::ArrayStart => "'['",
            Kind::ArrayEnd => "']'",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Bool => "bool",
            Kind::Null => "null",
            Kind::EndOfInput => "end of input",
        })
    }
}

/// A token read from a cursor.
///
/// Strings and numbers borrow from the cursor and stay valid until the next
/// cursor call. Object keys are delivered as [`Token::String`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    ObjectStart,
    ObjectEnd,
    ArrayStart,
    ArrayEnd,
    /// Unescaped string content.
    String(&'a str),
    Number(JsonNumber<'a>),
    Bool(bool),
    Null,
    EndOfInput,
}

impl<'a> Token<'a> {
    pub fn kind(&self) -> Kind {
        match self {
            Token::ObjectStart => Kind::ObjectStart,
            Token::ObjectEnd => Kind::ObjectEnd,
            Token::ArrayStart => Kind::ArrayStart,
            Token::ArrayEnd => Kind::ArrayEnd,
            Token::String(_) => Kind::String,
            Token::Number(_) => Kind::Number,
            Token::Bool(_) => Kind::Bool,
            Token::Null => Kind::Null,
            Token::EndOfInput => Kind::EndOfInput,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Token::String(s) => Some(*s),
            _ => None,
        }
    }

    /// Integer view; `None` for non-numbers, fractional literals and overflow.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Token::Number(num) => num.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Token::Number(num) => Some(num.as_f64()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Token::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_views() {
        let num = JsonNumber::from_slice(b"12").unwrap();
        let token = Token::Number(num);
        assert_eq!(token.kind(), Kind::Number);
        assert_eq!(token.as_i64(), Some(12));
        assert_eq!(token.as_f64(), Some(12.0));
        assert_eq!(token.as_str(), None);

        assert_eq!(Token::String("go").as_str(), Some("go"));
        assert_eq!(Token::Bool(true).as_bool(), Some(true));
        assert_eq!(Token::Null.as_bool(), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Kind::ObjectStart.to_string(), "'{'");
        assert_eq!(Kind::EndOfInput.to_string(), "end of input");
    }
}
