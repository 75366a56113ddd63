// SPDX-License-Identifier: Apache-2.0

/// Errors produced by the token cursor while lexing the input bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A byte that is not valid at this point of the JSON grammar.
    UnexpectedByte { byte: u8, offset: usize },
    /// Input ended in the middle of a value or container.
    UnexpectedEnd,
    /// Non-whitespace bytes follow the top-level value.
    TrailingData { offset: usize },
    /// A string slice was not valid UTF-8.
    InvalidUtf8(core::str::Utf8Error),
    /// A number literal does not follow the JSON number grammar.
    InvalidNumber,
    /// Invalid escape sequence character.
    InvalidEscapeSequence,
    /// Invalid hex digits in Unicode escape sequence.
    InvalidUnicodeHex,
    /// Valid hex but invalid Unicode codepoint (e.g. a lone surrogate).
    InvalidUnicodeCodepoint,
    /// Unescaped control character inside a string.
    ControlCharacter { offset: usize },
    /// Containers are nested deeper than the configured limit.
    DepthLimitExceeded,
    /// A value was required but the cursor is at a closing delimiter or end of input.
    ExpectedValue,
    /// Error from the underlying reader (I/O error, not end-of-stream)
    ReaderError,
}

impl From<core::str::Utf8Error> for ParseError {
    fn from(err: core::str::Utf8Error) -> Self {
        ParseError::InvalidUtf8(err)
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::UnexpectedByte { byte, offset } => {
                write!(f, "unexpected byte {:?} at offset {offset}", char::from(*byte))
            }
            ParseError::UnexpectedEnd => f.write_str("unexpected end of input"),
            ParseError::TrailingData { offset } => {
                write!(f, "trailing data after top-level value at offset {offset}")
            }
            ParseError::InvalidUtf8(e) => write!(f, "invalid UTF-8: {e}"),
            ParseError::ControlCharacter { offset } => {
                write!(f, "unescaped control character in string at offset {offset}")
            }
            ParseError::DepthLimitExceeded => f.write_str("nesting depth limit exceeded"),
            _ => write!(f, "{self:?}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::InvalidUtf8(e) => Some(e),
            _ => None,
        }
    }
}
