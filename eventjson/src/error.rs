// SPDX-License-Identifier: Apache-2.0

use crate::{Kind, ParseError};

/// What a decoder wanted to find when it hit a token of the wrong kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Object,
    Array,
    String,
    Integer,
    Bool,
    EndOfInput,
}

impl core::fmt::Display for Expected {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Expected::Object => "object",
            Expected::Array => "array",
            Expected::String => "string",
            Expected::Integer => "integer",
            Expected::Bool => "bool",
            Expected::EndOfInput => "end of input",
        })
    }
}

/// The underlying cause of a [`DecodeError`].
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// A structural boundary or scalar field holds a token of the wrong kind.
    UnexpectedKind { expected: Expected, found: Kind },
    /// The cursor could not produce a valid token.
    MalformedToken(ParseError),
    /// The timestamp text is not RFC 3339.
    TimestampParse {
        text: String,
        source: chrono::ParseError,
    },
    /// A dynamic-map value has no flattening rule (array, bool, null).
    UnsupportedValueKind(Kind),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ErrorKind::UnexpectedKind { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            ErrorKind::MalformedToken(e) => write!(f, "malformed JSON: {e}"),
            ErrorKind::TimestampParse { text, source } => {
                write!(f, "invalid RFC 3339 timestamp {text:?}: {source}")
            }
            ErrorKind::UnsupportedValueKind(kind) => {
                write!(f, "unsupported value kind {kind} in dynamic map")
            }
        }
    }
}

/// One step of the path from the document root to a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// A decode failure together with the path at which it happened.
///
/// Segments are appended while the failure unwinds through the decoders, so
/// nothing is allocated for paths on the success path.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    /// Innermost segment first
    path: Vec<PathSegment>,
    kind: ErrorKind,
}

impl DecodeError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            path: Vec::new(),
            kind,
        }
    }

    pub fn unexpected_kind(expected: Expected, found: Kind) -> Self {
        Self::new(ErrorKind::UnexpectedKind { expected, found })
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Path segments from the document root to the failure site.
    pub fn path(&self) -> impl Iterator<Item = &PathSegment> + '_ {
        self.path.iter().rev()
    }

    /// Render the path as `exception[2].frames[5].vars`; empty at the root.
    pub fn path_string(&self) -> String {
        let mut out = String::new();
        for segment in self.path() {
            match segment {
                PathSegment::Key(key) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(key);
                }
                PathSegment::Index(index) => {
                    out.push('[');
                    out.push_str(&index.to_string());
                    out.push(']');
                }
            }
        }
        out
    }

    /// Prefix the path with an object member key.
    pub fn at_key(mut self, key: &str) -> Self {
        self.path.push(PathSegment::Key(key.to_owned()));
        self
    }

    /// Prefix the path with an array index.
    pub fn at_index(mut self, index: usize) -> Self {
        self.path.push(PathSegment::Index(index));
        self
    }
}

impl From<ParseError> for DecodeError {
    fn from(err: ParseError) -> Self {
        DecodeError::new(ErrorKind::MalformedToken(err))
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.path_string(), self.kind)
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::MalformedToken(e) => Some(e),
            ErrorKind::TimestampParse { source, .. } => Some(source),
            _ => None,
        }
    }
}
