// SPDX-License-Identifier: Apache-2.0

use crate::escape_processor::EscapeProcessor;
use crate::input::{Input, SliceInput};
use crate::stream_input::{Reader, StreamInput};
use crate::{CursorConfig, JsonNumber, Kind, ParseError, Token};

/// Pull-style access to a stream of JSON tokens.
///
/// This is the only surface the decoders use, so any implementation of it is
/// decoded identically. The callback-driven surface (`for_each_member`,
/// `for_each_element`) is layered on top by [`CursorExt`](crate::CursorExt).
pub trait TokenCursor {
    /// Kind of the next token, without consuming it.
    fn peek_kind(&mut self) -> Result<Kind, ParseError>;

    /// Consume and return the next token.
    fn read_token(&mut self) -> Result<Token<'_>, ParseError>;

    /// Consume one complete value: a scalar, or a balanced object or array.
    fn skip_value(&mut self) -> Result<(), ParseError> {
        if matches!(
            self.peek_kind()?,
            Kind::ObjectEnd | Kind::ArrayEnd | Kind::EndOfInput
        ) {
            return Err(ParseError::ExpectedValue);
        }
        let mut depth = 0usize;
        loop {
            match self.read_token()?.kind() {
                Kind::ObjectStart | Kind::ArrayStart => depth += 1,
                Kind::ObjectEnd | Kind::ArrayEnd => depth = depth.saturating_sub(1),
                Kind::EndOfInput => return Err(ParseError::UnexpectedEnd),
                _ => {}
            }
            if depth == 0 {
                return Ok(());
            }
        }
    }
}

impl<C: TokenCursor + ?Sized> TokenCursor for &mut C {
    fn peek_kind(&mut self) -> Result<Kind, ParseError> {
        (**self).peek_kind()
    }

    fn read_token(&mut self) -> Result<Token<'_>, ParseError> {
        (**self).read_token()
    }

    fn skip_value(&mut self) -> Result<(), ParseError> {
        (**self).skip_value()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Object,
    Array,
}

/// What the grammar allows next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// A value: document start, after ':' or after ',' in an array
    Value,
    /// First member key or '}' right after '{'
    KeyOrEnd,
    /// Member key after ','
    Key,
    /// First element or ']' right after '['
    ValueOrEnd,
    /// ':' after a member key
    Colon,
    /// ',' or the closing delimiter after a value inside a container
    CommaOrEnd,
    /// Only whitespace may follow the top-level value
    Done,
}

/// A grammar-checking JSON lexer over any [`Input`].
///
/// Separators (`:` and `,`) and whitespace are consumed while positioning on the
/// next token, so `peek_kind` is idempotent and `read_token` only ever returns
/// structural delimiters, strings, numbers and literals.
pub struct Cursor<I> {
    input: I,
    scopes: Vec<Scope>,
    expect: Expect,
    /// Unescaped content of the last string that contained escapes
    scratch: String,
    config: CursorConfig,
}

/// Cursor over a document held in memory.
pub type SliceCursor<'a> = Cursor<SliceInput<'a>>;

/// Cursor pulling the document through a [`Reader`].
pub type StreamCursor<R> = Cursor<StreamInput<R>>;

impl<'a> Cursor<SliceInput<'a>> {
    /// Creates a cursor for the given JSON bytes with the default limits.
    ///
    /// # Example
    /// ```
    /// use eventjson::{Kind, SliceCursor, TokenCursor};
    /// let mut cursor = SliceCursor::new(br#"{"name": "value"}"#);
    /// assert_eq!(cursor.peek_kind(), Ok(Kind::ObjectStart));
    /// ```
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_config(data, CursorConfig::default())
    }

    pub fn with_config(data: &'a [u8], config: CursorConfig) -> Self {
        Self::with_input(SliceInput::new(data), config)
    }

    /// Rewind onto a new document, keeping allocations.
    pub fn reset(&mut self, data: &'a [u8]) {
        self.input.reset(data);
        self.reset_state();
    }
}

impl<R: Reader> Cursor<StreamInput<R>> {
    /// Creates a streaming cursor with the default limits and refill buffer size.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, CursorConfig::default())
    }

    pub fn with_config(reader: R, config: CursorConfig) -> Self {
        let config = config.clamped();
        Self::with_input(StreamInput::new(reader, config.buffer_size), config)
    }

    /// Swap in a new reader, keeping allocations.
    pub fn reset(&mut self, reader: R) {
        self.input.reset(reader);
        self.reset_state();
    }
}

impl<I: Input> Cursor<I> {
    /// Creates a cursor over an arbitrary [`Input`].
    pub fn with_input(input: I, config: CursorConfig) -> Self {
        Self {
            input,
            scopes: Vec::new(),
            expect: Expect::Value,
            scratch: String::new(),
            config: config.clamped(),
        }
    }

    /// Number of currently open objects and arrays.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Absolute offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.input.offset()
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    fn reset_state(&mut self) {
        log::trace!("cursor reset");
        self.scopes.clear();
        self.expect = Expect::Value;
        self.scratch.clear();
    }

    fn skip_whitespace(&mut self) -> Result<Option<u8>, ParseError> {
        loop {
            match self.input.peek()? {
                Some(b' ' | b'\t' | b'\n' | b'\r') => self.input.advance(),
                other => return Ok(other),
            }
        }
    }

    fn unexpected(&self, byte: Option<u8>) -> ParseError {
        match byte {
            Some(byte) => ParseError::UnexpectedByte {
                byte,
                offset: self.input.offset(),
            },
            None => ParseError::UnexpectedEnd,
        }
    }

    /// Consume separators and return the kind of the next token.
    ///
    /// The input is left on the first byte of that token.
    fn position(&mut self) -> Result<Kind, ParseError> {
        loop {
            let byte = self.skip_whitespace()?;
            match self.expect {
                Expect::Value => return self.value_kind(byte),
                Expect::ValueOrEnd => match byte {
                    Some(b']') => return Ok(Kind::ArrayEnd),
                    other => return self.value_kind(other),
                },
                Expect::KeyOrEnd => match byte {
                    Some(b'}') => return Ok(Kind::ObjectEnd),
                    Some(b'"') => return Ok(Kind::String),
                    other => return Err(self.unexpected(other)),
                },
                Expect::Key => match byte {
                    Some(b'"') => return Ok(Kind::String),
                    other => return Err(self.unexpected(other)),
                },
                Expect::Colon => match byte {
                    Some(b':') => {
                        self.input.advance();
                        self.expect = Expect::Value;
                    }
                    other => return Err(self.unexpected(other)),
                },
                Expect::CommaOrEnd => match (byte, self.scopes.last()) {
                    (Some(b','), Some(Scope::Object)) => {
                        self.input.advance();
                        self.expect = Expect::Key;
                    }
                    (Some(b','), Some(Scope::Array)) => {
                        self.input.advance();
                        self.expect = Expect::Value;
                    }
                    (Some(b'}'), Some(Scope::Object)) => return Ok(Kind::ObjectEnd),
                    (Some(b']'), Some(Scope::Array)) => return Ok(Kind::ArrayEnd),
                    (other, _) => return Err(self.unexpected(other)),
                },
                Expect::Done => {
                    return match byte {
                        None => Ok(Kind::EndOfInput),
                        Some(_) => Err(ParseError::TrailingData {
                            offset: self.input.offset(),
                        }),
                    }
                }
            }
        }
    }

    fn value_kind(&self, byte: Option<u8>) -> Result<Kind, ParseError> {
        match byte {
            Some(b'{') => Ok(Kind::ObjectStart),
            Some(b'[') => Ok(Kind::ArrayStart),
            Some(b'"') => Ok(Kind::String),
            Some(b'-' | b'0'..=b'9') => Ok(Kind::Number),
            Some(b't' | b'f') => Ok(Kind::Bool),
            Some(b'n') => Ok(Kind::Null),
            other => Err(self.unexpected(other)),
        }
    }

    fn after_value(&mut self) {
        self.expect = if self.scopes.is_empty() {
            Expect::Done
        } else {
            Expect::CommaOrEnd
        };
    }

    fn open(&mut self, scope: Scope) -> Result<(), ParseError> {
        if self.scopes.len() >= self.config.max_depth {
            return Err(ParseError::DepthLimitExceeded);
        }
        self.input.advance();
        self.scopes.push(scope);
        self.expect = match scope {
            Scope::Object => Expect::KeyOrEnd,
            Scope::Array => Expect::ValueOrEnd,
        };
        Ok(())
    }

    fn close(&mut self) {
        self.input.advance();
        self.scopes.pop();
        self.after_value();
    }

    fn next_token(&mut self) -> Result<Token<'_>, ParseError> {
        match self.position()? {
            Kind::ObjectStart => {
                self.open(Scope::Object)?;
                Ok(Token::ObjectStart)
            }
            Kind::ArrayStart => {
                self.open(Scope::Array)?;
                Ok(Token::ArrayStart)
            }
            Kind::ObjectEnd => {
                self.close();
                Ok(Token::ObjectEnd)
            }
            Kind::ArrayEnd => {
                self.close();
                Ok(Token::ArrayEnd)
            }
            Kind::String => {
                if matches!(self.expect, Expect::KeyOrEnd | Expect::Key) {
                    self.expect = Expect::Colon;
                } else {
                    self.after_value();
                }
                self.lex_string()
            }
            Kind::Number => {
                self.after_value();
                self.lex_number()
            }
            Kind::Bool => {
                self.after_value();
                if self.input.peek()? == Some(b't') {
                    self.lex_literal(b"true")?;
                    Ok(Token::Bool(true))
                } else {
                    self.lex_literal(b"false")?;
                    Ok(Token::Bool(false))
                }
            }
            Kind::Null => {
                self.after_value();
                self.lex_literal(b"null")?;
                Ok(Token::Null)
            }
            Kind::EndOfInput => Ok(Token::EndOfInput),
        }
    }

    fn lex_literal(&mut self, literal: &'static [u8]) -> Result<(), ParseError> {
        for &expected in literal {
            match self.input.peek()? {
                Some(byte) if byte == expected => self.input.advance(),
                other => return Err(self.unexpected(other)),
            }
        }
        Ok(())
    }

    fn lex_string(&mut self) -> Result<Token<'_>, ParseError> {
        // Opening quote
        self.input.advance();
        self.input.begin_capture();
        let mut has_escapes = false;
        loop {
            match self.input.peek()? {
                None => return Err(ParseError::UnexpectedEnd),
                Some(b'"') => break,
                Some(b'\\') => {
                    has_escapes = true;
                    self.input.advance();
                    self.lex_escape()?;
                }
                Some(byte) if byte < 0x20 => {
                    return Err(ParseError::ControlCharacter {
                        offset: self.input.offset(),
                    })
                }
                Some(_) => self.input.advance(),
            }
        }
        self.input.end_capture();
        // Closing quote
        self.input.advance();

        let raw = core::str::from_utf8(self.input.captured())?;
        if has_escapes {
            EscapeProcessor::unescape_into(raw, &mut self.scratch)?;
            Ok(Token::String(&self.scratch))
        } else {
            Ok(Token::String(raw))
        }
    }

    /// Validate the escape sequence following a backslash.
    fn lex_escape(&mut self) -> Result<(), ParseError> {
        match self.input.peek()? {
            None => Err(ParseError::UnexpectedEnd),
            Some(b'u') => {
                self.input.advance();
                for _ in 0..4 {
                    match self.input.peek()? {
                        Some(byte) if byte.is_ascii_hexdigit() => self.input.advance(),
                        Some(_) => return Err(ParseError::InvalidUnicodeHex),
                        None => return Err(ParseError::UnexpectedEnd),
                    }
                }
                Ok(())
            }
            Some(byte) => {
                EscapeProcessor::process_simple_escape(byte)?;
                self.input.advance();
                Ok(())
            }
        }
    }

    fn lex_number(&mut self) -> Result<Token<'_>, ParseError> {
        self.input.begin_capture();
        if self.input.peek()? == Some(b'-') {
            self.input.advance();
        }
        match self.input.peek()? {
            Some(b'0') => self.input.advance(),
            Some(b'1'..=b'9') => {
                self.input.advance();
                self.lex_digits()?;
            }
            _ => return Err(ParseError::InvalidNumber),
        }
        if self.input.peek()? == Some(b'.') {
            self.input.advance();
            self.lex_required_digits()?;
        }
        if matches!(self.input.peek()?, Some(b'e' | b'E')) {
            self.input.advance();
            if matches!(self.input.peek()?, Some(b'+' | b'-')) {
                self.input.advance();
            }
            self.lex_required_digits()?;
        }
        self.input.end_capture();
        JsonNumber::from_slice(self.input.captured()).map(Token::Number)
    }

    fn lex_digits(&mut self) -> Result<(), ParseError> {
        while matches!(self.input.peek()?, Some(b'0'..=b'9')) {
            self.input.advance();
        }
        Ok(())
    }

    fn lex_required_digits(&mut self) -> Result<(), ParseError> {
        if !matches!(self.input.peek()?, Some(b'0'..=b'9')) {
            return Err(ParseError::InvalidNumber);
        }
        self.lex_digits()
    }
}

impl<I: Input> TokenCursor for Cursor<I> {
    fn peek_kind(&mut self) -> Result<Kind, ParseError> {
        self.position()
    }

    fn read_token(&mut self) -> Result<Token<'_>, ParseError> {
        self.next_token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChunkReader;
    use test_log::test;

    /// Collect every token kind of a document, failing on the first error.
    fn kinds<C: TokenCursor>(cursor: &mut C) -> Result<Vec<Kind>, ParseError> {
        let mut out = Vec::new();
        loop {
            let kind = cursor.read_token()?.kind();
            out.push(kind);
            if kind == Kind::EndOfInput {
                return Ok(out);
            }
        }
    }

    fn slice_kinds(json: &str) -> Result<Vec<Kind>, ParseError> {
        kinds(&mut SliceCursor::new(json.as_bytes()))
    }

    fn stream_kinds(json: &str, chunk: usize) -> Result<Vec<Kind>, ParseError> {
        let config = CursorConfig::new().with_buffer_size(chunk);
        kinds(&mut StreamCursor::with_config(
            ChunkReader::new(json.as_bytes(), chunk),
            config,
        ))
    }

    #[test]
    fn test_object_token_sequence() {
        let mut cursor = SliceCursor::new(br#"{"key": "value", "n": 12, "ok": true, "x": null}"#);
        assert_eq!(cursor.read_token(), Ok(Token::ObjectStart));
        assert_eq!(cursor.read_token(), Ok(Token::String("key")));
        assert_eq!(cursor.read_token(), Ok(Token::String("value")));
        assert_eq!(cursor.read_token(), Ok(Token::String("n")));
        assert_eq!(cursor.read_token().unwrap().as_i64(), Some(12));
        assert_eq!(cursor.read_token(), Ok(Token::String("ok")));
        assert_eq!(cursor.read_token(), Ok(Token::Bool(true)));
        assert_eq!(cursor.read_token(), Ok(Token::String("x")));
        assert_eq!(cursor.read_token(), Ok(Token::Null));
        assert_eq!(cursor.read_token(), Ok(Token::ObjectEnd));
        assert_eq!(cursor.read_token(), Ok(Token::EndOfInput));
        assert_eq!(cursor.read_token(), Ok(Token::EndOfInput));
    }

    #[test]
    fn test_peek_is_idempotent() {
        let mut cursor = SliceCursor::new(b"[ 1 ,  2 ]");
        assert_eq!(cursor.read_token(), Ok(Token::ArrayStart));
        assert_eq!(cursor.read_token().unwrap().as_i64(), Some(1));
        assert_eq!(cursor.peek_kind(), Ok(Kind::Number));
        assert_eq!(cursor.peek_kind(), Ok(Kind::Number));
        assert_eq!(cursor.read_token().unwrap().as_i64(), Some(2));
        assert_eq!(cursor.peek_kind(), Ok(Kind::ArrayEnd));
        assert_eq!(cursor.depth(), 1);
        assert_eq!(cursor.read_token(), Ok(Token::ArrayEnd));
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn test_numbers() {
        let mut cursor = SliceCursor::new(b"[0, -7, 1.5, 2e3, -0.25E-2, 99999999999999999999]");
        assert_eq!(cursor.read_token(), Ok(Token::ArrayStart));
        assert_eq!(cursor.read_token().unwrap().as_i64(), Some(0));
        assert_eq!(cursor.read_token().unwrap().as_i64(), Some(-7));
        assert_eq!(cursor.read_token().unwrap().as_f64(), Some(1.5));
        assert_eq!(cursor.read_token().unwrap().as_f64(), Some(2000.0));
        assert_eq!(cursor.read_token().unwrap().as_f64(), Some(-0.0025));
        let big = cursor.read_token().unwrap();
        assert_eq!(big.as_i64(), None);
        assert_eq!(big.as_f64(), Some(1e20));
    }

    #[test]
    fn test_escaped_strings() {
        let mut cursor = SliceCursor::new(br#"["line\nbreak", "quote\"d", "plain"]"#);
        assert_eq!(cursor.read_token(), Ok(Token::ArrayStart));
        assert_eq!(cursor.read_token(), Ok(Token::String("line\nbreak")));
        assert_eq!(cursor.read_token(), Ok(Token::String("quote\"d")));
        assert_eq!(cursor.read_token(), Ok(Token::String("plain")));
    }

    #[test]
    fn test_skip_value_balances_containers() {
        let mut cursor = SliceCursor::new(br#"[{"a": [1, {"b": null}], "c": "d"}, 5]"#);
        assert_eq!(cursor.read_token(), Ok(Token::ArrayStart));
        cursor.skip_value().unwrap();
        assert_eq!(cursor.read_token().unwrap().as_i64(), Some(5));
        assert_eq!(cursor.peek_kind(), Ok(Kind::ArrayEnd));
        assert_eq!(cursor.skip_value(), Err(ParseError::ExpectedValue));
    }

    #[test]
    fn test_malformed_documents() {
        let cases = [
            "",
            "{",
            r#"{"a" 1}"#,
            r#"{"a": 1,}"#,
            "[1,]",
            "[1 2]",
            "01",
            "-",
            "1.",
            "1e",
            "tru",
            "nul",
            r#"{"a": 1} x"#,
            r#""unterminated"#,
            "\"bad \\x escape\"",
            "\"raw \u{1} control\"",
            "{1: 2}",
            "]",
        ];
        for case in cases {
            assert!(slice_kinds(case).is_err(), "slice accepted {case:?}");
            assert!(stream_kinds(case, 1).is_err(), "stream accepted {case:?}");
        }
    }

    #[test]
    fn test_specific_errors() {
        assert_eq!(slice_kinds(""), Err(ParseError::UnexpectedEnd));
        assert_eq!(
            slice_kinds("[1 2]"),
            Err(ParseError::UnexpectedByte {
                byte: b'2',
                offset: 3
            })
        );
        assert_eq!(
            slice_kinds("{} {}"),
            Err(ParseError::TrailingData { offset: 3 })
        );
        assert_eq!(slice_kinds("1."), Err(ParseError::InvalidNumber));
    }

    #[test]
    fn test_depth_limit() {
        let config = CursorConfig::new().with_max_depth(2);
        let mut cursor = SliceCursor::with_config(b"[[[]]]", config);
        assert_eq!(cursor.read_token(), Ok(Token::ArrayStart));
        assert_eq!(cursor.read_token(), Ok(Token::ArrayStart));
        assert_eq!(cursor.read_token(), Err(ParseError::DepthLimitExceeded));
    }

    #[test]
    fn test_slice_and_stream_agree() {
        let json = r#"{"a": [1, 2.5, "x\ty", {"b": false}], "c": null, "d": {}}"#;
        let expected = slice_kinds(json).unwrap();
        for chunk in [1, 2, 3, 7, 64] {
            assert_eq!(stream_kinds(json, chunk).unwrap(), expected, "chunk {chunk}");
        }
    }

    #[test]
    fn test_stream_strings_across_refills() {
        let json = br#"{"message": "a fairly long string with an \"escape\""}"#;
        let config = CursorConfig::new().with_buffer_size(4);
        let mut cursor = StreamCursor::with_config(ChunkReader::new(json, 3), config);
        assert_eq!(cursor.read_token(), Ok(Token::ObjectStart));
        assert_eq!(cursor.read_token(), Ok(Token::String("message")));
        assert_eq!(
            cursor.read_token(),
            Ok(Token::String("a fairly long string with an \"escape\""))
        );
    }

    #[test]
    fn test_reset_reuses_cursor() {
        let first = br#"{"a": 1}"#;
        let mut cursor = SliceCursor::new(first);
        assert_eq!(cursor.read_token(), Ok(Token::ObjectStart));
        cursor.reset(first);
        assert_eq!(kinds(&mut cursor).unwrap().len(), 5);
        cursor.reset(first);
        assert_eq!(cursor.depth(), 0);
        assert_eq!(cursor.peek_kind(), Ok(Kind::ObjectStart));
    }
}
