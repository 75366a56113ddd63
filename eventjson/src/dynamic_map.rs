// SPDX-License-Identifier: Apache-2.0

//! Decoders for objects without a fixed schema.

use std::collections::HashMap;

use crate::error::ErrorKind;
use crate::scalar::read_string;
use crate::{CursorExt, DecodeError, JsonNumber, Kind, Token, TokenCursor};

/// A scalar stored in a [`DynamicMap`].
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    String(String),
    Int(i64),
    Float(f64),
}

impl DynamicValue {
    /// Integer literals that fit in `i64` become `Int`, everything else `Float`.
    pub fn from_number(number: &JsonNumber<'_>) -> Self {
        match number.as_i64() {
            Some(val) => DynamicValue::Int(val),
            None => DynamicValue::Float(number.as_f64()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DynamicValue::Int(val) => Some(*val),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DynamicValue::Float(val) => Some(*val),
            DynamicValue::Int(val) => Some(*val as f64),
            DynamicValue::String(_) => None,
        }
    }
}

impl From<&str> for DynamicValue {
    fn from(s: &str) -> Self {
        DynamicValue::String(s.to_owned())
    }
}

impl From<i64> for DynamicValue {
    fn from(val: i64) -> Self {
        DynamicValue::Int(val)
    }
}

impl From<f64> for DynamicValue {
    fn from(val: f64) -> Self {
        DynamicValue::Float(val)
    }
}

/// Nested objects flattened into dot-separated keys.
pub type DynamicMap = HashMap<String, DynamicValue>;

/// Decode an object of unknown shape into `dst`, flattening nested objects.
///
/// Keys are stored as `prefix + key`; a nested object recurses with
/// `prefix + key + "."`. The map is only created by the first stored value, so
/// an object with no scalar leaves keeps `dst` at `None`.
pub fn decode_dynamic_map<C: TokenCursor + ?Sized>(
    cursor: &mut C,
    dst: &mut Option<DynamicMap>,
    prefix: &str,
) -> Result<(), DecodeError> {
    cursor.for_each_member(|cursor, key| {
        let value = match cursor.peek_kind()? {
            Kind::ObjectStart => {
                let nested_prefix = format!("{prefix}{key}.");
                return decode_dynamic_map(cursor, dst, &nested_prefix);
            }
            Kind::Number => match cursor.read_token()? {
                Token::Number(number) => DynamicValue::from_number(&number),
                other => {
                    return Err(DecodeError::new(ErrorKind::UnsupportedValueKind(
                        other.kind(),
                    )))
                }
            },
            Kind::String => DynamicValue::String(read_string(cursor)?),
            other => return Err(DecodeError::new(ErrorKind::UnsupportedValueKind(other))),
        };
        dst.get_or_insert_with(HashMap::new)
            .insert(format!("{prefix}{key}"), value);
        Ok(())
    })
}

/// Decode an object whose values must all be strings.
///
/// Any other value kind fails with `UnexpectedKind`; the map is created lazily
/// as in [`decode_dynamic_map`].
pub fn decode_string_map<C: TokenCursor + ?Sized>(
    cursor: &mut C,
    dst: &mut Option<HashMap<String, String>>,
) -> Result<(), DecodeError> {
    cursor.for_each_member(|cursor, key| {
        let value = read_string(cursor)?;
        dst.get_or_insert_with(HashMap::new)
            .insert(key.to_owned(), value);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Expected;
    use crate::SliceCursor;
    use test_log::test;

    fn dynamic(json: &str) -> Result<Option<DynamicMap>, DecodeError> {
        let mut cursor = SliceCursor::new(json.as_bytes());
        let mut map = None;
        decode_dynamic_map(&mut cursor, &mut map, "")?;
        Ok(map)
    }

    #[test]
    fn test_flattens_nested_objects() {
        let map = dynamic(r#"{"os": {"name": "linux", "version": "6.1"}, "runtime": {"go": {"maxprocs": 8}}}"#)
            .unwrap()
            .unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map["os.name"], DynamicValue::from("linux"));
        assert_eq!(map["os.version"], DynamicValue::from("6.1"));
        assert_eq!(map["runtime.go.maxprocs"], DynamicValue::Int(8));
    }

    #[test]
    fn test_number_classification() {
        let map = dynamic(r#"{"count": 3, "ratio": 0.5, "huge": 12345678901234567890, "exp": 1e2}"#)
            .unwrap()
            .unwrap();
        assert_eq!(map["count"], DynamicValue::Int(3));
        assert_eq!(map["ratio"], DynamicValue::Float(0.5));
        assert_eq!(map["huge"], DynamicValue::Float(12345678901234567890.0));
        assert_eq!(map["exp"], DynamicValue::Float(100.0));
    }

    #[test]
    fn test_lazy_instantiation() {
        assert_eq!(dynamic("{}").unwrap(), None);
        assert_eq!(dynamic(r#"{"empty": {}}"#).unwrap(), None);
        let one = dynamic(r#"{"a": {"b": "c"}}"#).unwrap().unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(one.get("a.b").and_then(DynamicValue::as_str), Some("c"));
    }

    #[test]
    fn test_unsupported_kinds() {
        for (json, kind) in [
            (r#"{"flag": true}"#, Kind::Bool),
            (r#"{"nothing": null}"#, Kind::Null),
            (r#"{"list": [1, 2]}"#, Kind::ArrayStart),
        ] {
            let err = dynamic(json).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::UnsupportedValueKind(kind), "{json}");
        }
    }

    #[test]
    fn test_error_path_through_nesting() {
        let err = dynamic(r#"{"user": {"ids": {"primary": 1, "tags": [1]}}}"#).unwrap_err();
        assert_eq!(err.path_string(), "user.ids.tags");
    }

    #[test]
    fn test_prefix_is_applied() {
        let mut cursor = SliceCursor::new(br#"{"id": 7}"#);
        let mut map = None;
        decode_dynamic_map(&mut cursor, &mut map, "user.").unwrap();
        assert_eq!(map.unwrap()["user.id"], DynamicValue::Int(7));
    }

    #[test]
    fn test_merges_into_existing_map() {
        let mut cursor = SliceCursor::new(br#"{"b": "2"}"#);
        let mut map = Some(DynamicMap::from([("a".to_owned(), DynamicValue::from("1"))]));
        decode_dynamic_map(&mut cursor, &mut map, "").unwrap();
        assert_eq!(map.unwrap().len(), 2);
    }

    #[test]
    fn test_string_map() {
        let mut cursor = SliceCursor::new(br#"{"a": "1", "b": "2"}"#);
        let mut tags = None;
        decode_string_map(&mut cursor, &mut tags).unwrap();
        let expected = HashMap::from([
            ("a".to_owned(), "1".to_owned()),
            ("b".to_owned(), "2".to_owned()),
        ]);
        assert_eq!(tags, Some(expected));
    }

    #[test]
    fn test_string_map_rejects_non_strings() {
        for json in [r#"{"a": 1}"#, r#"{"a": {"b": "c"}}"#, r#"{"a": null}"#] {
            let mut cursor = SliceCursor::new(json.as_bytes());
            let mut tags = None;
            let err = decode_string_map(&mut cursor, &mut tags).unwrap_err();
            assert!(
                matches!(
                    err.kind(),
                    ErrorKind::UnexpectedKind {
                        expected: Expected::String,
                        ..
                    }
                ),
                "{json}"
            );
            assert_eq!(err.path_string(), "a");
        }
    }

    #[test]
    fn test_string_map_lazy() {
        let mut cursor = SliceCursor::new(b"{}");
        let mut tags = None;
        decode_string_map(&mut cursor, &mut tags).unwrap();
        assert_eq!(tags, None);
    }
}
