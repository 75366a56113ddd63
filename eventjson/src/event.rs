// SPDX-License-Identifier: Apache-2.0

//! Error-report event records and their decoders.
//!
//! Every record is decoded in a single pass with [`CursorExt::for_each_member`].
//! Unknown members are skipped; a key seen twice overwrites scalars and
//! appends to sequences and maps.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::scalar::{read_bool, read_i64, read_string, read_timestamp};
use crate::{
    decode_array, decode_dynamic_map, decode_string_map, CursorExt, Decode, DecodeError,
    DynamicMap, TokenCursor,
};

fn skip_unknown<C: TokenCursor + ?Sized>(
    cursor: &mut C,
    record: &str,
    key: &str,
) -> Result<(), DecodeError> {
    log::trace!("skipping unknown {record} member {key:?}");
    cursor.skip_value()?;
    Ok(())
}

/// One error report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    pub sdk: Sdk,
    pub platform: String,
    pub server_name: String,
    pub environment: String,
    pub release: String,
    pub level: String,
    pub event_id: String,
    pub message: String,
    pub contexts: Option<DynamicMap>,
    pub extra: Option<DynamicMap>,
    pub user: Option<DynamicMap>,
    pub tags: Option<HashMap<String, String>>,
    /// Exceptions in document order
    pub exception: Vec<Exception>,
    /// `None` when the document has no `timestamp` member
    pub timestamp: Option<DateTime<Utc>>,
}

impl Event {
    /// Decode a complete in-memory document.
    ///
    /// Only whitespace may follow the event.
    pub fn from_slice(data: &[u8]) -> Result<Self, DecodeError> {
        crate::from_slice(data)
    }

    /// Decode a complete document pulled from `reader`.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, DecodeError> {
        crate::from_reader(reader)
    }
}

impl Decode for Event {
    fn decode<C: TokenCursor + ?Sized>(cursor: &mut C) -> Result<Self, DecodeError> {
        let mut event = Event::default();
        cursor.for_each_member(|cursor, key| {
            match key {
                "sdk" => event.sdk = Sdk::decode(cursor)?,
                "platform" => event.platform = read_string(cursor)?,
                "server_name" => event.server_name = read_string(cursor)?,
                "environment" => event.environment = read_string(cursor)?,
                "release" => event.release = read_string(cursor)?,
                "level" => event.level = read_string(cursor)?,
                "event_id" => event.event_id = read_string(cursor)?,
                "message" => event.message = read_string(cursor)?,
                "contexts" => decode_dynamic_map(cursor, &mut event.contexts, "")?,
                "extra" => decode_dynamic_map(cursor, &mut event.extra, "")?,
                "user" => decode_dynamic_map(cursor, &mut event.user, "")?,
                "tags" => decode_string_map(cursor, &mut event.tags)?,
                "exception" => decode_array(cursor, &mut event.exception, Exception::decode)?,
                "timestamp" => event.timestamp = Some(read_timestamp(cursor)?),
                _ => skip_unknown(cursor, "event", key)?,
            }
            Ok(())
        })?;
        Ok(event)
    }
}

/// The client library that produced an [`Event`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sdk {
    pub name: String,
    pub version: String,
}

impl Decode for Sdk {
    fn decode<C: TokenCursor + ?Sized>(cursor: &mut C) -> Result<Self, DecodeError> {
        let mut sdk = Sdk::default();
        cursor.for_each_member(|cursor, key| {
            match key {
                "name" => sdk.name = read_string(cursor)?,
                "version" => sdk.version = read_string(cursor)?,
                _ => skip_unknown(cursor, "sdk", key)?,
            }
            Ok(())
        })?;
        Ok(sdk)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exception {
    pub module: String,
    pub r#type: String,
    pub value: String,
    pub frames: Vec<Frame>,
}

impl Decode for Exception {
    fn decode<C: TokenCursor + ?Sized>(cursor: &mut C) -> Result<Self, DecodeError> {
        let mut exception = Exception::default();
        cursor.for_each_member(|cursor, key| {
            match key {
                "module" => exception.module = read_string(cursor)?,
                "type" => exception.r#type = read_string(cursor)?,
                "value" => exception.value = read_string(cursor)?,
                "frames" => decode_array(cursor, &mut exception.frames, Frame::decode)?,
                _ => skip_unknown(cursor, "exception", key)?,
            }
            Ok(())
        })?;
        Ok(exception)
    }
}

/// A single stack frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub filename: String,
    pub abs_path: String,
    pub module: String,
    pub function: String,
    pub lineno: i64,
    pub context_line: String,
    pub pre_context: Vec<String>,
    pub post_context: Vec<String>,
    pub vars: Option<DynamicMap>,
    pub in_app: bool,
}

impl Decode for Frame {
    fn decode<C: TokenCursor + ?Sized>(cursor: &mut C) -> Result<Self, DecodeError> {
        let mut frame = Frame::default();
        cursor.for_each_member(|cursor, key| {
            match key {
                "filename" => frame.filename = read_string(cursor)?,
                "abs_path" => frame.abs_path = read_string(cursor)?,
                "module" => frame.module = read_string(cursor)?,
                "function" => frame.function = read_string(cursor)?,
                "lineno" => frame.lineno = read_i64(cursor)?,
                "context_line" => frame.context_line = read_string(cursor)?,
                "pre_context" => decode_array(cursor, &mut frame.pre_context, read_string)?,
                "post_context" => decode_array(cursor, &mut frame.post_context, read_string)?,
                "vars" => decode_dynamic_map(cursor, &mut frame.vars, "")?,
                "in_app" => frame.in_app = read_bool(cursor)?,
                _ => skip_unknown(cursor, "frame", key)?,
            }
            Ok(())
        })?;
        Ok(frame)
    }
}
