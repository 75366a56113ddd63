// SPDX-License-Identifier: Apache-2.0

//! Streaming decoder for error-report event documents.
//!
//! A [`Cursor`] lexes JSON from either a borrowed slice ([`SliceCursor`]) or a
//! [`Reader`] through a refill buffer ([`StreamCursor`]). Record decoders are
//! written once against [`TokenCursor`] and behave identically on both.
//! Failures carry the path from the document root, e.g.
//! `exception[1].frames[0].lineno: expected integer, found number`.
//!
//! ```rust
//! use eventjson::{DynamicValue, Event};
//!
//! let json = br#"{
//!     "platform": "go",
//!     "contexts": {"os": {"name": "linux"}},
//!     "exception": [{"type": "*errors.errorString", "frames": [{"lineno": 12}]}]
//! }"#;
//! let event = Event::from_slice(json).unwrap();
//! assert_eq!(event.platform, "go");
//! assert_eq!(
//!     event.contexts.unwrap()["os.name"],
//!     DynamicValue::String("linux".to_owned())
//! );
//! assert_eq!(event.exception[0].frames[0].lineno, 12);
//! ```

mod array;
mod chunk_reader;
mod config;
mod cursor;
mod decode;
mod dynamic_map;
mod error;
mod escape_processor;
mod event;
mod input;
mod json_number;
mod parse_error;
mod scalar;
mod stream_input;
mod token;
mod visit;

pub use array::decode_array;
pub use chunk_reader::{ChunkReader, IoReader};
pub use config::CursorConfig;
pub use cursor::{Cursor, SliceCursor, StreamCursor, TokenCursor};
pub use decode::{decode_document, from_reader, from_slice, Decode};
pub use dynamic_map::{decode_dynamic_map, decode_string_map, DynamicMap, DynamicValue};
pub use error::{DecodeError, ErrorKind, Expected, PathSegment};
pub use event::{Event, Exception, Frame, Sdk};
pub use input::{Input, SliceInput};
pub use json_number::{JsonNumber, NumberResult};
pub use parse_error::ParseError;
pub use scalar::{read_bool, read_i64, read_string, read_timestamp};
pub use stream_input::{Reader, StreamInput};
pub use token::{Kind, Token};
pub use visit::CursorExt;
