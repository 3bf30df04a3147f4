// SPDX-License-Identifier: Apache-2.0

//! A small JSON tree parser.
//!
//! Documents are parsed straight off a byte buffer into an owned [`Value`]
//! tree. Numbers are decoded without going through a generic string-to-float
//! routine, hex integers (`0xFF`) are accepted, and strings handle escapes
//! and UTF-16 surrogate pairs. Trees can be queried with compact path
//! expressions, see [`select`], and written back out with
//! [`Value::to_json_string`].
//!
//! ```
//! use ezjson::{parse_str, select, Value};
//!
//! let doc = parse_str(r#"{"servers": [{"name": "alpha", "port": 8080}]}"#).unwrap();
//! assert_eq!(select!(&doc, ".servers[*].port:i", 0), Some(&Value::Int(8080)));
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod char_class;

mod cursor;

mod escape_processor;
pub use escape_processor::EscapeProcessor;

mod int_parser;

mod number_parser;
pub use number_parser::parse_number;

mod parse_error;
pub use parse_error::{ErrorKind, ParseError};

mod parse_options;
pub use parse_options::{ParseOptions, DEFAULT_MAX_DEPTH};

mod pow10;

mod selector;
pub use selector::{select, SelectArg, MAX_TOKEN_LEN};

mod serializer;

mod tree_parser;
pub use tree_parser::parse_with_options;

mod value;
pub use value::{Kind, Value};

/// Parses a JSON document with default options.
///
/// The document must be an object or an array.
pub fn parse(input: &[u8]) -> Result<Value, ParseError> {
    parse_with_options(input, ParseOptions::default())
}

/// Parses a JSON document held in a string.
pub fn parse_str(input: &str) -> Result<Value, ParseError> {
    parse(input.as_bytes())
}
