// SPDX-License-Identifier: Apache-2.0

use alloc::vec::Vec;

use log::{debug, trace};

use crate::cursor::Cursor;
use crate::escape_processor::EscapeProcessor;
use crate::number_parser;
use crate::parse_error::{ErrorKind, ParseError};
use crate::parse_options::ParseOptions;
use crate::value::Value;

/// Recursive-descent parser building a [`Value`] tree straight off the input bytes.
///
/// The first error aborts the parse. Whatever was built before it is owned
/// by the call stack and dropped on the way out.
struct TreeParser<'a> {
    cursor: Cursor<'a>,
    options: ParseOptions,
    depth: usize,
}

impl<'a> TreeParser<'a> {
    fn new(input: &'a [u8], options: ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(input),
            options,
            depth: 0,
        }
    }

    fn parse_document(&mut self) -> Result<Value, ParseError> {
        self.cursor.advance_whitespace();
        let root = match self.cursor.peek() {
            b'{' => self.parse_object()?,
            b'[' => self.parse_array()?,
            _ => return Err(self.cursor.error(ErrorKind::CannotStartParse)),
        };
        self.cursor.advance_whitespace();
        if !self.cursor.is_at_end() {
            return Err(self.cursor.error(ErrorKind::TrailingCharacters));
        }
        Ok(root)
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(self.cursor.error(ErrorKind::MaxDepthReached));
        }
        self.depth += 1;
        Ok(())
    }

    /// Picks the value parser from the byte under the cursor.
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.cursor.peek() {
            b'{' => self.parse_object(),
            b'[' => self.parse_array(),
            b'"' => EscapeProcessor::read_string(&mut self.cursor).map(Value::String),
            b't' => self.parse_literal(b"true", ErrorKind::InvalidBool).map(|_| Value::Bool(true)),
            b'f' => self
                .parse_literal(b"false", ErrorKind::InvalidBool)
                .map(|_| Value::Bool(false)),
            b'n' => self.parse_literal(b"null", ErrorKind::InvalidNull).map(|_| Value::Null),
            b if crate::char_class::is_number_start(b) => {
                number_parser::read_number(&mut self.cursor, self.options.numbers_as_strings)
            }
            _ if self.cursor.is_at_end() => Err(self.cursor.error(ErrorKind::Eof)),
            _ => Err(self.cursor.error(ErrorKind::InvalidJsonTypeChar)),
        }
    }

    fn parse_literal(&mut self, literal: &[u8], mismatch: ErrorKind) -> Result<(), ParseError> {
        if !self.cursor.can_advance_by(literal.len() - 1) {
            return Err(self.cursor.error(ErrorKind::CannotAdvance));
        }
        let start = self.cursor.offset();
        let found = self.cursor.slice(start, start + literal.len());
        if let Some(i) = found.iter().zip(literal).position(|(a, b)| a != b) {
            return Err(self.cursor.error_at(mismatch, start + i));
        }
        self.cursor.advance_by(literal.len());
        Ok(())
    }

    /// After an element: `,` means another one follows, `close` ends the container.
    fn next_element(&mut self, close: u8) -> Result<bool, ParseError> {
        self.cursor.advance_whitespace();
        match self.cursor.peek() {
            b',' => {
                self.cursor.advance()?;
                Ok(true)
            }
            b if b == close => {
                self.cursor.advance()?;
                Ok(false)
            }
            _ if self.cursor.is_at_end() => Err(self.cursor.error(ErrorKind::Eof)),
            _ => Err(self.cursor.error(ErrorKind::UnexpectedCharacter)),
        }
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        self.cursor.advance()?;
        self.cursor.advance_whitespace();

        let mut members = Vec::new();
        if self.cursor.peek() == b'}' {
            self.cursor.advance()?;
        } else {
            loop {
                self.cursor.expect_after_whitespace(b'"')?;
                let key = EscapeProcessor::read_string(&mut self.cursor)?;
                self.cursor.expect_after_whitespace(b':')?;
                self.cursor.advance()?;
                self.cursor.advance_whitespace();
                let value = self.parse_value()?;
                members.push((key, value));
                if !self.next_element(b'}')? {
                    break;
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Object(members))
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        self.enter()?;
        self.cursor.advance()?;
        self.cursor.advance_whitespace();

        let mut items = Vec::new();
        if self.cursor.peek() == b']' {
            self.cursor.advance()?;
        } else {
            loop {
                self.cursor.advance_whitespace();
                items.push(self.parse_value()?);
                if !self.next_element(b']')? {
                    break;
                }
            }
        }

        self.depth -= 1;
        Ok(Value::Array(items))
    }
}

/// Parses a JSON document with the given options.
///
/// The document must be an object or an array, optionally surrounded by
/// whitespace.
pub fn parse_with_options(input: &[u8], options: ParseOptions) -> Result<Value, ParseError> {
    trace!("parsing {} bytes with {:?}", input.len(), options);
    let mut parser = TreeParser::new(input, options);
    match parser.parse_document() {
        Ok(root) => {
            trace!("parsed {:?} document", root.kind());
            Ok(root)
        }
        Err(e) => {
            debug!("parse failed: {e}");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use test_log::test;

    fn parse(s: &str) -> Result<Value, ParseError> {
        parse_with_options(s.as_bytes(), ParseOptions::default())
    }

    fn error_of(s: &str) -> ParseError {
        match parse(s) {
            Ok(v) => panic!("{s:?} parsed as {v:?}"),
            Err(e) => e,
        }
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(parse("{}"), Ok(Value::Object(vec![])));
        assert_eq!(parse("[]"), Ok(Value::Array(vec![])));
        assert_eq!(parse("  { \n }  "), Ok(Value::Object(vec![])));
        assert_eq!(parse("[ ]"), Ok(Value::Array(vec![])));
    }

    #[test]
    fn test_scalars_in_array() {
        assert_eq!(
            parse(r#"[1, -2.5, "s", true, false, null]"#),
            Ok(Value::Array(vec![
                Value::Int(1),
                Value::Float(-2.5),
                Value::String("s".into()),
                Value::Bool(true),
                Value::Bool(false),
                Value::Null,
            ]))
        );
    }

    #[test]
    fn test_nested_object() {
        let v = parse(r#"{"a": {"b": [1, 2, 3]}, "c": {}}"#).unwrap();
        let b = v.get("a").and_then(|a| a.get("b")).unwrap();
        assert_eq!(b.at(2), Some(&Value::Int(3)));
        assert_eq!(v.get("c"), Some(&Value::Object(vec![])));
    }

    #[test]
    fn test_numbers_before_closers_and_whitespace() {
        let v = parse("{\"a\": 1 , \"b\":2}").unwrap();
        assert_eq!(v.get("a"), Some(&Value::Int(1)));
        assert_eq!(v.get("b"), Some(&Value::Int(2)));
        assert_eq!(parse("[1\r\n]"), Ok(Value::Array(vec![Value::Int(1)])));
    }

    #[test]
    fn test_numbers_as_strings() {
        let options = ParseOptions::new().numbers_as_strings(true);
        let v = parse_with_options(b"[0xFF, 1.50]", options).unwrap();
        assert_eq!(
            v,
            Value::Array(vec![Value::StrNum("0xFF".into()), Value::StrNum("1.50".into())])
        );
    }

    #[test]
    fn test_must_start_with_container() {
        for input in ["", "   ", "1", "\"s\"", "true", "null"] {
            let e = error_of(input);
            assert_eq!(e.kind(), ErrorKind::CannotStartParse, "{input:?}");
        }
        assert_eq!(error_of("  x").offset(), 2);
    }

    #[test]
    fn test_invalid_type_char() {
        let e = error_of("[1, @]");
        assert_eq!(e.kind(), ErrorKind::InvalidJsonTypeChar);
        assert_eq!(e.character(), b'@');
        assert_eq!(e.offset(), 4);
    }

    #[test]
    fn test_literals() {
        assert_eq!(error_of("[tru]").kind(), ErrorKind::InvalidBool);
        assert_eq!(error_of("[fals]").kind(), ErrorKind::InvalidBool);
        assert_eq!(error_of("[nul]").kind(), ErrorKind::InvalidNull);
        assert_eq!(error_of("[tr").kind(), ErrorKind::CannotAdvance);
        assert_eq!(error_of("[nu").kind(), ErrorKind::CannotAdvance);
        let e = error_of("[trxe]");
        assert_eq!(e.offset(), 3);
        assert_eq!(e.character(), b'x');
    }

    #[test]
    fn test_unterminated_containers() {
        assert_eq!(error_of("[1, 2").kind(), ErrorKind::Eof);
        assert_eq!(error_of("{\"a\": 1").kind(), ErrorKind::Eof);
        assert_eq!(error_of("{\"a\"").kind(), ErrorKind::Eof);
        assert_eq!(error_of("{").kind(), ErrorKind::Eof);
        assert_eq!(error_of("[").kind(), ErrorKind::Eof);
        assert_eq!(error_of("[1,").kind(), ErrorKind::Eof);
        assert_eq!(error_of("{\"a\":").kind(), ErrorKind::Eof);
    }

    #[test]
    fn test_bad_separators() {
        let e = error_of("[1 2]");
        assert_eq!(e.kind(), ErrorKind::UnexpectedCharacter);
        assert_eq!(e.offset(), 3);
        assert_eq!(error_of("{\"a\": 1]").kind(), ErrorKind::UnexpectedCharacter);
    }

    #[test]
    fn test_object_keys_and_colons_are_strict() {
        // A trailing comma must not pull the next object's members in.
        let e = error_of(r#"[{"a":1,},{"b":2}]"#);
        assert_eq!(e.kind(), ErrorKind::UnexpectedCharacter);
        assert_eq!(e.character(), b'}');
        assert_eq!(e.offset(), 8);

        let e = error_of(r#"{"a" x: 1}"#);
        assert_eq!(e.kind(), ErrorKind::UnexpectedCharacter);
        assert_eq!(e.character(), b'x');
        assert_eq!(e.offset(), 5);

        let e = error_of(r#"{name: 1, "x": 2}"#);
        assert_eq!(e.kind(), ErrorKind::UnexpectedCharacter);
        assert_eq!(e.character(), b'n');
        assert_eq!(e.offset(), 1);

        let e = error_of(r#"{"a" garbage : 1, junk "b": 2}"#);
        assert_eq!(e.offset(), 5);

        assert_eq!(
            parse("{ \"a\"\n\t:\r 1 ,\n \"b\" : 2 }"),
            Ok(Value::Object(vec![
                ("a".into(), Value::Int(1)),
                ("b".into(), Value::Int(2)),
            ]))
        );
    }

    #[test]
    fn test_trailing_characters() {
        let e = error_of("{} x");
        assert_eq!(e.kind(), ErrorKind::TrailingCharacters);
        assert_eq!(e.offset(), 3);
        assert!(parse("[1]  \n").is_ok());
    }

    #[test]
    fn test_max_depth() {
        let options = ParseOptions::new().max_depth(2);
        assert!(parse_with_options(b"[[1]]", options).is_ok());
        let e = parse_with_options(b"[[[1]]]", options).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::MaxDepthReached);
        assert_eq!(e.offset(), 2);

        let deep = "[".repeat(2000) + &"]".repeat(2000);
        assert_eq!(error_of(&deep).kind(), ErrorKind::MaxDepthReached);
    }

    #[test]
    fn test_first_error_wins() {
        // Both the number and the string are bad; the number comes first.
        let e = error_of(r#"[1.2.3, "\q"]"#);
        assert_eq!(e.kind(), ErrorKind::InvalidNumber);
        assert_eq!(e.offset(), 4);
    }
}
