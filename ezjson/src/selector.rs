// SPDX-License-Identifier: Apache-2.0

//! Path expressions over a parsed tree.
//!
//! An expression is a sequence of segments:
//!
//! | Segment  | Meaning                                          |
//! |----------|--------------------------------------------------|
//! | `.key`   | object member named `key` (first match)          |
//! | `[n]`    | array element `n`, zero based, digits only       |
//! | `:t`     | the current node is of type `t`, no descent      |
//!
//! Type characters are `s` string, `i` int, `f` float, `n` any number,
//! `o` object, `a` array, `b` bool and `!` null.
//!
//! A key or index token may hold one `*`, replaced by the next argument:
//! a [`SelectArg::Key`] in a key, a [`SelectArg::Index`] in an index. Every
//! argument must be used. Any failure, whether a malformed expression, a
//! mismatched or missing argument, or a missing node, yields `None`.

use core::fmt::{self, Write};

use log::trace;

use crate::char_class;
use crate::int_parser;
use crate::value::{Kind, Value};

/// Capacity of the buffer a single segment token is assembled in.
pub const MAX_TOKEN_LEN: usize = 256;

/// A runtime argument bound to a `*` wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectArg<'a> {
    Index(i64),
    Key(&'a str),
}

impl From<i64> for SelectArg<'_> {
    fn from(n: i64) -> Self {
        SelectArg::Index(n)
    }
}

impl From<i32> for SelectArg<'_> {
    fn from(n: i32) -> Self {
        SelectArg::Index(i64::from(n))
    }
}

impl From<u32> for SelectArg<'_> {
    fn from(n: u32) -> Self {
        SelectArg::Index(i64::from(n))
    }
}

impl From<usize> for SelectArg<'_> {
    fn from(n: usize) -> Self {
        // Too large to be a valid position either way.
        SelectArg::Index(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl<'a> From<&'a str> for SelectArg<'a> {
    fn from(key: &'a str) -> Self {
        SelectArg::Key(key)
    }
}

impl<'a> From<&'a alloc::string::String> for SelectArg<'a> {
    fn from(key: &'a alloc::string::String) -> Self {
        SelectArg::Key(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Key,
    Index,
    TypeCheck,
}

/// Fixed-capacity token assembly buffer.
struct TokenBuf {
    bytes: [u8; MAX_TOKEN_LEN],
    len: usize,
}

impl TokenBuf {
    fn new() -> Self {
        Self {
            bytes: [0; MAX_TOKEN_LEN],
            len: 0,
        }
    }

    fn clear(&mut self) {
        self.len = 0;
    }

    fn push(&mut self, src: &[u8]) -> Option<()> {
        let end = self.len.checked_add(src.len()).filter(|&end| end <= MAX_TOKEN_LEN)?;
        self.bytes[self.len..end].copy_from_slice(src);
        self.len = end;
        Some(())
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }
}

impl Write for TokenBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push(s.as_bytes()).ok_or(fmt::Error)
    }
}

fn type_matches(value: &Value, type_char: u8) -> bool {
    match type_char {
        b's' => value.kind() == Kind::String,
        b'i' => value.kind() == Kind::Int,
        b'f' => value.kind() == Kind::Float,
        b'n' => value.is_number(),
        b'o' => value.kind() == Kind::Object,
        b'a' => value.kind() == Kind::Array,
        b'b' => value.kind() == Kind::Bool,
        b'!' => value.kind() == Kind::Null,
        _ => false,
    }
}

fn resolve<'v>(current: &'v Value, segment: Segment, token: &[u8]) -> Option<&'v Value> {
    match segment {
        Segment::Key => current
            .as_object()?
            .iter()
            .find(|(k, _)| k.as_bytes() == token)
            .map(|(_, v)| v),
        Segment::Index => {
            // Plain digits only, no sign.
            if !token.iter().all(|&b| char_class::is_decimal_digit(b)) {
                return None;
            }
            let index = int_parser::from_ascii_usize(token).ok()?;
            current.at(index)
        }
        Segment::TypeCheck => match token {
            [type_char] if type_matches(current, *type_char) => Some(current),
            _ => None,
        },
    }
}

fn evaluate<'v>(root: &'v Value, path: &str, args: &[SelectArg<'_>]) -> Option<&'v Value> {
    let bytes = path.as_bytes();
    let mut args = args.iter();
    let mut token = TokenBuf::new();
    let mut current = root;
    let mut pos = 0;

    while pos < bytes.len() {
        let segment = match bytes[pos] {
            b'.' => Segment::Key,
            b'[' => Segment::Index,
            b':' => Segment::TypeCheck,
            _ => return None,
        };
        pos += 1;

        token.clear();
        let mut wildcard_used = false;
        while let Some(&b) = bytes.get(pos) {
            if matches!(b, b'.' | b'[' | b':' | b']') {
                break;
            }
            if b == b'*' {
                if wildcard_used {
                    return None;
                }
                wildcard_used = true;
                match (segment, args.next()?) {
                    (Segment::Index, SelectArg::Index(n)) => write!(token, "{n}").ok()?,
                    (Segment::Key, SelectArg::Key(k)) => token.push(k.as_bytes())?,
                    _ => return None,
                }
            } else {
                token.push(&[b])?;
            }
            pos += 1;
        }

        if segment == Segment::Index {
            if bytes.get(pos) != Some(&b']') {
                return None;
            }
            pos += 1;
        }
        if token.as_bytes().is_empty() {
            return None;
        }
        current = resolve(current, segment, token.as_bytes())?;
    }

    match args.next() {
        Some(_) => None,
        None => Some(current),
    }
}

/// Evaluates `path` against `root`, binding `*` wildcards to `args` in order.
///
/// An empty path selects `root` itself.
///
/// ```
/// use ezjson::{parse_str, select, SelectArg, Value};
///
/// let doc = parse_str(r#"{"a": {"b": [1, 2, 3]}}"#).unwrap();
/// assert_eq!(select(&doc, ".a.b[2]", &[]), Some(&Value::Int(3)));
/// assert_eq!(select(&doc, ".a.*[*]", &[SelectArg::Key("b"), SelectArg::Index(0)]), Some(&Value::Int(1)));
/// assert_eq!(select(&doc, ".a.c", &[]), None);
/// ```
pub fn select<'v>(root: &'v Value, path: &str, args: &[SelectArg<'_>]) -> Option<&'v Value> {
    let found = evaluate(root, path, args);
    if found.is_none() {
        trace!("no match for selector {path:?} with {} argument(s)", args.len());
    }
    found
}

/// Evaluates a selector with wildcard arguments of mixed types.
///
/// Integers bind `[*]` wildcards and strings bind `.*` wildcards.
///
/// ```
/// use ezjson::{parse_str, select, Value};
///
/// let doc = parse_str(r#"{"items": [{"price_eur": 3}]}"#).unwrap();
/// assert_eq!(select!(&doc, ".items[*].price_*:i", 0, "eur"), Some(&Value::Int(3)));
/// ```
#[macro_export]
macro_rules! select {
    ($value:expr, $path:expr $(, $arg:expr)* $(,)?) => {
        $crate::select($value, $path, &[$($crate::SelectArg::from($arg)),*])
    };
}
