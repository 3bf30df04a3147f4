// SPDX-License-Identifier: Apache-2.0

/// The kind of failure recorded by a parse.
///
/// Only the first failure of a parse is ever reported; parsing stops there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A `\u` escape was cut short before its four hex digits.
    InvalidUtf16,
    /// A surrogate escape was unpaired or paired with the wrong half.
    InvalidUtf16Surrogate,
    /// A byte that is not a hex digit appeared where one was required.
    InvalidHex,
    /// A string ran into an embedded NUL byte before its closing quote.
    InvalidStringNotTerminated,
    /// A number literal was malformed or out of range.
    InvalidNumber,
    /// The byte at the start of a value does not begin any JSON type.
    InvalidJsonTypeChar,
    /// A value starting with `t` or `f` was not `true` or `false`.
    InvalidBool,
    /// A value starting with `n` was not `null`.
    InvalidNull,
    /// An escape sequence named an unknown escape character.
    InvalidEscape,
    /// Raw string bytes were not valid UTF-8.
    InvalidUtf8,
    /// Too few bytes remained to read a fixed-length literal.
    CannotAdvance,
    /// The document did not start with `{` or `[`.
    CannotStartParse,
    /// A container element was followed by something other than `,` or the closer.
    UnexpectedCharacter,
    /// Non-whitespace bytes followed the top-level value.
    TrailingCharacters,
    /// Containers were nested deeper than the configured limit.
    MaxDepthReached,
    /// The buffer ended while more input was required.
    Eof,
}

impl ErrorKind {
    /// Numeric error code. Codes shared with the C library keep their values.
    pub const fn code(self) -> u32 {
        match self {
            ErrorKind::InvalidUtf16 => 0x1,
            ErrorKind::InvalidUtf16Surrogate => 0x2,
            ErrorKind::InvalidHex => 0x4,
            ErrorKind::InvalidStringNotTerminated => 0x8,
            ErrorKind::InvalidNumber => 0x10,
            ErrorKind::InvalidJsonTypeChar => 0x80,
            ErrorKind::InvalidBool => 0x100,
            ErrorKind::CannotAdvance => 0x400,
            ErrorKind::CannotStartParse => 0x800,
            ErrorKind::InvalidNull => 0x1000,
            ErrorKind::InvalidEscape => 0x2000,
            ErrorKind::InvalidUtf8 => 0x4000,
            ErrorKind::UnexpectedCharacter => 0x8000,
            ErrorKind::TrailingCharacters => 0x10000,
            ErrorKind::MaxDepthReached => 0x20000,
            ErrorKind::Eof => 0x10000000,
        }
    }
}

/// A parse failure: what went wrong, the byte found there, and where.
///
/// `character` is `0` when the failure happened at the end of the buffer.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    kind: ErrorKind,
    character: u8,
    offset: usize,
}

impl ParseError {
    pub const fn new(kind: ErrorKind, character: u8, offset: usize) -> Self {
        Self {
            kind,
            character,
            offset,
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Numeric code of [`kind`](Self::kind).
    pub const fn code(&self) -> u32 {
        self.kind.code()
    }

    /// The offending byte.
    pub const fn character(&self) -> u8 {
        self.character
    }

    /// Byte offset of the offending byte from the start of the buffer.
    pub const fn offset(&self) -> usize {
        self.offset
    }
}

/// Renders a byte for an error message: printable ASCII as-is, the rest escaped.
struct Shown(u8);

impl core::fmt::Display for Shown {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            0x20..=0x7E => write!(f, "{}", self.0 as char),
            other => write!(f, "\\x{other:02x}"),
        }
    }
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let ch = Shown(self.character);
        let at = self.offset;
        match self.kind {
            ErrorKind::InvalidUtf16 => write!(
                f,
                "Unexpected UTF16 character '{ch}' while parsing UTF16 at position: {at}"
            ),
            ErrorKind::InvalidUtf16Surrogate => write!(
                f,
                "Unexpected UTF16 surrogate character '{ch}' while parsing UTF16 at position: {at}"
            ),
            ErrorKind::InvalidHex => {
                write!(f, "Unexpected hex '{ch}' at position: {at}")
            }
            ErrorKind::InvalidStringNotTerminated => write!(
                f,
                "Expected '\"' to terminate string received '{ch}' at position: {at}"
            ),
            ErrorKind::InvalidNumber => write!(
                f,
                "Unexpected numeric character '{ch}' while parsing number at position: {at}"
            ),
            ErrorKind::InvalidJsonTypeChar => write!(
                f,
                "Unexpected character '{ch}' while seeking next type to parse at position: {at}"
            ),
            ErrorKind::InvalidBool => write!(
                f,
                "Unexpected character '{ch}' while parsing boolean at position: {at}"
            ),
            ErrorKind::InvalidNull => write!(
                f,
                "Unexpected character '{ch}' while parsing null at position: {at}"
            ),
            ErrorKind::InvalidEscape => write!(
                f,
                "Unexpected escape character '{ch}' while parsing string at position: {at}"
            ),
            ErrorKind::InvalidUtf8 => {
                write!(f, "Invalid UTF-8 in string starting at position: {at}")
            }
            ErrorKind::CannotStartParse => {
                write!(f, "JSON must start with '[' or '{{', at position: {at}")
            }
            ErrorKind::UnexpectedCharacter => write!(
                f,
                "Expected ',' or closing bracket, received '{ch}' at position: {at}"
            ),
            ErrorKind::TrailingCharacters => write!(
                f,
                "Unexpected character '{ch}' after end of document at position: {at}"
            ),
            ErrorKind::MaxDepthReached => {
                write!(f, "Maximum nesting depth exceeded at position: {at}")
            }
            ErrorKind::CannotAdvance | ErrorKind::Eof => {
                write!(f, "Unexpected end of json buffer at position: {at}")
            }
        }
    }
}

impl core::fmt::Debug for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}({}) at {}", self.kind, Shown(self.character), self.offset)
    }
}

impl core::error::Error for ParseError {}
