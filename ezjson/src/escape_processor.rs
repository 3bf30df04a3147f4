// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;
use alloc::vec::Vec;

use crate::char_class;
use crate::cursor::Cursor;
use crate::parse_error::{ErrorKind, ParseError};

/// JSON string decoding: escape sequences, `\u` codepoints and surrogate pairs.
pub struct EscapeProcessor;

impl EscapeProcessor {
    /// Process a simple escape sequence character and return the unescaped byte.
    ///
    /// Returns `None` for `u`, which starts a codepoint escape, and for any
    /// byte that is not a JSON escape.
    pub fn process_simple_escape(escape_char: u8) -> Option<u8> {
        match escape_char {
            b'n' => Some(b'\n'),
            b't' => Some(b'\t'),
            b'r' => Some(b'\r'),
            b'\\' => Some(b'\\'),
            b'"' => Some(b'"'),
            b'/' => Some(b'/'),
            b'b' => Some(0x08), // Backspace
            b'f' => Some(0x0C), // Form feed
            _ => None,
        }
    }

    /// Check if a Unicode codepoint is a high surrogate (0xD800-0xDBFF)
    pub fn is_high_surrogate(codepoint: u32) -> bool {
        (0xD800..=0xDBFF).contains(&codepoint)
    }

    /// Check if a Unicode codepoint is a low surrogate (0xDC00-0xDFFF)
    pub fn is_low_surrogate(codepoint: u32) -> bool {
        (0xDC00..=0xDFFF).contains(&codepoint)
    }

    /// Combine a high and low surrogate pair into a single Unicode codepoint.
    ///
    /// The caller has checked both halves.
    pub fn combine_surrogate_pair(high: u32, low: u32) -> u32 {
        0x10000 + (((high & 0x3FF) << 10) | (low & 0x3FF))
    }

    /// Encodes `codepoint` as UTF-8 into `buf`, returning the bytes written.
    pub fn encode_utf8(codepoint: u32, buf: &mut [u8; 4]) -> &[u8] {
        let len = if codepoint <= 0x7F {
            buf[0] = codepoint as u8;
            1
        } else if codepoint <= 0x7FF {
            buf[0] = 0xC0 | (codepoint >> 6) as u8;
            buf[1] = 0x80 | (codepoint & 0x3F) as u8;
            2
        } else if codepoint <= 0xFFFF {
            buf[0] = 0xE0 | (codepoint >> 12) as u8;
            buf[1] = 0x80 | ((codepoint >> 6) & 0x3F) as u8;
            buf[2] = 0x80 | (codepoint & 0x3F) as u8;
            3
        } else {
            buf[0] = 0xF0 | (codepoint >> 18) as u8;
            buf[1] = 0x80 | ((codepoint >> 12) & 0x3F) as u8;
            buf[2] = 0x80 | ((codepoint >> 6) & 0x3F) as u8;
            buf[3] = 0x80 | (codepoint & 0x3F) as u8;
            4
        };
        &buf[..len]
    }

    /// Reads the four hex digits starting at `at`, none of which may reach `end`.
    fn read_hex4(cursor: &Cursor<'_>, at: usize, end: usize) -> Result<u32, ParseError> {
        if at + 4 > end {
            return Err(cursor.error_at(ErrorKind::InvalidUtf16, at));
        }
        let mut codepoint = 0u32;
        for pos in at..at + 4 {
            let b = cursor.peek_at(pos);
            if !char_class::is_hex_digit(b) {
                return Err(cursor.error_at(ErrorKind::InvalidHex, pos));
            }
            codepoint = (codepoint << 4) | u32::from(char_class::hex_value(b));
        }
        Ok(codepoint)
    }

    /// Decodes the `\u` escape whose `u` sits at `at`.
    ///
    /// Returns the codepoint and the position just past the escape (or pair).
    pub(crate) fn process_unicode_escape(
        cursor: &Cursor<'_>,
        at: usize,
        end: usize,
    ) -> Result<(u32, usize), ParseError> {
        let first = at + 1;
        let codepoint = Self::read_hex4(cursor, first, end)?;

        if Self::is_low_surrogate(codepoint) {
            return Err(cursor.error_at(ErrorKind::InvalidUtf16Surrogate, first));
        }
        if !Self::is_high_surrogate(codepoint) {
            return Ok((codepoint, first + 4));
        }

        let next = first + 4;
        if next + 1 >= end || cursor.peek_at(next) != b'\\' || cursor.peek_at(next + 1) != b'u' {
            return Err(cursor.error_at(ErrorKind::InvalidUtf16Surrogate, next));
        }
        let low = Self::read_hex4(cursor, next + 2, end)?;
        if !Self::is_low_surrogate(low) {
            return Err(cursor.error_at(ErrorKind::InvalidUtf16Surrogate, next + 2));
        }
        Ok((Self::combine_surrogate_pair(codepoint, low), next + 6))
    }

    /// Finds the closing quote of the string whose body starts at the cursor.
    fn find_closing_quote(cursor: &Cursor<'_>) -> Result<usize, ParseError> {
        let mut escaped = false;
        for (i, &b) in cursor.remaining().iter().enumerate() {
            let pos = cursor.offset() + i;
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => return Ok(pos),
                b'\0' => return Err(cursor.error_at(ErrorKind::InvalidStringNotTerminated, pos)),
                _ => {}
            }
        }
        Err(cursor.error_at(ErrorKind::Eof, cursor.len()))
    }

    /// Reads the string starting at the opening quote under the cursor.
    ///
    /// The cursor is left just past the closing quote.
    pub(crate) fn read_string(cursor: &mut Cursor<'_>) -> Result<String, ParseError> {
        cursor.advance()?;
        let start = cursor.offset();
        let end = Self::find_closing_quote(cursor)?;

        // Escapes are ASCII and decode to valid UTF-8, so the raw bytes decide.
        if let Err(e) = core::str::from_utf8(cursor.slice(start, end)) {
            return Err(cursor.error_at(ErrorKind::InvalidUtf8, start + e.valid_up_to()));
        }

        let mut out = Vec::with_capacity(end - start);
        let mut utf8 = [0u8; 4];
        let mut pos = start;
        while pos < end {
            let b = cursor.peek_at(pos);
            if b != b'\\' {
                out.push(b);
                pos += 1;
                continue;
            }
            let escape = cursor.peek_at(pos + 1);
            if escape == b'u' {
                let (codepoint, next) = Self::process_unicode_escape(cursor, pos + 1, end)?;
                out.extend_from_slice(Self::encode_utf8(codepoint, &mut utf8));
                pos = next;
            } else {
                let unescaped = Self::process_simple_escape(escape)
                    .ok_or_else(|| cursor.error_at(ErrorKind::InvalidEscape, pos + 1))?;
                out.push(unescaped);
                pos += 2;
            }
        }

        cursor.advance_by(end + 1 - cursor.offset());
        String::from_utf8(out).map_err(|_| cursor.error_at(ErrorKind::InvalidUtf8, start))
    }
}
