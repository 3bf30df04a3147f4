// SPDX-License-Identifier: Apache-2.0

//! Byte classification for the parser.
//!
//! Every predicate is answered from a single 256-entry table of class bits,
//! built at compile time from the plain comparisons in [`direct`].

const WHITESPACE: u8 = 1 << 0;
const DECIMAL: u8 = 1 << 1;
const HEX: u8 = 1 << 2;
const NUM_TERMINATOR: u8 = 1 << 3;
const NUM_START: u8 = 1 << 4;

static CLASSES: [u8; 256] = build_table();

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let b = i as u8;
        let mut class = 0;
        if direct::is_whitespace(b) {
            class |= WHITESPACE;
        }
        if direct::is_decimal_digit(b) {
            class |= DECIMAL;
        }
        if direct::is_hex_digit(b) {
            class |= HEX;
        }
        if direct::is_number_terminator(b) {
            class |= NUM_TERMINATOR;
        }
        if direct::is_number_start(b) {
            class |= NUM_START;
        }
        table[i] = class;
        i += 1;
    }
    table
}

#[inline]
fn has(b: u8, class: u8) -> bool {
    CLASSES[b as usize] & class != 0
}

/// Space, tab, newline, vertical tab, form feed or carriage return.
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    has(b, WHITESPACE)
}

#[inline]
pub fn is_decimal_digit(b: u8) -> bool {
    has(b, DECIMAL)
}

#[inline]
pub fn is_hex_digit(b: u8) -> bool {
    has(b, HEX)
}

/// One of `,` `]` `\0` `\n`.
#[inline]
pub fn is_number_terminator(b: u8) -> bool {
    has(b, NUM_TERMINATOR)
}

/// A byte that can open a number literal: a digit, `-`, `+` or `.`.
#[inline]
pub fn is_number_start(b: u8) -> bool {
    has(b, NUM_START)
}

/// Any byte that ends a number literal.
///
/// The terminators plus `}` and whitespace, so members such as `{"a": 1 }`
/// end cleanly.
#[inline]
pub fn is_number_delimiter(b: u8) -> bool {
    is_number_terminator(b) || is_whitespace(b) || b == b'}'
}

/// Value of a hex digit. The caller has checked [`is_hex_digit`].
#[inline]
pub const fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b.wrapping_sub(b'A').wrapping_add(10),
    }
}

/// The reference comparisons the table is built from.
pub(crate) mod direct {
    pub const fn is_whitespace(b: u8) -> bool {
        matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
    }

    pub const fn is_decimal_digit(b: u8) -> bool {
        b.is_ascii_digit()
    }

    pub const fn is_hex_digit(b: u8) -> bool {
        b.is_ascii_hexdigit()
    }

    pub const fn is_number_terminator(b: u8) -> bool {
        matches!(b, b',' | b']' | b'\0' | b'\n')
    }

    pub const fn is_number_start(b: u8) -> bool {
        is_decimal_digit(b) || matches!(b, b'-' | b'+' | b'.')
    }
}
