// SPDX-License-Identifier: Apache-2.0

//! Number literal parsing.
//!
//! A literal is first scanned and validated in one pass, then decoded into an
//! `Int`, a `Float` or, when numbers are kept as text, a `StrNum`.
//!
//! Integers go through the strict base-10 accumulator and are scaled by a
//! positive exponent when that stays in range. Everything else is decoded as
//! a float: at most 18 significant digits are kept, split into a high and a
//! low chunk of nine, combined into one double and scaled by the net decimal
//! exponent.

use alloc::string::String;

use crate::char_class;
use crate::cursor::Cursor;
use crate::int_parser;
use crate::parse_error::{ErrorKind, ParseError};
use crate::pow10;
use crate::value::Value;

/// Most significant digits that take part in a float conversion.
const MAX_MANTISSA_DIGITS: usize = 18;
/// Digits in each half of the mantissa.
const CHUNK_DIGITS: usize = 9;
/// Explicit exponents stop accumulating once they reach this value.
const EXPONENT_ACCUMULATION_LIMIT: i64 = (i32::MAX / 100) as i64;

/// Where the interesting parts of a validated literal are, relative to its start.
#[derive(Debug, Default)]
struct Layout {
    negative: bool,
    /// First byte after the sign.
    body: usize,
    hex: bool,
    dot: Option<usize>,
    exponent: Option<usize>,
    int_digits: usize,
}

/// Validates `lit`, reporting errors at `base + index`.
fn validate(lit: &[u8], base: usize) -> Result<Layout, ParseError> {
    let at = |kind, idx: usize| {
        ParseError::new(kind, lit.get(idx).copied().unwrap_or(b'\0'), base + idx)
    };

    let mut layout = Layout::default();
    match lit.first() {
        None => return Err(at(ErrorKind::InvalidNumber, 0)),
        Some(b'-') => {
            layout.negative = true;
            layout.body = 1;
        }
        Some(b'+') => layout.body = 1,
        Some(_) => {}
    }
    let body = layout.body;

    if lit.get(body) == Some(&b'0') && matches!(lit.get(body + 1), Some(b'x' | b'X')) {
        layout.hex = true;
        let digits_start = body + 2;
        if digits_start >= lit.len() {
            return Err(at(ErrorKind::InvalidHex, digits_start));
        }
        for (idx, &b) in lit.iter().enumerate().skip(digits_start) {
            if matches!(b, b'.' | b'x' | b'X' | b'+' | b'-') {
                return Err(at(ErrorKind::InvalidNumber, idx));
            }
            if !char_class::is_hex_digit(b) {
                return Err(at(ErrorKind::InvalidHex, idx));
            }
        }
        return Ok(layout);
    }

    let mut frac_digits = 0usize;
    let mut exp_digits = 0usize;
    for (idx, &b) in lit.iter().enumerate().skip(body) {
        match b {
            b if char_class::is_decimal_digit(b) => {
                if layout.exponent.is_some() {
                    exp_digits += 1;
                } else if layout.dot.is_some() {
                    frac_digits += 1;
                } else {
                    layout.int_digits += 1;
                }
            }
            b'.' => {
                if layout.dot.is_some() || layout.exponent.is_some() {
                    return Err(at(ErrorKind::InvalidNumber, idx));
                }
                layout.dot = Some(idx);
            }
            b'e' | b'E' => {
                if layout.exponent.is_some() || layout.int_digits + frac_digits == 0 {
                    return Err(at(ErrorKind::InvalidNumber, idx));
                }
                layout.exponent = Some(idx);
            }
            // Signs only open the literal or the exponent.
            b'+' | b'-' => {
                if layout.exponent.map(|e| e + 1) != Some(idx) {
                    return Err(at(ErrorKind::InvalidNumber, idx));
                }
            }
            _ => return Err(at(ErrorKind::InvalidNumber, idx)),
        }
    }

    if layout.int_digits + frac_digits == 0 {
        return Err(at(ErrorKind::InvalidNumber, lit.len()));
    }
    if layout.exponent.is_some() && exp_digits == 0 {
        return Err(at(ErrorKind::InvalidNumber, lit.len()));
    }
    if layout.int_digits > 1 && lit[body] == b'0' {
        return Err(at(ErrorKind::InvalidNumber, body + 1));
    }
    Ok(layout)
}

fn decode_hex(lit: &[u8], layout: &Layout, base: usize) -> Result<i64, ParseError> {
    let digits_start = layout.body + 2;
    let overflow = || ParseError::new(ErrorKind::InvalidHex, lit[digits_start], base + digits_start);

    let mut magnitude: u64 = 0;
    for &b in &lit[digits_start..] {
        magnitude = magnitude
            .checked_mul(16)
            .and_then(|m| m.checked_add(u64::from(char_class::hex_value(b))))
            .ok_or_else(overflow)?;
    }
    let value = if layout.negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        0i64.checked_add_unsigned(magnitude)
    };
    value.ok_or_else(overflow)
}

/// Signed value of the explicit exponent, with capped accumulation.
fn explicit_exponent(lit: &[u8], layout: &Layout) -> i64 {
    let Some(e) = layout.exponent else {
        return 0;
    };
    let mut digits = &lit[e + 1..];
    let mut negative = false;
    if let Some((&sign @ (b'+' | b'-'), rest)) = digits.split_first() {
        negative = sign == b'-';
        digits = rest;
    }
    let mut exponent: i64 = 0;
    for &b in digits {
        if exponent < EXPONENT_ACCUMULATION_LIMIT {
            exponent = exponent * 10 + i64::from(b - b'0');
        }
    }
    if negative {
        -exponent
    } else {
        exponent
    }
}

/// Integer decode, or `None` when the literal needs the float path.
fn decode_int(lit: &[u8], layout: &Layout, exponent: i64) -> Option<i64> {
    if layout.dot.is_some() || exponent < 0 {
        return None;
    }
    let mantissa_end = layout.exponent.unwrap_or(lit.len());
    let mantissa = int_parser::from_ascii_i64(&lit[..mantissa_end]).ok()?;
    if exponent == 0 {
        return Some(mantissa);
    }
    let scale = 10i64.checked_pow(u32::try_from(exponent).ok()?)?;
    mantissa.checked_mul(scale)
}

fn decode_float(lit: &[u8], layout: &Layout, exponent: i64, base: usize) -> Result<f64, ParseError> {
    let mantissa_end = layout.exponent.unwrap_or(lit.len());
    let mut digits = lit[layout.body..mantissa_end]
        .iter()
        .filter(|&&b| b != b'.')
        .peekable();

    let mut leading_zeros = 0usize;
    while digits.next_if_eq(&&b'0').is_some() {
        leading_zeros += 1;
    }
    let significant = digits.clone().count();
    if significant == 0 {
        return Ok(if layout.negative { -0.0 } else { 0.0 });
    }

    let take = significant.min(MAX_MANTISSA_DIGITS);
    let high_digits = take.saturating_sub(CHUNK_DIGITS);
    let mut high: u64 = 0;
    let mut low: u64 = 0;
    for (n, &b) in digits.take(take).enumerate() {
        let digit = u64::from(b - b'0');
        if n < high_digits {
            high = high * 10 + digit;
        } else {
            low = low * 10 + digit;
        }
    }
    let fraction = 1.0e9 * high as f64 + low as f64;

    let fraction_exponent = layout.int_digits as i64 - leading_zeros as i64 - take as i64;
    let net = fraction_exponent.saturating_add(exponent);

    let error_at = layout.exponent.unwrap_or(0);
    let out_of_range = || ParseError::new(ErrorKind::InvalidNumber, lit[error_at], base + error_at);

    if net.unsigned_abs() > pow10::MAX_EXPONENT as u64 {
        return Err(out_of_range());
    }
    let magnitude = pow10::scale(fraction, net as i32);
    if !magnitude.is_finite() {
        return Err(out_of_range());
    }
    Ok(if layout.negative { -magnitude } else { magnitude })
}

/// Parses the complete literal `lit`; `base` is its offset in the document.
fn decode(lit: &[u8], base: usize, numbers_as_strings: bool) -> Result<Value, ParseError> {
    // Single digits skip validation entirely.
    if let [digit @ b'0'..=b'9'] = lit {
        let n = i64::from(digit - b'0');
        return Ok(if numbers_as_strings {
            Value::StrNum(String::from(*digit as char))
        } else {
            Value::Int(n)
        });
    }

    let layout = validate(lit, base)?;
    if numbers_as_strings {
        return Ok(Value::StrNum(lit.iter().map(|&b| b as char).collect()));
    }
    if layout.hex {
        return decode_hex(lit, &layout, base).map(Value::Int);
    }

    let exponent = explicit_exponent(lit, &layout);
    match decode_int(lit, &layout, exponent) {
        Some(n) => Ok(Value::Int(n)),
        None => decode_float(lit, &layout, exponent, base).map(Value::Float),
    }
}

/// Reads the number literal under the cursor, leaving the cursor on its delimiter.
pub(crate) fn read_number(cursor: &mut Cursor<'_>, numbers_as_strings: bool) -> Result<Value, ParseError> {
    let start = cursor.offset();
    let len = cursor
        .remaining()
        .iter()
        .position(|&b| char_class::is_number_delimiter(b))
        .unwrap_or(cursor.remaining().len());
    let value = decode(cursor.slice(start, start + len), start, numbers_as_strings)?;
    cursor.advance_by(len);
    Ok(value)
}

/// Parses a standalone number literal.
///
/// The whole input must be one literal. Decimal integers that fit in an
/// `i64` become [`Value::Int`], as do `0x` hex literals; anything with a
/// fraction, a negative exponent or too many digits becomes [`Value::Float`].
///
/// ```
/// use ezjson::{parse_number, Value};
///
/// assert_eq!(parse_number(b"0xFF"), Ok(Value::Int(255)));
/// assert_eq!(parse_number(b"2.5e1"), Ok(Value::Float(25.0)));
/// ```
pub fn parse_number(bytes: &[u8]) -> Result<Value, ParseError> {
    let mut cursor = Cursor::new(bytes);
    let value = read_number(&mut cursor, false)?;
    if !cursor.is_at_end() {
        return Err(cursor.error(ErrorKind::TrailingCharacters));
    }
    Ok(value)
}
