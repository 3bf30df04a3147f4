// SPDX-License-Identifier: Apache-2.0

//! Text output for [`Value`] trees.
//!
//! Containers are written one child per line, indented two spaces per level;
//! empty containers stay on one line. Everything written parses back to an
//! equal tree.

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt::{self, Write};

use crate::number_parser;
use crate::value::Value;

const INDENT: &str = "  ";

/// Writes `s` as a quoted JSON string.
pub(crate) fn write_escaped<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    let mut run_start = 0;
    for (i, b) in s.bytes().enumerate() {
        let escape = match b {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            0x08 => "\\b",
            0x0C => "\\f",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x00..=0x1F => "",
            _ => continue,
        };
        out.write_str(&s[run_start..i])?;
        if escape.is_empty() {
            write!(out, "\\u{b:04x}")?;
        } else {
            out.write_str(escape)?;
        }
        run_start = i + 1;
    }
    out.write_str(&s[run_start..])?;
    out.write_char('"')
}

/// Significant digits of the fallback float text.
const FALLBACK_DIGITS: usize = 17;
/// Last-digit steps tried on each side of the fallback text.
const FALLBACK_STEPS: u64 = 64;

/// Shortest text for a finite `f`, always with a `.` so it reads back as a Float.
fn shortest_float_text(f: f64) -> Result<String, fmt::Error> {
    let magnitude = f.abs();
    let scientific = magnitude >= 1e16 || (magnitude != 0.0 && magnitude < 1e-5);

    let mut text = String::new();
    if scientific {
        write!(text, "{f:e}")?;
    } else {
        write!(text, "{f}")?;
    }

    match text.find(&['.', 'e'][..]) {
        Some(i) if text.as_bytes()[i] == b'.' => {}
        Some(e) => text.insert_str(e, ".0"),
        None => text.push_str(".0"),
    }
    Ok(text)
}

/// The float the number decoder produces for `text`.
fn reads_back_as(text: &str) -> Option<f64> {
    match number_parser::parse_number(text.as_bytes()) {
        Ok(Value::Float(f)) => Some(f),
        _ => None,
    }
}

/// Seventeen-digit text for `f` that the number decoder maps back to the same
/// bits, or failing that the closest one found.
///
/// The decoder does not round every literal correctly, so the nearest
/// decimal is not always the one that reads back exactly. Candidates step the
/// last digit outwards from the nearest decimal.
fn exact_float_text(f: f64) -> Option<String> {
    const SCALE: u64 = 10u64.pow(FALLBACK_DIGITS as u32 - 1);
    let digits_range = SCALE..SCALE * 10;

    let mut nearest = String::new();
    write!(nearest, "{:.*e}", FALLBACK_DIGITS - 1, f.abs()).ok()?;
    let (mantissa, exponent) = nearest.split_once('e')?;
    let digits: u64 = mantissa.replace('.', "").parse().ok()?;
    let exponent: i32 = exponent.parse().ok()?;
    let sign = if f.is_sign_negative() { "-" } else { "" };

    let mut best: Option<(f64, String)> = None;
    for step in 0..=FALLBACK_STEPS {
        for candidate in [digits.checked_sub(step), digits.checked_add(step)] {
            let Some(candidate) = candidate.filter(|c| digits_range.contains(c)) else {
                continue;
            };
            let text = format!(
                "{sign}{}.{:0width$}e{exponent}",
                candidate / SCALE,
                candidate % SCALE,
                width = FALLBACK_DIGITS - 1
            );
            let Some(back) = reads_back_as(&text) else {
                continue;
            };
            if back.to_bits() == f.to_bits() {
                return Some(text);
            }
            let distance = (back - f).abs();
            if best.as_ref().map_or(true, |(d, _)| distance < *d) {
                best = Some((distance, text));
            }
        }
    }
    best.map(|(_, text)| text)
}

/// Writes a float so that it reads back as the same Float.
///
/// The shortest text is used when the decoder maps it back exactly.
fn write_float<W: Write>(out: &mut W, f: f64) -> fmt::Result {
    if !f.is_finite() {
        return out.write_str("null");
    }
    let shortest = shortest_float_text(f)?;
    if reads_back_as(&shortest).is_some_and(|back| back.to_bits() == f.to_bits()) {
        return out.write_str(&shortest);
    }
    match exact_float_text(f) {
        Some(text) => out.write_str(&text),
        None => out.write_str(&shortest),
    }
}

fn write_indent<W: Write>(out: &mut W, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str(INDENT)?;
    }
    Ok(())
}

fn write_value<W: Write>(out: &mut W, value: &Value, depth: usize) -> fmt::Result {
    match value {
        Value::String(s) => write_escaped(out, s),
        Value::Int(n) => write!(out, "{n}"),
        Value::Float(f) => write_float(out, *f),
        Value::StrNum(s) => out.write_str(s),
        Value::Bool(b) => write!(out, "{b}"),
        Value::Null => out.write_str("null"),
        Value::Array(items) if items.is_empty() => out.write_str("[]"),
        Value::Object(members) if members.is_empty() => out.write_str("{}"),
        Value::Array(items) => {
            out.write_str("[\n")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_str(",\n")?;
                }
                write_indent(out, depth + 1)?;
                write_value(out, item, depth + 1)?;
            }
            out.write_char('\n')?;
            write_indent(out, depth)?;
            out.write_char(']')
        }
        Value::Object(members) => {
            out.write_str("{\n")?;
            for (i, (key, member)) in members.iter().enumerate() {
                if i > 0 {
                    out.write_str(",\n")?;
                }
                write_indent(out, depth + 1)?;
                write_escaped(out, key)?;
                out.write_str(": ")?;
                write_value(out, member, depth + 1)?;
            }
            out.write_char('\n')?;
            write_indent(out, depth)?;
            out.write_char('}')
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, 0)
    }
}

impl Value {
    /// The indented JSON text of this tree.
    pub fn to_json_string(&self) -> String {
        self.to_string()
    }
}
