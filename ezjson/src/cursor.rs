// SPDX-License-Identifier: Apache-2.0

use crate::char_class;
use crate::parse_error::{ErrorKind, ParseError};

/// Byte returned when looking at or past the end of the buffer.
pub const SENTINEL: u8 = b'\0';

/// A read position over a borrowed input buffer.
///
/// Reads past the end never fault: they yield [`SENTINEL`], which every
/// scanning loop treats as a stop byte.
#[derive(Debug)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// The unread part of the buffer.
    pub fn remaining(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or(&[])
    }

    /// Gets a slice of the data from start to end positions.
    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        self.data.get(start..end).unwrap_or(&[])
    }

    /// Current byte.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.peek_at(self.pos)
    }

    /// Byte at an absolute index.
    #[inline]
    pub fn peek_at(&self, idx: usize) -> u8 {
        self.data.get(idx).copied().unwrap_or(SENTINEL)
    }

    /// Whether a byte exists `n` positions ahead of the current one.
    #[inline]
    pub fn can_advance_by(&self, n: usize) -> bool {
        self.pos
            .checked_add(n)
            .is_some_and(|target| target < self.data.len())
    }

    /// Moves forward without checking for the end of the buffer.
    #[inline]
    pub fn advance_by(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n);
    }

    /// Consumes the current byte, failing with `Eof` if there is none.
    #[inline]
    pub fn advance(&mut self) -> Result<(), ParseError> {
        if self.is_at_end() {
            return Err(self.error(ErrorKind::Eof));
        }
        self.pos += 1;
        Ok(())
    }

    /// Skips whitespace and requires `expected` under the cursor, without consuming it.
    ///
    /// Fails with `Eof` at the end of the buffer and `UnexpectedCharacter` on
    /// any other byte.
    pub fn expect_after_whitespace(&mut self, expected: u8) -> Result<(), ParseError> {
        self.advance_whitespace();
        match self.peek() {
            b if b == expected && !self.is_at_end() => Ok(()),
            _ if self.is_at_end() => Err(self.error(ErrorKind::Eof)),
            _ => Err(self.error(ErrorKind::UnexpectedCharacter)),
        }
    }

    /// Skips a run of whitespace.
    #[inline]
    pub fn advance_whitespace(&mut self) {
        #[cfg(feature = "swar")]
        let skipped = whitespace_run_swar(self.remaining());
        #[cfg(not(feature = "swar"))]
        let skipped = whitespace_run_scalar(self.remaining());
        self.pos += skipped;
    }

    /// An error of `kind` at the current position.
    pub fn error(&self, kind: ErrorKind) -> ParseError {
        self.error_at(kind, self.pos)
    }

    /// An error of `kind` at an absolute position.
    pub fn error_at(&self, kind: ErrorKind, pos: usize) -> ParseError {
        ParseError::new(kind, self.peek_at(pos), pos)
    }
}

/// Length of the leading whitespace run, one byte at a time.
pub(crate) fn whitespace_run_scalar(bytes: &[u8]) -> usize {
    bytes
        .iter()
        .position(|&b| !char_class::is_whitespace(b))
        .unwrap_or(bytes.len())
}

#[cfg(feature = "swar")]
const LANES: usize = 16;

#[cfg(feature = "swar")]
const fn splat(b: u8) -> u128 {
    u128::from_ne_bytes([b; LANES])
}

/// Length of the leading whitespace run, sixteen bytes at a time.
///
/// Each chunk is loaded as a little-endian `u128` and every lane is tested
/// against the six whitespace bytes with carry-free per-lane arithmetic.
/// Chunks holding a byte >= 0x80, and the tail, go to the scalar loop.
#[cfg(feature = "swar")]
pub(crate) fn whitespace_run_swar(bytes: &[u8]) -> usize {
    const HIGH: u128 = splat(0x80);
    // Lane high bit set once the lane value reaches 0x09 / 0x0E.
    const GE_TAB: u128 = splat(0x80 - 0x09);
    const GE_SO: u128 = splat(0x80 - 0x0E);
    const SPACE: u128 = splat(b' ');
    const NONZERO: u128 = splat(0x7F);

    // Short runs are the common case.
    if !bytes.first().copied().is_some_and(char_class::is_whitespace) {
        return 0;
    }

    let mut skipped = 0;
    for chunk in bytes.chunks_exact(LANES) {
        let mut lanes = [0u8; LANES];
        lanes.copy_from_slice(chunk);
        let word = u128::from_le_bytes(lanes);

        if word & HIGH != 0 {
            return skipped + whitespace_run_scalar(chunk);
        }

        let in_control_range = word.wrapping_add(GE_TAB) & !word.wrapping_add(GE_SO);
        let not_space = (word ^ SPACE).wrapping_add(NONZERO);
        let whitespace = (in_control_range | !not_space) & HIGH;

        if whitespace != HIGH {
            let first_other = (!whitespace & HIGH).trailing_zeros() / 8;
            return skipped + first_other as usize;
        }
        skipped += LANES;
    }
    skipped + whitespace_run_scalar(&bytes[skipped..])
}
