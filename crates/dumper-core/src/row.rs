#![forbid(unsafe_code)]

//! Row accumulation state and the running address offset.
//!
//! The row keeps its bytes in column order. The two pane strings are derived
//! from that array: the ASCII pane reads left to right, the hex pane reads
//! right to left (newest token first), which is the mirrored layout the dump
//! has always shown.

use std::fmt;
use std::ops::Range;

/// Bytes per row.
pub const ROW_WIDTH: usize = 16;

/// Offset shown beside the very first column.
pub const INITIAL_OFFSET: i32 = -0x0F;

/// Bytes stored so far in the current row, plus the address counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowState {
    bytes: Vec<u8>,
    offset: Offset,
}

impl Default for RowState {
    fn default() -> Self {
        Self::new()
    }
}

impl RowState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: Vec::with_capacity(ROW_WIDTH),
            offset: Offset::default(),
        }
    }

    /// Append one column.
    pub fn store(&mut self, byte: u8) {
        debug_assert!(self.bytes.len() < ROW_WIDTH);
        self.bytes.push(byte);
    }

    /// Clear the row. The offset keeps running.
    pub fn reset(&mut self) {
        self.bytes.clear();
    }

    /// Number of columns stored.
    #[must_use]
    pub fn filled(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.bytes.len() == ROW_WIDTH
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Stored columns in `range`, left to right, as ASCII glyphs.
    #[must_use]
    pub fn ascii_range(&self, range: Range<usize>) -> String {
        self.bytes[range].iter().map(|&b| glyph(b)).collect()
    }

    /// Stored columns in `range` as hex tokens, highest column first, each
    /// followed by a space.
    #[must_use]
    pub fn hex_range(&self, range: Range<usize>) -> String {
        let mut out = String::with_capacity(range.len() * 3);
        for &byte in self.bytes[range].iter().rev() {
            push_token(&mut out, byte);
        }
        out
    }

    /// The whole ASCII pane.
    #[must_use]
    pub fn ascii(&self) -> String {
        self.ascii_range(0..self.filled())
    }

    /// The whole hex pane, in reverse column order.
    #[must_use]
    pub fn hex(&self) -> String {
        self.hex_range(0..self.filled())
    }

    #[must_use]
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Return the current offset and step it forward one column.
    pub fn advance_offset(&mut self) -> Offset {
        let current = self.offset;
        self.offset = current.next();
        current
    }
}

/// Signed address counter rendered as 8 uppercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Offset(i32);

impl Default for Offset {
    fn default() -> Self {
        Self(INITIAL_OFFSET)
    }
}

impl Offset {
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Signed hex formatting prints the two's-complement bits.
        write!(f, "{:08X}", self.0)
    }
}

/// True for bytes shown literally in the ASCII pane.
#[must_use]
pub const fn is_printable(byte: u8) -> bool {
    byte > 31 && byte < 127
}

/// ASCII pane glyph for a byte.
#[must_use]
pub const fn glyph(byte: u8) -> char {
    if is_printable(byte) { byte as char } else { '.' }
}

/// Two uppercase hex digits.
#[must_use]
pub fn hex_token(byte: u8) -> String {
    format!("{byte:02X}")
}

fn push_token(out: &mut String, byte: u8) {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    out.push(DIGITS[usize::from(byte >> 4)] as char);
    out.push(DIGITS[usize::from(byte & 0x0F)] as char);
    out.push(' ');
}
