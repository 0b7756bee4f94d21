#![forbid(unsafe_code)]

//! Per-column markup for the hex and ASCII panes.
//!
//! Each call renders the row as it stands after the new column: stored
//! history plus the newest byte. Anchors are rebuilt on every call, so a
//! partial row always carries well-formed markup for whatever part of the
//! link has been revealed.
//!
//! # Layout by class
//!
//! With the link occupying columns `c..e` and `p` columns already stored:
//!
//! | class            | hex pane                                         | ASCII pane                                  |
//! |------------------|--------------------------------------------------|---------------------------------------------|
//! | plain / before   | `new`, `p-1..0`                                  | `0..p`                                      |
//! | within           | `<a>` `new`, `p-1..c` `</a>`, `c-1..0`           | `0..c`, `<a>` name revealed `</a>`          |
//! | after            | `new`, `p-1..e`, `<a>` `e-1..c` `</a>`, `c-1..0` | `0..c`, `<a>` name `</a>`, `e..p`           |
//!
//! The newest ASCII glyph always follows, inside the cursor wrapper.

use crate::classify::{ColumnClass, RowSpan};
use crate::markup::{close_anchor, escape, escape_into, open_anchor, push_anchor, push_cursor};
use crate::row::{Offset, ROW_WIDTH, RowState, glyph, hex_token};

/// Rendered fragments for both panes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnMarkup {
    pub hex: String,
    pub ascii: String,
}

/// Render column `position` and store `byte` into the row.
///
/// `position` must equal the number of columns already stored. The class is
/// taken from the span; an unanchored span renders as plain.
pub(crate) fn render_column(
    state: &mut RowState,
    span: Option<&RowSpan>,
    position: usize,
    byte: u8,
) -> ColumnMarkup {
    debug_assert_eq!(position, state.filled());
    let span = span.filter(|span| span.is_anchored());
    let class = span.map_or(ColumnClass::Plain, |span| span.class_of(position));

    let markup = match (class, span) {
        (ColumnClass::Within, Some(span)) => ColumnMarkup {
            hex: hex_within(state, span, position, byte),
            ascii: ascii_within(state, span, position, byte),
        },
        (ColumnClass::After, Some(span)) => ColumnMarkup {
            hex: hex_after(state, span, position, byte),
            ascii: ascii_after(state, span, position, byte),
        },
        _ => ColumnMarkup {
            hex: hex_plain(state, byte),
            ascii: ascii_plain(state, byte),
        },
    };

    state.store(byte);
    markup
}

/// Render a finished row without a cursor, closing the anchor around the
/// whole link.
#[must_use]
pub(crate) fn render_complete(state: &RowState, span: Option<&RowSpan>) -> ColumnMarkup {
    let filled = state.filled();
    match span.filter(|span| span.is_anchored()) {
        Some(span) if span.end() <= filled => {
            let (c, e) = (span.column(), span.end());

            let mut hex = state.hex_range(e..filled);
            push_anchor(&mut hex, span.url(), &state.hex_range(c..e));
            hex.push_str(&state.hex_range(0..c));

            let mut ascii = escape(&state.ascii_range(0..c));
            push_anchor(&mut ascii, span.url(), &escape(span.name()));
            escape_into(&mut ascii, &state.ascii_range(e..filled));

            ColumnMarkup { hex, ascii }
        }
        _ => ColumnMarkup {
            hex: state.hex(),
            ascii: escape(&state.ascii()),
        },
    }
}

/// Assemble the full line for a column: padding, both panes, padding, offset.
#[must_use]
pub fn compose_line(markup: &ColumnMarkup, position: usize, offset: Offset) -> String {
    let blank = ROW_WIDTH - 1 - position.min(ROW_WIDTH - 1);
    let mut line = String::with_capacity(blank * 4 + markup.hex.len() + markup.ascii.len() + 9);
    for _ in 0..blank {
        line.push_str("   ");
    }
    line.push_str(&markup.hex);
    line.push_str(&markup.ascii);
    for _ in 0..blank {
        line.push(' ');
    }
    line.push(' ');
    line.push_str(&offset.to_string());
    line
}

fn hex_plain(state: &RowState, byte: u8) -> String {
    let mut hex = newest_token(byte);
    hex.push_str(&state.hex());
    hex
}

fn ascii_plain(state: &RowState, byte: u8) -> String {
    let mut ascii = escape(&state.ascii());
    push_cursor(&mut ascii, glyph(byte));
    ascii
}

fn hex_within(state: &RowState, span: &RowSpan, position: usize, byte: u8) -> String {
    let c = span.column();
    let mut hex = String::new();
    open_anchor(&mut hex, span.url());
    hex.push_str(&newest_token(byte));
    hex.push_str(&state.hex_range(c..position));
    close_anchor(&mut hex);
    hex.push_str(&state.hex_range(0..c));
    hex
}

fn ascii_within(state: &RowState, span: &RowSpan, position: usize, byte: u8) -> String {
    let c = span.column();
    let mut ascii = escape(&state.ascii_range(0..c));
    if position > c {
        push_anchor(&mut ascii, span.url(), &escape(&span.name()[..position - c]));
    }
    push_cursor(&mut ascii, glyph(byte));
    ascii
}

fn hex_after(state: &RowState, span: &RowSpan, position: usize, byte: u8) -> String {
    let (c, e) = (span.column(), span.end());
    let mut hex = newest_token(byte);
    hex.push_str(&state.hex_range(e..position));
    push_anchor(&mut hex, span.url(), &state.hex_range(c..e));
    hex.push_str(&state.hex_range(0..c));
    hex
}

fn ascii_after(state: &RowState, span: &RowSpan, position: usize, byte: u8) -> String {
    let (c, e) = (span.column(), span.end());
    let mut ascii = escape(&state.ascii_range(0..c));
    push_anchor(&mut ascii, span.url(), &escape(span.name()));
    escape_into(&mut ascii, &state.ascii_range(e..position));
    push_cursor(&mut ascii, glyph(byte));
    ascii
}

fn newest_token(byte: u8) -> String {
    let mut token = hex_token(byte);
    token.push(' ');
    token
}
