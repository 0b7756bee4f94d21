#![forbid(unsafe_code)]

//! The dump engine: one row at a time, one column per call.
//!
//! # Usage
//!
//! ```
//! use dumper_core::{Dump, Link, ScriptedEntropy};
//!
//! let mut dump = Dump::new(ScriptedEntropy::constant(b'A', 5));
//! let link = Link::new("OpenAI", "https://openai.com")?;
//! let row = dump.render_full_row(Some(&link));
//! assert!(row.contains("AAAAA<a href='https://openai.com'>OpenAI</a>AAAAA"));
//! # Ok::<(), dumper_core::DumpError>(())
//! ```
//!
//! # Invariants
//!
//! 1. Columns are consumed strictly in order `0..16`; completing column 15
//!    clears the row and its span.
//! 2. The offset advances by exactly one per rendered column and is never
//!    reset.
//! 3. Completing a row also produces its cursor-free line, with the anchor
//!    closed around the whole name, available from [`Dump::take_finished`].

use tracing::trace;

use crate::classify::{RowSpan, classify};
use crate::entropy::Entropy;
use crate::error::{DumpError, Result};
use crate::format::{compose_line, render_column, render_complete};
use crate::link::Link;
use crate::row::{Offset, ROW_WIDTH, RowState};
use crate::schedule::RowDescriptor;

/// Row generator with its own entropy source.
#[derive(Debug, Clone)]
pub struct Dump<E> {
    entropy: E,
    row: RowState,
    span: Option<RowSpan>,
    finished: Option<String>,
}

impl<E: Entropy> Dump<E> {
    #[must_use]
    pub fn new(entropy: E) -> Self {
        Self {
            entropy,
            row: RowState::new(),
            span: None,
            finished: None,
        }
    }

    /// Start a new row, placing `link` at a random column.
    pub fn begin_row(&mut self, link: Option<&Link>) {
        let span = link.map(|link| RowSpan::place(link.split_head().0, &mut self.entropy));
        self.begin_row_with(span);
    }

    /// Start a new row with an already placed span.
    pub fn begin_row_with(&mut self, span: Option<RowSpan>) {
        if let Some(span) = &span {
            trace!(name = span.name(), column = span.column(), "row span installed");
        }
        self.row.reset();
        self.span = span;
        self.finished = None;
    }

    /// Render column `position` of the current row.
    ///
    /// Returns the partial-row line. After column 15 the row is cleared.
    pub fn render_column(&mut self, position: usize) -> Result<String> {
        self.punch(position)
    }

    /// Render whichever column comes next.
    pub fn render_next(&mut self) -> String {
        let position = self.row.filled();
        let line = self.punch(position);
        debug_assert!(line.is_ok(), "next column {position} rejected: {line:?}");
        line.unwrap_or_default()
    }

    /// Cursor-free line of the row completed last, if not taken yet.
    pub fn take_finished(&mut self) -> Option<String> {
        self.finished.take()
    }

    /// Render a whole row and return its final line without the cursor.
    pub fn render_full_row(&mut self, link: Option<&Link>) -> String {
        self.begin_row(link);
        self.finish_row()
    }

    /// Render a whole scheduled row. A continuation row embeds its text
    /// without an anchor.
    pub fn render_scheduled(&mut self, row: &RowDescriptor) -> String {
        match (&row.link, &row.remainder) {
            (Some(link), _) => self.render_full_row(Some(link)),
            (None, Some(text)) => {
                let span = RowSpan::place_unanchored(text.clone(), &mut self.entropy);
                self.render_full_row_with(Some(span))
            }
            (None, None) => self.render_full_row(None),
        }
    }

    /// Like [`Dump::render_full_row`] with an already placed span.
    pub fn render_full_row_with(&mut self, span: Option<RowSpan>) -> String {
        self.begin_row_with(span);
        self.finish_row()
    }

    /// Columns stored in the current row, i.e. the next position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.row.filled()
    }

    /// Offset the next column will show.
    #[must_use]
    pub fn offset(&self) -> Offset {
        self.row.offset()
    }

    #[must_use]
    pub fn span(&self) -> Option<&RowSpan> {
        self.span.as_ref()
    }

    #[must_use]
    pub fn row(&self) -> &RowState {
        &self.row
    }

    pub fn entropy_mut(&mut self) -> &mut E {
        &mut self.entropy
    }

    fn finish_row(&mut self) -> String {
        for position in 0..ROW_WIDTH {
            let rendered = self.punch(position);
            debug_assert!(rendered.is_ok(), "column {position} rejected: {rendered:?}");
        }
        self.finished.take().unwrap_or_default()
    }

    fn punch(&mut self, position: usize) -> Result<String> {
        if position >= ROW_WIDTH {
            return Err(DumpError::ColumnOutOfRange {
                position,
                width: ROW_WIDTH,
            });
        }
        let expected = self.row.filled();
        if position != expected {
            return Err(DumpError::ColumnOutOfOrder { position, expected });
        }

        let (_, byte) = classify(self.span.as_ref(), position, &mut self.entropy);
        let markup = render_column(&mut self.row, self.span.as_ref(), position, byte);
        let offset = self.row.advance_offset();
        let line = compose_line(&markup, position, offset);

        if self.row.is_complete() {
            // A name that fills the row ends on a `within` column, so the
            // finished line is rebuilt with the anchor closed around it.
            let complete = render_complete(&self.row, self.span.as_ref());
            self.finished = Some(compose_line(&complete, position, offset));
            self.row.reset();
            self.span = None;
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::{ScriptedEntropy, SeededEntropy};

    fn openai() -> Link {
        Link::new("OpenAI", "https://openai.com").unwrap()
    }

    #[test]
    fn first_column_offset_is_fffffff1() {
        let mut dump = Dump::new(ScriptedEntropy::constant(0x41, 0));
        dump.begin_row(None);
        let line = dump.render_column(0).unwrap();
        assert!(line.ends_with(" FFFFFFF1"));
        assert_eq!(dump.offset().value(), -14);
    }

    #[test]
    fn offset_survives_rows() {
        let mut dump = Dump::new(SeededEntropy::from_seed(1));
        dump.render_full_row(None);
        dump.render_full_row(Some(&openai()));
        assert_eq!(dump.offset().value(), -15 + 32);
        let line = dump.render_full_row(None);
        assert!(line.ends_with(" 00000020"));
    }

    #[test]
    fn out_of_range_and_out_of_order_are_rejected() {
        let mut dump = Dump::new(SeededEntropy::from_seed(1));
        dump.begin_row(None);
        assert_eq!(
            dump.render_column(16).unwrap_err(),
            DumpError::ColumnOutOfRange {
                position: 16,
                width: 16
            }
        );
        assert_eq!(
            dump.render_column(3).unwrap_err(),
            DumpError::ColumnOutOfOrder {
                position: 3,
                expected: 0
            }
        );
        assert_eq!(dump.offset().value(), -15);
    }

    #[test]
    fn completing_a_row_clears_span() {
        let mut dump = Dump::new(ScriptedEntropy::constant(0x41, 2));
        dump.begin_row(Some(&openai()));
        assert_eq!(dump.span().map(RowSpan::column), Some(2));
        for position in 0..ROW_WIDTH {
            dump.render_column(position).unwrap();
        }
        assert!(dump.span().is_none());
        assert_eq!(dump.position(), 0);
    }

    #[test]
    fn render_next_wraps_after_sixteen() {
        let mut dump = Dump::new(SeededEntropy::from_seed(9));
        for tick in 0..40 {
            assert_eq!(dump.position(), tick % ROW_WIDTH);
            dump.render_next();
        }
    }

    #[test]
    fn full_row_is_sixteen_columns_wide() {
        let mut dump = Dump::new(ScriptedEntropy::constant(0x41, 5));
        let row = dump.render_full_row(Some(&openai()));
        assert_eq!(
            row,
            "41 41 41 41 41 <a href='https://openai.com'>49 41 6E 65 70 4F </a>\
             41 41 41 41 41 AAAAA<a href='https://openai.com'>OpenAI</a>AAAAA 00000000"
        );
    }

    #[test]
    fn full_width_link_closes_anchor() {
        let link = Link::new("ABCDEFGHIJKLMNOP", "https://example.com").unwrap();
        let mut dump = Dump::new(SeededEntropy::from_seed(4));
        let row = dump.render_full_row(Some(&link));
        assert!(row.starts_with("<a href='https://example.com'>50 4F "));
        assert!(row.contains("<a href='https://example.com'>ABCDEFGHIJKLMNOP</a> "));
    }

    #[test]
    fn ticked_full_width_row_finishes_with_closed_anchor() {
        let link = Link::new("ABCDEFGHIJKLMNOP", "https://example.com").unwrap();
        let mut dump = Dump::new(SeededEntropy::from_seed(4));
        dump.begin_row(Some(&link));
        let mut last = String::new();
        for _ in 0..ROW_WIDTH {
            last = dump.render_next();
        }
        assert!(last.contains(">ABCDEFGHIJKLMNO</a><span class='c'>P</span>"));

        let finished = dump.take_finished().unwrap();
        assert!(finished.contains(">ABCDEFGHIJKLMNOP</a> 00000000"));
        assert_eq!(dump.take_finished(), None);
    }

    #[test]
    fn continuation_row_embeds_remainder_without_anchor() {
        let link = Link::new("Michael\nDvorkin", "https://example.com").unwrap();
        let (_, remainder) = link.split_head();
        let mut dump = Dump::new(ScriptedEntropy::constant(0x2E, 1));
        let row = dump.render_scheduled(&RowDescriptor {
            index: 6,
            link: None,
            remainder,
        });
        assert!(!row.contains("<a "));
        assert!(row.contains("6E 69 6B 72 6F 76 44 2E .Dvorkin........ "));
    }

    #[test]
    fn multiline_link_embeds_first_line() {
        let link = Link::new("Open\nSource", "https://example.com").unwrap();
        let mut dump = Dump::new(ScriptedEntropy::constant(0x2E, 0));
        let row = dump.render_full_row(Some(&link));
        assert!(row.contains(">Open</a>"));
        assert!(!row.contains("Source"));
    }
}
