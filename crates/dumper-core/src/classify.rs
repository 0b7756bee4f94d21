#![forbid(unsafe_code)]

//! Column classification relative to a row's link span.
//!
//! # Invariants
//!
//! 1. `span.column() + span.len() <= ROW_WIDTH` for every constructed span.
//! 2. `within` columns yield the link's own character; every other class
//!    draws a filler byte from the entropy source.
//! 3. An unanchored span places its bytes the same way but is rendered as a
//!    plain row.

use crate::entropy::Entropy;
use crate::error::{DumpError, Result};
use crate::link::Link;
use crate::row::ROW_WIDTH;

/// Where a column sits relative to the row's link span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnClass {
    /// The row carries no link.
    Plain,
    /// Left of the link.
    Before,
    /// Inside the link name.
    Within,
    /// Right of the link.
    After,
}

impl ColumnClass {
    #[must_use]
    pub const fn is_linked(self) -> bool {
        matches!(self, Self::Within | Self::After)
    }
}

/// A link placed at a fixed column of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSpan {
    link: Link,
    column: usize,
    anchored: bool,
}

impl RowSpan {
    /// Place a link at a random column in `[0, 16 - len)`.
    ///
    /// A 16-byte name leaves a single choice, column 0.
    pub fn place(link: Link, entropy: &mut impl Entropy) -> Self {
        let room = ROW_WIDTH.saturating_sub(link.len());
        let column = entropy.below(room);
        Self {
            link,
            column,
            anchored: true,
        }
    }

    /// Like [`RowSpan::place`], but the text is embedded without an anchor.
    pub fn place_unanchored(link: Link, entropy: &mut impl Entropy) -> Self {
        Self {
            anchored: false,
            ..Self::place(link, entropy)
        }
    }

    /// Place a link at an explicit column.
    pub fn at(link: Link, column: usize) -> Result<Self> {
        if column + link.len() > ROW_WIDTH {
            return Err(DumpError::SpanOverflow {
                column,
                len: link.len(),
                width: ROW_WIDTH,
            });
        }
        Ok(Self {
            link,
            column,
            anchored: true,
        })
    }

    #[must_use]
    pub fn link(&self) -> &Link {
        &self.link
    }

    /// Embedded text.
    #[must_use]
    pub fn name(&self) -> &str {
        self.link.head()
    }

    #[must_use]
    pub fn url(&self) -> &str {
        self.link.url()
    }

    /// False when the text is embedded without an anchor.
    #[must_use]
    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// First column of the link.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.link.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.link.is_empty()
    }

    /// One past the last link column.
    #[must_use]
    pub fn end(&self) -> usize {
        self.column + self.len()
    }

    #[must_use]
    pub fn class_of(&self, position: usize) -> ColumnClass {
        if position < self.column {
            ColumnClass::Before
        } else if position < self.end() {
            ColumnClass::Within
        } else {
            ColumnClass::After
        }
    }
}

/// Classify `position` and pick the byte stored there.
pub fn classify(
    span: Option<&RowSpan>,
    position: usize,
    entropy: &mut impl Entropy,
) -> (ColumnClass, u8) {
    let class = span.map_or(ColumnClass::Plain, |span| span.class_of(position));
    let byte = match (class, span) {
        (ColumnClass::Within, Some(span)) => span.name().as_bytes()[position - span.column],
        _ => entropy.filler_byte(),
    };
    (class, byte)
}
