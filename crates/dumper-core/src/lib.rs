#![forbid(unsafe_code)]

//! Core engine for hex dumps that hide hyperlinks in their bytes.
//!
//! # Role in dumper
//! `dumper-core` produces the markup for each row of an animated memory
//! dump: sixteen bytes per row, a hex pane and an ASCII pane, and a running
//! address offset. Some rows carry a link whose name is spelled out in the
//! bytes and wrapped in anchors in both panes.
//!
//! # Primary responsibilities
//! - **classify**: where a column sits relative to the row's link span.
//! - **format**: per-column markup, split correctly around the anchor.
//! - **dump**: the stateful row engine (`begin_row`, `render_column`,
//!   `render_full_row`).
//! - **schedule**: which rows of a run get a link.
//!
//! # How it fits in the system
//! The engine does no I/O and keeps no clock. A presentation layer (the
//! `dumper` binary) calls it once per animation tick and places the returned
//! strings wherever it draws.

pub mod classify;
pub mod dump;
pub mod entropy;
pub mod error;
pub mod format;
pub mod link;
pub mod markup;
pub mod row;
pub mod schedule;

pub use classify::{ColumnClass, RowSpan, classify};
pub use dump::Dump;
pub use entropy::{Entropy, ScriptedEntropy, SeededEntropy};
pub use error::{DumpError, Result};
pub use format::ColumnMarkup;
pub use link::Link;
pub use markup::{escape, strip_cursor};
pub use row::{Offset, ROW_WIDTH, RowState};
pub use schedule::{RowDescriptor, Schedule};
