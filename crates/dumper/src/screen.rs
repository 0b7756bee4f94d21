//! The visible dump: completed rows above a cursor row being typed out.
//!
//! # Cycle
//!
//! 1. [`Screen::launch`] fills the rows from a schedule.
//! 2. [`Screen::tick`] types one column of the cursor row. Sixteen ticks
//!    complete it.
//! 3. [`Screen::scroll`] drops the top row, appends the finished cursor row,
//!    and starts a fresh cursor row. A link on the dropped row is carried
//!    over to the new cursor row, so links keep circulating.

use std::collections::VecDeque;

use dumper_core::{Dump, Entropy, Link, ROW_WIDTH, Schedule, strip_cursor};
use tracing::{debug, trace};

/// A completed row and the link it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenRow {
    pub markup: String,
    pub link: Option<Link>,
}

#[derive(Debug)]
pub struct Screen<E> {
    dump: Dump<E>,
    rows: VecDeque<ScreenRow>,
    cursor: String,
    cursor_link: Option<Link>,
}

impl<E: Entropy> Screen<E> {
    /// Render every scheduled row; the cursor row starts empty.
    pub fn launch(mut dump: Dump<E>, schedule: Schedule) -> Self {
        let rows: VecDeque<ScreenRow> = schedule
            .map(|descriptor| ScreenRow {
                markup: dump.render_scheduled(&descriptor),
                link: descriptor.link,
            })
            .collect();
        debug!(rows = rows.len(), "screen launched");

        Self {
            dump,
            rows,
            cursor: String::new(),
            cursor_link: None,
        }
    }

    /// Type the next column of the cursor row.
    pub fn tick(&mut self) -> &str {
        if self.dump.position() == 0 {
            self.dump.begin_row(self.cursor_link.as_ref());
        }
        self.cursor = self.dump.render_next();
        &self.cursor
    }

    /// True once all sixteen columns of the cursor row are typed.
    #[must_use]
    pub fn cursor_complete(&self) -> bool {
        !self.cursor.is_empty() && self.dump.position() == 0
    }

    /// Tick until the cursor row is complete.
    pub fn finish_cursor(&mut self) {
        for _ in 0..ROW_WIDTH {
            if self.cursor_complete() {
                break;
            }
            self.tick();
        }
    }

    /// Move the finished cursor row into the list and start a new one.
    pub fn scroll(&mut self) {
        self.finish_cursor();

        let markup = self
            .dump
            .take_finished()
            .unwrap_or_else(|| strip_cursor(&self.cursor));
        let top = self.rows.pop_front();
        self.rows.push_back(ScreenRow {
            markup,
            link: self.cursor_link.take(),
        });
        self.cursor.clear();

        self.cursor_link = top.and_then(|row| row.link);
        if let Some(link) = &self.cursor_link {
            trace!(name = link.name(), "link recycled onto cursor row");
        }
    }

    #[must_use]
    pub fn rows(&self) -> &VecDeque<ScreenRow> {
        &self.rows
    }

    /// Current cursor row markup; empty before the first tick of a cycle.
    #[must_use]
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    /// Link the cursor row carries or will carry.
    #[must_use]
    pub fn cursor_link(&self) -> Option<&Link> {
        self.cursor_link.as_ref()
    }
}
