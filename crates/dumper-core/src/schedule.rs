#![forbid(unsafe_code)]

//! Spreading a queue of links across a run of rows.
//!
//! Rows are numbered `1..total_rows`. With `n` links the schedule picks
//! `spread = total_rows / n - jitter` (jitter in `[0, 3)`, at least 1) and
//! hands the next queued link to every row whose index is a multiple of
//! `spread`. Links still queued when the rows run out are dropped.
//!
//! A link whose name has a line break is embedded by its first line; the
//! schedule then yields one extra row right after it that carries the second
//! line as ordinary bytes, with no anchor.

use std::collections::VecDeque;

use tracing::debug;

use crate::entropy::Entropy;
use crate::link::Link;

/// Exclusive upper bound of the spread jitter.
pub const JITTER_LIMIT: usize = 3;

/// One row of the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDescriptor {
    /// Scheduled row index. Continuation rows share their parent's index.
    pub index: usize,
    /// Link to embed under an anchor, if any.
    pub link: Option<Link>,
    /// Second line of a multi-line link, embedded without an anchor.
    pub remainder: Option<Link>,
}

impl RowDescriptor {
    fn plain(index: usize) -> Self {
        Self {
            index,
            link: None,
            remainder: None,
        }
    }

    /// True for the row following a multi-line link.
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        self.remainder.is_some()
    }
}

/// Lazy, single-use sequence of [`RowDescriptor`]s.
#[derive(Debug, Clone)]
pub struct Schedule {
    queue: VecDeque<Link>,
    total_rows: usize,
    next_index: usize,
    spread: usize,
    jitter: usize,
    pending: Option<RowDescriptor>,
    finished: bool,
}

impl Schedule {
    /// Plan a schedule for `total_rows` rows.
    pub fn new(
        total_rows: usize,
        links: impl IntoIterator<Item = Link>,
        entropy: &mut impl Entropy,
    ) -> Self {
        let queue: VecDeque<Link> = links.into_iter().collect();
        let (spread, jitter) = if queue.is_empty() {
            (total_rows.max(1), 0)
        } else {
            let jitter = entropy.below(JITTER_LIMIT);
            let spread = (total_rows / queue.len()).saturating_sub(jitter).max(1);
            (spread, jitter)
        };

        debug!(
            total_rows,
            links = queue.len(),
            spread,
            jitter,
            "row schedule planned"
        );

        Self {
            queue,
            total_rows,
            next_index: 1,
            spread,
            jitter,
            pending: None,
            finished: false,
        }
    }

    /// Gap between linked rows.
    #[must_use]
    pub fn spread(&self) -> usize {
        self.spread
    }

    /// Jitter subtracted from the even spacing.
    #[must_use]
    pub fn jitter(&self) -> usize {
        self.jitter
    }

    /// Links not yet handed out.
    #[must_use]
    pub fn remaining_links(&self) -> usize {
        self.queue.len()
    }

    fn finish(&mut self) {
        if !self.finished {
            self.finished = true;
            if !self.queue.is_empty() {
                debug!(
                    dropped = self.queue.len(),
                    "schedule ran out of rows, dropped remaining links"
                );
            }
        }
    }
}

impl Iterator for Schedule {
    type Item = RowDescriptor;

    fn next(&mut self) -> Option<RowDescriptor> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }
        if self.next_index >= self.total_rows {
            self.finish();
            return None;
        }

        let index = self.next_index;
        self.next_index += 1;

        if index % self.spread == 0
            && let Some(link) = self.queue.pop_front()
        {
            let (head, remainder) = link.split_head();
            debug!(index, name = head.name(), "link scheduled");
            if remainder.is_some() {
                self.pending = Some(RowDescriptor {
                    index,
                    link: None,
                    remainder,
                });
            }
            return Some(RowDescriptor {
                index,
                link: Some(head),
                remainder: None,
            });
        }

        Some(RowDescriptor::plain(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entropy::ScriptedEntropy;
    use tracing_test::traced_test;

    fn links(names: &[&str]) -> Vec<Link> {
        names
            .iter()
            .map(|name| Link::new(*name, format!("https://example.com/{name}")).unwrap())
            .collect()
    }

    fn linked_indices(schedule: Schedule) -> Vec<usize> {
        schedule
            .filter(|row| row.link.is_some())
            .map(|row| row.index)
            .collect()
    }

    #[test]
    fn thirty_two_rows_four_links_without_jitter() {
        let mut entropy = ScriptedEntropy::constant(0, 0);
        let schedule = Schedule::new(32, links(&["a", "b", "c", "d"]), &mut entropy);
        assert_eq!(schedule.spread(), 8);
        assert_eq!(linked_indices(schedule), vec![8, 16, 24]);
    }

    #[test]
    fn jitter_tightens_spacing() {
        let mut entropy = ScriptedEntropy::constant(0, 2);
        let schedule = Schedule::new(32, links(&["a", "b", "c", "d"]), &mut entropy);
        assert_eq!(schedule.jitter(), 2);
        assert_eq!(schedule.spread(), 6);
        assert_eq!(linked_indices(schedule), vec![6, 12, 18, 24]);
    }

    #[test]
    fn yields_total_rows_minus_one() {
        let mut entropy = ScriptedEntropy::constant(0, 1);
        let schedule = Schedule::new(32, links(&["a"]), &mut entropy);
        let rows: Vec<RowDescriptor> = schedule.collect();
        assert_eq!(rows.len(), 31);
        assert_eq!(rows.first().map(|r| r.index), Some(1));
        assert_eq!(rows.last().map(|r| r.index), Some(31));
    }

    #[test]
    fn no_links_means_plain_rows() {
        let mut entropy = ScriptedEntropy::constant(0, 0);
        let schedule = Schedule::new(10, Vec::new(), &mut entropy);
        assert!(schedule.clone().all(|row| row.link.is_none()));
        assert_eq!(schedule.count(), 9);
    }

    #[test]
    fn tiny_row_counts_are_empty() {
        let mut entropy = ScriptedEntropy::constant(0, 0);
        assert_eq!(Schedule::new(0, links(&["a"]), &mut entropy).count(), 0);
        assert_eq!(Schedule::new(1, links(&["a"]), &mut entropy).count(), 0);
    }

    #[test]
    fn spread_never_drops_below_one() {
        let mut entropy = ScriptedEntropy::constant(0, 2);
        let schedule = Schedule::new(4, links(&["a", "b", "c", "d", "e", "f"]), &mut entropy);
        assert_eq!(schedule.spread(), 1);
        assert_eq!(linked_indices(schedule), vec![1, 2, 3]);
    }

    #[test]
    fn multiline_link_adds_unanchored_continuation() {
        let mut entropy = ScriptedEntropy::constant(0, 2);
        let link = Link::new("Michael\nDvorkin", "https://example.com").unwrap();
        let rows: Vec<RowDescriptor> = Schedule::new(8, vec![link], &mut entropy).collect();
        assert_eq!(rows.len(), 8);
        let linked = rows.iter().position(|r| r.link.is_some()).unwrap();
        assert_eq!(rows[linked].index, 6);
        assert_eq!(rows[linked].link.as_ref().map(Link::name), Some("Michael"));
        assert_eq!(rows[linked + 1].link, None);
        assert!(rows[linked + 1].is_continuation());
        let remainder = rows[linked + 1].remainder.as_ref().unwrap();
        assert_eq!(remainder.name(), "Dvorkin");
        assert_eq!(remainder.url(), "https://example.com");
        assert_eq!(rows[linked + 1].index, 6);
        assert_eq!(rows[linked + 2].index, 7);
    }

    #[test]
    fn single_link_with_full_spread_is_never_placed() {
        let mut entropy = ScriptedEntropy::constant(0, 0);
        let schedule = Schedule::new(32, links(&["a"]), &mut entropy);
        assert_eq!(schedule.spread(), 32);
        assert!(linked_indices(schedule).is_empty());
    }

    #[traced_test]
    #[test]
    fn dropped_links_are_logged() {
        let mut entropy = ScriptedEntropy::constant(0, 0);
        let schedule = Schedule::new(3, links(&["a", "b", "c", "d", "e"]), &mut entropy);
        assert_eq!(schedule.count(), 2);
        assert!(logs_contain("dropped remaining links"));
    }
}
