//! Navigation journal.
//!
//! Immutable, bounded record of the transitions the manager has applied:
//! pushes, replaces and honored pops, in the order they happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// What caused a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationKind {
    Push,
    Replace,
    Pop,
}

/// Record of a single applied transition.
///
/// # Example
///
/// ```rust
/// use pagestate::core::{NavigationKind, NavigationRecord};
/// use chrono::Utc;
///
/// let record = NavigationRecord {
///     kind: NavigationKind::Push,
///     from_sequence: 0,
///     to_sequence: 1,
///     path: "/a".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert!(record.is_forward());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationRecord {
    pub kind: NavigationKind,
    /// Sequence id of the state before the transition
    pub from_sequence: u64,
    /// Sequence id of the state after the transition
    pub to_sequence: u64,
    /// Path of the state after the transition
    pub path: String,
    pub timestamp: DateTime<Utc>,
}

impl NavigationRecord {
    /// Whether the transition moved to a later sequence id.
    pub fn is_forward(&self) -> bool {
        self.to_sequence > self.from_sequence
    }
}

/// Ordered, bounded journal of navigation records.
///
/// `record` returns a new journal with the record appended; the original is
/// left untouched. Once `limit` records are held, the oldest is dropped.
///
/// # Example
///
/// ```rust
/// use pagestate::core::{NavigationJournal, NavigationKind, NavigationRecord};
/// use chrono::Utc;
///
/// let journal = NavigationJournal::with_limit(2);
/// let journal = ["/a", "/b", "/c"]
///     .iter()
///     .enumerate()
///     .fold(journal, |journal, (i, path)| {
///         journal.record(NavigationRecord {
///             kind: NavigationKind::Push,
///             from_sequence: i as u64,
///             to_sequence: i as u64 + 1,
///             path: path.to_string(),
///             timestamp: Utc::now(),
///         })
///     });
///
/// assert_eq!(journal.paths(), vec!["/b", "/c"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NavigationJournal {
    records: VecDeque<NavigationRecord>,
    limit: usize,
}

/// Default number of records a journal keeps.
pub const DEFAULT_JOURNAL_LIMIT: usize = 64;

/// Largest limit a journal accepts. `record` copies the retained records,
/// so larger limits are clamped to this.
pub const MAX_JOURNAL_LIMIT: usize = 1024;

impl Default for NavigationJournal {
    fn default() -> Self {
        Self::with_limit(DEFAULT_JOURNAL_LIMIT)
    }
}

impl NavigationJournal {
    /// Create an empty journal holding at most `limit` records, clamped to
    /// [`MAX_JOURNAL_LIMIT`].
    pub fn with_limit(limit: usize) -> Self {
        Self {
            records: VecDeque::new(),
            limit: limit.min(MAX_JOURNAL_LIMIT),
        }
    }

    /// Record a transition, returning a new journal.
    pub fn record(&self, record: NavigationRecord) -> Self {
        if self.limit == 0 {
            return self.clone();
        }
        let mut records = self.records.clone();
        while records.len() >= self.limit {
            records.pop_front();
        }
        records.push_back(record);
        Self {
            records,
            limit: self.limit,
        }
    }

    /// Paths visited, oldest first.
    pub fn paths(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.path.as_str()).collect()
    }

    /// Time between the oldest and newest retained record.
    ///
    /// Returns `None` for an empty journal.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.front(), self.records.back()) {
            last.timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok()
        } else {
            None
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &NavigationRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&NavigationRecord> {
        self.records.back()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
