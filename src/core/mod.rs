//! Core history types.
//!
//! This module contains the pure parts of the history manager:
//! - The `HistoryState` record and its payload encoding
//! - Normalization of host pop notifications
//! - The bounded navigation journal
//!
//! Nothing in here talks to the host.

mod event;
mod journal;
mod state;

pub use event::{PopEvent, RawPopEvent};
pub use journal::{
    NavigationJournal, NavigationKind, NavigationRecord, DEFAULT_JOURNAL_LIMIT, MAX_JOURNAL_LIMIT,
};
pub use state::{HistoryState, StateData};
