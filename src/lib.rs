//! Pagestate: session-history state tracking for single-page hosts
//!
//! Pagestate keeps one logical "current page state" (a path, a title and an
//! opaque data payload) in step with the host's native history stack. When
//! the host cannot push or replace entries in place, pushes fall back to a
//! full navigation.
//!
//! # Core Concepts
//!
//! - **HistoryState**: The record for the active page, with a sequence id
//!   that advances by one on every push
//! - **HistoryManager**: Owns the current state and drives the native store
//! - **Native collaborators**: `NativeHistoryStore` and `DocumentTitle`,
//!   implemented by host glue or by the in-memory `MemoryHistory`
//! - **Journal**: Bounded record of applied pushes, replaces and pops
//!
//! # Example
//!
//! ```rust
//! use pagestate::native::{DocumentTitle, MemoryHistory, MemoryTitle};
//! use pagestate::{HistoryManager, StateData};
//! use serde_json::json;
//!
//! let mut manager = HistoryManager::new(MemoryHistory::new("/"), MemoryTitle::new("Home"));
//! manager.initialize_with(|state, from_pop| {
//!     println!("now at {} (pop: {})", state.path, from_pop);
//! });
//!
//! let data: StateData = json!({"a": 1}).as_object().cloned().unwrap_or_default();
//! manager.push_state(data, Some("Page A"), "/a").unwrap();
//! assert_eq!(manager.title_sink().title(), "Page A");
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod manager;
pub mod native;

// Re-export commonly used types
pub use builder::{BuildError, HistoryManagerBuilder};
pub use config::{CapabilityMode, HistoryConfig};
pub use crate::core::{
    HistoryState, NavigationJournal, NavigationKind, PopEvent, RawPopEvent, StateData,
};
pub use manager::{HistoryError, HistoryManager, HistoryMode, StateCallback};
pub use native::{DocumentTitle, NativeHistoryStore, StoreError};
