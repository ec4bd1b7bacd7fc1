//! Host collaborators.
//!
//! The manager never touches the host directly. It talks to two narrow
//! traits: the native history stack and the displayed document title.
//! `memory` provides in-process implementations of both.

use serde_json::Value;

pub mod error;
pub mod memory;

pub use error::StoreError;
pub use memory::{MemoryEntry, MemoryHistory, MemoryTitle};

/// The host's native session-history stack.
///
/// Pop notifications are delivered by the host glue calling
/// `HistoryManager::dispatch_pop`; `listen_for_pops` only registers
/// interest and is called at most once per manager.
pub trait NativeHistoryStore {
    /// Whether the host supports in-place push/replace.
    fn supports_state(&self) -> bool;

    /// Current location, path plus query.
    fn location(&self) -> String;

    /// Add an entry and make `path` the visible location.
    fn push(&mut self, payload: &Value, title: Option<&str>, path: &str) -> Result<(), StoreError>;

    /// Overwrite the current entry.
    fn replace(
        &mut self,
        payload: &Value,
        title: Option<&str>,
        path: &str,
    ) -> Result<(), StoreError>;

    /// Full navigation to `path`, used when push is unavailable.
    fn navigate(&mut self, path: &str) -> Result<(), StoreError>;

    /// Subscribe to back/forward notifications.
    fn listen_for_pops(&mut self) -> Result<(), StoreError>;
}

/// The displayed page title.
pub trait DocumentTitle {
    /// Title currently displayed.
    fn title(&self) -> String;

    /// Replace the displayed title.
    fn set_title(&mut self, title: &str);
}
