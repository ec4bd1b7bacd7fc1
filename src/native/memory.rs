//! In-memory host.
//!
//! `MemoryHistory` behaves like a browser's session history: a stack of
//! entries with a cursor, where pushing truncates any forward entries and
//! moving the cursor produces the pop notification the host would deliver.
//! It backs non-browser hosts and the test suite.

use super::{DocumentTitle, NativeHistoryStore, StoreError};
use crate::core::RawPopEvent;
use serde_json::Value;

/// One entry on the in-memory stack.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryEntry {
    pub payload: Option<Value>,
    pub title: Option<String>,
    pub path: String,
}

impl MemoryEntry {
    fn loaded(path: impl Into<String>) -> Self {
        Self {
            payload: None,
            title: None,
            path: path.into(),
        }
    }
}

#[derive(Debug)]
pub struct MemoryHistory {
    entries: Vec<MemoryEntry>,
    cursor: usize,
    state_api: bool,
    wrap_events: bool,
    pop_listeners: usize,
    navigations: Vec<String>,
    fail_next: Option<String>,
}

impl MemoryHistory {
    /// Host with push/replace support, loaded at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            entries: vec![MemoryEntry::loaded(path)],
            cursor: 0,
            state_api: true,
            wrap_events: false,
            pop_listeners: 0,
            navigations: Vec::new(),
            fail_next: None,
        }
    }

    /// Host without push/replace support.
    pub fn without_state_api(path: impl Into<String>) -> Self {
        Self {
            state_api: false,
            ..Self::new(path)
        }
    }

    /// Deliver pop notifications wrapped in an outer event.
    pub fn wrap_events(mut self, wrap: bool) -> Self {
        self.wrap_events = wrap;
        self
    }

    /// Make the next push, replace or navigate fail with `reason`.
    pub fn fail_next(&mut self, reason: impl Into<String>) {
        self.fail_next = Some(reason.into());
    }

    /// Step back one entry.
    pub fn back(&mut self) -> Option<RawPopEvent> {
        self.go(-1)
    }

    /// Step forward one entry.
    pub fn forward(&mut self) -> Option<RawPopEvent> {
        self.go(1)
    }

    /// Move the cursor by `delta` entries.
    ///
    /// Returns the notification for the entry landed on, or `None` when the
    /// move would leave the stack (the cursor does not move).
    pub fn go(&mut self, delta: isize) -> Option<RawPopEvent> {
        let target = self.cursor.checked_add_signed(delta)?;
        if delta == 0 || target >= self.entries.len() {
            return None;
        }
        self.cursor = target;
        Some(self.event_for_current())
    }

    /// The notification some hosts fire on initial page load, before any
    /// push has happened.
    pub fn load_event(&self) -> RawPopEvent {
        self.event_for_current()
    }

    fn event_for_current(&self) -> RawPopEvent {
        let event = RawPopEvent::direct(self.entries[self.cursor].payload.clone());
        if self.wrap_events {
            RawPopEvent::wrapped(event)
        } else {
            event
        }
    }

    fn take_failure(&mut self, operation: &'static str) -> Result<(), StoreError> {
        match self.fail_next.take() {
            Some(reason) => Err(StoreError::Rejected { operation, reason }),
            None => Ok(()),
        }
    }

    fn require_state_api(&self, operation: &'static str) -> Result<(), StoreError> {
        if self.state_api {
            Ok(())
        } else {
            Err(StoreError::Unsupported { operation })
        }
    }

    pub fn entries(&self) -> &[MemoryEntry] {
        &self.entries
    }

    pub fn current_entry(&self) -> &MemoryEntry {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Paths passed to `navigate`, oldest first.
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Number of times `listen_for_pops` was called.
    pub fn pop_listeners(&self) -> usize {
        self.pop_listeners
    }
}

impl NativeHistoryStore for MemoryHistory {
    fn supports_state(&self) -> bool {
        self.state_api
    }

    fn location(&self) -> String {
        self.entries[self.cursor].path.clone()
    }

    fn push(&mut self, payload: &Value, title: Option<&str>, path: &str) -> Result<(), StoreError> {
        self.require_state_api("push")?;
        self.take_failure("push")?;

        self.entries.truncate(self.cursor + 1);
        self.entries.push(MemoryEntry {
            payload: Some(payload.clone()),
            title: title.map(str::to_string),
            path: path.to_string(),
        });
        self.cursor = self.entries.len() - 1;
        Ok(())
    }

    fn replace(
        &mut self,
        payload: &Value,
        title: Option<&str>,
        path: &str,
    ) -> Result<(), StoreError> {
        self.require_state_api("replace")?;
        self.take_failure("replace")?;

        self.entries[self.cursor] = MemoryEntry {
            payload: Some(payload.clone()),
            title: title.map(str::to_string),
            path: path.to_string(),
        };
        Ok(())
    }

    fn navigate(&mut self, path: &str) -> Result<(), StoreError> {
        self.take_failure("navigate")?;

        self.navigations.push(path.to_string());
        self.entries.truncate(self.cursor + 1);
        self.entries.push(MemoryEntry::loaded(path));
        self.cursor = self.entries.len() - 1;
        Ok(())
    }

    fn listen_for_pops(&mut self) -> Result<(), StoreError> {
        self.pop_listeners += 1;
        Ok(())
    }
}

/// In-memory displayed title.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryTitle {
    title: String,
    writes: usize,
}

impl MemoryTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            writes: 0,
        }
    }

    /// Number of `set_title` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl DocumentTitle for MemoryTitle {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.writes += 1;
    }
}
