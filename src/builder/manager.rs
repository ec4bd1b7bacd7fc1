//! Builder for constructing history managers.

use crate::builder::error::BuildError;
use crate::config::HistoryConfig;
use crate::core::HistoryState;
use crate::manager::{HistoryManager, StateCallback};
use crate::native::{DocumentTitle, NativeHistoryStore};

/// Builder for constructing history managers with a fluent API.
///
/// A callback given here is installed by `initialize()`; an explicit
/// `initialize_with` callback takes precedence.
///
/// ```rust
/// use pagestate::native::{MemoryHistory, MemoryTitle};
/// use pagestate::HistoryManagerBuilder;
///
/// let mut manager = HistoryManagerBuilder::new()
///     .store(MemoryHistory::new("/"))
///     .title_sink(MemoryTitle::new("Home"))
///     .on_state_change(|state, from_pop| println!("{} {}", state.path, from_pop))
///     .build()
///     .unwrap();
/// manager.initialize();
/// ```
pub struct HistoryManagerBuilder<H: NativeHistoryStore, T: DocumentTitle> {
    store: Option<H>,
    title_sink: Option<T>,
    config: HistoryConfig,
    callback: Option<StateCallback>,
}

impl<H: NativeHistoryStore, T: DocumentTitle> HistoryManagerBuilder<H, T> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            store: None,
            title_sink: None,
            config: HistoryConfig::default(),
            callback: None,
        }
    }

    /// Set the native history store (required).
    pub fn store(mut self, store: H) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the displayed-title sink (required).
    pub fn title_sink(mut self, sink: T) -> Self {
        self.title_sink = Some(sink);
        self
    }

    pub fn config(mut self, config: HistoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the callback run on every state transition.
    pub fn on_state_change<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&HistoryState, bool) + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Build the manager.
    /// Returns an error if required fields are missing.
    pub fn build(self) -> Result<HistoryManager<H, T>, BuildError> {
        let store = self.store.ok_or(BuildError::MissingStore)?;
        let title_sink = self.title_sink.ok_or(BuildError::MissingTitleSink)?;

        let mut manager = HistoryManager::with_config(store, title_sink, self.config);
        if let Some(callback) = self.callback {
            manager.defer_callback(callback);
        }

        Ok(manager)
    }
}

impl<H: NativeHistoryStore, T: DocumentTitle> Default for HistoryManagerBuilder<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateData;
    use crate::manager::HistoryMode;
    use crate::native::{MemoryHistory, MemoryTitle};
    use std::cell::RefCell;
    use std::rc::Rc;

    type Builder = HistoryManagerBuilder<MemoryHistory, MemoryTitle>;

    #[test]
    fn builder_validates_required_fields() {
        let missing_store = Builder::new().title_sink(MemoryTitle::default()).build();
        assert_eq!(missing_store.err(), Some(BuildError::MissingStore));

        let missing_title = Builder::new().store(MemoryHistory::new("/")).build();
        assert_eq!(missing_title.err(), Some(BuildError::MissingTitleSink));
    }

    #[test]
    fn builder_applies_config() {
        let manager = Builder::new()
            .store(MemoryHistory::without_state_api("/"))
            .title_sink(MemoryTitle::default())
            .config(HistoryConfig {
                journal_limit: 3,
                ..HistoryConfig::default()
            })
            .build()
            .unwrap();

        assert_eq!(manager.mode(), HistoryMode::Degraded);
        assert_eq!(manager.journal().limit(), 3);
    }

    #[test]
    fn builder_callback_installed_on_initialize() {
        let paths = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&paths);

        let mut manager = Builder::new()
            .store(MemoryHistory::new("/"))
            .title_sink(MemoryTitle::default())
            .on_state_change(move |state, _| sink.borrow_mut().push(state.path.clone()))
            .build()
            .unwrap();
        manager.initialize();
        manager.push_state(StateData::new(), None, "/a").unwrap();

        assert_eq!(*paths.borrow(), vec!["/a".to_string()]);
    }

    #[test]
    fn explicit_initialize_callback_wins() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let from_builder = Rc::clone(&hits);
        let from_initialize = Rc::clone(&hits);

        let mut manager = Builder::new()
            .store(MemoryHistory::new("/"))
            .title_sink(MemoryTitle::default())
            .on_state_change(move |_, _| from_builder.borrow_mut().push("builder"))
            .build()
            .unwrap();
        manager.initialize_with(move |_, _| from_initialize.borrow_mut().push("initialize"));
        manager.push_state(StateData::new(), None, "/a").unwrap();

        assert_eq!(*hits.borrow(), vec!["initialize"]);
    }
}
