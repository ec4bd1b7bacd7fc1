//! History manager that keeps the current page state in step with the
//! host's native history stack.

use crate::config::{CapabilityMode, HistoryConfig};
use crate::core::{
    HistoryState, NavigationJournal, NavigationKind, NavigationRecord, PopEvent, StateData,
};
use crate::native::{DocumentTitle, NativeHistoryStore};
use chrono::Utc;

pub mod error;

pub use error::HistoryError;

/// Callback run after every state transition, with `from_pop` set for
/// back/forward notifications.
pub type StateCallback = Box<dyn FnMut(&HistoryState, bool)>;

/// Operating mode, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryMode {
    /// Push and replace go through the native store.
    Native,
    /// Push becomes a full navigation, replace does nothing, no pops arrive.
    Degraded,
}

/// Owner of the current history state.
///
/// One manager per page. The host glue owns it and forwards back/forward
/// notifications to `dispatch_pop`.
///
/// # Example
///
/// ```rust
/// use pagestate::native::{MemoryHistory, MemoryTitle};
/// use pagestate::{HistoryManager, StateData};
///
/// let mut manager = HistoryManager::new(MemoryHistory::new("/"), MemoryTitle::new("Home"));
/// manager.initialize();
///
/// manager.push_state(StateData::new(), Some("About"), "/about").unwrap();
/// assert_eq!(manager.current().map(|s| s.sequence_id), Some(1));
///
/// let event = manager.store_mut().back().unwrap();
/// assert!(manager.dispatch_pop(event));
/// assert_eq!(manager.current().map(|s| s.path.as_str()), Some("/"));
/// ```
pub struct HistoryManager<H: NativeHistoryStore, T: DocumentTitle> {
    store: H,
    title: T,
    config: HistoryConfig,
    mode: HistoryMode,
    current: Option<HistoryState>,
    initialized: bool,
    has_pushed: bool,
    subscribed: bool,
    on_change: Option<StateCallback>,
    deferred_callback: Option<StateCallback>,
    journal: NavigationJournal,
}

impl<H: NativeHistoryStore, T: DocumentTitle> HistoryManager<H, T> {
    /// Create a manager with the default configuration.
    pub fn new(store: H, title: T) -> Self {
        Self::with_config(store, title, HistoryConfig::default())
    }

    /// Create a manager. The capability check happens here, once.
    pub fn with_config(store: H, title: T, config: HistoryConfig) -> Self {
        let mode = match config.capability {
            CapabilityMode::Detect if store.supports_state() => HistoryMode::Native,
            _ => HistoryMode::Degraded,
        };
        log::debug!("History manager created in {:?} mode", mode);

        Self {
            store,
            title,
            mode,
            current: None,
            initialized: false,
            has_pushed: false,
            subscribed: false,
            on_change: None,
            deferred_callback: None,
            journal: NavigationJournal::with_limit(config.journal_limit),
            config,
        }
    }

    /// Callback installed by `initialize` when it is not given one.
    pub(crate) fn defer_callback(&mut self, callback: StateCallback) {
        self.deferred_callback = Some(callback);
    }

    /// Initialize without a new callback. Idempotent.
    pub fn initialize(&mut self) {
        self.init(None);
    }

    /// Initialize and run `callback` on every later state transition.
    ///
    /// A second call is ignored and the first callback stays active.
    pub fn initialize_with<F>(&mut self, callback: F)
    where
        F: FnMut(&HistoryState, bool) + 'static,
    {
        self.init(Some(Box::new(callback)));
    }

    fn init(&mut self, callback: Option<StateCallback>) {
        if self.initialized {
            log::debug!("History manager already initialized; ignoring");
            return;
        }

        self.on_change = callback.or_else(|| self.deferred_callback.take());

        if self.mode == HistoryMode::Native {
            self.current = Some(HistoryState::initial(
                self.store.location(),
                Some(self.title.title()),
            ));
            match self.store.listen_for_pops() {
                Ok(()) => self.subscribed = true,
                Err(e) => log::warn!("Could not subscribe to pop notifications: {}", e),
            }
        }

        self.initialized = true;
        log::info!(
            "History manager initialized: mode={:?}, location={}",
            self.mode,
            self.store.location()
        );
    }

    /// Make `path` the new current location.
    ///
    /// In degraded mode this performs a full navigation and leaves every
    /// internal field alone. Otherwise the new state gets the next sequence
    /// id, is pushed to the native store, updates the displayed title when
    /// one is given, and is passed to the callback with `from_pop = false`.
    ///
    /// If the store rejects the push, nothing changes and the error is
    /// returned.
    pub fn push_state(
        &mut self,
        data: StateData,
        title: Option<&str>,
        path: &str,
    ) -> Result<(), HistoryError> {
        if self.mode == HistoryMode::Degraded {
            log::debug!("Native history unavailable; navigating to {}", path);
            self.store.navigate(path)?;
            return Ok(());
        }
        self.init(None);

        let previous = self.loaded_state();
        let from_sequence = previous.sequence_id;
        let next = previous.next(data, title.map(str::to_string), path);
        let payload = next.to_payload()?;

        if let Err(e) = self.store.push(&payload, title, path) {
            log::warn!("Push to {} rejected: {}", path, e);
            return Err(e.into());
        }
        self.has_pushed = true;

        if let Some(title) = title {
            self.title.set_title(title);
        }
        self.record(NavigationKind::Push, from_sequence, &next);
        log::debug!("Pushed state {} at {}", next.sequence_id, next.path);

        self.current = Some(next);
        self.notify(false);
        Ok(())
    }

    /// Replace the data of the current state in place.
    ///
    /// Sequence id, path and title are kept and the callback is not run.
    /// Does nothing in degraded mode.
    pub fn replace_state(&mut self, data: StateData) -> Result<(), HistoryError> {
        if self.mode == HistoryMode::Degraded {
            log::debug!("Native history unavailable; ignoring replace");
            return Ok(());
        }
        self.init(None);

        let next = self.loaded_state().with_data(data);
        let payload = next.to_payload()?;

        if let Err(e) = self
            .store
            .replace(&payload, next.title.as_deref(), &next.path)
        {
            log::warn!("Replace at {} rejected: {}", next.path, e);
            return Err(e.into());
        }

        self.record(NavigationKind::Replace, next.sequence_id, &next);
        log::debug!("Replaced data of state {}", next.sequence_id);

        self.current = Some(next);
        Ok(())
    }

    /// Handle a back/forward notification from the host.
    ///
    /// Ignored unless the manager is subscribed and, with the default
    /// configuration, at least one push has happened. Absent or malformed
    /// payload fields fall back to defaults (see
    /// [`HistoryState::from_payload`]). Returns whether the notification was
    /// applied.
    pub fn dispatch_pop(&mut self, event: impl Into<PopEvent>) -> bool {
        if !self.subscribed {
            log::debug!("Pop notification received while not subscribed; ignoring");
            return false;
        }
        if self.config.ignore_pop_before_push && !self.has_pushed {
            log::debug!("Pop notification before first push; ignoring");
            return false;
        }

        let event = event.into();
        if event.state.is_none() {
            log::warn!("Pop notification carried no state; using fallbacks");
        }

        let location = self.store.location();
        let state = HistoryState::from_payload(event.state.as_ref(), &location);
        let from_sequence = self.current.as_ref().map_or(0, |s| s.sequence_id);

        if let Some(title) = &state.title {
            self.title.set_title(title);
        }
        self.record(NavigationKind::Pop, from_sequence, &state);
        log::debug!(
            "Popped from state {} to state {} at {}",
            from_sequence,
            state.sequence_id,
            state.path
        );

        self.current = Some(state);
        self.notify(true);
        true
    }

    fn loaded_state(&mut self) -> &HistoryState {
        self.current.get_or_insert_with(|| {
            HistoryState::initial(self.store.location(), Some(self.title.title()))
        })
    }

    fn record(&mut self, kind: NavigationKind, from_sequence: u64, to: &HistoryState) {
        self.journal = self.journal.record(NavigationRecord {
            kind,
            from_sequence,
            to_sequence: to.sequence_id,
            path: to.path.clone(),
            timestamp: Utc::now(),
        });
    }

    fn notify(&mut self, from_pop: bool) {
        if let (Some(callback), Some(state)) = (self.on_change.as_mut(), self.current.as_ref()) {
            callback(state, from_pop);
        }
    }

    /// Current state; `None` before initialize and always in degraded mode.
    pub fn current(&self) -> Option<&HistoryState> {
        self.current.as_ref()
    }

    /// Mode chosen by the capability check at construction.
    pub fn mode(&self) -> HistoryMode {
        self.mode
    }

    /// Whether `initialize` has run, explicitly or implicitly.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether a push has succeeded yet.
    pub fn has_pushed(&self) -> bool {
        self.has_pushed
    }

    /// Configuration the manager was created with.
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Applied pushes, replaces and pops, oldest first.
    pub fn journal(&self) -> &NavigationJournal {
        &self.journal
    }

    /// The native history store.
    pub fn store(&self) -> &H {
        &self.store
    }

    /// Mutable access for host glue, e.g. to drive back/forward.
    pub fn store_mut(&mut self) -> &mut H {
        &mut self.store
    }

    /// The displayed-title sink.
    pub fn title_sink(&self) -> &T {
        &self.title
    }
}
