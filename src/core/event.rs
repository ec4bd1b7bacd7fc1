//! Pop notification shapes.
//!
//! Hosts deliver back/forward notifications either as the native event
//! itself or wrapped inside a library event that carries the native one as
//! `original_event`. Both are normalized into a single `PopEvent` before the
//! manager sees them.

use serde_json::Value;

/// Notification as delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum RawPopEvent {
    /// The native event, carrying the stored payload directly.
    Direct { state: Option<Value> },
    /// A wrapper event holding the native event.
    Wrapped { original_event: Box<RawPopEvent> },
}

impl RawPopEvent {
    /// Native event carrying `state`.
    pub fn direct(state: Option<Value>) -> Self {
        Self::Direct { state }
    }

    /// Wrap an event one level deeper.
    pub fn wrapped(inner: RawPopEvent) -> Self {
        Self::Wrapped {
            original_event: Box::new(inner),
        }
    }
}

/// Normalized pop notification.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PopEvent {
    /// The previously pushed or replaced payload, if the host kept one.
    pub state: Option<Value>,
}

impl From<RawPopEvent> for PopEvent {
    fn from(raw: RawPopEvent) -> Self {
        let mut current = raw;
        loop {
            match current {
                RawPopEvent::Direct { state } => return PopEvent { state },
                RawPopEvent::Wrapped { original_event } => current = *original_event,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn direct_event_passes_state_through() {
        let event = PopEvent::from(RawPopEvent::direct(Some(json!({"index": 1}))));
        assert_eq!(event.state, Some(json!({"index": 1})));
    }

    #[test]
    fn wrapped_event_unwraps_original() {
        let raw = RawPopEvent::wrapped(RawPopEvent::direct(Some(json!({"index": 2}))));
        assert_eq!(PopEvent::from(raw).state, Some(json!({"index": 2})));
    }

    #[test]
    fn nested_wrappers_resolve_to_innermost() {
        let raw = RawPopEvent::wrapped(RawPopEvent::wrapped(RawPopEvent::direct(None)));
        assert_eq!(PopEvent::from(raw), PopEvent::default());
    }
}
