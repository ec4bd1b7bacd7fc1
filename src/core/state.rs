//! The history state record tracked by the manager.
//!
//! A `HistoryState` describes the logical page the manager believes is
//! active. It is the value handed to the native store on every push and
//! replace, and the value recovered from the store on every pop.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque key/value payload associated with a history entry.
pub type StateData = Map<String, Value>;

/// Record describing the current logical page.
///
/// `sequence_id` is serialized as `index`. Payloads written under the older
/// `uid` name are still accepted when decoding.
///
/// # Example
///
/// ```rust
/// use pagestate::core::{HistoryState, StateData};
///
/// let home = HistoryState::initial("/", Some("Home".to_string()));
/// assert_eq!(home.sequence_id, 0);
///
/// let next = home.next(StateData::new(), Some("About".to_string()), "/about");
/// assert_eq!(next.sequence_id, 1);
/// assert_eq!(next.path, "/about");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
    /// Position in the push sequence; 0 for the state read at initialize.
    #[serde(rename = "index", alias = "uid")]
    pub sequence_id: u64,
    /// Logical location: URL path plus query.
    pub path: String,
    /// Title recorded for this entry; also the displayed title when present.
    pub title: Option<String>,
    /// Caller-supplied payload, never inspected by the manager.
    pub data: StateData,
}

/// Reads a sequence id stored as an integer or as an integral float.
fn sequence_from(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|n| n.is_finite() && *n >= 0.0 && n.fract() == 0.0 && *n < u64::MAX as f64)
            .map(|n| n as u64)
    })
}

impl HistoryState {
    /// State read from the host at initialize time.
    pub fn initial(path: impl Into<String>, title: Option<String>) -> Self {
        Self {
            sequence_id: 0,
            path: path.into(),
            title,
            data: StateData::new(),
        }
    }

    /// State produced by a push: the sequence advances by exactly one.
    pub fn next(&self, data: StateData, title: Option<String>, path: impl Into<String>) -> Self {
        Self {
            sequence_id: self.sequence_id + 1,
            path: path.into(),
            title,
            data,
        }
    }

    /// State produced by a replace: only `data` changes.
    pub fn with_data(&self, data: StateData) -> Self {
        Self {
            data,
            ..self.clone()
        }
    }

    /// Encode for the native store.
    pub fn to_payload(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Decode a payload delivered by a pop notification.
    ///
    /// Never fails. Absent or malformed fields take defined fallbacks:
    /// sequence 0, `fallback_path`, no title, empty data.
    ///
    /// ```rust
    /// use pagestate::core::HistoryState;
    /// use serde_json::json;
    ///
    /// let state = HistoryState::from_payload(Some(&json!({"title": 7})), "/here");
    /// assert_eq!(state.sequence_id, 0);
    /// assert_eq!(state.path, "/here");
    /// assert_eq!(state.title, None);
    /// assert!(state.data.is_empty());
    /// ```
    pub fn from_payload(payload: Option<&Value>, fallback_path: &str) -> Self {
        let Some(fields) = payload.and_then(Value::as_object) else {
            return Self::initial(fallback_path, None);
        };

        Self {
            sequence_id: ["index", "uid"]
                .iter()
                .find_map(|key| fields.get(*key).and_then(sequence_from))
                .unwrap_or(0),
            path: match fields.get("path") {
                Some(Value::String(path)) => path.clone(),
                _ => fallback_path.to_string(),
            },
            title: match fields.get("title") {
                Some(Value::String(title)) => Some(title.clone()),
                _ => None,
            },
            data: match fields.get("data") {
                Some(Value::Object(data)) => data.clone(),
                _ => StateData::new(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> StateData {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn initial_state_starts_at_zero_with_empty_data() {
        let state = HistoryState::initial("/start?q=1", Some("Start".to_string()));
        assert_eq!(state.sequence_id, 0);
        assert_eq!(state.path, "/start?q=1");
        assert_eq!(state.title.as_deref(), Some("Start"));
        assert!(state.data.is_empty());
    }

    #[test]
    fn next_increments_sequence() {
        let state = HistoryState::initial("/", None);
        let pushed = state.next(data(json!({"a": 1})), Some("A".to_string()), "/a");
        assert_eq!(pushed.sequence_id, 1);
        assert_eq!(pushed.path, "/a");
        assert_eq!(pushed.data["a"], json!(1));

        let again = pushed.next(StateData::new(), None, "/b");
        assert_eq!(again.sequence_id, 2);
        assert_eq!(again.title, None);
    }

    #[test]
    fn with_data_keeps_sequence_path_and_title() {
        let state = HistoryState::initial("/", None).next(
            StateData::new(),
            Some("A".to_string()),
            "/a",
        );
        let replaced = state.with_data(data(json!({"scroll": 120})));
        assert_eq!(replaced.sequence_id, state.sequence_id);
        assert_eq!(replaced.path, state.path);
        assert_eq!(replaced.title, state.title);
        assert_eq!(replaced.data["scroll"], json!(120));
    }

    #[test]
    fn payload_uses_index_field_name() {
        let state = HistoryState::initial("/", None);
        let payload = state.to_payload().unwrap();
        assert_eq!(payload["index"], json!(0));
        assert!(payload.get("sequence_id").is_none());
    }

    #[test]
    fn payload_decodes_back_to_same_state() {
        let state = HistoryState::initial("/", None).next(
            data(json!({"a": 1})),
            Some("Page A".to_string()),
            "/a",
        );
        let payload = state.to_payload().unwrap();
        assert_eq!(HistoryState::from_payload(Some(&payload), "/other"), state);
    }

    #[test]
    fn uid_alias_is_accepted() {
        let payload = json!({"uid": 4, "path": "/x", "title": "X", "data": {}});
        let state = HistoryState::from_payload(Some(&payload), "/");
        assert_eq!(state.sequence_id, 4);
    }

    #[test]
    fn integral_float_index_is_accepted() {
        let payload = json!({"index": 2.0, "path": "/p"});
        let state = HistoryState::from_payload(Some(&payload), "/fallback");
        assert_eq!(state.sequence_id, 2);
        assert_eq!(state.next(StateData::new(), None, "/q").sequence_id, 3);
    }

    #[test]
    fn fractional_or_negative_index_falls_back() {
        for index in [json!(2.5), json!(-1.0), json!(-4)] {
            let payload = json!({"index": index, "path": "/p"});
            assert_eq!(HistoryState::from_payload(Some(&payload), "/").sequence_id, 0);
        }
    }

    #[test]
    fn index_and_uid_together_keep_every_field() {
        let payload = json!({"index": 3, "uid": 3, "path": "/kept", "title": "Kept", "data": {"a": 1}});
        let state = HistoryState::from_payload(Some(&payload), "/fallback");
        assert_eq!(state.sequence_id, 3);
        assert_eq!(state.path, "/kept");
        assert_eq!(state.title.as_deref(), Some("Kept"));
        assert_eq!(state.data["a"], json!(1));
    }

    #[test]
    fn bad_index_uses_uid() {
        let payload = json!({"index": "three", "uid": 5});
        assert_eq!(HistoryState::from_payload(Some(&payload), "/").sequence_id, 5);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let payload = json!({"path": "/kept", "scroll": 10, "extra": {"x": []}});
        let state = HistoryState::from_payload(Some(&payload), "/fallback");
        assert_eq!(state.path, "/kept");
    }

    #[test]
    fn absent_payload_falls_back() {
        let state = HistoryState::from_payload(None, "/current");
        assert_eq!(state, HistoryState::initial("/current", None));
    }

    #[test]
    fn non_object_payload_falls_back() {
        let state = HistoryState::from_payload(Some(&json!("nonsense")), "/current");
        assert_eq!(state, HistoryState::initial("/current", None));
    }

    #[test]
    fn malformed_fields_fall_back_individually() {
        let payload = json!({"index": "three", "path": "/kept", "title": null, "data": [1, 2]});
        let state = HistoryState::from_payload(Some(&payload), "/fallback");
        assert_eq!(state.sequence_id, 0);
        assert_eq!(state.path, "/kept");
        assert_eq!(state.title, None);
        assert!(state.data.is_empty());
    }
}
