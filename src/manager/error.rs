//! Manager error types.

use crate::native::StoreError;
use thiserror::Error;

/// Errors returned by `push_state` and `replace_state`.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// The native primitive refused the operation
    #[error("native history store failed: {0}")]
    Store(#[from] StoreError),

    /// The state could not be encoded as a store payload
    #[error("state payload could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}
