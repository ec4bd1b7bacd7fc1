//! Errors raised at the native history boundary.

use thiserror::Error;

/// Failure reported by a native history primitive.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The host refused the operation (quota, security policy, bad URL)
    #[error("{operation} rejected by host: {reason}")]
    Rejected {
        operation: &'static str,
        reason: String,
    },

    /// The host lacks the primitive entirely
    #[error("{operation} is not supported by this host")]
    Unsupported { operation: &'static str },
}
