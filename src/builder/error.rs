//! Build errors for the history manager builder.

use thiserror::Error;

/// Errors that can occur when building a history manager.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Native history store not specified. Call .store(store) before .build()")]
    MissingStore,

    #[error("Document title sink not specified. Call .title_sink(sink) before .build()")]
    MissingTitleSink,
}
