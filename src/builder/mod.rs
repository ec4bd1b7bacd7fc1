//! Builder API for constructing history managers.

pub mod error;
pub mod manager;

pub use error::BuildError;
pub use manager::HistoryManagerBuilder;
