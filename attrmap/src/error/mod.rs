//! Error types produced by mapping operations.

mod constructors;
mod types;

pub use types::{AttrError, ErrorKind};

/// Result alias used throughout the crate.
pub type AttrResult<T> = Result<T, AttrError>;
