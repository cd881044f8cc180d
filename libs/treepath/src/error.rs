//! Error types for path resolution

use crate::path::Key;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Path resolution errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A composite path must contain at least one step. Raised at
    /// construction time, never during resolution.
    #[error("path contains no steps")]
    EmptyPath,

    /// A plain key or index was applied to a node that has no entry for it,
    /// or that offers no lookup capability at all.
    #[error("no entry for key `{key}` in {kind} value")]
    KeyNotFound { key: Key, kind: &'static str },

    /// A wildcard or deep wildcard was applied to a node with no children
    /// to enumerate.
    #[error("cannot expand children of {kind} value")]
    NotExpandable { kind: &'static str },

    /// The configured traversal depth limit was exceeded.
    #[error("traversal exceeded depth limit of {limit}")]
    DepthExceeded { limit: usize },
}

impl Error {
    /// Whether flatten-and-skip aggregation may drop a branch that failed
    /// with this error.
    ///
    /// Lookup and expansion failures are recoverable when they occur while
    /// resolving a child introduced by a wildcard, deep wildcard, or ranged
    /// key; the same failures propagate when they occur as a direct step of
    /// resolution. `EmptyPath` and `DepthExceeded` always propagate.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Error::KeyNotFound { .. } | Error::NotExpandable { .. }
        )
    }
}
