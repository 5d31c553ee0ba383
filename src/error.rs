//! Error types for indexing and navigation.
//!
//! Indexing itself never fails; only the optional depth guard and parent
//! resolution produce errors.

use thiserror::Error;

use crate::path::{Path, Step};
use crate::types::NodeKind;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum Error {
    /// The empty path names the root, which has no parent.
    #[error("the root has no parent")]
    EmptyPath,

    /// A step could not be followed against the supplied root.
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// Traversal went deeper than the configured bound.
    #[error("depth limit of {limit} exceeded at {path}")]
    DepthLimitExceeded { limit: usize, path: Path },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where re-navigation stopped: everything in `followed` resolved, `step` did not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot follow {step} from {followed}: {reason}")]
pub struct NavigationError {
    pub followed: Path,
    pub step: Step,
    pub reason: NavigationFailure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavigationFailure {
    #[error("key not present")]
    MissingKey,
    #[error("index out of range for length {len}")]
    IndexOutOfRange { len: usize },
    #[error("step does not apply to a {found} node")]
    KindMismatch { found: NodeKind },
}
