//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, profile loading, and detail
//! providers so clients can bubble them up with consistent context.
use std::path::PathBuf;

use feed_core::{ItemId, ProfileError};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("feed store command channel closed")]
    CommandChannelClosed,

    #[error("feed store reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("feed worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("invalid feed profile")]
    Profile(#[from] ProfileError),

    #[error("failed to read feed profile {path:?}")]
    ProfileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse feed profile {path:?}")]
    ProfileParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Failure reported by a [`crate::DetailFetcher`].
///
/// Recoverable: the item returns to its pre-fetch phase and the next click
/// retries.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("detail for {id} unavailable: {reason}")]
    Unavailable { id: ItemId, reason: String },
}

impl FetchError {
    pub fn unavailable(id: ItemId, reason: impl Into<String>) -> Self {
        FetchError::Unavailable {
            id,
            reason: reason.into(),
        }
    }
}
