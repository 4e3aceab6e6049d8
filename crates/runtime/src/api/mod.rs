//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or simulators.

pub mod errors;
pub mod handle;
pub mod providers;

pub use errors::{FetchError, Result, RuntimeError};
pub use handle::FeedHandle;
pub use providers::{DetailFetcher, NewsSource, NewsStream};
