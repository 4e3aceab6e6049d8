//! Runtime orchestration for the simulated news feed.
//!
//! This crate wires together the news source and detail fetcher
//! abstractions, the store worker that owns [`feed_core::FeedState`], and
//! the event bus into a cohesive runtime API. Consumers embed
//! [`FeedRuntime`] and interact with the feed through [`FeedHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for change notifications
//! - [`sources`] contains the built-in simulators
//! - [`config`] loads runtime settings and feed profiles
//! - `workers` keeps background tasks internal to the crate
pub mod api;
pub mod config;
pub mod events;
pub mod runtime;
pub mod sources;

mod workers;

pub use api::{DetailFetcher, FeedHandle, FetchError, NewsSource, NewsStream, Result, RuntimeError};
pub use config::{FetcherConfig, ReconnectConfig, RuntimeConfig, SourceConfig, load_profile};
pub use events::{EventBus, FeedEvent, Topic};
pub use runtime::{FeedRuntime, RuntimeBuilder};
pub use sources::{ManualNewsSource, SimulatedDetailFetcher, SyntheticNewsSource};
