//! Built-in news sources and detail fetchers.
//!
//! The synthetic source and simulated fetcher reproduce the demo feed
//! without any I/O; the manual source lets callers script the stream.

mod detail;
mod manual;
mod synthetic;

pub use detail::SimulatedDetailFetcher;
pub use manual::ManualNewsSource;
pub use synthetic::SyntheticNewsSource;
