//! Topic-based event bus for feed changes.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need. Full state is observed through the handle's watch
//! channel; events carry just enough to react without diffing snapshots.

mod bus;

pub use bus::{EventBus, FeedEvent, Topic};
