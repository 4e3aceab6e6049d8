//! Topic-based event bus implementation.

use feed_core::{ItemId, ItemPhase};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Item list changes (new, updated, evicted, failed fetches)
    Items,
    /// Read counter changes
    ReadCount,
    /// Active filter changes
    Filter,
    /// News subscription health
    Source,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Items, Topic::ReadCount, Topic::Filter, Topic::Source];
}

/// Change notification published after the store state has been updated.
///
/// Events describe what changed; the current values are always available
/// from the handle's state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedEvent {
    ItemAdded { id: ItemId, category: String },
    ItemUpdated { id: ItemId, phase: ItemPhase },
    /// Dropped by the history cap.
    ItemEvicted { id: ItemId },
    DetailFailed { id: ItemId, reason: String },
    ReadCountChanged { read_count: u64 },
    FilterChanged { filter: Option<String> },
    /// The news stream ended; a new subscription follows after the delay.
    SourceDisconnected { retry_in_ms: u64 },
    SourceResubscribed { attempt: u32 },
}

impl FeedEvent {
    pub fn topic(&self) -> Topic {
        match self {
            FeedEvent::ItemAdded { .. }
            | FeedEvent::ItemUpdated { .. }
            | FeedEvent::ItemEvicted { .. }
            | FeedEvent::DetailFailed { .. } => Topic::Items,
            FeedEvent::ReadCountChanged { .. } => Topic::ReadCount,
            FeedEvent::FilterChanged { .. } => Topic::Filter,
            FeedEvent::SourceDisconnected { .. } | FeedEvent::SourceResubscribed { .. } => {
                Topic::Source
            }
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    items: broadcast::Sender<FeedEvent>,
    read_count: broadcast::Sender<FeedEvent>,
    filter: broadcast::Sender<FeedEvent>,
    source: broadcast::Sender<FeedEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: broadcast::channel(capacity).0,
            read_count: broadcast::channel(capacity).0,
            filter: broadcast::channel(capacity).0,
            source: broadcast::channel(capacity).0,
        }
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<FeedEvent> {
        match topic {
            Topic::Items => &self.items,
            Topic::ReadCount => &self.read_count,
            Topic::Filter => &self.filter,
            Topic::Source => &self.source,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: FeedEvent) {
        let topic = event.topic();
        if self.channel(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<FeedEvent> {
        self.channel(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> Vec<(Topic, broadcast::Receiver<FeedEvent>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
