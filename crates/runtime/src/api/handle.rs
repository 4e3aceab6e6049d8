//! Cloneable façade for issuing commands to the feed store.
//!
//! [`FeedHandle`] hides channel plumbing: reads come from the last published
//! state snapshot, commands go through the store worker's queue.
use std::sync::Arc;

use feed_core::{ClickOutcome, DisplayItem, FeedProfile, FeedState, ItemId};
use tokio::sync::{broadcast, mpsc, oneshot, watch};

use super::errors::{Result, RuntimeError};
use crate::events::{EventBus, FeedEvent, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the feed store
#[derive(Clone)]
pub struct FeedHandle {
    command_tx: mpsc::Sender<Command>,
    state_rx: watch::Receiver<FeedState>,
    event_bus: EventBus,
    profile: Arc<FeedProfile>,
}

impl FeedHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        state_rx: watch::Receiver<FeedState>,
        event_bus: EventBus,
        profile: Arc<FeedProfile>,
    ) -> Self {
        Self {
            command_tx,
            state_rx,
            event_bus,
            profile,
        }
    }

    /// Click an item: fetch its detail on first click, toggle expansion after.
    ///
    /// Returns once the click is reflected in the state (for a first click,
    /// the item is already marked loading). The detail itself arrives later.
    pub async fn click(&self, id: ItemId) -> Result<ClickOutcome> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Click {
                id,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Replace the active filter. Any string is accepted; `None` shows all.
    pub async fn set_filter(&self, filter: Option<String>) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::SetFilter {
                filter,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    pub async fn clear_filter(&self) -> Result<()> {
        self.set_filter(None).await
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> FeedState {
        self.state_rx.borrow().clone()
    }

    /// All items, newest first.
    pub fn items(&self) -> Vec<DisplayItem> {
        self.state_rx.borrow().items.iter().cloned().collect()
    }

    pub fn item(&self, id: ItemId) -> Option<DisplayItem> {
        self.state_rx.borrow().item(id).cloned()
    }

    /// Items passing the active filter, newest first.
    pub fn visible_items(&self) -> Vec<DisplayItem> {
        self.state_rx.borrow().visible_items()
    }

    pub fn read_count(&self) -> u64 {
        self.state_rx.borrow().read_count
    }

    pub fn active_filter(&self) -> Option<String> {
        self.state_rx.borrow().active_filter.clone()
    }

    /// Receiver that always holds the latest state and wakes on every change.
    pub fn watch_state(&self) -> watch::Receiver<FeedState> {
        self.state_rx.clone()
    }

    /// Subscribe to change events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Items` - Items added, updated, evicted, failed fetches
    /// - `Topic::ReadCount` - Read counter increments
    /// - `Topic::Filter` - Filter changes
    /// - `Topic::Source` - Stream disconnects and resubscriptions
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<FeedEvent> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> Vec<(Topic, broadcast::Receiver<FeedEvent>)> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Profile the feed was built with.
    pub fn profile(&self) -> &FeedProfile {
        &self.profile
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Ask the store worker to stop. Pending commands are dropped.
    pub(crate) async fn request_shutdown(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }

    pub(crate) fn command_sender(&self) -> mpsc::Sender<Command> {
        self.command_tx.clone()
    }
}
