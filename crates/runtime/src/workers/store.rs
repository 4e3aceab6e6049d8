//! Store worker that owns the authoritative [`feed_core::FeedState`].
//!
//! Receives commands from [`crate::FeedHandle`] and the source pump, applies
//! them through [`FeedReducer`], publishes the new state on a watch channel
//! and change notifications on the [`EventBus`].

use std::sync::Arc;

use feed_core::{
    ClickOutcome, FeedError, FeedProfile, FeedReducer, FeedState, IngestOutcome, ItemId,
    ItemPhase, RawEvent, to_display_item,
};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tracing::{debug, error, info, warn};

use crate::api::{DetailFetcher, FetchError};
use crate::events::{EventBus, FeedEvent};

type FetchResult = (ItemId, Result<String, FetchError>);

/// Commands that can be sent to the store worker
pub enum Command {
    /// Transform and prepend a raw event.
    Ingest { event: RawEvent },
    /// Replace the active filter.
    SetFilter {
        filter: Option<String>,
        reply: oneshot::Sender<()>,
    },
    /// Click an item. The reply is sent after the state reflects the click.
    Click {
        id: ItemId,
        reply: oneshot::Sender<ClickOutcome>,
    },
    /// Stop the worker; in-flight fetches are aborted.
    Shutdown,
}

/// Background task that serializes every feed mutation.
pub struct StoreWorker {
    state: watch::Sender<FeedState>,
    profile: Arc<FeedProfile>,
    fetcher: Arc<dyn DetailFetcher>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    max_items: Option<usize>,
    fetches: JoinSet<FetchResult>,
}

impl StoreWorker {
    pub fn new(
        state: watch::Sender<FeedState>,
        profile: Arc<FeedProfile>,
        fetcher: Arc<dyn DetailFetcher>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
        max_items: Option<usize>,
    ) -> Self {
        Self {
            state,
            profile,
            fetcher,
            command_rx,
            event_bus,
            max_items,
            fetches: JoinSet::new(),
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        info!(max_items = ?self.max_items, "feed store worker started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Shutdown) | None => break,
                    Some(cmd) => self.handle_command(cmd),
                },
                Some(joined) = self.fetches.join_next() => {
                    self.handle_fetch_result(joined);
                }
            }
        }

        let in_flight = self.fetches.len();
        self.fetches.abort_all();
        info!(in_flight, "feed store worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Ingest { event } => self.handle_ingest(event),
            Command::SetFilter { filter, reply } => {
                self.handle_set_filter(filter);
                if reply.send(()).is_err() {
                    debug!("SetFilter reply channel closed (caller dropped)");
                }
            }
            Command::Click { id, reply } => {
                let outcome = self.handle_click(id);
                if reply.send(outcome).is_err() {
                    debug!("Click reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown => {}
        }
    }

    fn handle_ingest(&mut self, event: RawEvent) {
        let item = to_display_item(&event, &self.profile);
        let id = item.id;

        let mut result: Result<IngestOutcome, FeedError> = Ok(IngestOutcome::default());
        self.state.send_if_modified(|state| {
            result = FeedReducer::new(state).ingest(item, self.max_items);
            result.is_ok()
        });

        match result {
            Ok(outcome) => {
                debug!(%id, category = %event.category, "item added");
                self.event_bus.publish(FeedEvent::ItemAdded {
                    id,
                    category: event.category,
                });
                for evicted in outcome.evicted {
                    debug!(id = %evicted, "item evicted by history cap");
                    self.event_bus
                        .publish(FeedEvent::ItemEvicted { id: evicted });
                }
            }
            Err(err) => warn!(%err, "rejected news event"),
        }
    }

    fn handle_set_filter(&mut self, filter: Option<String>) {
        let changed = self
            .state
            .send_if_modified(|state| FeedReducer::new(state).set_filter(filter.clone()));

        if changed {
            debug!(?filter, "filter changed");
            self.event_bus.publish(FeedEvent::FilterChanged { filter });
        }
    }

    fn handle_click(&mut self, id: ItemId) -> ClickOutcome {
        let mut outcome = ClickOutcome::NotFound;
        self.state.send_if_modified(|state| {
            outcome = FeedReducer::new(state).click(id);
            matches!(
                outcome,
                ClickOutcome::Toggled { .. } | ClickOutcome::FetchStarted
            )
        });

        match outcome {
            ClickOutcome::NotFound => debug!(%id, "click on unknown item"),
            ClickOutcome::AlreadyLoading => debug!(%id, "click absorbed while loading"),
            ClickOutcome::Toggled { expanded } => {
                let phase = if expanded {
                    ItemPhase::ReadExpanded
                } else {
                    ItemPhase::ReadCollapsed
                };
                self.event_bus.publish(FeedEvent::ItemUpdated { id, phase });
            }
            ClickOutcome::FetchStarted => {
                self.spawn_fetch(id);
                self.event_bus.publish(FeedEvent::ItemUpdated {
                    id,
                    phase: ItemPhase::Loading,
                });
            }
        }

        outcome
    }

    fn spawn_fetch(&mut self, id: ItemId) {
        debug!(%id, "fetching detail");
        let fetcher = Arc::clone(&self.fetcher);

        // The fetch runs in its own task so a panicking fetcher still yields
        // an id-tagged result here.
        let fetch = AbortOnDrop(tokio::spawn(async move { fetcher.fetch_detail(id).await }));
        self.fetches.spawn(async move {
            let mut fetch = fetch;
            let result = match (&mut fetch.0).await {
                Ok(result) => result,
                Err(err) => Err(FetchError::unavailable(id, err.to_string())),
            };
            (id, result)
        });
    }

    fn handle_fetch_result(&mut self, joined: Result<FetchResult, JoinError>) {
        match joined {
            Ok((id, Ok(detail))) => self.apply_detail(id, detail),
            Ok((id, Err(err))) => self.apply_failure(id, err),
            Err(err) if err.is_cancelled() => debug!("detail fetch cancelled"),
            Err(err) => error!(%err, "detail fetch task failed"),
        }
    }

    fn apply_detail(&mut self, id: ItemId, detail: String) {
        let mut completion = None;
        self.state.send_if_modified(|state| {
            completion = FeedReducer::new(state).complete_fetch(id, detail);
            completion.is_some()
        });

        let Some(completion) = completion else {
            debug!(%id, "detail arrived for an item that is gone");
            return;
        };

        debug!(%id, newly_read = completion.newly_read, "detail applied");
        self.event_bus.publish(FeedEvent::ItemUpdated {
            id,
            phase: ItemPhase::ReadExpanded,
        });
        if completion.newly_read {
            self.event_bus.publish(FeedEvent::ReadCountChanged {
                read_count: completion.read_count,
            });
        }
    }

    fn apply_failure(&mut self, id: ItemId, err: FetchError) {
        warn!(%id, %err, "detail fetch failed");

        let reverted = self
            .state
            .send_if_modified(|state| FeedReducer::new(state).fail_fetch(id));
        if !reverted {
            return;
        }

        let phase = self
            .state
            .borrow()
            .item(id)
            .map_or(ItemPhase::Unread, |item| item.phase());
        self.event_bus.publish(FeedEvent::ItemUpdated { id, phase });
        self.event_bus.publish(FeedEvent::DetailFailed {
            id,
            reason: err.to_string(),
        });
    }
}

/// Aborts the wrapped task when dropped, tying it to the enclosing task.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}
