//! Source pump: forwards news events into the store's command queue.
//!
//! The pump is the only subscriber of the configured [`NewsSource`]. When a
//! stream ends it resubscribes with exponential backoff; the backoff resets
//! once a new subscription delivers an event.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::NewsSource;
use crate::config::ReconnectConfig;
use crate::events::{EventBus, FeedEvent};
use crate::workers::Command;

pub struct SourcePump {
    source: Arc<dyn NewsSource>,
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    reconnect: ReconnectConfig,
}

impl SourcePump {
    pub fn new(
        source: Arc<dyn NewsSource>,
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        reconnect: ReconnectConfig,
    ) -> Self {
        Self {
            source,
            command_tx,
            event_bus,
            reconnect,
        }
    }

    pub async fn run(self) {
        // Consecutive resubscriptions without a delivered event.
        let mut attempt: u32 = 0;

        loop {
            let mut stream = self.source.subscribe();
            if attempt > 0 {
                info!(attempt, "news source resubscribed");
                self.event_bus
                    .publish(FeedEvent::SourceResubscribed { attempt });
            }

            let mut delivered = false;
            while let Some(event) = stream.next().await {
                delivered = true;
                if self.command_tx.send(Command::Ingest { event }).await.is_err() {
                    debug!("feed store closed; source pump stopping");
                    return;
                }
            }

            attempt = if delivered { 1 } else { attempt.saturating_add(1) };
            let delay = self.reconnect.delay_for(attempt);
            let retry_in_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);

            warn!(retry_in_ms, "news stream ended");
            self.event_bus
                .publish(FeedEvent::SourceDisconnected { retry_in_ms });

            tokio::time::sleep(delay).await;
            if self.command_tx.is_closed() {
                debug!("feed store closed; source pump stopping");
                return;
            }
        }
    }
}
