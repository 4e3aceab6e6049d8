//! Hand-driven news source for tests and scripted sessions.
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use feed_core::RawEvent;
use tokio::sync::{mpsc, watch};

use crate::api::{NewsSource, NewsStream};

const STREAM_BUFFER: usize = 64;

/// News source whose events are pushed explicitly with [`ManualNewsSource::emit`].
///
/// Clones share the same subscriber list, so a test can keep one clone and
/// hand the other to the runtime.
#[derive(Clone)]
pub struct ManualNewsSource {
    subscribers: Arc<Mutex<Vec<mpsc::Sender<RawEvent>>>>,
    subscriptions: Arc<watch::Sender<u64>>,
}

impl ManualNewsSource {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
            subscriptions: Arc::new(watch::Sender::new(0)),
        }
    }

    fn subscribers(&self) -> MutexGuard<'_, Vec<mpsc::Sender<RawEvent>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver `event` to every live subscription. Returns how many received it.
    pub async fn emit(&self, event: RawEvent) -> usize {
        let senders: Vec<_> = self.subscribers().clone();

        let mut delivered = 0;
        for tx in senders {
            if tx.send(event.clone()).await.is_ok() {
                delivered += 1;
            }
        }

        self.subscribers().retain(|tx| !tx.is_closed());
        delivered
    }

    /// End every live stream, as if the upstream connection dropped.
    pub fn disconnect(&self) {
        self.subscribers().clear();
    }

    /// Subscriptions ever made on this source.
    pub fn subscription_count(&self) -> u64 {
        *self.subscriptions.borrow()
    }

    /// Wait until at least `count` subscriptions have been made.
    pub async fn wait_for_subscriptions(&self, count: u64) {
        let mut rx = self.subscriptions.subscribe();
        // The sender lives in `self`, so the channel cannot close while waiting.
        let _ = rx.wait_for(|&made| made >= count).await;
    }
}

impl Default for ManualNewsSource {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsSource for ManualNewsSource {
    fn subscribe(&self) -> NewsStream {
        let (tx, stream) = NewsStream::channel(STREAM_BUFFER);
        self.subscribers().push(tx);
        self.subscriptions.send_modify(|made| *made += 1);
        stream
    }
}
