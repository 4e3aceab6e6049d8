//! Asynchronous abstractions for sourcing news and item details.
//!
//! Runtime users plug in [`NewsSource`] and [`DetailFetcher`] implementations
//! so the same store can run against the built-in simulators, scripted
//! fixtures, or a real backend.
use async_trait::async_trait;
use feed_core::{ItemId, RawEvent};
use tokio::sync::mpsc;

use super::errors::FetchError;

/// Lazy sequence of raw events from one subscription.
///
/// The stream ends (returns `None`) when the producing side goes away. The
/// built-in simulators never end on their own.
pub struct NewsStream {
    rx: mpsc::Receiver<RawEvent>,
}

impl NewsStream {
    pub fn new(rx: mpsc::Receiver<RawEvent>) -> Self {
        Self { rx }
    }

    /// Create a stream together with the sender that feeds it.
    pub fn channel(buffer: usize) -> (mpsc::Sender<RawEvent>, Self) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (tx, Self::new(rx))
    }

    pub async fn next(&mut self) -> Option<RawEvent> {
        self.rx.recv().await
    }
}

/// Producer of raw news events.
///
/// Each call to [`NewsSource::subscribe`] starts an independent timeline.
/// Implementations must be called from within a Tokio runtime.
pub trait NewsSource: Send + Sync {
    fn subscribe(&self) -> NewsStream;
}

/// Looks up the long-form detail text for an item.
///
/// Implementations do not cache; the store only fetches items whose detail
/// is still unknown.
#[async_trait]
pub trait DetailFetcher: Send + Sync {
    async fn fetch_detail(&self, id: ItemId) -> Result<String, FetchError>;
}
