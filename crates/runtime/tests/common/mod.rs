//! Shared fixtures for feed runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use feed_core::{DisplayItem, FeedProfile, FeedState, ItemId, RawEvent};
use feed_runtime::{
    DetailFetcher, FeedHandle, FeedRuntime, FetchError, ManualNewsSource, RuntimeConfig,
};

const WAIT: Duration = Duration::from_secs(60);

/// 2026-01-01T13:05:09Z
pub const T0: i64 = 1_767_272_709_000;

pub fn raw(id: u64, title: &str, category: &str) -> RawEvent {
    RawEvent::new(ItemId(id), title, category, T0 + id as i64 * 2_500)
}

/// Built-in profile rendered in UTC so clock strings are stable.
pub fn utc_profile() -> FeedProfile {
    FeedProfile {
        utc_offset_minutes: Some(0),
        ..FeedProfile::default()
    }
}

/// Detail fetcher that counts calls and can fail the first one.
#[derive(Clone)]
pub struct CountingFetcher {
    pub calls: Arc<AtomicUsize>,
    latency: Duration,
    fail_first: bool,
}

impl CountingFetcher {
    pub fn new(latency: Duration) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            latency,
            fail_first: false,
        }
    }

    pub fn failing_first(latency: Duration) -> Self {
        Self {
            fail_first: true,
            ..Self::new(latency)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DetailFetcher for CountingFetcher {
    async fn fetch_detail(&self, id: ItemId) -> Result<String, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        if self.fail_first && call == 0 {
            return Err(FetchError::unavailable(id, "backend down"));
        }
        Ok(format!("detail for {id}"))
    }
}

/// Runtime fed by a manual source, ready to receive events.
pub async fn manual_runtime(
    config: RuntimeConfig,
    fetcher: CountingFetcher,
) -> (FeedRuntime, ManualNewsSource) {
    let source = ManualNewsSource::new();
    let runtime = FeedRuntime::builder()
        .config(config)
        .profile(utc_profile())
        .news_source(source.clone())
        .detail_fetcher(fetcher)
        .build()
        .await
        .expect("runtime should build");

    source.wait_for_subscriptions(1).await;
    (runtime, source)
}

/// Wait until the published state satisfies `pred` and return a copy of it.
pub async fn wait_until(
    handle: &FeedHandle,
    pred: impl FnMut(&FeedState) -> bool,
) -> FeedState {
    let mut rx = handle.watch_state();
    let state = tokio::time::timeout(WAIT, rx.wait_for(pred))
        .await
        .expect("timed out waiting for feed state")
        .expect("feed store stopped");
    state.clone()
}

pub fn ids<'a>(items: impl IntoIterator<Item = &'a DisplayItem>) -> Vec<u64> {
    items.into_iter().map(|item| item.id.get()).collect()
}
