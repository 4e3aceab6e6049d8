use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use feed_core::{FeedProfile, ItemId};

use crate::api::{DetailFetcher, FetchError};

/// Detail lookup that waits a fixed latency, then renders the profile's
/// detail template. Every call pays the full latency.
pub struct SimulatedDetailFetcher {
    profile: Arc<FeedProfile>,
    latency: Duration,
}

impl SimulatedDetailFetcher {
    pub fn new(profile: Arc<FeedProfile>, latency: Duration) -> Self {
        Self { profile, latency }
    }
}

#[async_trait]
impl DetailFetcher for SimulatedDetailFetcher {
    async fn fetch_detail(&self, id: ItemId) -> Result<String, FetchError> {
        tokio::time::sleep(self.latency).await;
        Ok(self.profile.render_detail(id))
    }
}
