//! Synthetic news generator.
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use feed_core::{FeedProfile, ItemId, RawEvent};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::{NewsSource, NewsStream};
use crate::config::SourceConfig;

const STREAM_BUFFER: usize = 16;

/// Emits a random headline from the profile at a fixed cadence.
///
/// Ids come from a counter owned by this instance: they start at 1 and keep
/// increasing across every subscription made on the same source.
pub struct SyntheticNewsSource {
    profile: Arc<FeedProfile>,
    config: SourceConfig,
    counter: Arc<AtomicU64>,
    subscriptions: AtomicU64,
}

impl SyntheticNewsSource {
    pub fn new(profile: Arc<FeedProfile>, config: SourceConfig) -> Self {
        Self {
            profile,
            config,
            counter: Arc::new(AtomicU64::new(0)),
            subscriptions: AtomicU64::new(0),
        }
    }

    /// Number of ids handed out so far.
    pub fn emitted(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    fn rng_for(&self, subscription: u64) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(subscription)),
            None => StdRng::from_entropy(),
        }
    }
}

impl NewsSource for SyntheticNewsSource {
    fn subscribe(&self) -> NewsStream {
        let subscription = self.subscriptions.fetch_add(1, Ordering::Relaxed);
        let (tx, stream) = NewsStream::channel(STREAM_BUFFER);

        let generator = EventGenerator {
            profile: Arc::clone(&self.profile),
            counter: Arc::clone(&self.counter),
            rng: self.rng_for(subscription),
        };
        let interval = self.config.emit_interval;
        let jitter = self.config.emit_jitter;

        tokio::spawn(generator.run(tx, interval, jitter));
        debug!(subscription, "synthetic news subscription started");

        stream
    }
}

/// One generation timeline.
struct EventGenerator {
    profile: Arc<FeedProfile>,
    counter: Arc<AtomicU64>,
    rng: StdRng,
}

impl EventGenerator {
    async fn run(mut self, tx: mpsc::Sender<RawEvent>, interval: Duration, jitter: Duration) {
        loop {
            let delay = interval + self.jitter(jitter);
            tokio::time::sleep(delay).await;

            let now = chrono::Utc::now().timestamp_millis();
            let Some(event) = self.next_event(now) else {
                warn!("feed profile has no categories or templates; stopping generator");
                break;
            };

            if tx.send(event).await.is_err() {
                debug!("synthetic news stream dropped; generator stopping");
                break;
            }
        }
    }

    fn jitter(&mut self, max: Duration) -> Duration {
        let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(self.rng.gen_range(0..=max_ms))
    }

    fn next_event(&mut self, timestamp_millis: i64) -> Option<RawEvent> {
        let category = self.profile.categories.choose(&mut self.rng)?.name.clone();
        let template = self.profile.title_templates.choose(&mut self.rng)?.clone();

        let id = ItemId(self.counter.fetch_add(1, Ordering::Relaxed) + 1);
        let title = self.profile.render_title(&template, &category, id);

        Some(RawEvent::new(id, title, category, timestamp_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u64, counter: Arc<AtomicU64>) -> EventGenerator {
        EventGenerator {
            profile: Arc::new(FeedProfile::default()),
            counter,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[test]
    fn ids_are_monotonic_from_one() {
        let mut generator = generator(7, Arc::new(AtomicU64::new(0)));

        let ids: Vec<_> = (0..5)
            .map(|_| generator.next_event(0).unwrap().id.get())
            .collect();

        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn timelines_share_the_instance_counter() {
        let counter = Arc::new(AtomicU64::new(0));
        let mut first = generator(1, Arc::clone(&counter));
        let mut second = generator(2, Arc::clone(&counter));

        assert_eq!(first.next_event(0).unwrap().id, ItemId(1));
        assert_eq!(second.next_event(0).unwrap().id, ItemId(2));
        assert_eq!(first.next_event(0).unwrap().id, ItemId(3));
        assert_eq!(counter.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn events_follow_the_profile() {
        let profile = FeedProfile::default();
        let mut generator = generator(99, Arc::new(AtomicU64::new(0)));

        for _ in 0..50 {
            let event = generator.next_event(1234).unwrap();
            assert!(profile.is_known_category(&event.category));
            assert!(event.title.contains(&event.category));
            assert!(event.title.ends_with(&format!(" #{}", event.id.get())));
            assert_eq!(event.timestamp_millis, 1234);
        }
    }

    #[test]
    fn seeded_generators_repeat() {
        let mut a = generator(5, Arc::new(AtomicU64::new(0)));
        let mut b = generator(5, Arc::new(AtomicU64::new(0)));

        for _ in 0..10 {
            assert_eq!(a.next_event(0), b.next_event(0));
        }
    }

    #[test]
    fn empty_profile_yields_nothing() {
        let mut generator = EventGenerator {
            profile: Arc::new(FeedProfile {
                categories: Vec::new(),
                ..FeedProfile::default()
            }),
            counter: Arc::new(AtomicU64::new(0)),
            rng: StdRng::seed_from_u64(0),
        };
        assert!(generator.next_event(0).is_none());
        assert_eq!(generator.counter.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn jitter_stays_in_range() {
        let mut generator = generator(3, Arc::new(AtomicU64::new(0)));
        assert_eq!(generator.jitter(Duration::ZERO), Duration::ZERO);
        for _ in 0..20 {
            assert!(generator.jitter(Duration::from_millis(500)) <= Duration::from_millis(500));
        }
    }
}
