//! High-level feed runtime orchestrator.
//!
//! The runtime owns background workers, wires up command/event channels, and
//! exposes a builder-based API for clients to drive the feed.

use std::sync::Arc;

use feed_core::{FeedProfile, FeedState};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::api::{DetailFetcher, FeedHandle, NewsSource, Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::events::EventBus;
use crate::sources::{SimulatedDetailFetcher, SyntheticNewsSource};
use crate::workers::{SourcePump, StoreWorker};

/// Running feed: store worker plus source pump.
///
/// [`FeedHandle`] provides a cloneable façade for clients. Background tasks
/// live until [`FeedRuntime::shutdown`] or until the runtime is dropped.
pub struct FeedRuntime {
    handle: FeedHandle,
    store_worker: Option<JoinHandle<()>>,
    source_pump: Option<JoinHandle<()>>,
}

impl FeedRuntime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Build a runtime with the built-in simulators.
    pub async fn start(config: RuntimeConfig) -> Result<Self> {
        Self::builder().config(config).build().await
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> FeedHandle {
        self.handle.clone()
    }

    /// Stop the source pump and the store worker, waiting for both.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(pump) = self.source_pump.take() {
            pump.abort();
            match pump.await {
                Ok(()) => {}
                Err(err) if err.is_cancelled() => {}
                Err(err) => return Err(RuntimeError::WorkerJoin(err)),
            }
        }

        if let Some(worker) = self.store_worker.take() {
            if self.handle.request_shutdown().await.is_err() {
                debug!("store worker already stopped");
            }
            worker.await.map_err(RuntimeError::WorkerJoin)?;
        }

        info!("feed runtime shut down");
        Ok(())
    }
}

impl Drop for FeedRuntime {
    fn drop(&mut self) {
        for task in [self.source_pump.take(), self.store_worker.take()]
            .into_iter()
            .flatten()
        {
            task.abort();
        }
    }
}

/// Builder for [`FeedRuntime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    profile: Option<FeedProfile>,
    source: Option<Arc<dyn NewsSource>>,
    fetcher: Option<Arc<dyn DetailFetcher>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            profile: None,
            source: None,
            fetcher: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this profile instead of the one named by the configuration.
    pub fn profile(mut self, profile: FeedProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Replace the synthetic news source.
    pub fn news_source(mut self, source: impl NewsSource + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Replace the simulated detail fetcher.
    pub fn detail_fetcher(mut self, fetcher: impl DetailFetcher + 'static) -> Self {
        self.fetcher = Some(Arc::new(fetcher));
        self
    }

    /// Build the runtime and start its workers.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn build(self) -> Result<FeedRuntime> {
        let profile = match self.profile {
            Some(profile) => profile,
            None => self.config.load_profile()?,
        };
        profile.validate()?;
        let profile = Arc::new(profile);

        let source: Arc<dyn NewsSource> = match self.source {
            Some(source) => source,
            None => Arc::new(SyntheticNewsSource::new(
                Arc::clone(&profile),
                self.config.source.clone(),
            )),
        };
        let fetcher: Arc<dyn DetailFetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(SimulatedDetailFetcher::new(
                Arc::clone(&profile),
                self.config.fetcher.latency,
            )),
        };

        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size.max(1));
        let (state_tx, state_rx) = watch::channel(FeedState::new());
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = FeedHandle::new(command_tx, state_rx, event_bus.clone(), Arc::clone(&profile));

        let store_worker = StoreWorker::new(
            state_tx,
            Arc::clone(&profile),
            fetcher,
            command_rx,
            event_bus.clone(),
            self.config.max_items,
        );
        let store_worker = tokio::spawn(store_worker.run());

        let source_pump = SourcePump::new(
            source,
            handle.command_sender(),
            event_bus,
            self.config.reconnect.clone(),
        );
        let source_pump = tokio::spawn(source_pump.run());

        info!(
            categories = profile.categories.len(),
            max_items = ?self.config.max_items,
            "feed runtime started"
        );

        Ok(FeedRuntime {
            handle,
            store_worker: Some(store_worker),
            source_pump: Some(source_pump),
        })
    }
}
