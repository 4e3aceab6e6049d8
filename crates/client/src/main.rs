//! News feed console client.
//!
//! ```bash
//! NEWSFEED_LOG_STDERR=1 RUST_LOG=debug cargo run -p newsfeed-client
//! ```
use anyhow::{Context, Result};
use feed_runtime::{FeedRuntime, RuntimeConfig};
use newsfeed_client::{ClientConfig, ConsoleFrontend, Frontend, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let client_config = ClientConfig::from_env();
    let runtime_config = RuntimeConfig::from_env();

    let _log_guard = logging::setup_logging(&client_config)?;

    tracing::info!(
        emit_interval = ?runtime_config.source.emit_interval,
        detail_latency = ?runtime_config.fetcher.latency,
        max_items = ?runtime_config.max_items,
        profile = ?runtime_config.profile_path,
        "starting news feed"
    );

    let runtime = FeedRuntime::start(runtime_config)
        .await
        .context("failed to start feed runtime")?;

    let mut frontend = ConsoleFrontend::stdio(&client_config);
    let result = frontend.run(runtime.handle()).await;

    runtime
        .shutdown()
        .await
        .context("failed to shut down feed runtime")?;

    tracing::info!("client shutdown complete");
    result
}
