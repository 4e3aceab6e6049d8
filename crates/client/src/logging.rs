//! Tracing setup for the console binary.
//!
//! The console is used for rendering, so logs go to a daily-rolling file
//! unless stderr logging is requested.
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::ClientConfig;

const LOG_FILE_PREFIX: &str = "newsfeed.log";

/// Install the global subscriber.
///
/// The returned guard flushes the file writer when dropped; keep it alive
/// for the whole process.
pub fn setup_logging(config: &ClientConfig) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if config.log_to_stderr {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|err| anyhow::anyhow!(err))
            .context("failed to install tracing subscriber")?;
        return Ok(None);
    }

    let log_dir = log_directory(config)?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install tracing subscriber")?;

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(Some(guard))
}

/// Configured log directory, or `<data dir>/logs` for this platform.
pub fn log_directory(config: &ClientConfig) -> Result<PathBuf> {
    if let Some(dir) = &config.log_dir {
        return Ok(dir.clone());
    }

    let dirs = directories::ProjectDirs::from("", "", "newsfeed")
        .context("could not determine a home directory for logs")?;
    Ok(dirs.data_local_dir().join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_log_dir_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let config = ClientConfig {
            log_dir: Some(tmp.path().to_path_buf()),
            ..ClientConfig::default()
        };
        assert_eq!(log_directory(&config).unwrap(), tmp.path());
    }
}
