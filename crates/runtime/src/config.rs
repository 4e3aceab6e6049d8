//! Runtime configuration structures and loaders.
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use feed_core::FeedProfile;

use crate::api::{Result, RuntimeError};

/// Configuration shared across the orchestrator, workers and simulators.
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub source: SourceConfig,
    pub fetcher: FetcherConfig,
    pub reconnect: ReconnectConfig,
    /// Keep at most this many items, evicting the oldest. `None` keeps all.
    pub max_items: Option<usize>,
    pub command_buffer_size: usize,
    pub event_buffer_size: usize,
    /// RON file overriding the built-in [`FeedProfile`].
    pub profile_path: Option<PathBuf>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            fetcher: FetcherConfig::default(),
            reconnect: ReconnectConfig::default(),
            max_items: None,
            command_buffer_size: 32,
            event_buffer_size: 100,
            profile_path: None,
        }
    }
}

/// Timing of the synthetic news source.
#[derive(Clone, Debug)]
pub struct SourceConfig {
    pub emit_interval: Duration,
    /// Extra random delay in `[0, emit_jitter]` added to every interval.
    pub emit_jitter: Duration,
    /// Seed for reproducible categories and titles.
    pub seed: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            emit_interval: Duration::from_millis(2500),
            emit_jitter: Duration::ZERO,
            seed: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FetcherConfig {
    pub latency: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(1000),
        }
    }
}

/// Backoff between resubscriptions after a news stream ends.
#[derive(Clone, Debug)]
pub struct ReconnectConfig {
    pub initial_delay: Duration,
    pub max_delay: Duration,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl ReconnectConfig {
    /// Delay before resubscription number `attempt` (1-based): doubles each
    /// time, capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.initial_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `NEWSFEED_EMIT_INTERVAL_MS` - Delay between generated items (default: 2500)
    /// - `NEWSFEED_EMIT_JITTER_MS` - Random extra delay per item (default: 0)
    /// - `NEWSFEED_DETAIL_LATENCY_MS` - Simulated detail lookup latency (default: 1000)
    /// - `NEWSFEED_MAX_ITEMS` - History cap (default: unbounded)
    /// - `NEWSFEED_SEED` - RNG seed for the synthetic source (default: random)
    /// - `NEWSFEED_COMMAND_BUFFER` - Store command queue size (default: 32)
    /// - `NEWSFEED_EVENT_BUFFER` - Event bus capacity per topic (default: 100)
    /// - `NEWSFEED_RECONNECT_INITIAL_MS` - First resubscribe delay (default: 500)
    /// - `NEWSFEED_RECONNECT_MAX_MS` - Resubscribe delay cap (default: 30000)
    /// - `NEWSFEED_PROFILE` - Path to a RON feed profile (default: built-in)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Self::from_env`] with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let read_ms = |key: &str| read_var::<u64>(&lookup, key).map(Duration::from_millis);

        if let Some(interval) = read_ms("NEWSFEED_EMIT_INTERVAL_MS") {
            config.source.emit_interval = interval;
        }
        if let Some(jitter) = read_ms("NEWSFEED_EMIT_JITTER_MS") {
            config.source.emit_jitter = jitter;
        }
        config.source.seed = read_var(&lookup, "NEWSFEED_SEED");

        if let Some(latency) = read_ms("NEWSFEED_DETAIL_LATENCY_MS") {
            config.fetcher.latency = latency;
        }

        config.max_items = read_var::<usize>(&lookup, "NEWSFEED_MAX_ITEMS").map(|cap| cap.max(1));

        if let Some(capacity) = read_var::<usize>(&lookup, "NEWSFEED_COMMAND_BUFFER") {
            config.command_buffer_size = capacity.max(1);
        }
        if let Some(capacity) = read_var::<usize>(&lookup, "NEWSFEED_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Some(initial) = read_ms("NEWSFEED_RECONNECT_INITIAL_MS") {
            config.reconnect.initial_delay = initial;
        }
        if let Some(max) = read_ms("NEWSFEED_RECONNECT_MAX_MS") {
            config.reconnect.max_delay = max;
        }

        config.profile_path = lookup("NEWSFEED_PROFILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        config
    }

    /// Load the configured profile, or the built-in one when no path is set.
    pub fn load_profile(&self) -> Result<FeedProfile> {
        match &self.profile_path {
            Some(path) => load_profile(path),
            None => Ok(FeedProfile::default()),
        }
    }
}

/// Read and validate a RON feed profile. Missing fields take the built-in
/// defaults.
pub fn load_profile(path: &Path) -> Result<FeedProfile> {
    let text = std::fs::read_to_string(path).map_err(|source| RuntimeError::ProfileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let profile: FeedProfile =
        ron::from_str(&text).map_err(|source| RuntimeError::ProfileParse {
            path: path.to_path_buf(),
            source,
        })?;

    profile.validate()?;
    Ok(profile)
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use feed_core::{ColorToken, TimeFormat};

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> RuntimeConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RuntimeConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.source.emit_interval, Duration::from_millis(2500));
        assert_eq!(config.fetcher.latency, Duration::from_millis(1000));
        assert_eq!(config.max_items, None);
        assert_eq!(config.source.seed, None);
        assert!(config.profile_path.is_none());
    }

    #[test]
    fn environment_overrides_are_applied() {
        let config = config_from(&[
            ("NEWSFEED_EMIT_INTERVAL_MS", "2000"),
            ("NEWSFEED_EMIT_JITTER_MS", "500"),
            ("NEWSFEED_DETAIL_LATENCY_MS", " 250 "),
            ("NEWSFEED_MAX_ITEMS", "0"),
            ("NEWSFEED_SEED", "42"),
            ("NEWSFEED_COMMAND_BUFFER", "0"),
            ("NEWSFEED_PROFILE", "/tmp/feed.ron"),
        ]);

        assert_eq!(config.source.emit_interval, Duration::from_millis(2000));
        assert_eq!(config.source.emit_jitter, Duration::from_millis(500));
        assert_eq!(config.fetcher.latency, Duration::from_millis(250));
        assert_eq!(config.max_items, Some(1));
        assert_eq!(config.source.seed, Some(42));
        assert_eq!(config.command_buffer_size, 1);
        assert_eq!(config.profile_path, Some(PathBuf::from("/tmp/feed.ron")));
    }

    #[test]
    fn malformed_values_are_ignored() {
        let config = config_from(&[
            ("NEWSFEED_EMIT_INTERVAL_MS", "soon"),
            ("NEWSFEED_MAX_ITEMS", "-3"),
            ("NEWSFEED_PROFILE", "   "),
        ]);
        assert_eq!(config.source.emit_interval, Duration::from_millis(2500));
        assert_eq!(config.max_items, None);
        assert!(config.profile_path.is_none());
    }

    #[test]
    fn reconnect_backoff_doubles_up_to_cap() {
        let reconnect = ReconnectConfig {
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(3),
        };
        assert_eq!(reconnect.delay_for(1), Duration::from_millis(500));
        assert_eq!(reconnect.delay_for(2), Duration::from_millis(1000));
        assert_eq!(reconnect.delay_for(3), Duration::from_millis(2000));
        assert_eq!(reconnect.delay_for(4), Duration::from_secs(3));
        assert_eq!(reconnect.delay_for(u32::MAX), Duration::from_secs(3));
    }

    #[test]
    fn profile_loads_from_ron_with_defaults_for_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"(
                categories: [
                    (name: "Sains", color: Some(0xFF3F51B5)),
                    (name: "Cuaca"),
                ],
                title_templates: ["Kabar {{category}} Hari Ini"],
                time_format: hour_minute_second,
            )"#
        )
        .unwrap();

        let profile = load_profile(file.path()).unwrap();

        assert_eq!(profile.categories.len(), 2);
        assert_eq!(profile.color_for("Sains"), ColorToken::INDIGO);
        assert_eq!(profile.color_for("Cuaca"), profile.default_color);
        assert_eq!(profile.time_format, TimeFormat::HourMinuteSecond);
        assert_eq!(
            profile.detail_template,
            FeedProfile::default().detail_template
        );
    }

    #[test]
    fn invalid_profile_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(categories: [])").unwrap();

        let err = load_profile(file.path()).unwrap_err();
        assert!(matches!(err, RuntimeError::Profile(_)));
    }

    #[test]
    fn unreadable_and_malformed_profiles_report_path() {
        let missing = Path::new("/definitely/not/here.ron");
        assert!(matches!(
            load_profile(missing),
            Err(RuntimeError::ProfileRead { .. })
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(categories: [").unwrap();
        assert!(matches!(
            load_profile(file.path()),
            Err(RuntimeError::ProfileParse { .. })
        ));
    }

    #[test]
    fn default_config_loads_builtin_profile() {
        let profile = RuntimeConfig::default().load_profile().unwrap();
        assert_eq!(profile, FeedProfile::default());
    }
}
