//! Client-side settings: where logs go and how much of the feed to print.
use std::env;
use std::path::PathBuf;

/// Console client configuration.
///
/// Runtime behaviour (timings, history cap, profile) lives in
/// [`feed_runtime::RuntimeConfig`]; this only covers the binary itself.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Directory for rolling log files. `None` uses the platform data dir.
    pub log_dir: Option<PathBuf>,
    /// Log to stderr instead of a file.
    pub log_to_stderr: bool,
    /// Maximum number of cards printed per render.
    pub render_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_to_stderr: false,
            render_limit: 10,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `NEWSFEED_LOG_DIR` - Log directory (default: platform data dir)
    /// - `NEWSFEED_LOG_STDERR` - Log to stderr instead of a file (default: false)
    /// - `NEWSFEED_RENDER_LIMIT` - Cards printed per render (default: 10)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.log_dir = lookup("NEWSFEED_LOG_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        if let Some(stderr) = lookup("NEWSFEED_LOG_STDERR").and_then(|v| parse_bool(&v)) {
            config.log_to_stderr = stderr;
        }

        if let Some(limit) = lookup("NEWSFEED_RENDER_LIMIT").and_then(|v| v.trim().parse().ok()) {
            config.render_limit = usize::max(limit, 1);
        }

        config
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let config = config_from(&[]);
        assert_eq!(config.log_dir, None);
        assert!(!config.log_to_stderr);
        assert_eq!(config.render_limit, 10);
    }

    #[test]
    fn reads_all_variables() {
        let config = config_from(&[
            ("NEWSFEED_LOG_DIR", "/var/log/newsfeed"),
            ("NEWSFEED_LOG_STDERR", "1"),
            ("NEWSFEED_RENDER_LIMIT", "25"),
        ]);
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/newsfeed")));
        assert!(config.log_to_stderr);
        assert_eq!(config.render_limit, 25);
    }

    #[test]
    fn ignores_malformed_values() {
        let config = config_from(&[
            ("NEWSFEED_LOG_DIR", "  "),
            ("NEWSFEED_LOG_STDERR", "maybe"),
            ("NEWSFEED_RENDER_LIMIT", "lots"),
        ]);
        assert_eq!(config.log_dir, None);
        assert!(!config.log_to_stderr);
        assert_eq!(config.render_limit, 10);
    }

    #[test]
    fn render_limit_is_at_least_one() {
        assert_eq!(config_from(&[("NEWSFEED_RENDER_LIMIT", "0")]).render_limit, 1);
    }
}
