//! Host configuration loaded from `headline.ron`.
//!
//! Every field is optional in the file; missing ones take the defaults below.
//! `HEADLINE_BASE_URL` overrides `base_url` after the file is read.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use app_logging::LogDestination;
use headline_core::CoreSettings;
use headline_engine::{ClientSettings, EngineConfig};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILENAME: &str = "headline.ron";
pub const BASE_URL_ENV: &str = "HEADLINE_BASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("agent_steps must name at least one step")]
    NoAgentSteps,
    #[error("max_notifications must be at least 1")]
    NoNotificationRoom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogOutput {
    File,
    Terminal,
    Both,
}

impl From<LogOutput> for LogDestination {
    fn from(output: LogOutput) -> Self {
        match output {
            LogOutput::File => LogDestination::File,
            LogOutput::Terminal => LogDestination::Terminal,
            LogOutput::Both => LogDestination::Both,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub base_url: String,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    /// Successful generations are not shown before this much time has passed.
    pub settle_delay_ms: u64,
    pub tick_interval_ms: u64,
    pub notification_ttl_ms: u64,
    pub max_notifications: usize,
    pub initial_status_delay_ms: u64,
    pub copy_feedback_ms: u64,
    pub agent_steps: Vec<String>,
    pub example_topics: Vec<String>,
    pub spreadsheet_id: String,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
    pub log_destination: LogOutput,
}

impl Default for AppConfig {
    fn default() -> Self {
        let client = ClientSettings::default();
        let core = CoreSettings::default();
        Self {
            base_url: client.base_url,
            connect_timeout_ms: duration_ms(client.connect_timeout),
            request_timeout_ms: duration_ms(client.request_timeout),
            settle_delay_ms: duration_ms(EngineConfig::default().settle_delay),
            tick_interval_ms: duration_ms(core.tick_interval),
            notification_ttl_ms: duration_ms(core.notification_ttl),
            max_notifications: core.max_notifications,
            initial_status_delay_ms: duration_ms(core.initial_status_delay),
            copy_feedback_ms: duration_ms(core.copy_feedback),
            agent_steps: core.agent_steps,
            example_topics: core.example_topics,
            spreadsheet_id: core.spreadsheet_id,
            log_level: "info".to_string(),
            log_destination: LogOutput::File,
        }
    }
}

impl AppConfig {
    /// Loads `path`, then applies the `HEADLINE_BASE_URL` override.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_base_url(path, std::env::var(BASE_URL_ENV).ok())
    }

    pub(crate) fn load_with_base_url(
        path: &Path,
        base_url_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match fs::read_to_string(path) {
            Ok(text) => ron::from_str::<AppConfig>(&text).map_err(|err| ConfigError::Parse {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?,
            Err(err) if err.kind() == ErrorKind::NotFound => AppConfig::default(),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if let Some(url) = base_url_override
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
        {
            config.base_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.agent_steps.is_empty() {
            return Err(ConfigError::NoAgentSteps);
        }
        if self.max_notifications == 0 {
            return Err(ConfigError::NoNotificationRoom);
        }
        Ok(())
    }

    pub fn core_settings(&self) -> CoreSettings {
        CoreSettings {
            agent_steps: self.agent_steps.clone(),
            example_topics: self.example_topics.clone(),
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            notification_ttl: Duration::from_millis(self.notification_ttl_ms),
            max_notifications: self.max_notifications,
            initial_status_delay: Duration::from_millis(self.initial_status_delay_ms),
            copy_feedback: Duration::from_millis(self.copy_feedback_ms),
            spreadsheet_id: self.spreadsheet_id.clone(),
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            client: ClientSettings {
                base_url: self.base_url.clone(),
                connect_timeout: Duration::from_millis(self.connect_timeout_ms),
                request_timeout: Duration::from_millis(self.request_timeout_ms),
            },
            settle_delay: Duration::from_millis(self.settle_delay_ms),
        }
    }

    /// Unknown level names fall back to `info`.
    pub fn log_level(&self) -> LevelFilter {
        self.log_level.trim().parse().unwrap_or(LevelFilter::Info)
    }

    pub fn log_destination(&self) -> LogDestination {
        self.log_destination.into()
    }
}

/// First CLI argument if given, otherwise `./headline.ron`.
pub fn config_path(mut args: impl Iterator<Item = String>) -> PathBuf {
    args.next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config =
            AppConfig::load_with_base_url(&dir.path().join("absent.ron"), None).expect("load");

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.settle_delay_ms, 5000);
        assert_eq!(config.tick_interval_ms, 1500);
        assert_eq!(config.notification_ttl_ms, 5000);
        assert_eq!(config.max_notifications, 20);
        assert_eq!(config.agent_steps.len(), 5);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let file = write_config(
            r#"(
                base_url: "http://news.internal:8080",
                settle_delay_ms: 2500,
                agent_steps: ["Research", "Write"],
                log_destination: Both,
            )"#,
        );

        let config = AppConfig::load_with_base_url(file.path(), None).expect("load");

        assert_eq!(config.base_url, "http://news.internal:8080");
        assert_eq!(config.settle_delay_ms, 2500);
        assert_eq!(config.agent_steps, vec!["Research", "Write"]);
        assert_eq!(config.log_destination, LogOutput::Both);
        assert_eq!(config.tick_interval_ms, 1500);
    }

    #[test]
    fn env_override_wins_over_file() {
        let file = write_config(r#"(base_url: "http://from-file:1")"#);

        let config =
            AppConfig::load_with_base_url(file.path(), Some(" http://from-env:2 ".to_string()))
                .expect("load");

        assert_eq!(config.base_url, "http://from-env:2");
    }

    #[test]
    fn blank_env_override_is_ignored() {
        let file = write_config(r#"(base_url: "http://from-file:1")"#);

        let config =
            AppConfig::load_with_base_url(file.path(), Some("  ".to_string())).expect("load");

        assert_eq!(config.base_url, "http://from-file:1");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = write_config("(base_url: ");

        let err = AppConfig::load_with_base_url(file.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn unknown_field_is_an_error() {
        let file = write_config("(settle_delay: 10)");

        let err = AppConfig::load_with_base_url(file.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_agent_steps_are_rejected() {
        let file = write_config("(agent_steps: [])");

        let err = AppConfig::load_with_base_url(file.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::NoAgentSteps));
    }

    #[test]
    fn conversions_carry_durations() {
        let config = AppConfig {
            tick_interval_ms: 250,
            request_timeout_ms: 1000,
            settle_delay_ms: 40,
            ..AppConfig::default()
        };

        let core = config.core_settings();
        assert_eq!(core.tick_interval, Duration::from_millis(250));
        assert_eq!(core.agent_steps, config.agent_steps);

        let engine = config.engine_config();
        assert_eq!(engine.client.request_timeout, Duration::from_secs(1));
        assert_eq!(engine.settle_delay, Duration::from_millis(40));
    }

    #[test]
    fn log_level_parses_or_falls_back() {
        let mut config = AppConfig::default();
        assert_eq!(config.log_level(), LevelFilter::Info);

        config.log_level = "debug".to_string();
        assert_eq!(config.log_level(), LevelFilter::Debug);

        config.log_level = "chatty".to_string();
        assert_eq!(config.log_level(), LevelFilter::Info);
    }

    #[test]
    fn config_path_prefers_first_argument() {
        assert_eq!(
            config_path(vec!["custom.ron".to_string()].into_iter()),
            PathBuf::from("custom.ron")
        );
        assert_eq!(
            config_path(std::iter::empty()),
            PathBuf::from(CONFIG_FILENAME)
        );
    }
}
