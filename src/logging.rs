//! Logging
//!
//! `tracing` subscriber setup. Logs always go to stderr so that plan output on
//! stdout (including `--json`) stays machine-readable.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::{CoachError, Result};

/// Environment variable holding a full filter directive, e.g. `gym_coach_rs=debug`.
pub const ENV_LOG: &str = "GYM_COACH_LOG";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// json or text
    #[serde(default = "default_format")]
    pub format: String,

    /// Colored output (text format only).
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            color: default_true(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

fn parse_format(format: &str) -> Result<LogFormat> {
    match format {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(CoachError::Config(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            other
        ))),
    }
}

/// Level implied by `-v` flags; `None` keeps the configured level.
fn verbosity_level(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Pick the filter: `GYM_COACH_LOG`, then `RUST_LOG`, then `-v`, then the config level.
fn build_env_filter(config: &LoggingConfig, verbosity: u8) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_env(ENV_LOG) {
        return Ok(filter);
    }
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = verbosity_level(verbosity).unwrap_or(config.level.as_str());
    EnvFilter::try_new(level)
        .map_err(|e| CoachError::Config(format!("Invalid log level '{}': {}", level, e)))
}

/// Install the global subscriber. Call once, before any other work.
pub fn init_logging(config: &LoggingConfig, verbosity: u8) -> Result<()> {
    let filter = build_env_filter(config, verbosity)?;
    let format = parse_format(&config.format)?;
    let subscriber = Registry::default().with(filter);

    let installed = match format {
        LogFormat::Json => subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    installed.map_err(|e| CoachError::Config(format!("Failed to initialize logging: {}", e)))
}
