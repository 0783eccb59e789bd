//! Configuration
//!
//! Loaded from a TOML file (missing file means defaults), then overridden by
//! `GYM_COACH_*` environment variables. The provider API key itself is never
//! stored in the file; `provider.api_key_env` names the variable holding it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CoachError, Result};
use crate::logging::LoggingConfig;
use crate::provider::chat::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::provider::{ChatCompletionProvider, HttpTimeouts, PlanProvider, RemotePlanProvider};

pub const ENV_PROVIDER: &str = "GYM_COACH_PROVIDER";
pub const ENV_ENDPOINT: &str = "GYM_COACH_ENDPOINT";
pub const ENV_MODEL: &str = "GYM_COACH_MODEL";
pub const ENV_LOG_FORMAT: &str = "GYM_COACH_LOG_FORMAT";

/// Which remote path the session tries first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Prompt a chat-completion API directly.
    Chat,
    /// Call a deployed plan endpoint.
    Remote,
    /// Never call out; always use the local calculator.
    Offline,
}

impl ProviderKind {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "chat" => Ok(ProviderKind::Chat),
            "remote" => Ok(ProviderKind::Remote),
            "offline" => Ok(ProviderKind::Offline),
            other => Err(CoachError::Config(format!(
                "Unknown provider kind '{}' (expected chat, remote or offline)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_kind")]
    pub kind: ProviderKind,

    /// Chat API base URL, or the full plan endpoint URL for `remote`.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_kind() -> ProviderKind {
    ProviderKind::Chat
}

fn default_endpoint() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_api_key_env() -> String {
    "LOVABLE_API_KEY".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            api_key_env: default_api_key_env(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ProviderSettings {
    pub fn timeouts(&self) -> HttpTimeouts {
        HttpTimeouts {
            connect: Duration::from_secs(self.connect_timeout_secs),
            request: Duration::from_secs(self.request_timeout_secs),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,

    #[serde(default = "default_route")]
    pub route: String,
}

fn default_bind() -> String {
    "127.0.0.1:8787".to_string()
}

fn default_route() -> String {
    "/ai-fitness-coach".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            route: default_route(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoachConfig {
    #[serde(default)]
    pub provider: ProviderSettings,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub server: ServerSettings,
}

impl CoachConfig {
    /// `$XDG_CONFIG_HOME/gym_coach/config.toml` or the platform equivalent.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gym_coach").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load from `path` (or the default location) and apply process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `GYM_COACH_*` overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(kind) = lookup(ENV_PROVIDER) {
            self.provider.kind = ProviderKind::parse(&kind)?;
        }
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            self.provider.endpoint = endpoint;
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.provider.model = model;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            self.logging.format = format;
        }
        Ok(())
    }

    /// Build the configured provider.
    ///
    /// Returns `None` for offline mode, or when the chat API key is missing, in
    /// which case the session never attempts a remote call.
    pub fn build_provider<F>(&self, lookup: F) -> Result<Option<Arc<dyn PlanProvider>>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let settings = &self.provider;
        let api_key = lookup(&settings.api_key_env).filter(|k| !k.trim().is_empty());

        match settings.kind {
            ProviderKind::Offline => Ok(None),
            ProviderKind::Chat => {
                let Some(api_key) = api_key else {
                    warn!(
                        env = %settings.api_key_env,
                        "No API key set for the chat provider, running offline"
                    );
                    return Ok(None);
                };
                let provider: Arc<dyn PlanProvider> = Arc::new(ChatCompletionProvider::new(
                    &settings.endpoint,
                    &settings.model,
                    api_key,
                    settings.temperature,
                    settings.timeouts(),
                )?);
                Ok(Some(provider))
            }
            ProviderKind::Remote => {
                let provider: Arc<dyn PlanProvider> = Arc::new(RemotePlanProvider::new(
                    &settings.endpoint,
                    api_key,
                    settings.timeouts(),
                )?);
                Ok(Some(provider))
            }
        }
    }
}
