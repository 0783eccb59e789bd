use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoachError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Plan provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Plan provider returned an invalid plan: {0}")]
    ProviderResponseInvalid(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl CoachError {
    /// True for failures the session recovers from by falling back to the local calculator.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            CoachError::ProviderUnavailable(_) | CoachError::ProviderResponseInvalid(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CoachError>;
