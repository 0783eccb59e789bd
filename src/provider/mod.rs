//! Remote plan providers.
//!
//! A provider turns a [`UserProfile`] into a [`PlanResult`] by calling a hosted
//! service. Every failure is reported as `ProviderUnavailable` (transport or
//! status) or `ProviderResponseInvalid` (body did not hold a valid plan) so the
//! session can fall back to the local calculator.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{CoachError, Result};
use crate::models::{PlanResult, UserProfile};

pub mod chat;
pub mod prompt;
pub mod remote;
pub mod response;

pub use chat::ChatCompletionProvider;
pub use remote::RemotePlanProvider;
pub use response::{parse_plan_content, strip_code_fences};

/// Source of remotely generated plans.
#[async_trait]
pub trait PlanProvider: Send + Sync {
    /// Generate a plan. Returned plans have already passed shape validation.
    async fn generate(&self, profile: &UserProfile) -> Result<PlanResult>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

/// HTTP timeouts for provider calls.
#[derive(Debug, Clone, Copy)]
pub struct HttpTimeouts {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            request: Duration::from_secs(60),
        }
    }
}

pub(crate) fn build_http_client(timeouts: HttpTimeouts) -> Result<Client> {
    Client::builder()
        .no_proxy()
        .connect_timeout(timeouts.connect)
        .timeout(timeouts.request)
        .build()
        .map_err(|e| CoachError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Transport-level failures (connect, timeout, TLS) all mean the provider is unavailable.
pub(crate) fn map_transport_error(error: reqwest::Error) -> CoachError {
    if error.is_timeout() {
        CoachError::ProviderUnavailable(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        CoachError::ProviderUnavailable(format!("Connection error: {}", error))
    } else {
        CoachError::ProviderUnavailable(format!("HTTP error: {}", error))
    }
}

/// Turn a non-success response into `ProviderUnavailable`, keeping the body for diagnostics.
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(CoachError::ProviderUnavailable(format!(
        "Request failed with status {}: {}",
        status, body
    )))
}
