use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::{CoachError, Result};
use crate::models::{PlanResult, UserProfile};
use crate::provider::response::parse_plan_content;
use crate::provider::{
    build_http_client, ensure_success, map_transport_error, HttpTimeouts, PlanProvider,
};

/// Calls a deployed plan endpoint (see `gym_coach serve`) with the raw profile form.
pub struct RemotePlanProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RemotePlanProvider {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeouts: HttpTimeouts,
    ) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeouts)?,
            endpoint: endpoint.into(),
            api_key,
        })
    }
}

#[async_trait]
impl PlanProvider for RemotePlanProvider {
    async fn generate(&self, profile: &UserProfile) -> Result<PlanResult> {
        debug!(endpoint = %self.endpoint, "Requesting plan from remote endpoint");

        let mut request = self.client.post(&self.endpoint).json(&profile.to_form());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let body = ensure_success(response)
            .await?
            .text()
            .await
            .map_err(|e| CoachError::ProviderResponseInvalid(format!("Unreadable body: {}", e)))?;

        parse_plan_content(&body)
    }

    fn name(&self) -> &str {
        "remote"
    }
}
