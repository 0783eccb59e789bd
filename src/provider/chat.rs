use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CoachError, Result};
use crate::models::{PlanResult, UserProfile};
use crate::provider::prompt::{plan_messages, ChatMessage};
use crate::provider::response::parse_plan_content;
use crate::provider::{
    build_http_client, ensure_success, map_transport_error, HttpTimeouts, PlanProvider,
};

pub const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Generates plans by prompting an OpenAI-compatible chat-completion API.
pub struct ChatCompletionProvider {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
}

impl ChatCompletionProvider {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        temperature: f32,
        timeouts: HttpTimeouts,
    ) -> Result<Self> {
        Ok(Self {
            client: build_http_client(timeouts)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            temperature,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send the plan prompt and return the raw assistant message.
    async fn complete(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, model = %self.model, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = ensure_success(response).await?;

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            CoachError::ProviderResponseInvalid(format!("Failed to parse completion: {}", e))
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CoachError::ProviderResponseInvalid("No message content in completion".to_string())
            })
    }
}

#[async_trait]
impl PlanProvider for ChatCompletionProvider {
    async fn generate(&self, profile: &UserProfile) -> Result<PlanResult> {
        let content = self.complete(plan_messages(profile)).await?;
        let plan = parse_plan_content(&content)?;
        info!(model = %self.model, calories = plan.calories_per_day, "Generated plan");
        Ok(plan)
    }

    fn name(&self) -> &str {
        "chat-completion"
    }
}
