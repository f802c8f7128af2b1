//! DeepSeek chat-completion provider.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint; the URL,
//! model and key come from [`UpstreamConfig`].

use super::{ChatMessage, CompletionParams, CompletionProvider, ProviderError};
use crate::config::UpstreamConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// DeepSeek provider.
pub struct DeepSeekProvider {
    api_url: String,
    model: String,
    api_key: Secret<String>,
    client: Client,
}

impl DeepSeekProvider {
    /// No client-level timeout is set; callers bound the whole exchange.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ProviderError> {
        if config.api_key.expose_secret().is_empty() {
            return Err(ProviderError::NotConfigured(
                "DeepSeek API key not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self {
            api_url: config.api_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            client,
        })
    }
}

#[async_trait]
impl CompletionProvider for DeepSeekProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> Result<String, ProviderError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            response_format: params.json_output.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        tracing::info!(
            model = %self.model,
            message_count = messages.len(),
            "Sending request to DeepSeek API"
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            tracing::error!(status = %status, body = %body, "DeepSeek API response not OK");

            if status == StatusCode::UNAUTHORIZED {
                return Err(ProviderError::Unauthorized);
            }

            return Err(ProviderError::ApiError { status, body });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;

        tracing::debug!(
            id = completion.id.as_deref().unwrap_or("-"),
            choices = completion.choices.len(),
            "DeepSeek API response received"
        );

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ProviderError::InvalidResponse("response contained no message content".to_string())
            })
    }
}

// ============================================================================
// Chat Completion Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}
