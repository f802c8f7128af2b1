//! Repository name generation over a chat-completion provider.

use crate::config::UpstreamConfig;
use crate::models::{GenerationRequest, GenerationResult};
use crate::services::metrics;
use crate::services::prompt::{self, SYSTEM_PROMPT};
use crate::services::providers::deepseek::DeepSeekProvider;
use crate::services::providers::{ChatMessage, CompletionParams, CompletionProvider, ProviderError};
use service_core::error::AppError;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

pub const TEMPERATURE: f32 = 1.2;
pub const MAX_TOKENS: u32 = 300;

pub const AUTH_FAILED: &str = "API authentication failed";
pub const AUTH_FAILED_DETAILS: &str =
    "Invalid or missing API key. Please check your DeepSeek API key configuration.";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Request timed out")]
    Timeout,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Failed to parse AI response: {0}")]
    MalformedContent(String),
}

impl From<GenerateError> for AppError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::Timeout => AppError::RequestTimeout,
            GenerateError::Provider(ProviderError::Unauthorized) => AppError::Unauthorized {
                message: AUTH_FAILED.to_string(),
                details: Some(AUTH_FAILED_DETAILS.to_string()),
            },
            other => AppError::InternalError(anyhow::Error::new(other)),
        }
    }
}

/// Builds the prompts, makes one bounded upstream call and parses the reply.
///
/// Cheap to clone; every request shares the same provider.
#[derive(Clone)]
pub struct NameGenerator {
    provider: Arc<dyn CompletionProvider>,
    timeout: Duration,
}

impl NameGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, ProviderError> {
        let provider = DeepSeekProvider::new(config)?;
        Ok(Self::new(Arc::new(provider), config.timeout()))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Generate a name for an already validated request.
    ///
    /// If the deadline passes first the provider future is dropped, which
    /// aborts the in-flight HTTP exchange.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerateError> {
        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(prompt::user_prompt(request)),
        ];
        let params = CompletionParams {
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_TOKENS),
            json_output: true,
        };

        let started = Instant::now();
        let outcome =
            tokio::time::timeout(self.timeout, self.provider.complete(&messages, &params)).await;

        let content = match outcome {
            Err(_) => {
                metrics::observe_upstream("timeout", started.elapsed());
                tracing::error!(
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Upstream request timed out"
                );
                return Err(GenerateError::Timeout);
            }
            Ok(Err(e)) => {
                metrics::observe_upstream(e.outcome(), started.elapsed());
                return Err(e.into());
            }
            Ok(Ok(content)) => content,
        };

        let parsed = parse_content(content);
        metrics::observe_upstream(outcome_label(&parsed), started.elapsed());
        parsed
    }
}

fn outcome_label(parsed: &Result<GenerationResult, GenerateError>) -> &'static str {
    match parsed {
        Ok(_) => "success",
        Err(_) => "invalid_response",
    }
}

/// The model's reply must itself be a JSON object with string `name` and
/// `description` fields.
fn parse_content(content: String) -> Result<GenerationResult, GenerateError> {
    match serde_json::from_str::<GenerationResult>(&content) {
        Ok(result) => Ok(result),
        Err(e) => {
            tracing::error!(error = %e, content = %content, "Failed to parse AI response");
            Err(GenerateError::MalformedContent(content))
        }
    }
}
