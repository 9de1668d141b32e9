//! LLM client module for unitchat
//!
//! Provides the model-inference boundary used by the orchestration loop.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, error, info};

pub mod client;
mod error;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAIClient;
pub use types::{
    CompletionRequest, CompletionResponse, Message, Role, StopReason, TokenUsage, ToolCall, ToolDefinition,
};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// The returned client is wrapped in [`LoggingClient`].
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    let inner: Arc<dyn LlmClient> = match config.provider.as_str() {
        "openai" => Arc::new(OpenAIClient::from_config(config)?),
        other => return Err(LlmError::UnknownProvider(other.to_string())),
    };
    Ok(Arc::new(LoggingClient::new(inner)))
}

/// Logging wrapper for LLM clients
pub struct LoggingClient {
    inner: Arc<dyn LlmClient>,
    model_id: String,
}

impl LoggingClient {
    pub fn new(inner: Arc<dyn LlmClient>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmClient for LoggingClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let start = Instant::now();
        let message_count = request.messages.len();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    message_count,
                    tool_calls = response.tool_calls.len(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "LLM request completed"
                );
            }
            Err(e) => {
                error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e,
                    retryable = e.is_retryable(),
                    "LLM request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
