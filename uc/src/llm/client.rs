//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless LLM client - each call carries the full conversation
///
/// The orchestration loop owns the history and resends it on every
/// invocation, so implementations keep no per-conversation state.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request and wait for the full response
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;

    /// Model identifier, used in logs
    fn model_id(&self) -> &str;
}
