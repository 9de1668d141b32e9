//! Orchestration errors

use thiserror::Error;

use crate::conversation::ConversationError;
use crate::llm::LlmError;

/// Failures that abort a turn
///
/// Tool failures never appear here; they go back to the model as results.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Model request failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Conversation out of order: {0}")]
    Conversation(#[from] ConversationError),
}

impl AgentError {
    /// Whether retrying the same turn later may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            AgentError::Llm(e) => e.is_retryable(),
            AgentError::Conversation(_) => false,
        }
    }
}
