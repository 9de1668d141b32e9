//! ConversationState - append-only message history for one session

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use crate::llm::{Message, Role, ToolCall};

/// Violations of the message ordering rules
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversationError {
    #[error("System message is only allowed at the start of a conversation")]
    MisplacedSystemMessage,

    #[error("{count} tool call(s) still unanswered; cannot append a {role} message")]
    PendingToolCalls { count: usize, role: Role },

    #[error("Tool result for '{call_id}' does not answer a pending tool call")]
    UnexpectedToolResult { call_id: String },
}

/// Ordered message history for one session
///
/// Invariants:
/// - a system message may only be the first message
/// - every tool-result answers a still-pending call of the latest assistant message
/// - no other message is appended while calls are pending
#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
}

impl ConversationState {
    /// Start a conversation with the given system prompt
    pub fn new(system_prompt: impl Into<String>) -> Self {
        debug!("ConversationState::new: called");
        Self {
            messages: vec![Message::system(system_prompt)],
        }
    }

    /// Append a message, enforcing the ordering rules
    pub fn append(&mut self, message: Message) -> Result<(), ConversationError> {
        debug!(role = %message.role(), index = self.messages.len(), "ConversationState::append: called");
        match &message {
            Message::System { .. } if !self.messages.is_empty() => {
                return Err(ConversationError::MisplacedSystemMessage);
            }
            Message::ToolResult { call_id, .. } => {
                if !self.pending_tool_calls().iter().any(|c| &c.id == call_id) {
                    return Err(ConversationError::UnexpectedToolResult {
                        call_id: call_id.clone(),
                    });
                }
            }
            other => {
                let count = self.pending_tool_calls().len();
                if count > 0 {
                    return Err(ConversationError::PendingToolCalls {
                        count,
                        role: other.role(),
                    });
                }
            }
        }
        self.messages.push(message);
        Ok(())
    }

    /// Append a human message
    pub fn push_human(&mut self, text: impl Into<String>) -> Result<(), ConversationError> {
        self.append(Message::human(text))
    }

    /// Tool calls of the latest assistant message that have no result yet
    pub fn pending_tool_calls(&self) -> Vec<ToolCall> {
        let Some(idx) = self.messages.iter().rposition(|m| m.role() == Role::Assistant) else {
            return Vec::new();
        };

        let answered: HashSet<&str> = self.messages[idx + 1..].iter().filter_map(|m| m.call_id()).collect();

        self.messages[idx]
            .tool_calls()
            .iter()
            .filter(|c| !answered.contains(c.id.as_str()))
            .cloned()
            .collect()
    }

    /// All messages, system message first
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages appended at or after `start`
    pub fn since(&self, start: usize) -> &[Message] {
        self.messages.get(start..).unwrap_or(&[])
    }

    /// Non-empty assistant texts appended at or after `start`
    pub fn assistant_replies_since(&self, start: usize) -> Vec<&str> {
        self.since(start)
            .iter()
            .filter(|m| m.role() == Role::Assistant)
            .map(|m| m.text().trim())
            .filter(|t| !t.is_empty())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Discard messages from `len` onward, keeping at least the system message
    pub fn truncate(&mut self, len: usize) {
        debug!(from = self.messages.len(), to = len, "ConversationState::truncate: called");
        let floor = usize::from(matches!(self.messages.first(), Some(Message::System { .. })));
        self.messages.truncate(len.max(floor));
    }

    /// Drop everything except the leading system message
    pub fn reset(&mut self) {
        debug!(len = self.messages.len(), "ConversationState::reset: called");
        let keep = usize::from(matches!(self.messages.first(), Some(Message::System { .. })));
        self.messages.truncate(keep);
    }
}
