//! LLM request/response types for unitchat
//!
//! Messages are modelled after the four roles a tool-calling conversation
//! needs (system, human, assistant, tool-result). Provider clients translate
//! them into their own wire formats.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A completion request - everything needed for one model invocation
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Full ordered history, system message first
    pub messages: Vec<Message>,

    /// Tools the model may call
    pub tools: Vec<ToolDefinition>,

    /// Max tokens for the response
    pub max_tokens: u32,
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    System,
    Human,
    Assistant,
    ToolResult,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::System => "system",
            Role::Human => "human",
            Role::Assistant => "assistant",
            Role::ToolResult => "tool-result",
        };
        f.write_str(s)
    }
}

/// A single message in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "kebab-case")]
pub enum Message {
    System {
        content: String,
    },

    Human {
        content: String,
    },

    /// Model output. `content` may be empty when the model only requests tools.
    Assistant {
        content: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },

    /// Answer to exactly one tool call of the preceding assistant message
    ToolResult {
        call_id: String,
        content: String,
        #[serde(default)]
        is_error: bool,
    },
}

impl Message {
    /// Create a system message
    pub fn system(text: impl Into<String>) -> Self {
        debug!("Message::system: called");
        Message::System { content: text.into() }
    }

    /// Create a human message
    pub fn human(text: impl Into<String>) -> Self {
        debug!("Message::human: called");
        Message::Human { content: text.into() }
    }

    /// Create an assistant message with text only
    pub fn assistant(text: impl Into<String>) -> Self {
        debug!("Message::assistant: called");
        Message::Assistant {
            content: text.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Create an assistant message that requests tools
    pub fn assistant_with_tools(text: impl Into<String>, tool_calls: Vec<ToolCall>) -> Self {
        debug!(tool_call_count = %tool_calls.len(), "Message::assistant_with_tools: called");
        Message::Assistant {
            content: text.into(),
            tool_calls,
        }
    }

    /// Create a tool-result message
    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>, is_error: bool) -> Self {
        debug!(%is_error, "Message::tool_result: called");
        Message::ToolResult {
            call_id: call_id.into(),
            content: content.into(),
            is_error,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Message::System { .. } => Role::System,
            Message::Human { .. } => Role::Human,
            Message::Assistant { .. } => Role::Assistant,
            Message::ToolResult { .. } => Role::ToolResult,
        }
    }

    /// Text content of the message (possibly empty)
    pub fn text(&self) -> &str {
        match self {
            Message::System { content }
            | Message::Human { content }
            | Message::Assistant { content, .. }
            | Message::ToolResult { content, .. } => content.as_str(),
        }
    }

    /// Tool calls carried by an assistant message; empty for other roles
    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Message::Assistant { tool_calls, .. } => tool_calls,
            _ => &[],
        }
    }

    /// Call id answered by a tool-result message
    pub fn call_id(&self) -> Option<&str> {
        match self {
            Message::ToolResult { call_id, .. } => Some(call_id.as_str()),
            _ => None,
        }
    }
}

/// A tool call requested by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique within the originating assistant message
    pub id: String,
    pub name: String,
    pub arguments: serde_json::Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// Response from a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Text content (if any)
    pub content: Option<String>,

    /// Tool calls requested by the model
    pub tool_calls: Vec<ToolCall>,

    /// Why the model stopped
    pub stop_reason: StopReason,

    /// Token usage reported by the provider
    pub usage: TokenUsage,
}

impl CompletionResponse {
    /// Plain text answer with no tool calls
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            tool_calls: Vec::new(),
            stop_reason: StopReason::EndTurn,
            usage: TokenUsage::default(),
        }
    }

    /// Answer requesting the given tool calls
    pub fn tool_use(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            content: None,
            tool_calls,
            stop_reason: StopReason::ToolUse,
            usage: TokenUsage::default(),
        }
    }

    /// Convert into the assistant message appended to the conversation
    pub fn into_message(self) -> Message {
        debug!(tool_call_count = %self.tool_calls.len(), "CompletionResponse::into_message: called");
        Message::Assistant {
            content: self.content.unwrap_or_default(),
            tool_calls: self.tool_calls,
        }
    }
}

/// Why the model stopped generating
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    EndTurn,
    ToolUse,
    MaxTokens,
    ContentFilter,
}

impl StopReason {
    /// Parse from an OpenAI `finish_reason` string
    pub fn from_openai(s: &str) -> Self {
        match s {
            "stop" => StopReason::EndTurn,
            "tool_calls" | "function_call" => StopReason::ToolUse,
            "length" => StopReason::MaxTokens,
            "content_filter" => StopReason::ContentFilter,
            other => {
                debug!(%other, "StopReason::from_openai: unknown, defaulting to EndTurn");
                StopReason::EndTurn
            }
        }
    }
}

/// Token usage for one or more calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn add(&mut self, other: TokenUsage) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }

    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// Tool definition for the LLM
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

impl ToolDefinition {
    /// Create a new tool definition
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: serde_json::Value) -> Self {
        let name = name.into();
        let description = description.into();
        debug!(%name, "ToolDefinition::new: called");
        Self {
            name,
            description,
            input_schema,
        }
    }

    /// Convert to OpenAI function-tool format
    pub fn to_openai_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.input_schema,
            }
        })
    }
}
