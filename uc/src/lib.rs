//! unitchat - conversational unit converter
//!
//! A language model answers temperature, distance and currency questions by
//! calling deterministic conversion tools. The crate is layered:
//!
//! - [`tools`]: the conversion tools and the executor that dispatches model tool calls
//! - [`conversation`]: the ordered message history of one session
//! - [`agent`]: the orchestration loop alternating model calls and tool batches
//! - [`repl`]: the interactive session driver
//! - [`llm`] and [`rates`]: the model and exchange-rate boundaries

pub mod agent;
pub mod cli;
pub mod config;
pub mod conversation;
pub mod llm;
pub mod rates;
pub mod repl;
pub mod tools;

pub use agent::{AgentError, Orchestrator, TurnOutcome, TurnStatus};
pub use config::Config;
pub use conversation::ConversationState;
pub use llm::{LlmClient, LlmError};
pub use tools::{Tool, ToolExecutor, ToolResult};
