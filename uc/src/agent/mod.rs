//! Orchestration loop
//!
//! Alternates between asking the model for its next step and running the
//! tools it requests, until the model answers without requesting a tool.

mod engine;
mod error;
mod prompt;
mod state;

pub use engine::Orchestrator;
pub use error::AgentError;
pub use prompt::{GIVE_UP_MESSAGE, SYSTEM_PROMPT};
pub use state::{LoopState, TurnOutcome, TurnStatus};
