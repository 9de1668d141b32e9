//! Conversation state threaded through the orchestration loop
//!
//! Holds the ordered, append-only message history of one session and
//! enforces the tool-call/tool-result pairing rules.

mod state;

pub use state::{ConversationError, ConversationState};
