//! Loop states and turn outcomes

use std::fmt;

use crate::llm::TokenUsage;

/// State of the orchestration loop within one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Next step is a model invocation
    AwaitModel,
    /// The latest assistant message has unanswered tool calls
    AwaitTools,
    /// Terminal
    Done,
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoopState::AwaitModel => "await-model",
            LoopState::AwaitTools => "await-tools",
            LoopState::Done => "done",
        };
        f.write_str(s)
    }
}

/// How a turn ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStatus {
    /// The model answered without requesting tools
    Completed,
    /// The model invocation cap was reached and the give-up message appended
    IterationLimit,
}

/// Summary of one completed turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub status: TurnStatus,

    /// Model invocations made during the turn
    pub model_calls: u32,

    /// Tool batches executed during the turn
    pub tool_batches: u32,

    /// Tool calls executed across all batches
    pub tool_calls: u32,

    /// Token usage summed over all model invocations
    pub usage: TokenUsage,

    /// Non-empty assistant texts produced during the turn, in order
    pub replies: Vec<String>,
}

impl TurnOutcome {
    pub(crate) fn new() -> Self {
        Self {
            status: TurnStatus::Completed,
            model_calls: 0,
            tool_batches: 0,
            tool_calls: 0,
            usage: TokenUsage::default(),
            replies: Vec::new(),
        }
    }

    pub fn hit_iteration_limit(&self) -> bool {
        self.status == TurnStatus::IterationLimit
    }
}
