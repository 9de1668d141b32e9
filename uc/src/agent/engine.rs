//! Orchestrator - runs one conversation turn to completion

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::conversation::ConversationState;
use crate::llm::{CompletionRequest, LlmClient, Message, StopReason, ToolDefinition};
use crate::tools::{ToolContext, ToolExecutor};

use super::{AgentError, GIVE_UP_MESSAGE, LoopState, TurnOutcome, TurnStatus};

const DEFAULT_MAX_ITERATIONS: u32 = 10;
const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Drives the model/tool state machine for a session
pub struct Orchestrator {
    /// Model boundary
    llm: Arc<dyn LlmClient>,

    /// Tool dispatch table
    executor: Arc<ToolExecutor>,

    /// Declarations sent with every model request
    tool_defs: Vec<ToolDefinition>,

    /// Context handed to every tool call
    ctx: ToolContext,

    /// Cap on model invocations per turn
    max_iterations: u32,

    /// Max tokens per model response
    max_tokens: u32,
}

impl Orchestrator {
    pub fn new(llm: Arc<dyn LlmClient>, executor: Arc<ToolExecutor>, ctx: ToolContext) -> Self {
        debug!(model = llm.model_id(), session_id = %ctx.session_id, "Orchestrator::new: called");
        let tool_defs = executor.definitions();
        Self {
            llm,
            executor,
            tool_defs,
            ctx,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Set the cap on model invocations per turn (minimum 1)
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn session_id(&self) -> &str {
        &self.ctx.session_id
    }

    pub fn model_id(&self) -> &str {
        self.llm.model_id()
    }

    /// Append a human message and run the turn
    ///
    /// If the turn fails, the conversation is rolled back to where it was
    /// before the message was added.
    pub async fn respond(
        &self,
        conversation: &mut ConversationState,
        text: &str,
    ) -> Result<TurnOutcome, AgentError> {
        let mark = conversation.len();
        conversation.push_human(text)?;

        match self.run_turn(conversation).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                warn!(session_id = %self.ctx.session_id, error = %e, "Turn failed, discarding partial turn");
                conversation.truncate(mark);
                Err(e)
            }
        }
    }

    /// Run the loop until the model answers without requesting tools
    ///
    /// Expects the new human message to be the latest message already.
    pub async fn run_turn(&self, conversation: &mut ConversationState) -> Result<TurnOutcome, AgentError> {
        let start = conversation.len();
        info!(
            session_id = %self.ctx.session_id,
            history_len = start,
            max_iterations = self.max_iterations,
            "Turn started"
        );

        let mut outcome = TurnOutcome::new();
        let mut state = if conversation.pending_tool_calls().is_empty() {
            LoopState::AwaitModel
        } else {
            LoopState::AwaitTools
        };

        while state != LoopState::Done {
            debug!(%state, model_calls = outcome.model_calls, "Orchestrator::run_turn: step");
            state = match state {
                LoopState::AwaitModel if outcome.model_calls >= self.max_iterations => {
                    warn!(
                        session_id = %self.ctx.session_id,
                        max_iterations = self.max_iterations,
                        "Model invocation cap reached, giving up on turn"
                    );
                    conversation.append(Message::assistant(GIVE_UP_MESSAGE))?;
                    outcome.status = TurnStatus::IterationLimit;
                    LoopState::Done
                }
                LoopState::AwaitModel => self.await_model(conversation, &mut outcome).await?,
                LoopState::AwaitTools => self.await_tools(conversation, &mut outcome).await?,
                LoopState::Done => LoopState::Done,
            };
        }

        outcome.replies = conversation
            .assistant_replies_since(start)
            .into_iter()
            .map(str::to_string)
            .collect();

        info!(
            session_id = %self.ctx.session_id,
            status = ?outcome.status,
            model_calls = outcome.model_calls,
            tool_batches = outcome.tool_batches,
            tool_calls = outcome.tool_calls,
            total_tokens = outcome.usage.total(),
            "Turn finished"
        );
        Ok(outcome)
    }

    async fn await_model(
        &self,
        conversation: &mut ConversationState,
        outcome: &mut TurnOutcome,
    ) -> Result<LoopState, AgentError> {
        let request = CompletionRequest {
            messages: conversation.messages().to_vec(),
            tools: self.tool_defs.clone(),
            max_tokens: self.max_tokens,
        };

        let response = self.llm.complete(request).await?;
        outcome.model_calls += 1;
        outcome.usage.add(response.usage);

        if response.stop_reason == StopReason::MaxTokens {
            warn!(session_id = %self.ctx.session_id, "Model response truncated at max tokens");
        }

        let next = if response.tool_calls.is_empty() {
            LoopState::Done
        } else {
            LoopState::AwaitTools
        };
        conversation.append(response.into_message())?;
        Ok(next)
    }

    async fn await_tools(
        &self,
        conversation: &mut ConversationState,
        outcome: &mut TurnOutcome,
    ) -> Result<LoopState, AgentError> {
        let pending = conversation.pending_tool_calls();
        debug!(count = pending.len(), "Orchestrator::await_tools: executing batch");

        for answer in self.executor.answer_all(&pending, &self.ctx).await {
            conversation.append(answer)?;
        }

        outcome.tool_batches += 1;
        outcome.tool_calls += pending.len() as u32;
        Ok(LoopState::AwaitModel)
    }
}
