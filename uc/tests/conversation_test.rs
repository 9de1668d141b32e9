//! Integration tests for unitchat
//!
//! These tests drive whole turns through the public API with a scripted model
//! and fixed exchange rates.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use unitchat::agent::{GIVE_UP_MESSAGE, Orchestrator, SYSTEM_PROMPT, TurnStatus};
use unitchat::conversation::ConversationState;
use unitchat::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, Message, Role, ToolCall};
use unitchat::rates::StaticRates;
use unitchat::repl::{LineOutcome, ReplSession};
use unitchat::tools::{ToolContext, ToolExecutor};

/// Model stand-in that replays a script and records what it was sent
struct ScriptedModel {
    script: Mutex<VecDeque<CompletionResponse>>,
    seen: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    fn new(script: Vec<CompletionResponse>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<CompletionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedModel {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.seen.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::InvalidResponse("script exhausted".to_string()))
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}

fn orchestrator(model: Arc<ScriptedModel>) -> Orchestrator {
    let rates = StaticRates::new()
        .with_base("USD", &[("EUR", 0.92), ("JPY", 151.5)])
        .with_base("EUR", &[("USD", 1.087)]);
    let ctx = ToolContext::new("integration", Arc::new(rates));
    Orchestrator::new(model, Arc::new(ToolExecutor::standard()), ctx)
}

fn roles(conversation: &ConversationState) -> Vec<Role> {
    conversation.messages().iter().map(Message::role).collect()
}

fn tool_result_text(message: &Message) -> (&str, bool) {
    match message {
        Message::ToolResult { content, is_error, .. } => (content.as_str(), *is_error),
        other => panic!("expected tool result, got {:?}", other),
    }
}

// =============================================================================
// Orchestration loop
// =============================================================================

#[tokio::test]
async fn test_tool_then_answer_terminates_in_two_calls() {
    let model = ScriptedModel::new(vec![
        CompletionResponse::tool_use(vec![ToolCall::new(
            "call_1",
            "convert_temperature",
            json!({"value": 100, "from_unit": "c", "to_unit": "k"}),
        )]),
        CompletionResponse::text("100 °C is 373.15 K."),
    ]);
    let agent = orchestrator(model.clone());
    let mut conversation = ConversationState::new(SYSTEM_PROMPT);

    let outcome = agent.respond(&mut conversation, "100 c in kelvin").await.unwrap();

    assert_eq!(outcome.status, TurnStatus::Completed);
    assert_eq!(outcome.model_calls, 2);
    assert_eq!(outcome.tool_batches, 1);
    assert_eq!(
        roles(&conversation),
        vec![Role::System, Role::Human, Role::Assistant, Role::ToolResult, Role::Assistant]
    );
    assert_eq!(tool_result_text(&conversation.messages()[3]), ("373.15", false));
    assert_eq!(model.seen().len(), 2);
}

#[tokio::test]
async fn test_out_of_scope_single_invocation() {
    let model = ScriptedModel::new(vec![CompletionResponse::text(
        "That's not within my scope; I only handle unit conversions.",
    )]);
    let agent = orchestrator(model.clone());
    let mut conversation = ConversationState::new(SYSTEM_PROMPT);

    let outcome = agent.respond(&mut conversation, "tell me a joke").await.unwrap();

    assert_eq!(outcome.model_calls, 1);
    assert_eq!(outcome.tool_calls, 0);
    assert_eq!(roles(&conversation), vec![Role::System, Role::Human, Role::Assistant]);
}

#[tokio::test]
async fn test_tool_errors_go_back_to_model() {
    let model = ScriptedModel::new(vec![
        CompletionResponse::tool_use(vec![
            ToolCall::new("a", "convert_distance", json!({"value": 1, "from_unit": "lightyear", "to_unit": "m"})),
            ToolCall::new("b", "convert_currency", json!({"value": 1, "from_code": "usd", "to_code": "zzz"})),
            ToolCall::new("c", "convert_temperature", json!({"value": 1, "from_unit": "c", "to_unit": "rankine"})),
        ]),
        CompletionResponse::text("None of those are supported."),
    ]);
    let agent = orchestrator(model.clone());
    let mut conversation = ConversationState::new(SYSTEM_PROMPT);

    let outcome = agent.respond(&mut conversation, "weird units").await.unwrap();
    assert_eq!(outcome.status, TurnStatus::Completed);

    let messages = conversation.messages();
    assert_eq!(
        tool_result_text(&messages[3]),
        ("Sorry, conversion from lightyear to m is not supported yet.", true)
    );
    assert_eq!(tool_result_text(&messages[4]), ("Sorry, currency code 'ZZZ' not supported.", true));
    assert!(tool_result_text(&messages[5]).0.contains("rankine"));

    // The second request carried all three results
    assert_eq!(model.seen()[1].messages.len(), 6);
}

#[tokio::test]
async fn test_multi_step_currency_then_distance() {
    let model = ScriptedModel::new(vec![
        CompletionResponse::tool_use(vec![ToolCall::new(
            "call_1",
            "convert_currency",
            json!({"value": "50", "from_code": "EUR", "to_code": "usd"}),
        )]),
        CompletionResponse::tool_use(vec![ToolCall::new(
            "call_2",
            "convert_distance",
            json!({"value": 26.2, "from_unit": "miles", "to_unit": "kilometres"}),
        )]),
        CompletionResponse::text("50 EUR is 54.35 USD and a marathon is about 42.16 km."),
    ]);
    let agent = orchestrator(model);
    let mut conversation = ConversationState::new(SYSTEM_PROMPT);

    let outcome = agent.respond(&mut conversation, "two things").await.unwrap();

    assert_eq!(outcome.model_calls, 3);
    assert_eq!(outcome.tool_batches, 2);
    assert_eq!(tool_result_text(&conversation.messages()[3]), ("54.35", false));
    assert_eq!(tool_result_text(&conversation.messages()[5]), ("42.164708", false));
}

#[tokio::test]
async fn test_runaway_model_is_capped() {
    let script = (0..5)
        .map(|i| {
            CompletionResponse::tool_use(vec![ToolCall::new(
                format!("call_{}", i),
                "convert_distance",
                json!({"value": 1, "from_unit": "m", "to_unit": "cm"}),
            )])
        })
        .collect();
    let model = ScriptedModel::new(script);
    let agent = orchestrator(model.clone()).with_max_iterations(3);
    let mut conversation = ConversationState::new(SYSTEM_PROMPT);

    let outcome = agent.respond(&mut conversation, "again and again").await.unwrap();

    assert_eq!(outcome.status, TurnStatus::IterationLimit);
    assert_eq!(outcome.model_calls, 3);
    assert_eq!(model.seen().len(), 3);
    assert_eq!(outcome.replies, vec![GIVE_UP_MESSAGE.to_string()]);
    assert!(conversation.pending_tool_calls().is_empty());
}

// =============================================================================
// Session driver
// =============================================================================

#[tokio::test]
async fn test_session_runs_until_exit() {
    let model = ScriptedModel::new(vec![
        CompletionResponse::text("Hi! Ask me to convert something."),
        CompletionResponse::tool_use(vec![ToolCall::new(
            "call_1",
            "convert_currency",
            json!({"value": 10, "from_code": "USD", "to_code": "JPY"}),
        )]),
        CompletionResponse::text("10 USD is 1515 JPY."),
    ]);
    let mut session = ReplSession::new(orchestrator(model.clone()));

    let mut printed = Vec::new();
    for line in ["hello", "", "10 usd to yen", "exit", "never read"] {
        match session.handle_line(line).await {
            LineOutcome::Exit => break,
            LineOutcome::Turn(outcome) => printed.extend(outcome.replies),
            LineOutcome::Continue => {}
            LineOutcome::Failed(e) => panic!("turn failed: {}", e),
        }
    }

    assert_eq!(printed, vec!["Hi! Ask me to convert something.", "10 USD is 1515 JPY."]);
    assert_eq!(model.seen().len(), 3);
    // History is resent in full: system + 2 turns so far + tool exchange
    assert_eq!(model.seen()[2].messages.len(), 6);
    assert_eq!(session.conversation().len(), 7);
}
