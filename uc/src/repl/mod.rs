//! Interactive session driver for unitchat
//!
//! Reads one line at a time, runs one orchestration turn per line and prints
//! the assistant's replies.

mod session;

pub use session::{LineOutcome, ReplSession};

use std::sync::Arc;

use eyre::{Context, Result};
use tracing::info;

use crate::agent::Orchestrator;
use crate::config::Config;
use crate::llm;
use crate::rates::ExchangeRateApi;
use crate::tools::{ToolContext, ToolExecutor};

/// Run the interactive chat session
///
/// This is the entry point for `uc chat` (and `uc` with no subcommand).
pub async fn run_interactive(config: &Config) -> Result<()> {
    // Validate API keys early
    config.validate()?;

    let llm = llm::create_client(&config.llm).context("Failed to create LLM client")?;
    let rates = ExchangeRateApi::from_config(&config.currency).context("Failed to create currency client")?;

    let session_id = uuid::Uuid::now_v7().to_string();
    info!(%session_id, model = llm.model_id(), "Starting chat session");

    let ctx = ToolContext::new(session_id, Arc::new(rates));
    let agent = Orchestrator::new(llm, Arc::new(ToolExecutor::standard()), ctx)
        .with_max_iterations(config.agent.max_iterations)
        .with_max_tokens(config.llm.max_tokens);

    let mut session = ReplSession::new(agent);
    session.run().await
}
