//! ToolExecutor - dispatch table from tool name to implementation

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::join_all;
use tracing::{debug, warn};

use crate::llm::{Message, ToolCall, ToolDefinition};

use super::builtin::{CurrencyTool, DistanceTool, TemperatureTool};
use super::{Tool, ToolArgs, ToolContext, ToolError, ToolResult};

/// Resolves tool calls against registered tools and runs them
pub struct ToolExecutor {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolExecutor {
    /// Create executor with the three conversion tools
    pub fn standard() -> Self {
        let mut executor = Self::empty();
        executor.add_tool(Arc::new(TemperatureTool));
        executor.add_tool(Arc::new(DistanceTool));
        executor.add_tool(Arc::new(CurrencyTool));
        executor
    }

    /// Create an empty executor (for testing)
    pub fn empty() -> Self {
        Self { tools: BTreeMap::new() }
    }

    /// Add a tool to the executor, replacing any tool of the same name
    pub fn add_tool(&mut self, tool: Arc<dyn Tool>) {
        debug!(name = tool.name(), "ToolExecutor::add_tool: called");
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Get tool definitions for the LLM, ordered by name
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|t| ToolDefinition::new(t.name(), t.description(), t.input_schema()))
            .collect()
    }

    /// Execute a single tool call
    ///
    /// Never fails: unknown tools, bad arguments and panics inside the tool
    /// all come back as error results.
    pub async fn execute(&self, call: &ToolCall, ctx: &ToolContext) -> ToolResult {
        debug!(tool = %call.name, call_id = %call.id, session_id = %ctx.session_id, "ToolExecutor::execute: called");
        let Some(tool) = self.tools.get(&call.name) else {
            warn!(tool = %call.name, "Model requested unknown tool");
            return ToolResult::error(ToolError::UnknownTool { name: call.name.clone() }.to_string());
        };

        let args = match ToolArgs::coerce(tool.params(), &call.arguments) {
            Ok(args) => args,
            Err(e) => {
                debug!(tool = %call.name, error = %e, "ToolExecutor::execute: argument coercion failed");
                return ToolResult::error(e.to_string());
            }
        };

        match AssertUnwindSafe(tool.execute(args, ctx)).catch_unwind().await {
            Ok(result) => {
                debug!(tool = %call.name, is_error = result.is_error, "ToolExecutor::execute: finished");
                result
            }
            Err(_) => {
                warn!(tool = %call.name, "Tool panicked during execution");
                ToolResult::error(ToolError::Panicked { name: call.name.clone() }.to_string())
            }
        }
    }

    /// Execute a batch of tool calls concurrently
    ///
    /// Results are returned in call order, paired with the call id.
    pub async fn execute_all(&self, calls: &[ToolCall], ctx: &ToolContext) -> Vec<(String, ToolResult)> {
        debug!(count = calls.len(), "ToolExecutor::execute_all: called");
        let results = join_all(calls.iter().map(|call| self.execute(call, ctx))).await;
        calls.iter().map(|call| call.id.clone()).zip(results).collect()
    }

    /// Execute a batch and package each result as a tool-result message
    pub async fn answer_all(&self, calls: &[ToolCall], ctx: &ToolContext) -> Vec<Message> {
        self.execute_all(calls, ctx)
            .await
            .into_iter()
            .map(|(call_id, result)| Message::tool_result(call_id, result.content, result.is_error))
            .collect()
    }

    /// Look up a registered tool
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.get(name)
    }

    /// Check if a tool exists
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get tool names
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }
}

impl Default for ToolExecutor {
    fn default() -> Self {
        Self::standard()
    }
}
