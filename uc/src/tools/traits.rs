//! Tool trait definition

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::args::{Param, schema_for};
use super::context::ToolContext;
use super::{ToolArgs, ToolError};

/// A tool that can be called by the LLM
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (matches the function name the model calls)
    fn name(&self) -> &'static str;

    /// Description the model reads to decide applicability
    fn description(&self) -> &'static str;

    /// Declared parameters, in order
    fn params(&self) -> &'static [Param];

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value {
        schema_for(self.params())
    }

    /// Execute the tool with arguments already coerced to the declared types
    async fn execute(&self, args: ToolArgs, ctx: &ToolContext) -> ToolResult;
}

/// Result of a tool execution
#[derive(Debug, Clone, PartialEq)]
pub struct ToolResult {
    pub content: String,
    pub is_error: bool,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(content: impl Into<String>) -> Self {
        debug!("ToolResult::success: called");
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    /// Create an error result
    pub fn error(content: impl Into<String>) -> Self {
        debug!("ToolResult::error: called");
        Self {
            content: content.into(),
            is_error: true,
        }
    }

    /// Wrap the outcome of a numeric conversion
    pub fn from_conversion(outcome: Result<f64, ToolError>) -> Self {
        match outcome {
            Ok(value) => Self::success(value.to_string()),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success("32");
        assert!(!result.is_error);
        assert_eq!(result.content, "32");
    }

    #[test]
    fn test_tool_result_error() {
        let result = ToolResult::error("Unknown tool: teleport");
        assert!(result.is_error);
        assert_eq!(result.content, "Unknown tool: teleport");
    }

    #[test]
    fn test_from_conversion() {
        assert_eq!(ToolResult::from_conversion(Ok(373.15)), ToolResult::success("373.15"));

        let err = ToolResult::from_conversion(Err(ToolError::UnsupportedTemperatureUnit("rankine".to_string())));
        assert!(err.is_error);
        assert!(err.content.contains("rankine"));
    }
}
