//! Tool error types
//!
//! The Display text of each variant is what the model sees in the tool result.

use thiserror::Error;

use crate::rates::RateError;

/// Errors that can occur during tool execution
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Missing required argument '{0}'")]
    MissingArgument(String),

    #[error("Invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("Sorry, temperature unit '{0}' is not supported. Use celsius, fahrenheit or kelvin.")]
    UnsupportedTemperatureUnit(String),

    #[error("Sorry, conversion from {from} to {to} is not supported yet.")]
    UnsupportedDistance { from: String, to: String },

    #[error("Sorry, currency code '{0}' not supported.")]
    UnsupportedCurrency(String),

    #[error("{0}")]
    Rates(#[from] RateError),

    #[error("Tool '{name}' failed unexpectedly")]
    Panicked { name: String },
}
