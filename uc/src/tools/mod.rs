//! Tool system for the conversion assistant
//!
//! Tools are named, schema-declared functions the model may request. The
//! [`ToolExecutor`] is the dispatch table from tool name to implementation;
//! every failure inside a tool surfaces as an error-flagged [`ToolResult`]
//! the model can read, never as a fault that ends the turn.

mod args;
mod context;
mod error;
mod executor;
mod traits;

pub mod builtin;

pub use args::{ArgValue, Param, ParamType, ToolArgs};
pub use context::ToolContext;
pub use error::ToolError;
pub use executor::ToolExecutor;
pub use traits::{Tool, ToolResult};
