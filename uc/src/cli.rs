//! CLI command definitions and subcommands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// unitchat - conversational unit converter
#[derive(Parser)]
#[command(
    name = "uc",
    about = "Chat with an LLM that converts temperatures, distances and currencies",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute (defaults to chat)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start an interactive conversion chat
    Chat,

    /// Run one conversion directly, without the model
    Convert {
        /// Kind of conversion
        #[arg(value_enum)]
        kind: ConversionKind,

        /// Amount to convert
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Source unit or currency code
        from: String,

        /// Target unit or currency code
        to: String,
    },

    /// Print the tool declarations sent to the model, as JSON
    Tools,
}

/// Conversion families available to `uc convert`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConversionKind {
    Temperature,
    Distance,
    Currency,
}
