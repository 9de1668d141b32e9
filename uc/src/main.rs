//! unitchat - conversational unit converter
//!
//! CLI entry point: interactive chat, one-shot conversions and tool listing.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info, warn};

use unitchat::cli::{Cli, Command, ConversionKind};
use unitchat::config::Config;
use unitchat::rates::ExchangeRateApi;
use unitchat::repl;
use unitchat::tools::ToolExecutor;
use unitchat::tools::builtin::{convert_currency, convert_distance, convert_temperature};

fn parse_level(s: &str) -> Option<tracing::Level> {
    match s.to_uppercase().as_str() {
        "TRACE" => Some(tracing::Level::TRACE),
        "DEBUG" => Some(tracing::Level::DEBUG),
        "INFO" => Some(tracing::Level::INFO),
        "WARN" | "WARNING" => Some(tracing::Level::WARN),
        "ERROR" => Some(tracing::Level::ERROR),
        _ => None,
    }
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Stdout belongs to the REPL, so logs go to a file
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("unitchat")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => parse_level(s).unwrap_or_else(|| {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
            tracing::Level::INFO
        }),
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("unitchat.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets may live in a local .env file
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    match dotenv {
        Ok(path) => info!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("main: no .env file"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    }
    info!(model = %config.llm.model, provider = %config.llm.provider, "unitchat loaded config");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        None | Some(Command::Chat) => repl::run_interactive(&config).await,
        Some(Command::Convert { kind, value, from, to }) => cmd_convert(&config, kind, value, &from, &to).await,
        Some(Command::Tools) => cmd_tools(),
    }
}

/// Run one conversion and print the result
async fn cmd_convert(config: &Config, kind: ConversionKind, value: f64, from: &str, to: &str) -> Result<()> {
    debug!(?kind, %value, %from, %to, "cmd_convert: called");
    let outcome = match kind {
        ConversionKind::Temperature => convert_temperature(value, from, to),
        ConversionKind::Distance => convert_distance(value, from, to),
        ConversionKind::Currency => {
            let rates = ExchangeRateApi::from_config(&config.currency).context("Failed to create currency client")?;
            convert_currency(value, from, to, &rates).await
        }
    };

    match outcome {
        Ok(result) => {
            println!("{}", result);
            Ok(())
        }
        Err(e) => Err(eyre::eyre!(e)),
    }
}

/// Print tool declarations in the format sent to the model
fn cmd_tools() -> Result<()> {
    let schemas: Vec<serde_json::Value> = ToolExecutor::standard()
        .definitions()
        .iter()
        .map(|d| d.to_openai_schema())
        .collect();
    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}
