//! REPL session management

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::agent::{Orchestrator, SYSTEM_PROMPT, TurnOutcome};
use crate::conversation::ConversationState;
use crate::llm::Message;

/// Line that ends the session (exact, case-sensitive)
const EXIT_SENTINEL: &str = "exit";

const PREVIEW_CHARS: usize = 60;

/// What handling one input line produced
#[derive(Debug)]
pub enum LineOutcome {
    /// Nothing further to print (blank line or slash command)
    Continue,
    /// End the session
    Exit,
    /// A turn ran to completion
    Turn(TurnOutcome),
    /// The turn failed; the conversation is unchanged
    Failed(String),
}

/// Interactive REPL session
pub struct ReplSession {
    agent: Orchestrator,
    conversation: ConversationState,
}

impl ReplSession {
    /// Create a new REPL session with a fresh conversation
    pub fn new(agent: Orchestrator) -> Self {
        debug!(session_id = %agent.session_id(), "ReplSession::new: called");
        Self {
            agent,
            conversation: ConversationState::new(SYSTEM_PROMPT),
        }
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;

        loop {
            let readline = rl.readline(&format!("{} ", "Human:".bright_green()));

            match readline {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = rl.add_history_entry(line.as_str());
                    }

                    match self.handle_line(&line).await {
                        LineOutcome::Continue => continue,
                        LineOutcome::Exit => break,
                        LineOutcome::Turn(outcome) => self.print_turn(&outcome),
                        LineOutcome::Failed(message) => {
                            println!("{} {}", "Error:".red(), message);
                            println!();
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C - just show new prompt
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D - exit
                    println!();
                    break;
                }
                Err(err) => {
                    return Err(eyre::eyre!("Readline error: {}", err));
                }
            }
        }

        info!(session_id = %self.agent.session_id(), messages = self.conversation.len(), "Chat session ended");
        println!("Goodbye!");
        Ok(())
    }

    /// Handle one line of input
    pub async fn handle_line(&mut self, line: &str) -> LineOutcome {
        if line == EXIT_SENTINEL {
            return LineOutcome::Exit;
        }

        let input = line.trim();
        if input.is_empty() {
            return LineOutcome::Continue;
        }

        if input.starts_with('/') {
            return match self.handle_slash_command(input) {
                SlashResult::Continue => LineOutcome::Continue,
                SlashResult::Quit => LineOutcome::Exit,
            };
        }

        match self.agent.respond(&mut self.conversation, input).await {
            Ok(outcome) => LineOutcome::Turn(outcome),
            Err(e) => LineOutcome::Failed(e.to_string()),
        }
    }

    fn print_turn(&self, outcome: &TurnOutcome) {
        for reply in &outcome.replies {
            println!();
            println!("{} {}", "AI:".bright_blue().bold(), reply);
        }
        if outcome.hit_iteration_limit() {
            println!("{}", "[turn stopped at the step limit]".yellow());
        }
        println!();
    }

    /// Print welcome message
    fn print_welcome(&self) {
        println!();
        println!("{}", "unitchat - unit conversion assistant".bright_cyan().bold());
        println!("Model: {}", self.agent.model_id());
        println!(
            "Type {} for help, {} or {} to quit",
            "/help".yellow(),
            "/quit".yellow(),
            EXIT_SENTINEL.yellow()
        );
        println!();
    }

    /// Handle slash commands
    fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let cmd = input.split_whitespace().next().unwrap_or("");
        debug!(%cmd, "ReplSession::handle_slash_command: called");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" => SlashResult::Quit,
            "/clear" | "/c" => {
                self.conversation.reset();
                println!("{}", "Conversation cleared.".dimmed());
                SlashResult::Continue
            }
            "/history" => {
                self.print_history();
                SlashResult::Continue
            }
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    /// Print help message
    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:14} Show this help", "/help".yellow());
        println!("  {:14} Exit the session", "/quit".yellow());
        println!("  {:14} Clear conversation history", "/clear".yellow());
        println!("  {:14} Show conversation history", "/history".yellow());
        println!();
        println!("{}", "Ask about:".bright_cyan());
        println!("  {:14} celsius, fahrenheit, kelvin", "temperature".yellow());
        println!("  {:14} mm, cm, m, km, inch, foot, yard, mile", "distance".yellow());
        println!("  {:14} ISO codes such as USD, EUR, JPY", "currency".yellow());
        println!();
    }

    /// Print conversation history (system prompt omitted)
    fn print_history(&self) {
        let messages = self.conversation.since(1);
        if messages.is_empty() {
            println!("{}", "No conversation history.".dimmed());
            return;
        }

        println!();
        println!("{}", "Conversation History:".bright_cyan());
        for (i, msg) in messages.iter().enumerate() {
            let role = match msg {
                Message::System { .. } => "System".normal(),
                Message::Human { .. } => "Human".bright_green(),
                Message::Assistant { .. } => "Assistant".bright_blue(),
                Message::ToolResult { .. } => "Tool".bright_yellow(),
            };
            println!("  {}. {}: {}", i + 1, role, preview(msg));
        }
        println!();
    }
}

fn preview(msg: &Message) -> String {
    let calls = msg.tool_calls();
    if !calls.is_empty() {
        let names: Vec<&str> = calls.iter().map(|c| c.name.as_str()).collect();
        return format!("[calls {}]", names.join(", "));
    }

    let text = msg.text();
    let preview: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    Quit,
}
