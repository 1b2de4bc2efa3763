//! Main entry point for the rusty-cmd CLI.
//!
//! Parses arguments, translates the instruction through the agent, shows
//! the suggestion, asks for confirmation when required, and executes the
//! command. Exit codes: 0 for success (including follow-up-only answers
//! and aborted confirmations), 1 for usage errors, 2 for unparseable model
//! responses, 3 for provider failures, otherwise the executed command's
//! own exit code.

use std::path::PathBuf;
use std::process::ExitCode;

use anstyle::{AnsiColor, Color, Style};
use clap::Parser;
use dialoguer::{Confirm, Input};

use rusty_cmd::ai::{CommandRequest, OpenAiClient, ParsingError, TranslateAgent, prompt};
use rusty_cmd::shell::CommandRunner;
use rusty_cmd::utils;

#[derive(Parser, Debug)]
#[command(name = "rusty-cmd", about = "Translate natural language into shell commands")]
struct Cli {
    /// Natural language description of the task
    instruction: Vec<String>,

    /// Prompt template filename inside prompts/
    #[arg(long, default_value = prompt::DEFAULT_TEMPLATE_NAME)]
    prompt: String,

    /// Model name for the chat completions API
    #[arg(long, env = "RUSTY_CMD_MODEL", default_value = "gpt-4o-mini")]
    model: String,

    /// Override the OPENAI_API_KEY environment variable
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Override the chat completions base URL (e.g. a local provider)
    #[arg(long, env = "RUSTY_CMD_BASE_URL")]
    base_url: Option<String>,

    /// Shell executable used for command execution
    #[arg(long, env = "SHELL", default_value = "/bin/bash")]
    shell: String,

    /// Working directory for executing commands
    #[arg(long)]
    cwd: Option<PathBuf>,

    /// Sampling temperature for the model
    #[arg(long, default_value_t = 0.0)]
    temperature: f32,

    /// Print the command but do not execute it
    #[arg(long)]
    dry_run: bool,

    /// Skip the confirmation prompt and execute immediately
    #[arg(long)]
    accept: bool,

    /// Do not execute the generated command
    #[arg(long)]
    no_exec: bool,

    /// Allow potentially destructive commands without forcing confirmation
    #[arg(long)]
    allow_destructive: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    utils::logger::init_logging();
    let cli = Cli::parse();
    run(cli).await
}

async fn run(cli: Cli) -> ExitCode {
    let instruction = match resolve_instruction(&cli) {
        Some(text) => text,
        None => {
            eprintln!("{}", paint(AnsiColor::Yellow, "No instruction provided."));
            return ExitCode::from(1);
        }
    };

    // Local providers (Ollama, vLLM) do not need a real key.
    let is_local = cli
        .base_url
        .as_deref()
        .is_some_and(|url| url.contains("localhost") || url.contains("127.0.0.1"));
    if cli.api_key.is_none() && !is_local {
        eprintln!("Missing API key. Set OPENAI_API_KEY or use a local provider.");
        return ExitCode::from(1);
    }

    // A missing default template silently falls back to the embedded one;
    // a missing custom template is a hard error.
    let template = if cli.prompt == prompt::DEFAULT_TEMPLATE_NAME {
        prompt::load_template(&cli.prompt).unwrap_or_else(|_| prompt::EMBEDDED_TEMPLATE.to_string())
    } else {
        match prompt::load_template(&cli.prompt) {
            Ok(template) => template,
            Err(err) => {
                eprintln!("{err:#}");
                return ExitCode::from(1);
            }
        }
    };

    let cwd = cli
        .cwd
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let request = CommandRequest {
        instruction,
        cwd: Some(cwd.clone()),
        shell: cli.shell.clone(),
        temperature: cli.temperature,
        allow_destructive: cli.allow_destructive,
    };

    let client = OpenAiClient::new(&cli.model, cli.api_key.as_deref(), cli.base_url.as_deref());
    let agent = TranslateAgent::new(client, template);

    let suggestion = match agent.suggest(&request).await {
        Ok(suggestion) => suggestion,
        Err(err) => {
            return if let Some(parse_err) = err.downcast_ref::<ParsingError>() {
                tracing::error!(error = %parse_err, "model response could not be parsed");
                eprintln!("Failed to parse model response: {parse_err}");
                ExitCode::from(2)
            } else {
                tracing::error!(error = %err, "completion request failed");
                eprintln!("Model request failed: {err:#}");
                ExitCode::from(3)
            };
        }
    };

    // A follow-up-only suggestion is a valid "need more information" answer,
    // not a failure.
    if suggestion.command.is_empty() {
        println!(
            "{} {}",
            paint(AnsiColor::Yellow, "Follow-up needed:"),
            suggestion.follow_up
        );
        return ExitCode::SUCCESS;
    }

    println!();
    println!(
        "{} {}",
        paint(AnsiColor::Green, "Command:"),
        suggestion.command
    );
    if !suggestion.explanation.is_empty() {
        println!("{}", dim(&format!("Why: {}", suggestion.explanation)));
    }
    println!();

    if cli.no_exec {
        return ExitCode::SUCCESS;
    }

    let mut should_execute = cli.accept || !suggestion.requires_confirmation;
    if !should_execute {
        should_execute = Confirm::new()
            .with_prompt(format!("Execute this command with {}?", cli.shell))
            .default(false)
            .interact()
            .unwrap_or(false);
    }
    if !should_execute {
        println!("Aborted.");
        return ExitCode::SUCCESS;
    }

    let runner = CommandRunner::new(&cli.shell, cli.dry_run);
    match runner.execute(&suggestion.command, Some(&cwd)).await {
        Ok(result) => {
            if !result.succeeded() {
                eprintln!(
                    "{}",
                    paint(
                        AnsiColor::Yellow,
                        &format!("Command failed with exit code {}", result.exit_code),
                    )
                );
            }
            ExitCode::from(u8::try_from(result.exit_code).unwrap_or(1))
        }
        Err(err) => {
            tracing::error!(error = %err, "command execution failed");
            eprintln!("Command execution failed: {err:#}");
            ExitCode::from(1)
        }
    }
}

/// Instruction words from the command line, falling back to an interactive
/// prompt when none were given. Returns `None` when there is still nothing
/// to translate.
fn resolve_instruction(cli: &Cli) -> Option<String> {
    let mut instruction = cli.instruction.join(" ").trim().to_string();

    if instruction.is_empty() {
        instruction = Input::<String>::new()
            .with_prompt("Describe the task")
            .allow_empty(true)
            .interact_text()
            .unwrap_or_default()
            .trim()
            .to_string();
    }

    (!instruction.is_empty()).then_some(instruction)
}

fn paint(color: AnsiColor, text: &str) -> String {
    let style = Style::new().fg_color(Some(Color::Ansi(color)));
    format!("{}{}{}", style.render(), text, style.render_reset())
}

fn dim(text: &str) -> String {
    let style = Style::new().dimmed();
    format!("{}{}{}", style.render(), text, style.render_reset())
}
