//! RustyCmd - translate natural language into shell commands.
//!
//! This library provides the core pipeline behind the `rusty-cmd` binary:
//! - Prompt construction and the completion client boundary
//! - Robust parsing of model responses into structured suggestions
//! - Safety classification that forces confirmation for destructive commands
//! - Shell execution with live output streaming
//!
//! # Example
//!
//! ```no_run
//! use rusty_cmd::ai::{CommandRequest, OpenAiClient, TranslateAgent, prompt};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = OpenAiClient::new("gpt-4o-mini", std::env::var("OPENAI_API_KEY").ok().as_deref(), None);
//!     let agent = TranslateAgent::new(client, prompt::EMBEDDED_TEMPLATE);
//!
//!     let suggestion = agent.suggest(&CommandRequest::new("list all files")).await?;
//!     println!("{}", suggestion.command);
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod security;
pub mod shell;
pub mod utils;

// Re-export commonly used types
pub use ai::{
    CommandRequest, CommandSuggestion, CompletionClient, OpenAiClient, ParsingError, TranslateAgent,
};
pub use security::classify;
pub use shell::{CommandRunner, ExecutionResult};
