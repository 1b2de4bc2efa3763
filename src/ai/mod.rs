//! AI module for translating natural language into shell commands.
//!
//! This module owns the translation pipeline: prompt construction, the
//! completion client boundary, response parsing, and the orchestration
//! agent that ties them together.

pub mod agent;
pub mod client;
pub mod parser;
pub mod prompt;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use agent::TranslateAgent;
pub use client::{CompletionClient, OpenAiClient};
pub use parser::ParsingError;

/// Input context for a single translation request.
///
/// Created fresh per invocation and owned by the caller; nothing in the
/// pipeline mutates it.
#[derive(Debug, Clone)]
pub struct CommandRequest {
    /// Natural language description of the task. Non-empty after trimming.
    pub instruction: String,
    /// Working directory the command would run in.
    pub cwd: Option<PathBuf>,
    /// Shell executable used for command execution.
    pub shell: String,
    /// Sampling temperature forwarded to the model, typically 0.0-2.0.
    pub temperature: f32,
    /// Suppresses forced confirmation for destructive commands.
    pub allow_destructive: bool,
}

impl CommandRequest {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            cwd: None,
            shell: "/bin/bash".to_string(),
            temperature: 0.0,
            allow_destructive: false,
        }
    }
}

/// Structured suggestion produced from a model response.
///
/// An empty `command` means "no safe command exists"; `follow_up` carries a
/// clarifying question when the model needs more information. At least one
/// of the two is non-empty - the parser rejects responses where both are
/// blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSuggestion {
    pub command: String,
    pub explanation: String,
    pub requires_confirmation: bool,
    pub follow_up: String,
}

impl CommandSuggestion {
    /// Returns a copy with the confirmation flag replaced.
    ///
    /// Suggestions are immutable values; the safety classifier derives a new
    /// suggestion instead of mutating in place.
    pub fn with_confirmation(&self, required: bool) -> Self {
        Self {
            command: self.command.clone(),
            explanation: self.explanation.clone(),
            requires_confirmation: required,
            follow_up: self.follow_up.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_confirmation_derives_copy() {
        let original = CommandSuggestion {
            command: "ls".to_string(),
            explanation: "List files".to_string(),
            requires_confirmation: false,
            follow_up: String::new(),
        };

        let upgraded = original.with_confirmation(true);

        assert!(upgraded.requires_confirmation);
        assert_eq!(upgraded.command, original.command);
        assert_eq!(upgraded.explanation, original.explanation);
        assert_eq!(upgraded.follow_up, original.follow_up);
        // The original value is untouched.
        assert!(!original.requires_confirmation);
    }
}
