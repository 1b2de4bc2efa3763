//! Orchestration agent for one translation request.
//!
//! Sequence per request: render prompts from the request context, obtain raw
//! text from the completion client, parse it into a suggestion, then - when
//! the command is non-empty and the caller did not opt out - run the safety
//! classifier over it. Parsing errors propagate to the caller unwrapped in
//! kind; the caller decides how to display them.

use anyhow::Result;
use tracing::{debug, info};

use crate::security::classify;

use super::{CommandRequest, CommandSuggestion, client::CompletionClient, parser, prompt};

/// High-level agent tying prompt construction, completion and parsing
/// together. Generic over the completion client so tests can stub it.
pub struct TranslateAgent<C> {
    client: C,
    system_prompt_template: String,
}

impl<C: CompletionClient> TranslateAgent<C> {
    pub fn new(client: C, system_prompt_template: impl Into<String>) -> Self {
        Self {
            client,
            system_prompt_template: system_prompt_template.into(),
        }
    }

    /// Translate a natural language instruction into a command suggestion.
    pub async fn suggest(&self, request: &CommandRequest) -> Result<CommandSuggestion> {
        let system_prompt = prompt::render_system_prompt(
            &self.system_prompt_template,
            &request.shell,
            request.cwd.as_deref(),
        );
        let user_prompt = prompt::build_user_prompt(&request.instruction);

        debug!(
            shell = %request.shell,
            temperature = request.temperature,
            "dispatching translation request"
        );

        let raw_response = self
            .client
            .complete(&system_prompt, &user_prompt, request.temperature)
            .await?;

        let suggestion = parser::parse(&raw_response)?;

        if !suggestion.command.is_empty() && !request.allow_destructive {
            let classified = classify(&suggestion, request.allow_destructive);
            if classified.requires_confirmation && !suggestion.requires_confirmation {
                info!(command = %classified.command, "forcing confirmation for destructive command");
            }
            return Ok(classified);
        }

        Ok(suggestion)
    }
}
