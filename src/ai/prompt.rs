//! Prompt building utilities for AI requests.
//!
//! The system prompt comes from a template with `{shell}` and `{cwd}`
//! placeholders; a default template ships embedded so the tool works without
//! any files on disk. Custom templates are loaded from a `prompts/`
//! directory next to the executable.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Template filename looked up when the user does not override it.
pub const DEFAULT_TEMPLATE_NAME: &str = "command_synthesis.txt";

/// Embedded system prompt template used when no template file exists.
///
/// Placeholders `{shell}` and `{cwd}` are substituted before dispatch; the
/// braces in the JSON schema below are literal.
pub const EMBEDDED_TEMPLATE: &str = r#"You are RustyCmd, an expert macOS and Linux shell assistant. Convert the
user request into a single shell command that can be executed from an
interactive terminal session.

Constraints:
- Assume the default shell is {shell} unless specified otherwise.
- Assume the current working directory is {cwd}.
- Prefer concise commands that rely on standard tooling already available.
- If the request is ambiguous, add a clarifying question in the `follow_up` field.
- Respect safety: never include commands that permanently delete data,
  reformat disks, or escalate privileges unless explicitly requested.
- Output MUST be valid JSON matching this schema:
  {
    "command": "...",
    "explanation": "...",
    "requires_confirmation": true,
    "follow_up": "..."
  }
  Leave `command` empty when no safe command exists, and `follow_up` empty
  when there is nothing to clarify.
- Keep the explanation under 160 characters.

Render the JSON directly with no surrounding markdown. Fill in all fields.
"#;

/// Substitute the request context into a system prompt template.
///
/// Only the `{shell}` and `{cwd}` placeholders are recognized; everything
/// else (including the braces of the embedded JSON schema) passes through
/// untouched. A missing working directory renders as `~`.
pub fn render_system_prompt(template: &str, shell: &str, cwd: Option<&Path>) -> String {
    let cwd_text = cwd
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "~".to_string());

    template
        .replace("{shell}", shell)
        .replace("{cwd}", &cwd_text)
}

/// Build the user prompt for a translation request.
///
/// The instruction is trimmed and carried behind a fixed task marker so the
/// model treats it as data to translate rather than instructions to follow.
pub fn build_user_prompt(instruction: &str) -> String {
    format!("PROCESS DATA: {}", instruction.trim())
}

/// Load a prompt template by filename from the `prompts/` directory.
pub fn load_template(name: &str) -> Result<String> {
    let path = template_dir().join(name);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read prompt template {}", path.display()))
}

/// Directory holding prompt templates: `prompts/` next to the executable,
/// falling back to `./prompts` when the executable path is unavailable.
fn template_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("prompts")))
        .unwrap_or_else(|| PathBuf::from("prompts"))
}
