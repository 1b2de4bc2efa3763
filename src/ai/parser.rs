//! Parser module for processing AI responses.
//!
//! Model output is untrusted free-form text: the JSON payload may be wrapped
//! in markdown fencing, surrounded by prose, or malformed. This module
//! extracts the first candidate object and maps it defensively onto a
//! [`CommandSuggestion`].

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use super::CommandSuggestion;

/// How much of a bad fragment is carried in the error for display.
const FRAGMENT_CONTEXT_LEN: usize = 120;

/// First fenced code block (optionally tagged `json`) holding a `{...}`
/// object, matched non-greedily up to the first closing brace that lets the
/// fence terminate.
static FENCED_JSON: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    let fence = Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```")
        .expect("fence pattern is a valid regex");
    fence
});

/// Raised when a model response cannot be parsed into a suggestion.
#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("no JSON object found in model response")]
    NoJsonObject,
    #[error("invalid JSON in model response: {source} (fragment: {fragment})")]
    InvalidJson {
        fragment: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("model returned empty command and follow_up")]
    EmptyPayload,
}

/// Parse a raw model response into a structured suggestion.
///
/// Extraction runs as two sequential attempts: a fenced code block wins if
/// present; otherwise the slice from the first `{` to the last `}` in the
/// whole text is used. Once a fenced candidate is found its parse failure is
/// terminal - it never falls through to the brace scan.
///
/// Field handling is defensive: `command`, `explanation` and `follow_up` are
/// coerced to trimmed strings (absent keys become empty, non-string values
/// are stringified); `requires_confirmation` is coerced to bool, treating
/// any JSON truthy value as true. The returned flag reflects only what the
/// model claimed - the safety classifier may still upgrade it.
pub fn parse(response_text: &str) -> Result<CommandSuggestion, ParsingError> {
    let candidate = extract_candidate(response_text)?;

    let payload: Value =
        serde_json::from_str(candidate).map_err(|source| ParsingError::InvalidJson {
            fragment: fragment_context(candidate),
            source,
        })?;

    let command = coerce_string(payload.get("command"));
    let explanation = coerce_string(payload.get("explanation"));
    let follow_up = coerce_string(payload.get("follow_up"));
    let requires_confirmation = coerce_bool(payload.get("requires_confirmation"));

    if command.is_empty() && follow_up.is_empty() {
        return Err(ParsingError::EmptyPayload);
    }

    Ok(CommandSuggestion {
        command,
        explanation,
        requires_confirmation,
        follow_up,
    })
}

/// Locate the candidate JSON object inside the response text.
///
/// The brace-scan fallback assumes exactly one logical object spans the
/// slice; unrelated braces in surrounding prose make it capture too much.
/// That fragility is intentional and covered by tests below.
fn extract_candidate(text: &str) -> Result<&str, ParsingError> {
    if let Some(captures) = FENCED_JSON.captures(text) {
        if let Some(object) = captures.get(1) {
            return Ok(object.as_str());
        }
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) => {
            // A lone `}` before the first `{` yields an empty candidate,
            // which fails downstream as invalid JSON.
            if start <= end {
                Ok(&text[start..=end])
            } else {
                Ok("")
            }
        }
        _ => Err(ParsingError::NoJsonObject),
    }
}

fn fragment_context(candidate: &str) -> String {
    if candidate.len() <= FRAGMENT_CONTEXT_LEN {
        return candidate.to_string();
    }
    let mut cut = FRAGMENT_CONTEXT_LEN;
    while !candidate.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &candidate[..cut])
}

/// Coerce a JSON value to a trimmed string. Absent keys become empty;
/// non-string values keep their JSON rendering.
fn coerce_string(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::String(text)) => text.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// Coerce a JSON value to bool: absent, null, false, zero and empty
/// containers are false, everything else is true.
fn coerce_bool(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
    }
}
