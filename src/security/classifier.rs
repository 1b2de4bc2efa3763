//! Safety classifier for command suggestions.
//!
//! Pure function over immutable values: the input suggestion is never
//! mutated, and the result is either an untouched copy or a copy with
//! `requires_confirmation` forced to true. Classification only ever
//! upgrades the flag, so applying it twice is the same as applying it once.

use tracing::debug;

use crate::ai::CommandSuggestion;

use super::patterns;

/// Classify a suggestion against the destructive pattern table.
///
/// When `allow_destructive` is set the caller has explicitly opted out and
/// the suggestion passes through untouched regardless of content. An empty
/// command has nothing to match against and also passes through. Otherwise
/// the command is normalized (trimmed, lowercased) and tested against every
/// pattern; any match forces `requires_confirmation` to true.
pub fn classify(suggestion: &CommandSuggestion, allow_destructive: bool) -> CommandSuggestion {
    if allow_destructive {
        return suggestion.clone();
    }

    let normalized = suggestion.command.trim().to_lowercase();
    if normalized.is_empty() {
        return suggestion.clone();
    }

    if let Some(tag) = patterns::first_match(&normalized) {
        debug!(%tag, command = %suggestion.command, "destructive pattern matched");
        return suggestion.with_confirmation(true);
    }

    suggestion.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(command: &str, requires_confirmation: bool) -> CommandSuggestion {
        CommandSuggestion {
            command: command.to_string(),
            explanation: "test".to_string(),
            requires_confirmation,
            follow_up: String::new(),
        }
    }

    #[test]
    fn test_safe_command_passes_through() {
        let input = suggestion("ls -la", false);
        let result = classify(&input, false);
        assert_eq!(result, input);
    }

    #[test]
    fn test_destructive_command_forces_confirmation() {
        let result = classify(&suggestion("rm -rf ~/Downloads/cache", false), false);
        assert!(result.requires_confirmation);
    }

    #[test]
    fn test_sudo_recursive_remove_forces_confirmation() {
        let result = classify(&suggestion("sudo rm -rf /", false), false);
        assert!(result.requires_confirmation);
    }

    #[test]
    fn test_normalization_catches_mixed_case() {
        let result = classify(&suggestion("  SUDO systemctl stop nginx  ", false), false);
        assert!(result.requires_confirmation);
    }

    #[test]
    fn test_allow_destructive_is_a_no_op() {
        let input = suggestion("rm -rf /", false);
        let result = classify(&input, true);
        assert_eq!(result, input);
    }

    #[test]
    fn test_empty_command_is_a_no_op() {
        let mut input = suggestion("", false);
        input.follow_up = "Which project?".to_string();
        let result = classify(&input, false);
        assert_eq!(result, input);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let input = suggestion("rm -rf /tmp/x", false);
        let once = classify(&input, false);
        let twice = classify(&once, false);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_never_downgrades_confirmation() {
        // A harmless command the model already flagged stays flagged.
        let input = suggestion("ls -la", true);
        let result = classify(&input, false);
        assert!(result.requires_confirmation);

        // Same when the override is set.
        let result = classify(&input, true);
        assert!(result.requires_confirmation);
    }

    #[test]
    fn test_input_suggestion_is_never_mutated() {
        let input = suggestion("rm -rf /", false);
        let _ = classify(&input, false);
        assert!(!input.requires_confirmation);
    }
}
