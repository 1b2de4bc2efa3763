//! Security module for command safety classification.
//!
//! A fixed denylist of destructive command shapes decides whether a
//! suggestion must be confirmed by the user, independent of what the model
//! itself claimed. This is a conservative net for the common obviously
//! dangerous idioms, not a sandbox.

mod classifier;
mod patterns;

pub use classifier::classify;
pub use patterns::{DESTRUCTIVE_PATTERNS, DestructivePattern, first_match};
