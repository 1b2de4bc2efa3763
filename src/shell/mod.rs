//! Shell execution for suggested commands.
//!
//! Executes a command string through the configured shell, streaming output
//! to the terminal while capturing it for the caller.

mod runner;

pub use runner::{CommandRunner, ExecutionResult};
