//! CLI command implementations for Formic.

pub(crate) mod output;
pub(crate) mod play;
pub(crate) mod replay;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;

/// Output format for the `replay` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ReplayFormat {
    /// Human-readable text output with an ASCII map.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<formic::protocol::ProtocolError> for CliError {
    fn from(e: formic::protocol::ProtocolError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<formic::replay::ReplayError> for CliError {
    fn from(e: formic::replay::ReplayError) -> Self {
        Self::new(e.to_string())
    }
}
