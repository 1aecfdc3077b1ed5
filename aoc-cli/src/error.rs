//! Error types for the CLI

use aoc_machine::{MachineError, ResolveError};
use aoc_parser::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input file could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file does not match the expected grammar
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// Program is invalid or did not halt
    #[error("Machine error: {0}")]
    Machine(#[from] MachineError),

    /// Opcodes could not be resolved
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    /// Logger setup failed
    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}
