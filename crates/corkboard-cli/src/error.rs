//! CLI error types.

use corkboard_core::Error;
use thiserror::Error;

/// Errors surfaced by the `corkboard` binary.
#[derive(Error, Debug)]
pub enum CliError {
    /// No `--name` given and no current name configured
    #[error("empty current name, set one with use-current or pass --name")]
    ConfigMissing,

    /// Command needs an explicit `--name`
    #[error("{command} requires --name")]
    NameRequired {
        /// Subcommand that was invoked
        command: &'static str,
    },

    /// Config file or data directory problem
    #[error("config error: {0}")]
    Config(String),

    /// Operation failed
    #[error(transparent)]
    Core(#[from] Error),

    /// Local I/O failure outside the key store
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<corkboard_core::DirectoryError> for CliError {
    fn from(err: corkboard_core::DirectoryError) -> Self {
        Self::Core(err.into())
    }
}
