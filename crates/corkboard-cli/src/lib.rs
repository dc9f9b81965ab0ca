//! Corkboard command-line client.
//!
//! Wires the core operations to a command surface: keys live in a data
//! directory (`~/.corkboard` by default), the board is a local redb file, and
//! the active identity comes from `--name` or the saved config.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
mod error;

pub use cli::{Cli, Command};
pub use commands::{Context, execute, run};
pub use config::Config;
pub use error::CliError;
