//! Corkboard binary.
//!
//! # Usage
//!
//! ```bash
//! # Create and publish an identity, then make it the default
//! corkboard --name alice publish
//! corkboard --name alice use-current
//!
//! # Encrypt for bob and decrypt as bob
//! corkboard encrypt bob meet at noon
//! corkboard --name bob decrypt alice <base64>
//! ```

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use corkboard_cli::{Cli, run};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let mut stdout = io::stdout().lock();
    match run(cli, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "error: {err}");
            ExitCode::FAILURE
        },
    }
}
