//! Command-line interface layer.

use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod args;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command, CommonArgs, FilesCommand, ListCommand, OutputFormat};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    init_tracing(args.verbose());

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let status = run::run(args)?;
    Ok(status.into())
}

/// Log to stderr. `RUST_LOG` wins over `-v`; the default level is `warn`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // a subscriber may already be installed when embedded in another binary
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
