//! Command-line interface.
//!
//! - `args`: clap definitions
//! - `commands`: `extract` and `init`
//! - `report`: colored summary output

use std::io;

use anyhow::Result;

pub mod args;
mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    run::run(args)
}

/// Print a command failure to stderr.
pub fn report_error(error: &anyhow::Error) {
    report::print_failure_to(error, &mut io::stderr().lock());
}
