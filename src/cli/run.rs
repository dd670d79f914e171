use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{extract::extract, init::init},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler.
///
/// `Err` means the command could not run at all (unreadable or invalid config,
/// parse failure, I/O failure).
pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Extract(args)) => extract(args),
        Some(Command::Init(args)) => init(args),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
