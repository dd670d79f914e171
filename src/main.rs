use std::process::ExitCode;

use clap::Parser;
use potgen::cli::{Arguments, ExitStatus};
use tracing_subscriber::EnvFilter;

/// Log filter variable; `--verbose` overrides it with `debug`.
const LOG_ENV: &str = "POTGEN_LOG";

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_tracing(args.verbose());

    match potgen::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            potgen::cli::report_error(&err);
            ExitStatus::Error.into()
        }
    }
}
