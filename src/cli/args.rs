//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Scan sources and write the POT catalog
//! - `init`: Initialize potgen configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::catalog::PluralConflictPolicy;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(args)) => args.verbose,
            Some(Command::Init(_)) | None => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExtractArgs {
    /// Source code root directory; the config file is searched from here upwards
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Catalog path relative to the source root, `-` for stdout (overrides config file)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Line number reported for the first line of every file (overrides config file)
    #[arg(long)]
    pub line_number_start: Option<usize>,

    /// How to treat a second, different plural text for a message (overrides config file)
    #[arg(long, value_enum)]
    pub plural_conflicts: Option<PluralConflictPolicy>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Directory to create the config file in (default: current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translatable strings into a POT catalog
    Extract(ExtractArgs),
    /// Initialize a new .potgenrc.json configuration file
    Init(InitArgs),
}
