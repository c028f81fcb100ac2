// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::ops::Operation;

/// Command-line arguments for `tmpguard`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tmpguard",
    version,
    about = "Perform filesystem mutations through external tools, confined to a sandbox directory.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// If omitted, `Tmpguard.toml` in the current directory is used when it
    /// exists, otherwise built-in defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the sandbox root from the config file.
    #[arg(long, value_name = "PATH")]
    pub sandbox_root: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TMPGUARD_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate and print the command line, but don't run it.
    #[arg(long)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: OpCommand,
}

/// One filesystem operation.
#[derive(Debug, Clone, Subcommand)]
pub enum OpCommand {
    /// Create an empty file (or update its timestamp).
    Touch { path: PathBuf },
    /// Remove a file.
    Rm { path: PathBuf },
    /// Create a directory.
    Mkdir { path: PathBuf },
    /// Remove a directory recursively.
    Rmdir { path: PathBuf },
    /// Copy a directory recursively.
    Cp { source: PathBuf, destination: PathBuf },
    /// Move a file or directory.
    Mv { source: PathBuf, destination: PathBuf },
    /// Write text (plus a trailing newline) to a file.
    Write { path: PathBuf, contents: String },
}

impl From<OpCommand> for Operation {
    fn from(cmd: OpCommand) -> Self {
        match cmd {
            OpCommand::Touch { path } => Operation::CreateFile { path },
            OpCommand::Rm { path } => Operation::RemoveFile { path },
            OpCommand::Mkdir { path } => Operation::CreateDirectory { path },
            OpCommand::Rmdir { path } => Operation::RemoveDirectory { path },
            OpCommand::Cp {
                source,
                destination,
            } => Operation::CopyDirectory {
                source,
                destination,
            },
            OpCommand::Mv {
                source,
                destination,
            } => Operation::MoveItem {
                source,
                destination,
            },
            OpCommand::Write { path, contents } => Operation::WriteFile { path, contents },
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
