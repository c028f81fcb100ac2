// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod guard;
pub mod logging;
pub mod ops;

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, load_or_default};
use crate::errors::TmpguardError;
use crate::guard::{SandboxRoot, init_sandbox_root};
use crate::ops::{FsOps, Operation};

/// Exit status used when a path is refused by the guard.
pub const EXIT_REJECTED: i32 = 2;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (plus the `--sandbox-root` override)
/// - process-wide sandbox root initialisation
/// - the operations façade over the guarded executor
///
/// Returns the exit status the binary should terminate with: the tool's own
/// exit code, or [`EXIT_REJECTED`] for a guard rejection.
pub async fn run(args: CliArgs) -> Result<i32> {
    let mut cfg = load_or_default(args.config.as_deref()).context("loading configuration")?;
    if let Some(root) = &args.sandbox_root {
        cfg.sandbox_root = SandboxRoot::new(root).context("--sandbox-root")?;
    }

    init_sandbox_root(cfg.sandbox_root.as_path())?;
    info!(root = ?cfg.sandbox_root.as_path(), "sandbox root configured");

    let op = Operation::from(args.command);

    if args.dry_run {
        return Ok(print_dry_run(&cfg, &op));
    }

    let ops = FsOps::from_config(&cfg);
    let result = match ops.perform(op).await {
        Ok(result) => result,
        Err(TmpguardError::Rejected(rejection)) => {
            eprintln!("tmpguard: refused: {rejection}");
            return Ok(EXIT_REJECTED);
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(ref out) = result.stdout {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(out.as_bytes())?;
        stdout.flush()?;
    }
    if let Some(ref err) = result.stderr {
        let mut stderr = std::io::stderr().lock();
        stderr.write_all(err.as_bytes())?;
        stderr.flush()?;
    }

    Ok(result.exit_code)
}

/// Dry-run output: validate the operation's paths and print the command line.
fn print_dry_run(cfg: &ConfigFile, op: &Operation) -> i32 {
    let descriptor = op.descriptor(&cfg.tools);
    let guard = cfg.path_guard();

    println!("tmpguard dry-run");
    println!("  sandbox root = {}", cfg.sandbox_root.as_path().display());
    println!("  operation    = {}", op.name());
    println!("  command      = {descriptor}");

    let status = match guard.check_all(descriptor.guarded_paths()) {
        Ok(()) => {
            println!("  guard        = ok");
            0
        }
        Err(rejection) => {
            println!("  guard        = refused ({rejection})");
            EXIT_REJECTED
        }
    };

    debug!("dry-run complete (no execution)");
    status
}
