// src/exec/descriptor.rs

//! Immutable description of one external-program invocation.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::guard::GuardedPath;

/// An upstream process whose stdout becomes the managed process's stdin.
///
/// The executor only reaps it; its exit status does not feed the
/// [`ExecutionResult`](super::ExecutionResult).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducerCommand {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

impl ProducerCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }
}

/// Program, arguments and the paths that must pass the guard before launch.
///
/// Built with consuming setters; once handed to the executor it is only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    program: PathBuf,
    args: Vec<OsString>,
    guarded_paths: Vec<GuardedPath>,
    producer: Option<ProducerCommand>,
}

impl OperationDescriptor {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            guarded_paths: Vec::new(),
            producer: None,
        }
    }

    /// Append a plain (unguarded) argument such as a flag.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append a path argument that must pass the single-path checks.
    pub fn target(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.args.push(path.as_os_str().to_os_string());
        self.guarded_paths.push(GuardedPath::single(path));
        self
    }

    /// Append a source or destination path argument (paired checks).
    pub fn paired_target(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        self.args.push(path.as_os_str().to_os_string());
        self.guarded_paths.push(GuardedPath::paired(path));
        self
    }

    /// Require validation of a path that is not itself an argument.
    pub fn guard(mut self, guarded: GuardedPath) -> Self {
        self.guarded_paths.push(guarded);
        self
    }

    /// Feed this process's stdin from `producer`'s stdout.
    pub fn stdin_from(mut self, producer: ProducerCommand) -> Self {
        self.producer = Some(producer);
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn guarded_paths(&self) -> &[GuardedPath] {
        &self.guarded_paths
    }

    pub fn producer(&self) -> Option<&ProducerCommand> {
        self.producer.as_ref()
    }
}

fn write_command(f: &mut fmt::Formatter<'_>, program: &Path, args: &[OsString]) -> fmt::Result {
    write!(f, "{}", program.display())?;
    for arg in args {
        write!(f, " {:?}", arg)?;
    }
    Ok(())
}

impl fmt::Display for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(producer) = &self.producer {
            write_command(f, &producer.program, &producer.args)?;
            write!(f, " | ")?;
        }
        write_command(f, &self.program, &self.args)
    }
}
