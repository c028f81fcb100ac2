// src/ops/operation.rs

//! Logical filesystem operations and their command lines.

use std::path::PathBuf;

use crate::config::ToolPaths;
use crate::exec::{OperationDescriptor, ProducerCommand};

/// One destructive filesystem mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateFile { path: PathBuf },
    RemoveFile { path: PathBuf },
    CreateDirectory { path: PathBuf },
    /// Recursive removal.
    RemoveDirectory { path: PathBuf },
    /// Recursive copy; the source is left in place.
    CopyDirectory { source: PathBuf, destination: PathBuf },
    MoveItem { source: PathBuf, destination: PathBuf },
    /// Replace the file's contents with `contents` followed by a newline.
    /// The written text is also echoed on the result's stdout. `contents` is
    /// passed as a format argument, never parsed as options or escapes.
    WriteFile { path: PathBuf, contents: String },
}

impl Operation {
    /// Short, stable name used in logs and the CLI.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateFile { .. } => "create-file",
            Operation::RemoveFile { .. } => "remove-file",
            Operation::CreateDirectory { .. } => "create-directory",
            Operation::RemoveDirectory { .. } => "remove-directory",
            Operation::CopyDirectory { .. } => "copy-directory",
            Operation::MoveItem { .. } => "move-item",
            Operation::WriteFile { .. } => "write-file",
        }
    }

    /// Build the command line for this operation.
    ///
    /// Every path is registered as guarded; source/destination pairs use the
    /// stricter paired checks.
    pub fn descriptor(&self, tools: &ToolPaths) -> OperationDescriptor {
        match self {
            Operation::CreateFile { path } => OperationDescriptor::new(&tools.touch).target(path),
            Operation::RemoveFile { path } => OperationDescriptor::new(&tools.rm).target(path),
            Operation::CreateDirectory { path } => {
                OperationDescriptor::new(&tools.mkdir).target(path)
            }
            Operation::RemoveDirectory { path } => {
                OperationDescriptor::new(&tools.rm).arg("-r").target(path)
            }
            Operation::CopyDirectory {
                source,
                destination,
            } => OperationDescriptor::new(&tools.cp)
                .arg("-R")
                .paired_target(source)
                .paired_target(destination),
            Operation::MoveItem {
                source,
                destination,
            } => OperationDescriptor::new(&tools.mv)
                .paired_target(source)
                .paired_target(destination),
            Operation::WriteFile { path, contents } => OperationDescriptor::new(&tools.tee)
                .target(path)
                .stdin_from(
                    ProducerCommand::new(&tools.printf)
                        .arg("%s\n")
                        .arg(contents),
                ),
        }
    }
}
