// src/ops/fs_ops.rs

use std::path::Path;

use tracing::debug;

use crate::config::{ConfigFile, ToolPaths};
use crate::errors::Result;
use crate::exec::{ExecutionHandle, ExecutionResult, GuardedExecutor, OperationBackend};

use super::operation::Operation;

/// Sandboxed filesystem mutations performed through external tools.
///
/// Generic over the backend so tests can observe the generated command lines
/// without spawning anything. Production code uses [`GuardedExecutor`].
#[derive(Debug, Clone)]
pub struct FsOps<B = GuardedExecutor> {
    backend: B,
    tools: ToolPaths,
}

impl FsOps<GuardedExecutor> {
    /// Façade using the validated config's sandbox root and tools.
    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self::new(GuardedExecutor::new(cfg.path_guard()), cfg.tools.clone())
    }

    /// Façade bound to the process-wide sandbox root with default tools.
    pub fn global() -> Result<Self> {
        Ok(Self::new(GuardedExecutor::global()?, ToolPaths::default()))
    }

    /// Callback form: validate and launch now, report later.
    ///
    /// See [`GuardedExecutor::execute`] for the delivery guarantees.
    pub fn dispatch<F>(&self, op: &Operation, on_complete: F) -> Result<ExecutionHandle>
    where
        F: FnOnce(ExecutionResult) + Send + 'static,
    {
        let descriptor = op.descriptor(&self.tools);
        debug!(operation = op.name(), command = %descriptor, "dispatching operation");
        self.backend.execute(&descriptor, on_complete)
    }
}

impl<B: OperationBackend> FsOps<B> {
    pub fn new(backend: B, tools: ToolPaths) -> Self {
        Self { backend, tools }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn tools(&self) -> &ToolPaths {
        &self.tools
    }

    /// Run `op` and wait for its result.
    pub async fn perform(&self, op: Operation) -> Result<ExecutionResult> {
        let descriptor = op.descriptor(&self.tools);
        debug!(operation = op.name(), command = %descriptor, "performing operation");
        self.backend.dispatch(descriptor).await
    }

    pub async fn create_file(&self, path: impl AsRef<Path>) -> Result<ExecutionResult> {
        self.perform(Operation::CreateFile {
            path: path.as_ref().to_path_buf(),
        })
        .await
    }

    pub async fn remove_file(&self, path: impl AsRef<Path>) -> Result<ExecutionResult> {
        self.perform(Operation::RemoveFile {
            path: path.as_ref().to_path_buf(),
        })
        .await
    }

    pub async fn create_directory(&self, path: impl AsRef<Path>) -> Result<ExecutionResult> {
        self.perform(Operation::CreateDirectory {
            path: path.as_ref().to_path_buf(),
        })
        .await
    }

    pub async fn remove_directory(&self, path: impl AsRef<Path>) -> Result<ExecutionResult> {
        self.perform(Operation::RemoveDirectory {
            path: path.as_ref().to_path_buf(),
        })
        .await
    }

    pub async fn copy_directory(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<ExecutionResult> {
        self.perform(Operation::CopyDirectory {
            source: source.as_ref().to_path_buf(),
            destination: destination.as_ref().to_path_buf(),
        })
        .await
    }

    pub async fn move_item(
        &self,
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<ExecutionResult> {
        self.perform(Operation::MoveItem {
            source: source.as_ref().to_path_buf(),
            destination: destination.as_ref().to_path_buf(),
        })
        .await
    }

    pub async fn write_to_file(
        &self,
        path: impl AsRef<Path>,
        contents: impl Into<String>,
    ) -> Result<ExecutionResult> {
        self.perform(Operation::WriteFile {
            path: path.as_ref().to_path_buf(),
            contents: contents.into(),
        })
        .await
    }
}
