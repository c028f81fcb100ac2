// src/exec/result.rs

/// Consolidated outcome of one guarded execution.
///
/// `stdout` / `stderr` are `None` when the stream produced no bytes at all,
/// and `Some` (possibly only whitespace) otherwise. The exit code is passed
/// through untouched; a process killed by a signal reports `-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub exit_code: i32,
    /// The execution was cancelled through its
    /// [`ExecutionHandle`](super::ExecutionHandle).
    pub cancelled: bool,
}

impl ExecutionResult {
    /// Exit code 0 and not cancelled. Stderr content is not considered.
    pub fn success(&self) -> bool {
        self.exit_code == 0 && !self.cancelled
    }

    /// True when neither stream produced any output.
    pub fn is_silent(&self) -> bool {
        self.stdout.is_none() && self.stderr.is_none()
    }
}
