// src/exec/executor.rs

//! Guarded process execution.
//!
//! [`GuardedExecutor`] validates a descriptor's paths, spawns the program
//! with stdout and stderr on two separate pipes, and aggregates everything
//! into one [`ExecutionResult`] delivered exactly once.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::errors::{Result, TmpguardError};
use crate::guard::PathGuard;

use super::completion::Completion;
use super::descriptor::{OperationDescriptor, ProducerCommand};
use super::result::ExecutionResult;
use super::streams::{StreamEvent, StreamKind, spawn_reader};

/// Runs operation descriptors, refusing any whose paths fail the guard.
#[derive(Debug, Clone)]
pub struct GuardedExecutor {
    guard: PathGuard,
}

impl GuardedExecutor {
    pub fn new(guard: PathGuard) -> Self {
        Self { guard }
    }

    /// Executor bound to the process-wide sandbox root.
    pub fn global() -> Result<Self> {
        Ok(Self::new(PathGuard::global()?))
    }

    pub fn guard(&self) -> &PathGuard {
        &self.guard
    }

    /// Validate, launch, and return immediately.
    ///
    /// `on_complete` runs exactly once on a background Tokio task after the
    /// process has exited and both of its output streams are drained. Guard
    /// rejections and spawn failures are returned here instead and the
    /// callback is dropped without being called.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn execute<F>(&self, descriptor: &OperationDescriptor, on_complete: F) -> Result<ExecutionHandle>
    where
        F: FnOnce(ExecutionResult) + Send + 'static,
    {
        let launched = self.launch(descriptor)?;
        let pid = launched.pid;
        let (cancel_tx, cancel_rx) = oneshot::channel();

        let join = tokio::spawn(async move {
            let result = launched.drive(cancel_rx).await;
            on_complete(result);
        });

        Ok(ExecutionHandle {
            cancel: Some(cancel_tx),
            join,
            pid,
        })
    }

    /// Validate, launch, and wait for the aggregated result.
    pub async fn run(&self, descriptor: &OperationDescriptor) -> Result<ExecutionResult> {
        let launched = self.launch(descriptor)?;
        let (_cancel_tx, cancel_rx) = oneshot::channel();
        Ok(launched.drive(cancel_rx).await)
    }

    fn launch(&self, descriptor: &OperationDescriptor) -> Result<Launched> {
        // Nothing below this line runs for a rejected path.
        self.guard.check_all(descriptor.guarded_paths())?;

        let mut cmd = Command::new(descriptor.program());
        cmd.args(descriptor.args())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        match descriptor.producer() {
            Some(producer) => {
                let stdin = spawn_producer(producer)?;
                cmd.stdin(stdin);
            }
            None => {
                cmd.stdin(Stdio::null());
            }
        }

        let mut child = cmd.spawn().map_err(|source| TmpguardError::Spawn {
            program: descriptor.program().to_path_buf(),
            source,
        })?;

        let pid = child.id();
        info!(
            program = %descriptor.program().display(),
            pid,
            command = %descriptor,
            "launched process"
        );

        let (tx, events) = mpsc::channel::<StreamEvent>(64);
        if let Some(stdout) = child.stdout.take() {
            spawn_reader(StreamKind::Stdout, stdout, tx.clone());
        }
        if let Some(stderr) = child.stderr.take() {
            spawn_reader(StreamKind::Stderr, stderr, tx.clone());
        }
        // Readers hold the only senders; the channel closes once both finish.
        drop(tx);

        Ok(Launched {
            child,
            events,
            program: descriptor.program().to_path_buf(),
            pid,
        })
    }
}

/// Spawn the upstream half of a pipeline and hand back its stdout as a
/// `Stdio` for the managed process. The producer is reaped in the background.
fn spawn_producer(producer: &ProducerCommand) -> Result<Stdio> {
    let mut child = Command::new(&producer.program)
        .args(&producer.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| TmpguardError::Spawn {
            program: producer.program.clone(),
            source,
        })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow::anyhow!("producer {:?} has no stdout pipe", producer.program))?;
    let stdio: Stdio = stdout.try_into()?;

    let program = producer.program.clone();
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => debug!(program = %program.display(), ?status, "producer exited"),
            Err(e) => warn!(program = %program.display(), error = %e, "failed to reap producer"),
        }
    });

    Ok(stdio)
}

/// A spawned child plus the receiving end of its stream events.
struct Launched {
    child: Child,
    events: mpsc::Receiver<StreamEvent>,
    program: PathBuf,
    pid: Option<u32>,
}

impl Launched {
    /// Serialise stream chunks, exit and cancellation onto this one task
    /// until the run is complete.
    async fn drive(mut self, mut cancel_rx: oneshot::Receiver<CancelRequest>) -> ExecutionResult {
        let mut completion = Completion::new();
        let mut cancel_armed = true;

        while !completion.is_complete() {
            tokio::select! {
                // Pending stream data is always applied before exit.
                biased;

                event = self.events.recv(), if !completion.streams_closed() => {
                    match event {
                        Some(event) => completion.apply(event),
                        None => completion.close_streams(),
                    }
                }

                status = self.child.wait(), if !completion.has_exited() => {
                    let code = match status {
                        Ok(status) => exit_code(status),
                        Err(e) => {
                            error!(
                                program = %self.program.display(),
                                pid = self.pid,
                                error = %e,
                                "failed waiting for process"
                            );
                            -1
                        }
                    };
                    debug!(pid = self.pid, exit_code = code, phase = ?completion.phase(), "process exited");
                    completion.record_exit(code);
                }

                request = &mut cancel_rx, if cancel_armed => {
                    cancel_armed = false;
                    if let Ok(reply) = request {
                        let killed = self.kill_for_cancel(&mut completion);
                        let _ = reply.send(killed);
                    }
                }
            }
        }

        let result = completion.finish();
        info!(
            program = %self.program.display(),
            pid = self.pid,
            exit_code = result.exit_code,
            cancelled = result.cancelled,
            has_stderr = result.stderr.is_some(),
            "process completed"
        );
        result
    }

    /// Kill the child unless its exit has already been observed.
    fn kill_for_cancel(&mut self, completion: &mut Completion) -> bool {
        if completion.has_exited() {
            debug!(pid = self.pid, "cancellation requested after exit; nothing to kill");
            return false;
        }
        info!(pid = self.pid, program = %self.program.display(), "cancellation requested; killing process");
        match self.child.start_kill() {
            Ok(()) => {
                completion.mark_cancelled();
                true
            }
            Err(e) => {
                warn!(pid = self.pid, error = %e, "failed to kill process on cancellation");
                false
            }
        }
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// Sent by [`ExecutionHandle::cancel`]; answered with whether a kill was issued.
type CancelRequest = oneshot::Sender<bool>;

/// Handle to an execution started with [`GuardedExecutor::execute`].
///
/// Dropping the handle does not stop the process; the callback still fires.
#[derive(Debug)]
pub struct ExecutionHandle {
    cancel: Option<oneshot::Sender<CancelRequest>>,
    join: JoinHandle<()>,
    pid: Option<u32>,
}

impl ExecutionHandle {
    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Kill the process and report whether that happened.
    ///
    /// Returns `true` only if the kill was issued, in which case the result
    /// carries `cancelled = true`. Returns `false` if a request was already
    /// made or the process had already exited. The completion callback fires
    /// exactly once either way.
    pub async fn cancel(&mut self) -> bool {
        let Some(tx) = self.cancel.take() else {
            return false;
        };
        let (reply_tx, reply_rx) = oneshot::channel();
        if tx.send(reply_tx).is_err() {
            return false;
        }
        reply_rx.await.unwrap_or(false)
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait until the completion callback has returned.
    pub async fn join(self) -> Result<()> {
        self.join.await.map_err(anyhow::Error::from)?;
        Ok(())
    }
}
