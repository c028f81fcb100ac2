// src/exec/mod.rs

//! Process execution layer.
//!
//! This module runs external programs with `tokio::process::Command` and
//! reports a single consolidated result per run.
//!
//! - [`descriptor`] describes one invocation and the paths it must validate.
//! - [`executor`] owns validation, launch and the aggregation loop.
//! - [`streams`] holds the background pipe readers.
//! - [`completion`] is the state machine joining stdout, stderr and exit.
//! - [`result`] is the caller-facing outcome.
//! - [`backend`] provides the `OperationBackend` trait, implemented by
//!   `GuardedExecutor` in production and by fakes in tests.

pub mod backend;
pub mod completion;
pub mod descriptor;
pub mod executor;
pub mod result;
pub mod streams;

pub use backend::OperationBackend;
pub use descriptor::{OperationDescriptor, ProducerCommand};
pub use executor::{ExecutionHandle, GuardedExecutor};
pub use result::ExecutionResult;
