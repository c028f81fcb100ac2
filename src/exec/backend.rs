// src/exec/backend.rs

//! Pluggable execution backend.
//!
//! The operations façade talks to an `OperationBackend` instead of a
//! concrete executor, so tests can swap in a backend that records
//! descriptors without spawning anything.
//!
//! - [`GuardedExecutor`] is the production backend: it validates and runs
//!   real processes.
//! - Test backends can record the descriptors they receive and return
//!   canned [`ExecutionResult`]s.

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

use super::descriptor::OperationDescriptor;
use super::executor::GuardedExecutor;
use super::result::ExecutionResult;

/// Trait abstracting how operation descriptors are executed.
pub trait OperationBackend: Send + Sync {
    /// Run one descriptor to completion.
    ///
    /// Implementations that spawn processes must validate the descriptor's
    /// guarded paths before doing so.
    fn dispatch(
        &self,
        descriptor: OperationDescriptor,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + '_>>;
}

impl OperationBackend for GuardedExecutor {
    fn dispatch(
        &self,
        descriptor: OperationDescriptor,
    ) -> Pin<Box<dyn Future<Output = Result<ExecutionResult>> + Send + '_>> {
        Box::pin(async move { self.run(&descriptor).await })
    }
}
