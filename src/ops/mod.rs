// src/ops/mod.rs

//! The filesystem operations offered on top of the guarded executor.
//!
//! [`Operation`] maps each logical mutation to a concrete command line;
//! [`FsOps`] runs them through an [`OperationBackend`](crate::exec::OperationBackend).

pub mod fs_ops;
pub mod operation;

pub use fs_ops::FsOps;
pub use operation::Operation;
