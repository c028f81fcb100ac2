// src/guard/mod.rs

//! Path validation for destructive operations.
//!
//! Every path handed to a destructive tool must pass a [`PathGuard`] first.
//! The guard is pure: it looks only at the path text and the configured
//! sandbox root, never at the filesystem.
//!
//! - [`policy`] holds the validation rules and the rejection taxonomy.
//! - [`sandbox`] holds the sandbox root type and the process-wide,
//!   initialise-once root.

pub mod policy;
pub mod sandbox;

pub use policy::{GLOB_METACHARACTERS, GuardKind, GuardRejection, GuardedPath, PathGuard};
pub use sandbox::{SandboxRoot, init_sandbox_root, sandbox_root};
