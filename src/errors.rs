// src/errors.rs

//! Crate-wide error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::guard::GuardRejection;

#[derive(Error, Debug)]
pub enum TmpguardError {
    /// A guarded path failed validation; nothing was spawned.
    #[error("Guard rejection: {0}")]
    Rejected(#[from] GuardRejection),

    #[error("Sandbox root has not been initialised")]
    SandboxNotInitialised,

    #[error("Sandbox root is already initialised to {existing:?} (requested {requested:?})")]
    SandboxAlreadyInitialised {
        existing: PathBuf,
        requested: PathBuf,
    },

    #[error("Failed to spawn {program:?}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TmpguardError {
    /// The guard rejection behind this error, if that is what it is.
    pub fn as_rejection(&self) -> Option<&GuardRejection> {
        match self {
            TmpguardError::Rejected(r) => Some(r),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TmpguardError>;
