// src/guard/sandbox.rs

//! The sandbox root and its process-wide instance.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, info};

use crate::errors::{Result, TmpguardError};

static SANDBOX_ROOT: OnceLock<SandboxRoot> = OnceLock::new();

/// Absolute directory below which destructive operations are allowed.
///
/// Construction normalises the path through its components, so
/// `/tmp/x/` and `/tmp/x` produce the same root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxRoot {
    path: PathBuf,
}

impl SandboxRoot {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let raw = path.as_ref();

        if !raw.is_absolute() {
            return Err(TmpguardError::ConfigError(format!(
                "sandbox root must be an absolute path (got {raw:?})"
            )));
        }

        let normalised: PathBuf = raw.components().collect();
        if normalised.parent().is_none() {
            return Err(TmpguardError::ConfigError(format!(
                "sandbox root must not be the filesystem root (got {raw:?})"
            )));
        }

        Ok(Self { path: normalised })
    }

    /// The platform temporary directory (`$TMPDIR`, `/tmp`, ...).
    pub fn temp_dir() -> Result<Self> {
        Self::new(std::env::temp_dir())
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }
}

impl AsRef<Path> for SandboxRoot {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Set the process-wide sandbox root.
///
/// The first call wins. Repeating the call with the same root is a no-op;
/// a different root is refused with
/// [`TmpguardError::SandboxAlreadyInitialised`].
pub fn init_sandbox_root(root: impl AsRef<Path>) -> Result<&'static SandboxRoot> {
    let requested = SandboxRoot::new(root)?;
    let stored = SANDBOX_ROOT.get_or_init(|| {
        info!(root = ?requested.as_path(), "sandbox root initialised");
        requested.clone()
    });

    if *stored == requested {
        debug!(root = ?stored.as_path(), "sandbox root already set to requested value");
        Ok(stored)
    } else {
        Err(TmpguardError::SandboxAlreadyInitialised {
            existing: stored.as_path().to_path_buf(),
            requested: requested.as_path().to_path_buf(),
        })
    }
}

/// The process-wide sandbox root, if [`init_sandbox_root`] has run.
pub fn sandbox_root() -> Option<&'static SandboxRoot> {
    SANDBOX_ROOT.get()
}
