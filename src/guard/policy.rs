// src/guard/policy.rs

//! Sandbox validation rules.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::errors::{Result, TmpguardError};

use super::sandbox::{SandboxRoot, sandbox_root};

/// Characters that make a path look like a glob pattern.
pub const GLOB_METACHARACTERS: [char; 3] = ['*', '?', '['];

/// Why a path was refused.
///
/// A rejection is a contract violation by the caller, not a transient fault:
/// the operation is abandoned before any process exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardRejection {
    #[error("path {path:?} contains the wildcard character {wildcard:?}")]
    Wildcard { path: PathBuf, wildcard: char },

    #[error("path {path:?} is not absolute")]
    NotAbsolute { path: PathBuf },

    #[error("path {path:?} contains a parent-directory component")]
    ParentTraversal { path: PathBuf },

    #[error("path {path:?} is outside the sandbox root {root:?}")]
    OutsideSandbox { path: PathBuf, root: PathBuf },

    #[error("path {path:?} is the sandbox root itself")]
    SandboxRootItself { path: PathBuf },

    #[error("path {path:?} ends with a path separator")]
    TrailingSeparator { path: PathBuf },
}

impl GuardRejection {
    pub fn path(&self) -> &Path {
        match self {
            GuardRejection::Wildcard { path, .. }
            | GuardRejection::NotAbsolute { path }
            | GuardRejection::ParentTraversal { path }
            | GuardRejection::OutsideSandbox { path, .. }
            | GuardRejection::SandboxRootItself { path }
            | GuardRejection::TrailingSeparator { path } => path,
        }
    }
}

/// How strictly a path is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardKind {
    /// A lone target path.
    Single,
    /// One side of a source/destination pair; must not end with a separator.
    Paired,
}

/// A path an operation needs validated before it may launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardedPath {
    pub path: PathBuf,
    pub kind: GuardKind,
}

impl GuardedPath {
    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: GuardKind::Single,
        }
    }

    pub fn paired(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: GuardKind::Paired,
        }
    }
}

/// Validates paths against one sandbox root.
#[derive(Debug, Clone)]
pub struct PathGuard {
    root: SandboxRoot,
}

impl PathGuard {
    pub fn new(root: SandboxRoot) -> Self {
        Self { root }
    }

    /// Guard bound to the process-wide root set by
    /// [`init_sandbox_root`](super::init_sandbox_root).
    pub fn global() -> Result<Self> {
        sandbox_root()
            .cloned()
            .map(Self::new)
            .ok_or(TmpguardError::SandboxNotInitialised)
    }

    pub fn root(&self) -> &SandboxRoot {
        &self.root
    }

    /// Check a single target path.
    ///
    /// Rules are applied in order: wildcard, absolute, parent traversal,
    /// sandbox containment, root itself. A wildcard is therefore reported
    /// even when the path is also outside the sandbox.
    pub fn validate(&self, path: &Path) -> std::result::Result<(), GuardRejection> {
        let text = path.to_string_lossy();
        if let Some(wildcard) = text.chars().find(|c| GLOB_METACHARACTERS.contains(c)) {
            return Err(GuardRejection::Wildcard {
                path: path.to_path_buf(),
                wildcard,
            });
        }

        if !path.is_absolute() {
            return Err(GuardRejection::NotAbsolute {
                path: path.to_path_buf(),
            });
        }

        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(GuardRejection::ParentTraversal {
                path: path.to_path_buf(),
            });
        }

        let root = self.root.as_path();
        if !path.starts_with(root) {
            return Err(GuardRejection::OutsideSandbox {
                path: path.to_path_buf(),
                root: root.to_path_buf(),
            });
        }

        if path == root {
            return Err(GuardRejection::SandboxRootItself {
                path: path.to_path_buf(),
            });
        }

        Ok(())
    }

    /// Check one side of a source/destination pair.
    pub fn validate_paired(&self, path: &Path) -> std::result::Result<(), GuardRejection> {
        self.validate(path)?;

        let text = path.to_string_lossy();
        if text.chars().last().is_some_and(std::path::is_separator) {
            return Err(GuardRejection::TrailingSeparator {
                path: path.to_path_buf(),
            });
        }

        Ok(())
    }

    pub fn check(&self, guarded: &GuardedPath) -> std::result::Result<(), GuardRejection> {
        let res = match guarded.kind {
            GuardKind::Single => self.validate(&guarded.path),
            GuardKind::Paired => self.validate_paired(&guarded.path),
        };

        if let Err(ref rejection) = res {
            warn!(path = ?guarded.path, reason = %rejection, "guard rejected path");
        }

        res
    }

    /// Check every path, stopping at the first rejection.
    pub fn check_all<'a, I>(&self, paths: I) -> std::result::Result<(), GuardRejection>
    where
        I: IntoIterator<Item = &'a GuardedPath>,
    {
        paths.into_iter().try_for_each(|p| self.check(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> PathGuard {
        PathGuard::new(SandboxRoot::new("/tmp/x/").unwrap())
    }

    #[test]
    fn accepts_path_inside_root() {
        assert_eq!(guard().validate(Path::new("/tmp/x/Test File")), Ok(()));
        assert_eq!(guard().validate(Path::new("/tmp/x/a/b/c")), Ok(()));
    }

    #[test]
    fn rejects_wildcard_even_inside_root() {
        let err = guard().validate(Path::new("/tmp/x/*")).unwrap_err();
        assert_eq!(
            err,
            GuardRejection::Wildcard {
                path: PathBuf::from("/tmp/x/*"),
                wildcard: '*',
            }
        );
    }

    #[test]
    fn wildcard_is_reported_before_containment() {
        let err = guard().validate(Path::new("/etc/*.conf")).unwrap_err();
        assert!(matches!(err, GuardRejection::Wildcard { .. }));
    }

    #[test]
    fn rejects_sibling_with_shared_string_prefix() {
        let err = guard().validate(Path::new("/tmp/xyz/file")).unwrap_err();
        assert!(matches!(err, GuardRejection::OutsideSandbox { .. }));
    }

    #[test]
    fn rejects_parent_traversal_out_of_root() {
        let err = guard().validate(Path::new("/tmp/x/../../etc/passwd")).unwrap_err();
        assert!(matches!(err, GuardRejection::ParentTraversal { .. }));
    }

    #[test]
    fn rejects_relative_path() {
        let err = guard().validate(Path::new("x/file")).unwrap_err();
        assert!(matches!(err, GuardRejection::NotAbsolute { .. }));
    }

    #[test]
    fn rejects_the_root_itself() {
        let err = guard().validate(Path::new("/tmp/x/")).unwrap_err();
        assert!(matches!(err, GuardRejection::SandboxRootItself { .. }));
    }

    #[test]
    fn trailing_separator_only_matters_for_pairs() {
        let path = Path::new("/tmp/x/dir/");
        assert_eq!(guard().validate(path), Ok(()));
        assert!(matches!(
            guard().validate_paired(path),
            Err(GuardRejection::TrailingSeparator { .. })
        ));
        assert_eq!(guard().validate_paired(Path::new("/tmp/x/dir")), Ok(()));
    }

    #[test]
    fn check_all_stops_at_first_rejection() {
        let paths = [
            GuardedPath::paired("/tmp/x/src"),
            GuardedPath::paired("/home/user/dst"),
            GuardedPath::paired("/tmp/x/*"),
        ];
        let err = guard().check_all(&paths).unwrap_err();
        assert_eq!(err.path(), Path::new("/home/user/dst"));
    }
}
