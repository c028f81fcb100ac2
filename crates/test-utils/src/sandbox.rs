use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tmpguard::config::ToolPaths;
use tmpguard::exec::GuardedExecutor;
use tmpguard::guard::{PathGuard, SandboxRoot};
use tmpguard::ops::FsOps;

/// A fresh temporary directory acting as the sandbox root for one test.
///
/// Each fixture gets its own root, so tests running in parallel cannot see
/// each other's files even though they share a process.
pub struct TestSandbox {
    dir: TempDir,
    executor: GuardedExecutor,
}

impl TestSandbox {
    pub fn new() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("tmpguard-test-")
            .tempdir()
            .expect("failed to create temporary sandbox");
        let root = SandboxRoot::new(dir.path()).expect("temporary dir is a valid sandbox root");
        let executor = GuardedExecutor::new(PathGuard::new(root));
        Self { dir, executor }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// `root/<relative>`.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn executor(&self) -> &GuardedExecutor {
        &self.executor
    }

    pub fn ops(&self) -> FsOps {
        FsOps::new(self.executor.clone(), ToolPaths::default())
    }
}

impl Default for TestSandbox {
    fn default() -> Self {
        Self::new()
    }
}
