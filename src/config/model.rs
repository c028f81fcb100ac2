// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::guard::{PathGuard, SandboxRoot};

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [sandbox]
/// root = "/tmp"
///
/// [tools]
/// touch = "/usr/bin/touch"
/// rm = "/bin/rm"
/// ```
///
/// Both sections are optional. Without a `root` the platform temporary
/// directory is used; tools default to bare names resolved through `PATH`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub sandbox: SandboxSection,

    #[serde(default)]
    pub tools: ToolPaths,
}

/// `[sandbox]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SandboxSection {
    /// Absolute directory that every destructive operation must stay under.
    pub root: Option<PathBuf>,
}

/// `[tools]` section: the program used for each operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolPaths {
    pub touch: PathBuf,
    pub rm: PathBuf,
    pub mkdir: PathBuf,
    pub cp: PathBuf,
    pub mv: PathBuf,
    /// Producer half of the write pipeline.
    pub printf: PathBuf,
    /// Consumer half of the write pipeline.
    pub tee: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            touch: PathBuf::from("touch"),
            rm: PathBuf::from("rm"),
            mkdir: PathBuf::from("mkdir"),
            cp: PathBuf::from("cp"),
            mv: PathBuf::from("mv"),
            printf: PathBuf::from("printf"),
            tee: PathBuf::from("tee"),
        }
    }
}

impl ToolPaths {
    pub(crate) fn entries(&self) -> [(&'static str, &PathBuf); 7] {
        [
            ("touch", &self.touch),
            ("rm", &self.rm),
            ("mkdir", &self.mkdir),
            ("cp", &self.cp),
            ("mv", &self.mv),
            ("printf", &self.printf),
            ("tee", &self.tee),
        ]
    }
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub sandbox_root: SandboxRoot,
    pub tools: ToolPaths,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(sandbox_root: SandboxRoot, tools: ToolPaths) -> Self {
        Self {
            sandbox_root,
            tools,
        }
    }

    pub fn path_guard(&self) -> PathGuard {
        PathGuard::new(self.sandbox_root.clone())
    }
}
