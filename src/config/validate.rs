// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile, ToolPaths};
use crate::errors::{Result, TmpguardError};
use crate::guard::SandboxRoot;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::TmpguardError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_tools(&raw.tools)?;
        let root = resolve_sandbox_root(&raw)?;
        Ok(ConfigFile::new_unchecked(root, raw.tools))
    }
}

fn resolve_sandbox_root(cfg: &RawConfigFile) -> Result<SandboxRoot> {
    match cfg.sandbox.root {
        Some(ref root) => SandboxRoot::new(root).map_err(|e| match e {
            TmpguardError::ConfigError(msg) => {
                TmpguardError::ConfigError(format!("[sandbox].root: {msg}"))
            }
            other => other,
        }),
        None => SandboxRoot::temp_dir(),
    }
}

fn validate_tools(tools: &ToolPaths) -> Result<()> {
    for (name, path) in tools.entries() {
        if path.as_os_str().is_empty() {
            return Err(TmpguardError::ConfigError(format!(
                "[tools].{name} must not be empty"
            )));
        }
    }
    Ok(())
}
