use std::path::PathBuf;

use crate::cli::Cli;
use crate::commands::SessionInfo;
use crate::config::ShellConfig;
use crate::ext::BestEffortPathExt;

/// Settings the session actually runs with: CLI flags first, then the config
/// file. Relative paths are taken from the working directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub vfs: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub prompt: Option<String>,
}

impl RuntimeConfig {
    pub fn merge(cli: &Cli, file: ShellConfig) -> Self {
        RuntimeConfig {
            vfs: cli.vfs.clone().or(file.vfs),
            script: cli.script.clone().or(file.script),
            prompt: cli.prompt.clone().or(file.prompt),
        }
    }

    pub fn session_info(&self) -> SessionInfo {
        SessionInfo {
            vfs_source: self.vfs.as_ref().map(|p| p.best_effort_path_display()),
            startup_script: self.script.as_ref().map(|p| p.best_effort_path_display()),
            prompt: self.prompt.clone(),
            ..SessionInfo::default()
        }
    }
}
