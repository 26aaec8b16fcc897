use std::env;

const UNKNOWN: &str = "unknown";

/// Descriptive facts about the running session, shown by `conf-dump`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub vfs_source: Option<String>,
    pub startup_script: Option<String>,
    pub prompt: Option<String>,
    pub user: String,
    pub host: String,
}

impl Default for SessionInfo {
    fn default() -> Self {
        SessionInfo {
            vfs_source: None,
            startup_script: None,
            prompt: None,
            user: current_user(),
            host: current_host(),
        }
    }
}

impl SessionInfo {
    pub fn render(&self) -> String {
        [
            "Current configuration:".to_string(),
            format!(
                "  VFS source:     {}",
                self.vfs_source.as_deref().unwrap_or("built-in default")
            ),
            format!(
                "  Startup script: {}",
                self.startup_script.as_deref().unwrap_or("not set")
            ),
            format!(
                "  Prompt:         {}",
                self.prompt.as_deref().unwrap_or("default")
            ),
            format!("  User:           {}", self.user),
            format!("  Host:           {}", self.host),
        ]
        .join("\n")
    }
}

fn current_user() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

fn current_host() -> String {
    env::var("HOSTNAME")
        .or_else(|_| env::var("COMPUTERNAME"))
        .unwrap_or_else(|_| UNKNOWN.to_string())
}
