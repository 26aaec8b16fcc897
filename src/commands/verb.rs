use std::str::FromStr;

use derive_more::Display;
use snafu::Snafu;

/// Every command the shell understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Verb {
    #[display("ls")]
    Ls,
    #[display("cd")]
    Cd,
    #[display("pwd")]
    Pwd,
    #[display("find")]
    Find,
    #[display("vfs-info")]
    VfsInfo,
    #[display("help")]
    Help,
    #[display("chmod")]
    Chmod,
    #[display("conf-dump")]
    ConfDump,
    #[display("exit")]
    Exit,
    #[display("clear")]
    Clear,
}

impl Verb {
    /// Registration order, which is also the order `help` prints.
    pub const ALL: [Verb; 10] = [
        Verb::Ls,
        Verb::Cd,
        Verb::Pwd,
        Verb::Find,
        Verb::VfsInfo,
        Verb::Help,
        Verb::Chmod,
        Verb::ConfDump,
        Verb::Exit,
        Verb::Clear,
    ];

    pub fn usage(self) -> &'static str {
        match self {
            Verb::Ls => "ls [path]",
            Verb::Cd => "cd <path>",
            Verb::Pwd => "pwd",
            Verb::Find => "find <pattern>",
            Verb::VfsInfo => "vfs-info",
            Verb::Help => "help",
            Verb::Chmod => "chmod <mode> <path>",
            Verb::ConfDump => "conf-dump",
            Verb::Exit => "exit",
            Verb::Clear => "clear",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Verb::Ls => "List directory contents",
            Verb::Cd => "Change the current directory",
            Verb::Pwd => "Print the current directory",
            Verb::Find => "Search names below the current directory",
            Verb::VfsInfo => "Show the VFS label and structural hash",
            Verb::Help => "Show this help",
            Verb::Chmod => "Acknowledge a mode change (not enforced)",
            Verb::ConfDump => "Show the session configuration",
            Verb::Exit => "Leave the shell",
            Verb::Clear => "Clear the screen",
        }
    }
}

impl FromStr for Verb {
    type Err = UnknownVerbError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.to_string() == name)
            .ok_or_else(|| UnknownVerbError {
                name: name.to_string(),
            })
    }
}

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(display("unknown command: {}", name))]
pub struct UnknownVerbError {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_verb_parses_from_its_name() {
        for verb in Verb::ALL {
            assert_eq!(verb.to_string().parse::<Verb>(), Ok(verb));
        }
    }

    #[test]
    fn verb_names_are_case_sensitive() {
        assert!("LS".parse::<Verb>().is_err());
        assert_eq!(
            "1s".parse::<Verb>(),
            Err(UnknownVerbError {
                name: "1s".to_string()
            })
        );
    }

    #[test]
    fn usage_starts_with_name() {
        for verb in Verb::ALL {
            assert!(verb.usage().starts_with(&verb.to_string()));
        }
    }
}
