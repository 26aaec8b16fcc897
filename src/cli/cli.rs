use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Shell emulator over an in-memory virtual file system.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// XML document describing the virtual file system
    #[clap(long)]
    pub vfs: Option<PathBuf>,

    /// Script of commands to run before the interactive session
    #[clap(long)]
    pub script: Option<PathBuf>,

    /// Custom prompt shown before every command
    #[clap(long)]
    pub prompt: Option<String>,

    /// YAML config file; defaults to vfsh.yaml in the working directory
    #[clap(long, short)]
    pub config: Option<PathBuf>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "vfsh",
            "--vfs",
            "fs.xml",
            "--script",
            "start.txt",
            "--prompt",
            "> ",
            "-c",
            "custom.yaml",
            "-l",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.vfs, Some(PathBuf::from("fs.xml")));
        assert_eq!(cli.script, Some(PathBuf::from("start.txt")));
        assert_eq!(cli.prompt.as_deref(), Some("> "));
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
        assert!(matches!(cli.log_level, LogLevel::Debug));
    }

    #[test]
    fn everything_is_optional() {
        let cli = Cli::try_parse_from(["vfsh"]).unwrap();

        assert!(cli.vfs.is_none());
        assert!(cli.config.is_none());
        assert!(matches!(cli.log_level, LogLevel::Warn));
    }
}
