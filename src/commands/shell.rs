use snafu::prelude::*;
use tracing::{debug, warn};

use crate::navigator::{NavigationError, Vfs};

use super::{CommandOutput, SessionInfo, UnknownVerbError, Verb};

/// Command engine bound to one VFS.
///
/// Every session owns its own `Shell`; the navigation cursor is plain mutable
/// state and is not meant to be shared between callers.
#[derive(Debug, Clone, Default)]
pub struct Shell {
    vfs: Vfs,
    session: SessionInfo,
}

impl Shell {
    pub fn new(vfs: Vfs, session: SessionInfo) -> Self {
        Shell { vfs, session }
    }

    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    pub fn vfs_mut(&mut self) -> &mut Vfs {
        &mut self.vfs
    }

    pub fn session(&self) -> &SessionInfo {
        &self.session
    }

    pub fn get_path(&self) -> String {
        self.vfs.get_path()
    }

    pub fn list_directory(&self) -> Vec<String> {
        self.vfs.list_directory()
    }

    /// Runs one line and renders the outcome for text front ends.
    ///
    /// Never fails: errors come back as their message, control outputs as the
    /// `EXIT`/`CLEAR` sentinels and an empty line as an empty string.
    pub fn execute_command(&mut self, line: &str) -> String {
        match self.execute(line) {
            Ok(output) => output.into_string(),
            Err(e) => e.to_string(),
        }
    }

    /// Tokenizes `line` on whitespace and dispatches the verb.
    pub fn execute(&mut self, line: &str) -> Result<CommandOutput, CommandError> {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            return Ok(CommandOutput::empty());
        };
        let args: Vec<&str> = tokens.collect();

        let verb = name.parse::<Verb>().context(UnknownVerbSnafu)?;
        debug!("Executing '{}' with arguments {:?}", verb, args);

        self.dispatch(verb, &args).map_err(|source| {
            warn!("Command '{}' failed: {}", verb, source);
            CommandError::CommandFailed { verb, source }
        })
    }

    fn dispatch(&mut self, verb: Verb, args: &[&str]) -> Result<CommandOutput, HandlerError> {
        match verb {
            Verb::Ls => Ok(self.ls(args)),
            Verb::Cd => self.cd(args),
            Verb::Pwd => Ok(CommandOutput::Text(self.vfs.get_path())),
            Verb::Find => self.find(args),
            Verb::VfsInfo => Ok(self.vfs_info()),
            Verb::Help => Ok(help()),
            Verb::Chmod => chmod(args),
            Verb::ConfDump => Ok(CommandOutput::Text(self.session.render())),
            Verb::Exit => Ok(CommandOutput::Exit),
            Verb::Clear => Ok(CommandOutput::Clear),
        }
    }

    fn ls(&self, args: &[&str]) -> CommandOutput {
        CommandOutput::lines(self.vfs.list(args.first().copied()))
    }

    fn cd(&mut self, args: &[&str]) -> Result<CommandOutput, HandlerError> {
        let path = args.first().context(MissingArgumentSnafu {
            what: "directory operand",
        })?;
        self.vfs.resolve_and_enter(path).context(NavigationSnafu)?;
        Ok(CommandOutput::empty())
    }

    fn find(&self, args: &[&str]) -> Result<CommandOutput, HandlerError> {
        let pattern = args
            .first()
            .context(MissingArgumentSnafu { what: "pattern" })?;
        Ok(CommandOutput::lines(self.vfs.find(pattern, None)))
    }

    fn vfs_info(&self) -> CommandOutput {
        CommandOutput::Text(format!(
            "VFS: {}\nNodes: {}\nSHA-256: {}",
            self.vfs.label(),
            self.vfs.tree().node_count(),
            self.vfs.structural_hash()
        ))
    }
}

fn help() -> CommandOutput {
    let mut lines = vec!["Available commands:".to_string()];
    lines.extend(
        Verb::ALL
            .into_iter()
            .map(|verb| format!("  {:<22}{}", verb.usage(), verb.description())),
    );
    CommandOutput::lines(lines)
}

// Permissions are not modelled; the request is only acknowledged.
fn chmod(args: &[&str]) -> Result<CommandOutput, HandlerError> {
    let mode = args.first().context(MissingArgumentSnafu { what: "mode" })?;
    let path = args.get(1).context(MissingArgumentSnafu {
        what: "file operand",
    })?;
    Ok(CommandOutput::Text(format!(
        "mode of '{}' changed to {}",
        path, mode
    )))
}

#[derive(Debug, Snafu)]
pub enum HandlerError {
    #[snafu(display("missing {}", what))]
    MissingArgument { what: &'static str },
    #[snafu(display("{}", source))]
    NavigationError { source: NavigationError },
}

#[derive(Debug, Snafu)]
pub enum CommandError {
    #[snafu(display("{}", source))]
    UnknownVerb { source: UnknownVerbError },
    #[snafu(display("{}: {}", verb, source))]
    CommandFailed { verb: Verb, source: HandlerError },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CLEAR_SENTINEL, EXIT_SENTINEL};
    use rstest::*;

    fn shell() -> Shell {
        Shell::new(Vfs::bootstrap(), SessionInfo::default())
    }

    #[test]
    fn navigating_home_then_user() {
        let mut shell = shell();

        assert_eq!(shell.execute_command("cd home"), "");
        assert_eq!(shell.execute_command("pwd"), "/home");
        assert_eq!(shell.execute_command("cd user"), "");
        assert_eq!(shell.execute_command("ls"), "readme.txt\nconfig.txt");
    }

    #[test]
    fn failed_cd_reports_and_keeps_directory() {
        let mut shell = shell();
        shell.execute_command("cd /home");

        let output = shell.execute_command("cd /does/not/exist");

        assert_eq!(output, "cd: /does/not/exist: No such directory");
        assert_eq!(shell.execute_command("pwd"), "/home");
    }

    #[test]
    fn find_from_root_reports_user_directory() {
        let mut shell = shell();

        let output = shell.execute_command("find user");

        assert!(output.lines().any(|line| line == "/home/user"));
    }

    #[test]
    fn find_without_match_prints_nothing() {
        assert_eq!(shell().execute_command("find zzz"), "");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_lines_produce_no_output(#[case] line: &str) {
        assert_eq!(shell().execute_command(line), "");
    }

    #[test]
    fn unknown_verbs_are_reported() {
        let mut shell = shell();

        assert_eq!(shell.execute_command("1s -la"), "unknown command: 1s");
        assert!(matches!(
            shell.execute("rm -rf /"),
            Err(CommandError::UnknownVerb { .. })
        ));
    }

    #[rstest]
    #[case("cd", "cd: missing directory operand")]
    #[case("find", "find: missing pattern")]
    #[case("chmod", "chmod: missing mode")]
    #[case("chmod 755", "chmod: missing file operand")]
    #[case("cd /home/user/readme.txt", "cd: /home/user/readme.txt: Not a directory")]
    fn handler_errors_carry_verb_name(#[case] line: &str, #[case] expected: &str) {
        let mut shell = shell();
        assert_eq!(shell.execute_command(line), expected);
        assert_eq!(shell.get_path(), "/");
    }

    #[test]
    fn typed_errors_keep_the_failing_verb() {
        let mut shell = shell();

        let result = shell.execute("cd nowhere");

        assert!(matches!(
            result,
            Err(CommandError::CommandFailed {
                verb: Verb::Cd,
                source: HandlerError::NavigationError { .. }
            })
        ));
    }

    #[test]
    fn ls_accepts_a_path_and_ignores_bad_ones() {
        let mut shell = shell();

        assert_eq!(shell.execute_command("ls /etc"), "hosts");
        assert_eq!(shell.execute_command("ls /nope"), "");
        assert_eq!(shell.execute_command("ls"), "home\netc\nvar");
    }

    #[test]
    fn control_verbs_return_sentinels() {
        let mut shell = shell();

        assert_eq!(shell.execute_command("exit"), EXIT_SENTINEL);
        assert_eq!(shell.execute_command("clear"), CLEAR_SENTINEL);
        assert_eq!(shell.execute("exit now").unwrap(), CommandOutput::Exit);
    }

    #[test]
    fn help_lists_every_verb() {
        let output = shell().execute_command("help");

        for verb in Verb::ALL {
            assert!(output.contains(verb.usage()), "help is missing {verb}");
        }
    }

    #[test]
    fn vfs_info_reports_label_and_hash() {
        let mut shell = shell();
        let output = shell.execute_command("vfs-info");

        assert!(output.contains("VFS: default"));
        assert!(output.contains(&shell.vfs().structural_hash()));
    }

    #[test]
    fn chmod_only_acknowledges() {
        let mut shell = shell();
        let hash_before = shell.vfs().structural_hash();

        let output = shell.execute_command("chmod 644 /home/user/readme.txt");

        assert_eq!(output, "mode of '/home/user/readme.txt' changed to 644");
        assert_eq!(shell.vfs().structural_hash(), hash_before);
    }

    #[test]
    fn conf_dump_shows_session() {
        let session = SessionInfo {
            vfs_source: Some("demo.xml".into()),
            startup_script: None,
            prompt: Some("$ ".into()),
            user: "alice".into(),
            host: "box".into(),
        };
        let mut shell = Shell::new(Vfs::bootstrap(), session);

        let output = shell.execute_command("conf-dump");

        assert!(output.contains("demo.xml"));
        assert!(output.contains("not set"));
        assert!(output.contains("alice"));
        assert!(output.contains("box"));
    }
}
