use snafu::Snafu;
use tracing::{debug, info};

use super::{CommandError, CommandOutput, Shell};

/// A command line of a startup script, numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine<'a> {
    pub number: usize,
    pub command: &'a str,
}

/// Lines of `source` that carry a command; blank lines and `#` comments are skipped.
pub fn script_lines(source: &str) -> impl Iterator<Item = ScriptLine<'_>> {
    source
        .lines()
        .enumerate()
        .map(|(index, line)| ScriptLine {
            number: index + 1,
            command: line.trim(),
        })
        .filter(|line| !line.command.is_empty() && !line.command.starts_with('#'))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptOutcome {
    pub executed: usize,
    /// The script ran `exit`; the session should end.
    pub exited: bool,
}

impl Shell {
    /// Plays `source` back line by line, handing every result to `on_output`.
    ///
    /// Playback stops at the first unknown verb or failing command, leaving the
    /// VFS as the last successful command left it, and at `exit`.
    pub fn run_script<F>(&mut self, source: &str, mut on_output: F) -> Result<ScriptOutcome, ScriptError>
    where
        F: FnMut(&ScriptLine<'_>, &CommandOutput),
    {
        let mut outcome = ScriptOutcome::default();

        for line in script_lines(source) {
            debug!("[{}] {}", line.number, line.command);
            let output = self.execute(line.command).map_err(|source| ScriptError {
                line: line.number,
                command: line.command.to_string(),
                source,
            })?;

            outcome.executed += 1;
            on_output(&line, &output);

            if output == CommandOutput::Exit {
                info!("Script requested exit on line {}", line.number);
                outcome.exited = true;
                break;
            }
        }

        info!("Script finished after {} commands", outcome.executed);
        Ok(outcome)
    }
}

#[derive(Debug, Snafu)]
#[snafu(display("Script halted on line {} ('{}'): {}", line, command, source))]
pub struct ScriptError {
    pub line: usize,
    pub command: String,
    pub source: CommandError,
}
