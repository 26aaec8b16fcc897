use std::io::{self, BufRead, Write};

use colored::Colorize;
use supports_color::Stream;
use tracing::debug;

use crate::commands::{CommandOutput, ScriptLine, Shell};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Line-oriented front end: prompt, read, execute, print.
#[derive(Debug, Clone)]
pub struct Terminal {
    prompt: Option<String>,
    color: bool,
}

impl Terminal {
    pub fn new(prompt: Option<String>) -> Self {
        let color = supports_color::on(Stream::Stdout).is_some();
        debug!("Terminal color support: {}", color);
        Terminal { prompt, color }
    }

    pub fn plain(prompt: Option<String>) -> Self {
        Terminal {
            prompt,
            color: false,
        }
    }

    pub fn prompt(&self, shell: &Shell) -> String {
        match &self.prompt {
            Some(prompt) => prompt.clone(),
            None => {
                let session = shell.session();
                let prompt = format!("{}@{}:{}$ ", session.user, session.host, shell.get_path());
                self.paint(&prompt, |s| s.green().bold().to_string())
            }
        }
    }

    pub fn banner(&self, shell: &Shell, out: &mut impl Write) -> io::Result<()> {
        let text = format!(
            "vfsh: virtual file system '{}' ({} nodes)\nType 'help' for the list of commands.",
            shell.vfs().label(),
            shell.vfs().tree().node_count()
        );
        writeln!(out, "{}", self.paint(&text, |s| s.cyan().to_string()))
    }

    pub fn error(&self, message: &str, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", self.paint(message, |s| s.red().to_string()))
    }

    /// Echoes a script line and its output as playback progresses.
    pub fn script_step(
        &self,
        line: &ScriptLine<'_>,
        output: &CommandOutput,
        out: &mut impl Write,
    ) -> io::Result<()> {
        let echo = format!("[{}] {}", line.number, line.command);
        writeln!(out, "{}", self.paint(&echo, |s| s.yellow().to_string()))?;
        self.output(output, out)
    }

    /// Prints a command result; `exit` is left to the caller.
    pub fn output(&self, output: &CommandOutput, out: &mut impl Write) -> io::Result<()> {
        match output {
            CommandOutput::Text(text) if text.is_empty() => Ok(()),
            CommandOutput::Text(text) => writeln!(out, "{text}"),
            CommandOutput::Clear => write!(out, "{CLEAR_SCREEN}"),
            CommandOutput::Exit => Ok(()),
        }
    }

    /// Reads commands from `input` until `exit` or end of input.
    pub fn run(
        &self,
        shell: &mut Shell,
        mut input: impl BufRead,
        out: &mut impl Write,
    ) -> io::Result<()> {
        loop {
            write!(out, "{}", self.prompt(shell))?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                debug!("Input closed, leaving session");
                writeln!(out)?;
                return Ok(());
            }

            match shell.execute(&line) {
                Ok(CommandOutput::Exit) => {
                    debug!("Session ended by exit");
                    return Ok(());
                }
                Ok(output) => self.output(&output, out)?,
                Err(e) => self.error(&e.to_string(), out)?,
            }
        }
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.color {
            style(text)
        } else {
            text.to_string()
        }
    }
}
