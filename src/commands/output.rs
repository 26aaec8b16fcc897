/// Returned in place of output when the session should end.
pub const EXIT_SENTINEL: &str = "EXIT";
/// Returned in place of output when the display should be cleared.
pub const CLEAR_SENTINEL: &str = "CLEAR";

/// Result of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Text to display; empty means no output.
    Text(String),
    Exit,
    Clear,
}

impl CommandOutput {
    pub fn empty() -> Self {
        CommandOutput::Text(String::new())
    }

    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let text = lines
            .into_iter()
            .map(|line| line.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        CommandOutput::Text(text)
    }

    /// Renders the string form handed to front ends, mapping control
    /// outputs to their sentinels.
    pub fn into_string(self) -> String {
        match self {
            CommandOutput::Text(text) => text,
            CommandOutput::Exit => EXIT_SENTINEL.to_string(),
            CommandOutput::Clear => CLEAR_SENTINEL.to_string(),
        }
    }
}

impl From<String> for CommandOutput {
    fn from(text: String) -> Self {
        CommandOutput::Text(text)
    }
}
