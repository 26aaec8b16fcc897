//! Text command layer: tokenizing, verb dispatch and script playback.
//!
//! Errors are typed inside this module and only turned into text at
//! [`Shell::execute_command`], which is the boundary front ends talk to.

mod output;
mod script;
mod session;
mod shell;
mod verb;

pub use output::{CLEAR_SENTINEL, CommandOutput, EXIT_SENTINEL};
pub use script::{ScriptError, ScriptLine, ScriptOutcome, script_lines};
pub use session::SessionInfo;
pub use shell::{CommandError, HandlerError, Shell};
pub use verb::{UnknownVerbError, Verb};
