mod best_effort_path_ext;
mod text_file;

pub use best_effort_path_ext::{BestEffortPathExt, best_effort_path_display};
pub use text_file::{TextFileError, read_text_file};
