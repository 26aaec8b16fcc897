use std::path::{Path, PathBuf};

use compio::fs;
use snafu::{ResultExt, Snafu};
use tracing::debug;

use super::BestEffortPathExt;

/// Reads a whole UTF-8 file on the compio runtime.
pub async fn read_text_file(path: &Path) -> Result<String, TextFileError> {
    let bytes = fs::read(path).await.context(ReadSnafu {
        path: path.to_path_buf(),
    })?;
    debug!(
        "Read {} bytes from {}",
        bytes.len(),
        path.best_effort_path_display()
    );
    String::from_utf8(bytes).context(EncodingSnafu {
        path: path.to_path_buf(),
    })
}

#[derive(Debug, Snafu)]
pub enum TextFileError {
    #[snafu(display("Failed to read {}", path.best_effort_path_display()))]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[snafu(display("{} is not valid UTF-8", path.best_effort_path_display()))]
    EncodingError {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },
}
