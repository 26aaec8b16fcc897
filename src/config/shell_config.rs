use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::ext::{BestEffortPathExt, TextFileError, read_text_file};

pub const CONFIG_FILE_NAME: &str = "vfsh.yaml";

pub fn get_config_file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Optional settings read from a YAML file; every key may be omitted.
///
/// ```yaml
/// vfs: demo/filesystem.xml
/// script: demo/startup.txt
/// prompt: "vfsh> "
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellConfig {
    pub vfs: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub prompt: Option<String>,
}

impl ShellConfig {
    pub async fn from_path(path: &Path) -> Result<Self, ShellConfigError> {
        debug!("Opening config file: {}", path.best_effort_path_display());
        let contents = read_text_file(path).await.context(ReadSnafu)?;
        contents.as_str().try_into()
    }

    fn string_value(
        top_level: &LinkedHashMap<Yaml, Yaml>,
        key: &'static str,
    ) -> Result<Option<String>, ShellConfigError> {
        match top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed(key)))) {
            None => Ok(None),
            Some(Yaml::Value(Scalar::Null)) => Ok(None),
            Some(value) => value
                .as_str()
                .map(|s| Some(s.to_string()))
                .context(NotAStringSnafu { key }),
        }
    }
}

impl TryFrom<&str> for ShellConfig {
    type Error = ShellConfigError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let Some(document) = documents.first() else {
            debug!("Config file is empty, using defaults");
            return Ok(ShellConfig::default());
        };

        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        Ok(ShellConfig {
            vfs: Self::string_value(top_level, "vfs")?.map(PathBuf::from),
            script: Self::string_value(top_level, "script")?.map(PathBuf::from),
            prompt: Self::string_value(top_level, "prompt")?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ShellConfigError {
    #[snafu(display("Failed to read the config file"))]
    ReadError { source: TextFileError },
    #[snafu(display("Failed to parse the config file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of config should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Config key '{}' should be a string", key))]
    NotAString { key: &'static str },
}
