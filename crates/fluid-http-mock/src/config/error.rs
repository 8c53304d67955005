//! Errors raised while loading fixture files.

use crate::error::MockError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Fixture loading error
#[derive(Debug)]
pub enum ConfigError {
    /// JSON parsing error
    Json(serde_json::Error),
    /// YAML parsing error
    Yaml(serde_yaml::Error),
    /// Extension is neither yaml, yml, json nor jsonc
    UnknownFileType(String),
    /// Fixture file could not be read
    Io { path: PathBuf, source: io::Error },
    /// Malformed glob pattern
    Pattern(glob::PatternError),
    /// Directory entry of a glob match could not be read
    Glob(glob::GlobError),
    /// Fixture parsed but does not describe a valid expectation
    Invalid { path: PathBuf, source: MockError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Json(e) => write!(f, "JSON parsing error: {}", e),
            ConfigError::Yaml(e) => write!(f, "YAML parsing error: {}", e),
            ConfigError::UnknownFileType(path) => write!(f, "Unknown file type: {}", path),
            ConfigError::Io { path, source } => {
                write!(f, "Cannot read {}: {}", path.display(), source)
            }
            ConfigError::Pattern(e) => write!(f, "Invalid fixture pattern: {}", e),
            ConfigError::Glob(e) => write!(f, "Cannot list fixtures: {}", e),
            ConfigError::Invalid { path, source } => {
                write!(f, "Invalid fixture in {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(e) => Some(e),
            ConfigError::Yaml(e) => Some(e),
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Pattern(e) => Some(e),
            ConfigError::Glob(e) => Some(e),
            ConfigError::Invalid { source, .. } => Some(source),
            ConfigError::UnknownFileType(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

impl From<glob::PatternError> for ConfigError {
    fn from(err: glob::PatternError) -> Self {
        ConfigError::Pattern(err)
    }
}

impl From<glob::GlobError> for ConfigError {
    fn from(err: glob::GlobError) -> Self {
        ConfigError::Glob(err)
    }
}
