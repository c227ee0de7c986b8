#![deny(unsafe_code)]

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StandardsError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file {path}: {source}")]
    WriteIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid rules file {path}: {message}")]
    InvalidRules { path: PathBuf, message: String },

    #[error("invalid pattern {pattern:?} in {path} ({entry}): {source}")]
    InvalidPattern {
        path: PathBuf,
        entry: String,
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("invalid schema file {path}: {message}")]
    InvalidSchema { path: PathBuf, message: String },
}

impl StandardsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn yaml(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        Self::Yaml {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_rules(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidRules {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_schema(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StandardsError>;
