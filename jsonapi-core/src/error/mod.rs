use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse settings as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A structural, type or equality mismatch in the observed payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AssertionError {
    pub message: String,
}

impl AssertionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A step was called with an argument it can never accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct UsageError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpectationError {
    #[error(transparent)]
    Assertion(#[from] AssertionError),
    #[error(transparent)]
    Usage(#[from] UsageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeCategory {
    Syntax,
    Eof,
    Data,
    Io,
}

impl fmt::Display for DecodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DecodeCategory::Syntax => "Syntax error, malformed JSON",
            DecodeCategory::Eof => "Unexpected end of input",
            DecodeCategory::Data => "Semantically invalid JSON",
            DecodeCategory::Io => "I/O error while reading",
        })
    }
}

impl From<serde_json::error::Category> for DecodeCategory {
    fn from(c: serde_json::error::Category) -> Self {
        match c {
            serde_json::error::Category::Syntax => DecodeCategory::Syntax,
            serde_json::error::Category::Eof => DecodeCategory::Eof,
            serde_json::error::Category::Data => DecodeCategory::Data,
            serde_json::error::Category::Io => DecodeCategory::Io,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to decode JSON body ({category}) at line {line} column {column}: {detail}")]
pub struct DecodeError {
    pub category: DecodeCategory,
    pub line: usize,
    pub column: usize,
    pub detail: String,
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        Self {
            category: e.classify().into(),
            line: e.line(),
            column: e.column(),
            detail: e.to_string(),
        }
    }
}
