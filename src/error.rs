//! Error types shared by the session, dataset loading and export.

use std::path::PathBuf;

/// Problems with the task description; a session cannot be created.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigurationError {
    #[error(
        "unknown task type '{0}' (expected single-label-classification, multi-label-classification, regression or free-text)"
    )]
    UnknownTaskType(String),
    #[error("{task} expects {expected}")]
    OptionShape {
        task: &'static str,
        expected: &'static str,
    },
    #[error("{task} needs at least one label")]
    NoOptions { task: &'static str },
    #[error("regression range is empty: min {min} must be below max {max}")]
    EmptyRange { min: f64, max: f64 },
    #[error("regression step must be positive, got {0}")]
    InvalidStep(f64),
    #[error("range bound '{0}' is not a finite number")]
    NotANumber(String),
}

/// A submitted value does not fit the task; the session is left untouched.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("'{0}' is not one of the configured labels")]
    UnknownOption(String),
    #[error("{task} expects {expected}")]
    WrongShape {
        task: &'static str,
        expected: &'static str,
    },
    #[error("{value} is outside the range [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },
    #[error("value is not a finite number")]
    NotFinite,
    #[error("there is no example under the cursor")]
    NoActiveExample,
}

/// Raised by a caller-supplied per-example or final callback.
#[derive(Debug, thiserror::Error)]
#[error("annotation callback failed: {source}")]
pub struct CallbackError {
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}

impl CallbackError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("dataset must be a JSON array of examples or of row objects")]
    NotAnArray,
    #[error("row {row} is not an object while other rows are")]
    MixedRows { row: usize },
    #[error("row {row} has no '{column}' column")]
    MissingColumn { row: usize, column: String },
    #[error("row {row}: stored label rejected: {source}")]
    StoredLabel {
        row: usize,
        source: ValidationError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to serialize annotations: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write annotations: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to write annotations to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Callback(#[from] CallbackError),
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
