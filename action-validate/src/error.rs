// ABOUTME: defines the fatal usage errors that stop a validation run before any report.
// ABOUTME: maps each failure to a stable error code for the json verdict.

use std::path::PathBuf;

use action_common::{ErrorCode, ParseError};

#[derive(Debug, thiserror::Error)]
pub enum UsageError {
    #[error("cannot read action file {}: {source}", path.display())]
    ReadAction {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Action(#[from] ParseError),
    #[error("No schema found for action '{action}' at {}", path.display())]
    SchemaNotFound { action: String, path: PathBuf },
    #[error("cannot read schema {}: {source}", path.display())]
    ReadSchema {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("schema {} is invalid: {message}", path.display())]
    InvalidSchema { path: PathBuf, message: String },
    #[error("full schema validation is not compiled in (rebuild with the `full-schema` feature)")]
    ValidatorUnavailable,
}

impl UsageError {
    pub fn code(&self) -> ErrorCode {
        match self {
            UsageError::ReadAction { .. } | UsageError::ReadSchema { .. } => ErrorCode::ReadFailed,
            UsageError::Action(err) => err.code(),
            UsageError::SchemaNotFound { .. } => ErrorCode::SchemaNotFound,
            UsageError::InvalidSchema { .. } => ErrorCode::InvalidSchema,
            UsageError::ValidatorUnavailable => ErrorCode::ValidatorUnavailable,
        }
    }
}
