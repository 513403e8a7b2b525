// ABOUTME: validates one action file: load, resolve its schema, check params and policies.
// ABOUTME: returns an outcome carrying the verdict and the process exit code for the cli.

pub mod error;
pub mod policy;
pub mod report;
pub mod schema;
pub mod validator;

use std::path::{Path, PathBuf};

use action_common::{parse_action_document, ErrorCode, Verdict};

use crate::error::UsageError;
use crate::validator::{ParamsValidator, Strategy};

pub const EXIT_OK: u8 = 0;
pub const EXIT_INVALID: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

#[derive(Debug, Clone)]
pub struct Options {
    pub schema_dir: PathBuf,
    pub strategy: Strategy,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            schema_dir: PathBuf::from(schema::DEFAULT_SCHEMA_DIR),
            strategy: Strategy::Auto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub exit_code: u8,
    pub verdict: Verdict,
}

/// Validates the action at `action_path`; schema errors come first, then policy errors.
pub fn validate_action_file(
    action_path: &Path,
    schema_dir: &Path,
    validator: &dyn ParamsValidator,
) -> Result<Vec<String>, UsageError> {
    let input = std::fs::read_to_string(action_path).map_err(|source| UsageError::ReadAction {
        path: action_path.to_path_buf(),
        source,
    })?;
    let action = parse_action_document(&input)?;
    tracing::debug!(action = %action.action, path = %action_path.display(), "loaded action");

    let (schema_path, schema) = schema::load_schema(schema_dir, &action.action)?;

    let mut errors = validator.validate(&schema, &action.params);
    errors.extend(policy::policy_errors(&action));

    tracing::info!(
        action = %action.action,
        schema_path = %schema_path.display(),
        validator = validator.name(),
        errors = errors.len(),
        "validated action"
    );
    Ok(errors)
}

pub fn run(action_path: &Path, options: &Options) -> Outcome {
    let result = validator::select_validator(options.strategy).and_then(|validator| {
        validate_action_file(action_path, &options.schema_dir, validator.as_ref())
    });

    match result {
        Ok(errors) if errors.is_empty() => Outcome {
            exit_code: EXIT_OK,
            verdict: Verdict::from_errors(errors),
        },
        Ok(errors) => Outcome {
            exit_code: EXIT_INVALID,
            verdict: Verdict::from_errors(errors),
        },
        Err(err) => {
            tracing::debug!(code = ?err.code(), "usage error: {err}");
            Outcome {
                exit_code: EXIT_USAGE,
                verdict: Verdict::request_error(err.code(), err.to_string()),
            }
        }
    }
}

/// Exit code and message used when no action file argument was given.
pub fn missing_argument() -> Outcome {
    Outcome {
        exit_code: EXIT_USAGE,
        verdict: Verdict::request_error(
            ErrorCode::MissingArgument,
            "Usage: validate <action-file.json>",
        ),
    }
}
