// ABOUTME: resolves and loads the json schema that governs an action's params.
// ABOUTME: the lookup rule is literal: <schema-dir>/<action>.json, nothing else is searched.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::UsageError;

pub const DEFAULT_SCHEMA_DIR: &str = "ops/tool-schemas";

pub fn schema_path(schema_dir: &Path, action: &str) -> PathBuf {
    schema_dir.join(format!("{action}.json"))
}

/// Resolves the schema for `action` and parses it; a missing file is a usage error.
pub fn load_schema(schema_dir: &Path, action: &str) -> Result<(PathBuf, Value), UsageError> {
    let path = schema_path(schema_dir, action);
    if !path.is_file() {
        return Err(UsageError::SchemaNotFound {
            action: action.to_string(),
            path,
        });
    }

    let text = std::fs::read_to_string(&path).map_err(|source| UsageError::ReadSchema {
        path: path.clone(),
        source,
    })?;
    let schema = serde_json::from_str(&text).map_err(|err| UsageError::InvalidSchema {
        path: path.clone(),
        message: err.to_string(),
    })?;

    tracing::debug!(action, schema_path = %path.display(), "loaded schema");
    Ok((path, schema))
}
