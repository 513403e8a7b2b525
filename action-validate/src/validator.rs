// ABOUTME: checks an action's params against its schema with one of two strategies.
// ABOUTME: full draft-07 validation when compiled in, otherwise a reduced required/type/email check.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::UsageError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Structural validation of `params` against an action schema.
pub trait ParamsValidator {
    fn name(&self) -> &'static str;

    /// Returns one message per violation, in the order they were found.
    fn validate(&self, schema: &Value, params: &Value) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Full validation when compiled in, otherwise basic.
    #[default]
    Auto,
    Full,
    Basic,
}

pub fn select_validator(strategy: Strategy) -> Result<Box<dyn ParamsValidator>, UsageError> {
    let validator: Box<dyn ParamsValidator> = match strategy {
        Strategy::Basic => Box::new(BasicFieldValidator),
        Strategy::Auto | Strategy::Full => match full_validator() {
            Some(v) => v,
            None if strategy == Strategy::Auto => Box::new(BasicFieldValidator),
            None => return Err(UsageError::ValidatorUnavailable),
        },
    };
    tracing::debug!(?strategy, validator = validator.name(), "selected params validator");
    Ok(validator)
}

#[cfg(feature = "full-schema")]
fn full_validator() -> Option<Box<dyn ParamsValidator>> {
    Some(Box::new(FullSchemaValidator))
}

#[cfg(not(feature = "full-schema"))]
fn full_validator() -> Option<Box<dyn ParamsValidator>> {
    None
}

#[cfg(feature = "full-schema")]
pub struct FullSchemaValidator;

#[cfg(feature = "full-schema")]
impl ParamsValidator for FullSchemaValidator {
    fn name(&self) -> &'static str {
        "full"
    }

    fn validate(&self, schema: &Value, params: &Value) -> Vec<String> {
        // `format` stays an annotation; only the basic path checks emails.
        let compiled = match jsonschema::options()
            .with_draft(jsonschema::Draft::Draft7)
            .should_validate_formats(false)
            .build(schema)
        {
            Ok(compiled) => compiled,
            Err(err) => {
                tracing::warn!(error = %err, "schema does not compile, using basic field checks");
                return BasicFieldValidator.validate(schema, params);
            }
        };

        compiled
            .iter_errors(params)
            .map(|err| {
                let pointer = err.instance_path.to_string();
                format!("{err} (at {})", render_instance_path(params, &pointer))
            })
            .collect()
    }
}

/// Renders a json pointer as the list of keys and indices it walks, e.g. `['items', 0, 'to']`.
pub fn render_instance_path(instance: &Value, pointer: &str) -> String {
    let mut current = Some(instance);
    let mut parts = Vec::new();

    for raw in pointer.split('/').skip(1) {
        let segment = raw.replace("~1", "/").replace("~0", "~");
        if let (Some(Value::Array(items)), Ok(index)) = (current, segment.parse::<usize>()) {
            parts.push(index.to_string());
            current = items.get(index);
        } else {
            current = current.and_then(|v| v.get(segment.as_str()));
            parts.push(format!("'{segment}'"));
        }
    }

    format!("[{}]", parts.join(", "))
}

/// Reduced check: `required`, `type: string` and `format: email` only.
pub struct BasicFieldValidator;

impl ParamsValidator for BasicFieldValidator {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn validate(&self, schema: &Value, params: &Value) -> Vec<String> {
        let mut errors = Vec::new();
        let fields = params.as_object();
        let present = |name: &str| fields.is_some_and(|f| f.contains_key(name));

        let required = schema.get("required").and_then(Value::as_array);
        for name in required.into_iter().flatten().filter_map(Value::as_str) {
            if !present(name) {
                errors.push(format!("Missing required field: {name}"));
            }
        }

        let properties = schema.get("properties").and_then(Value::as_object);
        for (name, declared) in properties.into_iter().flatten() {
            let Some(value) = fields.and_then(|f| f.get(name)) else {
                continue;
            };

            let expected = declared.get("type").and_then(Value::as_str);
            if expected == Some("string") && !value.is_string() {
                errors.push(format!(
                    "Field {name} expected string, got {}",
                    json_type_name(value)
                ));
            }

            if declared.get("format").and_then(Value::as_str) == Some("email") {
                if let Some(text) = value.as_str() {
                    if !is_email(text) {
                        errors.push(format!("Field {name} is not a valid email: {text}"));
                    }
                }
            }
        }

        errors
    }
}

pub fn is_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
