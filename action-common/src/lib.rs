// ABOUTME: defines the action document and verdict types shared by the validator crates.
// ABOUTME: provides strict parsing helpers so every usage failure maps to a stable error code.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Actions reporting a confidence below this value must be clarified, not executed.
pub const MIN_CONFIDENCE: f64 = 0.6;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, schemars::JsonSchema)]
pub struct ActionDocument {
    /// Operation name; selects `<schema-dir>/<action>.json`.
    pub action: String,
    #[serde(default = "empty_params")]
    pub params: Value,
    #[serde(default)]
    pub confidence: Option<serde_json::Number>,
    /// Kept untyped so a non-string rationale is a policy violation rather than a parse failure.
    #[serde(default)]
    pub explain: Option<Value>,
}

fn empty_params() -> Value {
    Value::Object(serde_json::Map::new())
}

impl ActionDocument {
    pub fn confidence_value(&self) -> f64 {
        self.confidence
            .as_ref()
            .and_then(serde_json::Number::as_f64)
            .unwrap_or(0.0)
    }

    /// Renders the confidence as written in the document, `0.0` when absent.
    pub fn confidence_label(&self) -> String {
        match &self.confidence {
            Some(n) => n.to_string(),
            None => "0.0".to_string(),
        }
    }

    /// Returns the rationale when it is a string with non-whitespace content.
    pub fn rationale(&self) -> Option<&str> {
        match &self.explain {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    MissingArgument,
    ReadFailed,
    ParseFailed,
    MissingAction,
    MalformedAction,
    SchemaNotFound,
    InvalidSchema,
    ValidatorUnavailable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RequestError {
    pub code: ErrorCode,
    pub message: String,
}

/// Machine-readable outcome of one validation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Verdict {
    pub ok: bool,
    pub errors: Vec<String>,
    pub error: Option<RequestError>,
}

impl Verdict {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
            error: None,
        }
    }

    pub fn request_error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            errors: vec![],
            error: Some(RequestError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("action file is not valid json: {0}")]
    Json(#[source] serde_json::Error),
    #[error("Action JSON must include top-level 'action' field.")]
    MissingAction,
    #[error("action document is malformed: {0}")]
    Malformed(#[source] serde_json::Error),
}

impl ParseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::Json(_) => ErrorCode::ParseFailed,
            ParseError::MissingAction => ErrorCode::MissingAction,
            ParseError::Malformed(_) => ErrorCode::MalformedAction,
        }
    }
}

/// Parses an action document, requiring a json object with a non-empty string `action`.
pub fn parse_action_document(input: &str) -> Result<ActionDocument, ParseError> {
    let value: Value = serde_json::from_str(input).map_err(ParseError::Json)?;

    let has_action = value
        .get("action")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.is_empty());
    if !has_action {
        return Err(ParseError::MissingAction);
    }

    serde_json::from_value(value).map_err(ParseError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults_optional_fields() {
        let doc = parse_action_document(r#"{"action":"send_email"}"#).unwrap();
        assert_eq!(doc.action, "send_email");
        assert_eq!(doc.params, serde_json::json!({}));
        assert_eq!(doc.confidence_value(), 0.0);
        assert_eq!(doc.confidence_label(), "0.0");
        assert!(doc.rationale().is_none());
    }

    #[test]
    fn parse_ignores_unknown_top_level_fields() {
        let doc = parse_action_document(
            r#"{"action":"send_email","confidence":0.9,"explain":"notify","trace_id":"t-1"}"#,
        )
        .unwrap();
        assert_eq!(doc.confidence_label(), "0.9");
        assert_eq!(doc.rationale(), Some("notify"));
    }

    #[test]
    fn parse_rejects_missing_or_empty_action() {
        for input in [
            r#"{"params":{}}"#,
            r#"{"action":""}"#,
            r#"{"action":null}"#,
            r#"{"action":7}"#,
            r#"[{"action":"send_email"}]"#,
        ] {
            let err = parse_action_document(input).unwrap_err();
            assert_eq!(err.code(), ErrorCode::MissingAction, "input: {input}");
        }
    }

    #[test]
    fn parse_reports_invalid_json() {
        let err = parse_action_document(r#"{"action":"send_email""#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ParseFailed);
    }

    #[test]
    fn parse_rejects_non_numeric_confidence() {
        let err = parse_action_document(r#"{"action":"send_email","confidence":"high"}"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::MalformedAction);
    }

    #[test]
    fn rationale_requires_non_blank_string() {
        let blank = parse_action_document(r#"{"action":"a","explain":"   "}"#).unwrap();
        assert!(blank.rationale().is_none());

        let not_string = parse_action_document(r#"{"action":"a","explain":42}"#).unwrap();
        assert!(not_string.rationale().is_none());
    }

    #[test]
    fn integer_confidence_keeps_its_written_form() {
        let doc = parse_action_document(r#"{"action":"a","confidence":0}"#).unwrap();
        assert_eq!(doc.confidence_label(), "0");
        assert!(doc.confidence_value() < MIN_CONFIDENCE);
    }

    #[test]
    fn verdict_serializes_request_error_code_in_snake_case() {
        let v = Verdict::request_error(ErrorCode::SchemaNotFound, "no schema");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["error"]["code"], "schema_not_found");
    }
}
