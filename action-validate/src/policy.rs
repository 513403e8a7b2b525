// ABOUTME: enforces the execution policies every action must meet beyond its schema.
// ABOUTME: low-confidence actions must be clarified and every action must carry a rationale.

use action_common::{ActionDocument, MIN_CONFIDENCE};

pub fn check_confidence(action: &ActionDocument) -> Option<String> {
    if action.confidence_value() < MIN_CONFIDENCE {
        return Some(format!(
            "Low confidence: {} < {MIN_CONFIDENCE} (clarify instead of executing)",
            action.confidence_label()
        ));
    }
    None
}

pub fn check_rationale(action: &ActionDocument) -> Option<String> {
    match action.rationale() {
        Some(_) => None,
        None => Some("Missing or empty 'explain' field (one-line rationale required)".to_string()),
    }
}

/// Confidence first, then rationale.
pub fn policy_errors(action: &ActionDocument) -> Vec<String> {
    [check_confidence(action), check_rationale(action)]
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use action_common::parse_action_document;

    fn doc(input: &str) -> ActionDocument {
        parse_action_document(input).unwrap()
    }

    #[test]
    fn confidence_at_threshold_passes() {
        assert!(check_confidence(&doc(r#"{"action":"a","confidence":0.6}"#)).is_none());
    }

    #[test]
    fn confidence_below_threshold_is_reported_with_written_value() {
        let err = check_confidence(&doc(r#"{"action":"a","confidence":0.59}"#)).unwrap();
        assert_eq!(err, "Low confidence: 0.59 < 0.6 (clarify instead of executing)");
    }

    #[test]
    fn missing_confidence_defaults_to_zero() {
        let err = check_confidence(&doc(r#"{"action":"a"}"#)).unwrap();
        assert_eq!(err, "Low confidence: 0.0 < 0.6 (clarify instead of executing)");
    }

    #[test]
    fn rationale_is_required() {
        for input in [
            r#"{"action":"a"}"#,
            r#"{"action":"a","explain":""}"#,
            r#"{"action":"a","explain":" \t\n"}"#,
            r#"{"action":"a","explain":["why"]}"#,
        ] {
            let err = check_rationale(&doc(input)).unwrap();
            assert!(err.contains("Missing or empty 'explain'"), "input: {input}");
        }
        assert!(check_rationale(&doc(r#"{"action":"a","explain":"user asked"}"#)).is_none());
    }

    #[test]
    fn policy_errors_keep_confidence_before_rationale() {
        let errors = policy_errors(&doc(r#"{"action":"a","confidence":0.1}"#));
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("Low confidence"));
        assert!(errors[1].starts_with("Missing or empty 'explain'"));
    }
}
