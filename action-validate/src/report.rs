// ABOUTME: renders a validation verdict as the human report or as pretty json.

use action_common::Verdict;

pub const FAILURE_HEADER: &str = "VALIDATION FAILED:\n-----------------";
pub const SUCCESS_LINE: &str = "VALIDATION PASSED: action looks good to execute.";

pub fn render_text(errors: &[String]) -> String {
    if errors.is_empty() {
        return SUCCESS_LINE.to_string();
    }

    let mut out = String::from(FAILURE_HEADER);
    for err in errors {
        out.push_str("\n - ");
        out.push_str(err);
    }
    out
}

pub fn render_json(verdict: &Verdict) -> serde_json::Result<String> {
    serde_json::to_string_pretty(verdict)
}

/// Renders what the cli prints on stdout, usage messages included.
pub fn render_outcome(verdict: &Verdict, json: bool) -> serde_json::Result<String> {
    if json {
        return render_json(verdict);
    }
    Ok(match &verdict.error {
        Some(err) => err.message.clone(),
        None => render_text(&verdict.errors),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_report_lists_each_error_on_its_own_line() {
        let out = render_text(&["first".to_string(), "second".to_string()]);
        assert_eq!(
            out,
            "VALIDATION FAILED:\n-----------------\n - first\n - second"
        );
    }

    #[test]
    fn text_report_for_no_errors_is_single_success_line() {
        assert_eq!(render_text(&[]), SUCCESS_LINE);
    }

    #[test]
    fn usage_error_message_is_the_stdout_report() {
        let verdict = Verdict::request_error(
            action_common::ErrorCode::MissingArgument,
            "Usage: validate <action-file.json>",
        );
        assert_eq!(
            render_outcome(&verdict, false).unwrap(),
            "Usage: validate <action-file.json>"
        );
        let json: serde_json::Value =
            serde_json::from_str(&render_outcome(&verdict, true).unwrap()).unwrap();
        assert_eq!(json["error"]["code"], "missing_argument");
    }

    #[test]
    fn json_report_carries_errors() {
        let verdict = Verdict::from_errors(vec!["Missing required field: to".to_string()]);
        let v: serde_json::Value = serde_json::from_str(&render_json(&verdict).unwrap()).unwrap();
        assert_eq!(v["ok"], false);
        assert_eq!(v["errors"][0], "Missing required field: to");
        assert!(v["error"].is_null());
    }
}
