/// Result Classifier - Backend Result to Outcome
///
/// Maps whatever the backend last returned into one `Outcome`. Pure and
/// total: every `JobResult`, including a half-populated one, classifies.
///
/// **Priority (first match wins):**
/// 1. status 3 (Accepted) → Success, stdout or a fixed "no output" text
/// 2. status 6 (Compilation Error) → CompileError, compile output or a fixed text
/// 3. non-empty stderr → RuntimeError
/// 4. non-empty compile output → ApiError
/// 5. non-empty message → ApiError
/// 6. otherwise → Unknown
///
/// The status description, when present, is kept in
/// `Outcome::status_description` and rendered as a header by `Display`.

use crate::types::{JobResult, JobStatus, Outcome, OutcomeKind};

pub const NO_OUTPUT_TEXT: &str = "Program executed successfully with no output";
pub const NO_COMPILE_DETAILS_TEXT: &str = "Compilation error (no details available)";
pub const UNKNOWN_ERROR_TEXT: &str = "An unknown error occurred during execution";
pub const POLL_TIMEOUT_TEXT: &str = "Execution did not finish before the poll budget ran out";
pub const CORRECT_ANNOTATION: &str = "✅ Correct solution!";
pub const WRONG_ANNOTATION: &str = "❌ Wrong answer. Try again!";

/// Only stdout is normalized; the expectation is compared verbatim
fn normalize_output(output: &str) -> &str {
    output.trim()
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Classify a polled result.
///
/// `expected` is supplied by the practice flow: on Success the trimmed
/// stdout is compared against it and the body becomes a correctness report.
pub fn classify(result: &JobResult, expected: Option<&str>) -> Outcome {
    let status_id = result.status_id();
    let mut correct = None;

    let (kind, text) = if status_id == Some(JobStatus::ACCEPTED) {
        let text = match expected {
            Some(expected) => {
                let actual = normalize_output(result.stdout.as_deref().unwrap_or(""));
                let is_correct = actual == expected;
                correct = Some(is_correct);
                format!(
                    "Your output: {}\n\nExpected output: {}\n\n{}",
                    actual,
                    expected,
                    if is_correct { CORRECT_ANNOTATION } else { WRONG_ANNOTATION }
                )
            }
            None => non_empty(&result.stdout).unwrap_or(NO_OUTPUT_TEXT).to_string(),
        };
        (OutcomeKind::Success, text)
    } else if status_id == Some(JobStatus::COMPILATION_ERROR) {
        let text = non_empty(&result.compile_output).unwrap_or(NO_COMPILE_DETAILS_TEXT);
        (OutcomeKind::CompileError, text.to_string())
    } else if let Some(stderr) = non_empty(&result.stderr) {
        (OutcomeKind::RuntimeError, stderr.to_string())
    } else if let Some(compile_output) = non_empty(&result.compile_output) {
        (OutcomeKind::ApiError, compile_output.to_string())
    } else if let Some(message) = non_empty(&result.message) {
        (OutcomeKind::ApiError, message.to_string())
    } else {
        (OutcomeKind::Unknown, UNKNOWN_ERROR_TEXT.to_string())
    };

    Outcome {
        kind,
        text,
        status_description: status_description(result),
        correct,
    }
}

/// Like [`classify`], but optionally reports a still in-flight result as
/// `PollTimeout` instead of running it through the field rules.
pub fn classify_polled(result: &JobResult, expected: Option<&str>, flag_timeouts: bool) -> Outcome {
    if flag_timeouts && result.is_in_flight() {
        return Outcome::poll_timeout(result);
    }
    classify(result, expected)
}

fn status_description(result: &JobResult) -> Option<String> {
    result
        .status
        .as_ref()
        .map(|s| s.description.clone())
        .filter(|d| !d.is_empty())
}

impl Outcome {
    pub fn poll_timeout(result: &JobResult) -> Self {
        Outcome {
            kind: OutcomeKind::PollTimeout,
            text: POLL_TIMEOUT_TEXT.to_string(),
            status_description: status_description(result),
            correct: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_status(id: u32, description: &str) -> JobResult {
        JobResult {
            status: Some(JobStatus::new(id, description)),
            ..JobResult::default()
        }
    }

    #[test]
    fn test_accepted_with_stdout() {
        let result = JobResult {
            stdout: Some("Hello, World!\n".to_string()),
            ..with_status(3, "Accepted")
        };
        let outcome = classify(&result, None);

        assert_eq!(outcome.kind, OutcomeKind::Success);
        assert_eq!(outcome.text, "Hello, World!\n");
        assert_eq!(outcome.status_description.as_deref(), Some("Accepted"));
        assert_eq!(outcome.correct, None);
        assert_eq!(outcome.to_string(), "Status: Accepted\n\nHello, World!\n");
    }

    #[test]
    fn test_accepted_with_empty_stdout() {
        let result = JobResult {
            stdout: Some(String::new()),
            ..with_status(3, "Accepted")
        };
        let outcome = classify(&result, None);

        assert_eq!(outcome.kind, OutcomeKind::Success);
        assert_eq!(outcome.text, NO_OUTPUT_TEXT);
    }

    #[test]
    fn test_accepted_without_stdout_field() {
        let outcome = classify(&with_status(3, "Accepted"), None);
        assert_eq!(outcome.text, NO_OUTPUT_TEXT);
    }

    #[test]
    fn test_compilation_error() {
        let result = JobResult {
            compile_output: Some("err".to_string()),
            ..with_status(6, "Compilation Error")
        };
        let outcome = classify(&result, None);

        assert_eq!(outcome.kind, OutcomeKind::CompileError);
        assert_eq!(outcome.text, "err");
    }

    #[test]
    fn test_compilation_error_without_details() {
        let outcome = classify(&with_status(6, "Compilation Error"), None);
        assert_eq!(outcome.kind, OutcomeKind::CompileError);
        assert_eq!(outcome.text, NO_COMPILE_DETAILS_TEXT);
    }

    #[test]
    fn test_stderr_wins_over_compile_output() {
        let result = JobResult {
            stderr: Some("x".to_string()),
            compile_output: Some("y".to_string()),
            ..JobResult::default()
        };
        let outcome = classify(&result, None);

        assert_eq!(outcome.kind, OutcomeKind::RuntimeError);
        assert_eq!(outcome.text, "x");
        assert_eq!(outcome.status_description, None);
    }

    #[test]
    fn test_runtime_error_status_uses_stderr() {
        let result = JobResult {
            stderr: Some("ZeroDivisionError".to_string()),
            ..with_status(11, "Runtime Error (NZEC)")
        };
        let outcome = classify(&result, None);

        assert_eq!(outcome.kind, OutcomeKind::RuntimeError);
        assert_eq!(
            outcome.to_string(),
            "Status: Runtime Error (NZEC)\n\nZeroDivisionError"
        );
    }

    #[test]
    fn test_compile_output_without_compile_status() {
        let result = JobResult {
            compile_output: Some("warning: unused".to_string()),
            ..with_status(13, "Internal Error")
        };
        let outcome = classify(&result, None);

        assert_eq!(outcome.kind, OutcomeKind::ApiError);
        assert_eq!(outcome.text, "warning: unused");
    }

    #[test]
    fn test_message_only() {
        let outcome = classify(&JobResult::from_message("m"), None);
        assert_eq!(outcome.kind, OutcomeKind::ApiError);
        assert_eq!(outcome.text, "m");
        assert_eq!(outcome.to_string(), "m");
    }

    #[test]
    fn test_nothing_populated() {
        let outcome = classify(&JobResult::default(), None);
        assert_eq!(outcome.kind, OutcomeKind::Unknown);
        assert_eq!(outcome.text, UNKNOWN_ERROR_TEXT);
    }

    #[test]
    fn test_empty_strings_do_not_match() {
        let result = JobResult {
            stderr: Some(String::new()),
            compile_output: Some(String::new()),
            message: Some("quota".to_string()),
            ..JobResult::default()
        };
        let outcome = classify(&result, None);
        assert_eq!(outcome.kind, OutcomeKind::ApiError);
        assert_eq!(outcome.text, "quota");
    }

    #[test]
    fn test_expected_output_matches_after_trim() {
        let result = JobResult {
            stdout: Some("5\n".to_string()),
            ..with_status(3, "Accepted")
        };
        let outcome = classify(&result, Some("5"));

        assert_eq!(outcome.kind, OutcomeKind::Success);
        assert_eq!(outcome.correct, Some(true));
        assert!(outcome.text.ends_with(CORRECT_ANNOTATION));
        assert!(outcome.text.starts_with("Your output: 5\n\nExpected output: 5"));
    }

    #[test]
    fn test_expected_output_mismatch() {
        let result = JobResult {
            stdout: Some("6".to_string()),
            ..with_status(3, "Accepted")
        };
        let outcome = classify(&result, Some("5"));

        assert_eq!(outcome.kind, OutcomeKind::Success);
        assert_eq!(outcome.correct, Some(false));
        assert!(outcome.text.ends_with(WRONG_ANNOTATION));
    }

    #[test]
    fn test_expected_output_is_case_sensitive() {
        let result = JobResult {
            stdout: Some("Hello".to_string()),
            ..with_status(3, "Accepted")
        };
        assert_eq!(classify(&result, Some("hello")).correct, Some(false));
    }

    #[test]
    fn test_expected_ignored_for_failures() {
        let result = JobResult {
            stderr: Some("boom".to_string()),
            ..with_status(11, "Runtime Error (NZEC)")
        };
        let outcome = classify(&result, Some("5"));
        assert_eq!(outcome.kind, OutcomeKind::RuntimeError);
        assert_eq!(outcome.correct, None);
    }

    #[test]
    fn test_in_flight_result_classifies_as_is_by_default() {
        let outcome = classify_polled(&with_status(2, "Processing"), None, false);
        assert_eq!(outcome.kind, OutcomeKind::Unknown);
        assert_eq!(outcome.to_string(), format!("Status: Processing\n\n{}", UNKNOWN_ERROR_TEXT));
    }

    #[test]
    fn test_in_flight_result_flagged_as_timeout() {
        let outcome = classify_polled(&with_status(1, "In Queue"), None, true);
        assert_eq!(outcome.kind, OutcomeKind::PollTimeout);
        assert_eq!(outcome.text, POLL_TIMEOUT_TEXT);
        assert_eq!(outcome.status_description.as_deref(), Some("In Queue"));
    }

    #[test]
    fn test_timeout_flag_leaves_terminal_results_alone() {
        let result = JobResult {
            stdout: Some("ok".to_string()),
            ..with_status(3, "Accepted")
        };
        assert_eq!(classify_polled(&result, None, true).kind, OutcomeKind::Success);
        // No status at all is not "in flight"
        assert_eq!(
            classify_polled(&JobResult::from_message("m"), None, true).kind,
            OutcomeKind::ApiError
        );
    }
}
