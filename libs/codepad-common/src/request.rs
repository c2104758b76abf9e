use crate::error::Result;
use crate::language::Language;
use crate::types::JobRequest;

/// Assemble a submission payload from editor state.
///
/// The selector goes through the fixed language catalogue; anything outside
/// it fails with `UnsupportedLanguage`.
pub fn build(source_code: &str, language_selector: &str, stdin: &str) -> Result<JobRequest> {
    let language: Language = language_selector.parse()?;
    Ok(build_for(source_code, language, stdin))
}

/// Same as [`build`] for an already resolved language
pub fn build_for(source_code: &str, language: Language, stdin: &str) -> JobRequest {
    JobRequest {
        source_code: source_code.to_string(),
        language_id: language.judge0_id(),
        stdin: stdin.to_string(),
    }
}
