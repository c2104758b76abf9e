use thiserror::Error;

/// Failure taxonomy shared by every codepad component.
///
/// Flows never let these escape to the user as faults; they are rendered
/// into a `Feedback::Failure` message at the session boundary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Unsupported difficulty: {0}")]
    UnsupportedDifficulty(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Problem generation failed: {0}")]
    Generation(String),

    #[error("Could not parse generated problem: {0}")]
    Parse(String),

    #[error("Cannot wrap solution: {0}")]
    Harness(String),
}

pub type Result<T> = std::result::Result<T, Error>;
