use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Submission payload in the shape the execution backend expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequest {
    pub source_code: String,
    pub language_id: u32,
    pub stdin: String,
}

/// Opaque token identifying a submitted job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    pub token: String,
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}

/// Backend job state.
///
/// Ids 1 and 2 are in flight (queued / processing); anything above is
/// terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub id: u32,
    #[serde(default)]
    pub description: String,
}

impl JobStatus {
    pub const IN_QUEUE: u32 = 1;
    pub const PROCESSING: u32 = 2;
    pub const ACCEPTED: u32 = 3;
    pub const COMPILATION_ERROR: u32 = 6;

    pub fn new(id: u32, description: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.id <= Self::PROCESSING
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_in_flight()
    }
}

/// Body of a poll response.
///
/// Every field is optional: an error reply from the backend carries only
/// `message`, and an in-flight job has no output yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
    #[serde(default)]
    pub compile_output: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl JobResult {
    /// Result carrying only a backend error message and no status
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn status_id(&self) -> Option<u32> {
        self.status.as_ref().map(|s| s.id)
    }

    pub fn is_terminal(&self) -> bool {
        self.status.as_ref().is_some_and(JobStatus::is_terminal)
    }

    /// True when polling stopped while the job was still queued or running
    pub fn is_in_flight(&self) -> bool {
        self.status.as_ref().is_some_and(JobStatus::is_in_flight)
    }
}

/// Coding exercise produced by the generative-text backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedProblem {
    #[serde(rename = "problem")]
    pub statement: String,
    pub hint: String,
    #[serde(rename = "input")]
    pub example_input: String,
    #[serde(rename = "output")]
    pub expected_output: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(s)
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(Error::UnsupportedDifficulty(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    Success,
    CompileError,
    RuntimeError,
    ApiError,
    Unknown,
    PollTimeout,
}

impl OutcomeKind {
    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeKind::Success)
    }
}

/// Normalized, classified result of one submit-and-poll cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    /// Body of the classified branch, without the status header
    pub text: String,
    pub status_description: Option<String>,
    /// Set only when an expected output was compared against stdout
    pub correct: Option<bool>,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status_description {
            Some(description) => write!(f, "Status: {}\n\n{}", description, self.text),
            None => f.write_str(&self.text),
        }
    }
}

/// The single display field a session exposes to its front end
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Feedback {
    #[default]
    Idle,
    Busy(String),
    Notice(String),
    Outcome(Outcome),
    Failure(String),
}

impl Feedback {
    pub fn is_failure(&self) -> bool {
        match self {
            Feedback::Failure(_) => true,
            Feedback::Outcome(outcome) => !outcome.kind.is_success() || outcome.correct == Some(false),
            _ => false,
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Idle => Ok(()),
            Feedback::Busy(msg) | Feedback::Notice(msg) | Feedback::Failure(msg) => f.write_str(msg),
            Feedback::Outcome(outcome) => write!(f, "{}", outcome),
        }
    }
}
