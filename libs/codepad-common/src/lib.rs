pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod harness;
pub mod language;
pub mod playground;
pub mod poll;
pub mod practice;
pub mod request;
pub mod session;
pub mod types;

pub use classifier::{classify, classify_polled};
pub use client::{JobBackend, Judge0Client};
pub use config::{GeneratorConfig, JudgeConfig};
pub use error::{Error, Result};
pub use generator::{extract_problem, GeminiClient, ProblemSource};
pub use language::Language;
pub use playground::Playground;
pub use poll::{wait_for_result, PollPolicy};
pub use practice::Practice;
pub use session::SessionOptions;
pub use types::{
    Difficulty, Feedback, GeneratedProblem, JobHandle, JobRequest, JobResult, JobStatus, Outcome,
    OutcomeKind,
};
