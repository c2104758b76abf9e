// Playground flow
// Free-form editor: run whatever is in the buffer and show the classified result

use crate::client::JobBackend;
use crate::language::Language;
use crate::request;
use crate::session::{self, BusyGuard, SessionOptions};
use crate::types::Feedback;
use tracing::{error, info_span, Instrument};
use uuid::Uuid;

pub const RUNNING_MESSAGE: &str = "Running...";

pub struct Playground<B> {
    backend: B,
    options: SessionOptions,
    language: Language,
    code: String,
    stdin: String,
    feedback: Feedback,
}

impl<B: JobBackend> Playground<B> {
    /// Starts on JavaScript with its hello-world program loaded
    pub fn new(backend: B, options: SessionOptions) -> Self {
        let language = Language::JavaScript;
        Self {
            backend,
            options,
            language,
            code: language.starter_template().to_string(),
            stdin: String::new(),
            feedback: Feedback::Idle,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Switch language and load its starter program, discarding the buffer
    pub fn select_language(&mut self, language: Language) {
        self.language = language;
        self.code = language.starter_template().to_string();
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn stdin(&self) -> &str {
        &self.stdin
    }

    pub fn set_stdin(&mut self, stdin: impl Into<String>) {
        self.stdin = stdin.into();
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.feedback, Feedback::Busy(_))
    }

    /// Run the current buffer.
    ///
    /// Never fails: transport and submission errors land in the feedback
    /// slot as a `Failure`.
    pub async fn run(&mut self) -> &Feedback {
        let span = info_span!("playground_run", run_id = %Uuid::new_v4(), language = %self.language);
        let request = request::build_for(&self.code, self.language, &self.stdin);

        let guard = BusyGuard::engage(&mut self.feedback, RUNNING_MESSAGE);
        let result = session::execute(&self.backend, &request, &self.options, None)
            .instrument(span)
            .await;

        guard.finish(match result {
            Ok(outcome) => Feedback::Outcome(outcome),
            Err(e) => {
                error!(error = %e, "Code execution failed");
                Feedback::Failure(format!("Error executing code: {}", e))
            }
        });

        &self.feedback
    }
}
