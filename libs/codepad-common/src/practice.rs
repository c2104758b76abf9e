// Practice flow
// Generate a problem, then judge the user's solution against its example

use crate::client::JobBackend;
use crate::generator::ProblemSource;
use crate::harness;
use crate::language::Language;
use crate::session::{self, BusyGuard, SessionOptions};
use crate::types::{Difficulty, Feedback, GeneratedProblem};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

pub const GENERATING_MESSAGE: &str = "Generating problem...";
pub const GENERATED_MESSAGE: &str = "Problem generated successfully!";
pub const RUNNING_SOLUTION_MESSAGE: &str = "Running your solution...";
pub const NO_PROBLEM_MESSAGE: &str = "Please generate a problem first";
pub const DEFAULT_TOPIC: &str = "arrays";

pub struct Practice<B, G> {
    backend: B,
    generator: G,
    options: SessionOptions,
    language: Language,
    topic: String,
    difficulty: Difficulty,
    code: String,
    problem: Option<GeneratedProblem>,
    feedback: Feedback,
}

impl<B: JobBackend, G: ProblemSource> Practice<B, G> {
    pub fn new(backend: B, generator: G, options: SessionOptions) -> Self {
        let language = Language::JavaScript;
        Self {
            backend,
            generator,
            options,
            language,
            topic: DEFAULT_TOPIC.to_string(),
            difficulty: Difficulty::Easy,
            code: language.solution_template().to_string(),
            problem: None,
            feedback: Feedback::Idle,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn select_language(&mut self, language: Language) {
        self.language = language;
        self.code = language.solution_template().to_string();
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn set_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
    }

    pub fn problem(&self) -> Option<&GeneratedProblem> {
        self.problem.as_ref()
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.feedback, Feedback::Busy(_))
    }

    /// Request a new problem for the current topic, difficulty and language.
    ///
    /// On success the previous problem is replaced and the editor is reset
    /// to the language's solution stub. On failure both are left untouched.
    pub async fn generate(&mut self) -> &Feedback {
        let span = info_span!(
            "practice_generate",
            run_id = %Uuid::new_v4(),
            topic = %self.topic,
            difficulty = %self.difficulty,
            language = %self.language
        );

        let guard = BusyGuard::engage(&mut self.feedback, GENERATING_MESSAGE);
        let result = self
            .generator
            .generate(&self.topic, self.difficulty, self.language)
            .instrument(span)
            .await;

        guard.finish(match result {
            Ok(problem) => {
                info!(language = %self.language, "Problem generated");
                self.problem = Some(problem);
                self.code = self.language.solution_template().to_string();
                Feedback::Notice(GENERATED_MESSAGE.to_string())
            }
            Err(e) => {
                error!(error = %e, "Problem generation failed");
                Feedback::Failure(format!("Error generating problem: {}", e))
            }
        });

        &self.feedback
    }

    /// Run the current solution against the problem's example input and
    /// compare with its expected output.
    pub async fn submit(&mut self) -> &Feedback {
        let Some(problem) = self.problem.as_ref() else {
            self.feedback = Feedback::Notice(NO_PROBLEM_MESSAGE.to_string());
            return &self.feedback;
        };

        let span = info_span!("practice_submit", run_id = %Uuid::new_v4(), language = %self.language);
        let request = match harness::compose(&self.code, self.language, &problem.example_input) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, language = %self.language, "Solution rejected before submission");
                self.feedback = Feedback::Notice(e.to_string());
                return &self.feedback;
            }
        };

        let guard = BusyGuard::engage(&mut self.feedback, RUNNING_SOLUTION_MESSAGE);
        let result = session::execute(
            &self.backend,
            &request,
            &self.options,
            Some(problem.expected_output.as_str()),
        )
        .instrument(span)
        .await;

        guard.finish(match result {
            Ok(outcome) => Feedback::Outcome(outcome),
            Err(e) => {
                error!(error = %e, "Solution execution failed");
                Feedback::Failure(format!("Error executing code: {}", e))
            }
        });

        &self.feedback
    }
}
