// CLI commands driving the codepad session flows
use anyhow::{Context, Result};
use codepad_common::{
    Difficulty, Feedback, GeminiClient, GeneratedProblem, Judge0Client, Language, Playground,
    PollPolicy, Practice, ProblemSource, SessionOptions,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Poll settings from the environment, with command-line overrides on top
pub fn session_options(
    max_attempts: Option<u32>,
    interval_ms: Option<u64>,
    flag_poll_timeouts: bool,
) -> Result<SessionOptions> {
    let mut policy = PollPolicy::from_env().context("Invalid poll configuration")?;
    if let Some(max_attempts) = max_attempts {
        anyhow::ensure!(max_attempts > 0, "--max-attempts must be at least 1");
        policy.max_attempts = max_attempts;
    }
    if let Some(interval_ms) = interval_ms {
        policy.interval = Duration::from_millis(interval_ms);
    }
    Ok(SessionOptions::new(policy).with_poll_timeouts(flag_poll_timeouts))
}

async fn read_source(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}

fn print_feedback(feedback: &Feedback) -> bool {
    if feedback.is_failure() {
        eprintln!("{}", feedback);
        false
    } else {
        println!("{}", feedback);
        true
    }
}

fn print_problem(problem: &GeneratedProblem) {
    println!("📝 Problem\n{}\n", problem.statement);
    println!("💡 Hint\n{}\n", problem.hint);
    println!("Example input:   {}", problem.example_input);
    println!("Expected output: {}", problem.expected_output);
}

/// Run a program in the playground flow
pub async fn run(
    language: Language,
    file: Option<&Path>,
    stdin: &str,
    options: SessionOptions,
) -> Result<bool> {
    let backend = Judge0Client::from_env().context("Execution backend is not configured")?;
    let mut playground = Playground::new(backend, options);
    playground.select_language(language);

    if let Some(path) = file {
        playground.set_code(read_source(path).await?);
    }
    playground.set_stdin(stdin);

    info!(language = %language, attempts = options.policy.max_attempts, "Running program");
    Ok(print_feedback(playground.run().await))
}

/// Generate a problem without running anything
pub async fn generate(topic: &str, difficulty: Difficulty, language: Language) -> Result<bool> {
    let generator = GeminiClient::from_env().context("Problem generator is not configured")?;

    match generator.generate(topic, difficulty, language).await {
        Ok(problem) => {
            print_problem(&problem);
            Ok(true)
        }
        Err(e) => {
            eprintln!("Error generating problem: {}", e);
            Ok(false)
        }
    }
}

/// Generate a problem, then judge the solution file against its example
pub async fn practice(
    topic: &str,
    difficulty: Difficulty,
    language: Language,
    solution: Option<&Path>,
    options: SessionOptions,
) -> Result<bool> {
    let generator = GeminiClient::from_env().context("Problem generator is not configured")?;
    let backend = Judge0Client::from_env().context("Execution backend is not configured")?;

    let mut practice = Practice::new(backend, generator, options);
    practice.select_language(language);
    practice.set_topic(topic);
    practice.set_difficulty(difficulty);

    if !print_feedback(practice.generate().await) {
        return Ok(false);
    }
    if let Some(problem) = practice.problem() {
        println!();
        print_problem(problem);
    }

    let Some(path) = solution else {
        println!("\nStart from this template:\n\n{}", practice.code());
        return Ok(true);
    };

    practice.set_code(read_source(path).await?);
    println!();
    Ok(print_feedback(practice.submit().await))
}

pub fn list_languages() {
    for language in Language::ALL {
        println!("{:<12} {}", language.to_string(), language.judge0_id());
    }
}
