mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use codepad_common::{Difficulty, Language};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "codepad")]
#[command(about = "Codepad CLI - Run code on a remote judge and practice generated problems", long_about = None)]
struct Cli {
    #[command(flatten)]
    poll: PollArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct PollArgs {
    /// Maximum poll attempts (overrides CODEPAD_POLL_MAX_ATTEMPTS)
    #[arg(long, global = true)]
    max_attempts: Option<u32>,

    /// Wait before each poll in milliseconds (overrides CODEPAD_POLL_INTERVAL_MS)
    #[arg(long, global = true)]
    interval_ms: Option<u64>,

    /// Report jobs still running after the last poll as timed out
    #[arg(long, global = true, default_value = "false")]
    flag_poll_timeouts: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program and print the classified result
    Run {
        /// Language (javascript, python, java, c, cpp)
        #[arg(short, long, default_value = "javascript")]
        language: Language,

        /// Source file; the language's hello-world program is used when omitted
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Text passed to the program on stdin
        #[arg(short, long, default_value = "")]
        stdin: String,
    },

    /// Generate a practice problem
    Generate {
        /// Problem topic (e.g., arrays, strings, recursion)
        #[arg(short, long, default_value = "arrays")]
        topic: String,

        /// easy, medium or hard
        #[arg(short, long, default_value = "easy")]
        difficulty: Difficulty,

        /// Language the problem is written for
        #[arg(short, long, default_value = "javascript")]
        language: Language,
    },

    /// Generate a problem and judge a solution against its example
    Practice {
        #[arg(short, long, default_value = "arrays")]
        topic: String,

        #[arg(short, long, default_value = "easy")]
        difficulty: Difficulty,

        #[arg(short, long, default_value = "javascript")]
        language: Language,

        /// Solution file; prints the solution template when omitted
        #[arg(short, long)]
        solution: Option<PathBuf>,
    },

    /// List supported languages and their backend ids
    Languages,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let succeeded = dispatch(Cli::parse()).await?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Run one subcommand; poll settings are resolved only by commands that poll
async fn dispatch(cli: Cli) -> Result<bool> {
    let poll = cli.poll;
    let resolve = || {
        commands::session_options(poll.max_attempts, poll.interval_ms, poll.flag_poll_timeouts)
    };

    match cli.command {
        Commands::Run {
            language,
            file,
            stdin,
        } => commands::run(language, file.as_deref(), &stdin, resolve()?).await,
        Commands::Generate {
            topic,
            difficulty,
            language,
        } => commands::generate(&topic, difficulty, language).await,
        Commands::Practice {
            topic,
            difficulty,
            language,
            solution,
        } => commands::practice(&topic, difficulty, language, solution.as_deref(), resolve()?).await,
        Commands::Languages => {
            commands::list_languages();
            Ok(true)
        }
    }
}
