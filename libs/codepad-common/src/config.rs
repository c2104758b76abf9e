// Backend configuration
// Credentials come from the environment only and are loaded by the command that needs them

use crate::error::{Error, Result};
use crate::poll::PollPolicy;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_JUDGE_URL: &str = "https://judge0-ce.p.rapidapi.com";
pub const DEFAULT_GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

pub const JUDGE_URL_VAR: &str = "CODEPAD_JUDGE_URL";
pub const JUDGE_API_KEY_VAR: &str = "CODEPAD_JUDGE_API_KEY";
pub const JUDGE_API_HOST_VAR: &str = "CODEPAD_JUDGE_API_HOST";
pub const GEMINI_URL_VAR: &str = "CODEPAD_GEMINI_URL";
pub const GEMINI_API_KEY_VAR: &str = "CODEPAD_GEMINI_API_KEY";
pub const POLL_MAX_ATTEMPTS_VAR: &str = "CODEPAD_POLL_MAX_ATTEMPTS";
pub const POLL_INTERVAL_MS_VAR: &str = "CODEPAD_POLL_INTERVAL_MS";

/// Execution backend settings
#[derive(Clone)]
pub struct JudgeConfig {
    pub base_url: String,
    pub api_key: String,
    pub api_host: String,
}

impl JudgeConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let api_host = host_of(&base_url);
        Self {
            base_url,
            api_key: api_key.into(),
            api_host,
        }
    }

    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = api_host.into();
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = required(&lookup, JUDGE_API_KEY_VAR)?;
        let base_url = optional(&lookup, JUDGE_URL_VAR).unwrap_or_else(|| DEFAULT_JUDGE_URL.to_string());
        let config = Self::new(base_url, api_key);

        Ok(match optional(&lookup, JUDGE_API_HOST_VAR) {
            Some(host) => config.with_api_host(host),
            None => config,
        })
    }
}

// Keep the key out of logs and panics
impl fmt::Debug for JudgeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JudgeConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("api_host", &self.api_host)
            .finish()
    }
}

/// Generative-text backend settings
#[derive(Clone)]
pub struct GeneratorConfig {
    pub endpoint: String,
    pub api_key: String,
}

impl GeneratorConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = required(&lookup, GEMINI_API_KEY_VAR)?;
        let endpoint = optional(&lookup, GEMINI_URL_VAR).unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string());
        Ok(Self::new(endpoint, api_key))
    }
}

impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl PollPolicy {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults apply to unset variables; malformed values are rejected
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PollPolicy::default();

        let max_attempts = match optional(&lookup, POLL_MAX_ATTEMPTS_VAR) {
            Some(raw) => raw.parse::<u32>().map_err(|e| {
                Error::Configuration(format!("{} must be a positive integer: {}", POLL_MAX_ATTEMPTS_VAR, e))
            })?,
            None => defaults.max_attempts,
        };
        if max_attempts == 0 {
            return Err(Error::Configuration(format!(
                "{} must be at least 1",
                POLL_MAX_ATTEMPTS_VAR
            )));
        }

        let interval = match optional(&lookup, POLL_INTERVAL_MS_VAR) {
            Some(raw) => raw.parse::<u64>().map(Duration::from_millis).map_err(|e| {
                Error::Configuration(format!("{} must be a number of milliseconds: {}", POLL_INTERVAL_MS_VAR, e))
            })?,
            None => defaults.interval,
        };

        Ok(PollPolicy::new(max_attempts, interval))
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or_else(|| Error::Configuration(format!("{} is not set", key)))
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn host_of(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    without_scheme
        .split(['/', '?'])
        .next()
        .unwrap_or(without_scheme)
        .to_string()
}
