/// Problem Generator Adapter - Generative-Text Backend
///
/// **Responsibility:**
/// Ask a generative-text backend for a coding exercise and recover the JSON
/// object embedded in its free-form reply.
///
/// **Extraction Rules:**
/// - Span runs from the first `{` to the last `}` of the reply
/// - No such span → `Error::Parse`
/// - Non-2xx or a reply without candidate text → `Error::Generation`

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::language::Language;
use crate::types::{Difficulty, GeneratedProblem};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[async_trait]
pub trait ProblemSource: Send + Sync {
    async fn generate(
        &self,
        topic: &str,
        difficulty: Difficulty,
        language: Language,
    ) -> Result<GeneratedProblem>;
}

pub fn build_prompt(topic: &str, difficulty: Difficulty, language: Language) -> String {
    format!(
        "Generate a {difficulty} level coding problem about {topic} in {language}.\n\
         Return a JSON object with these fields:\n\
         {{\n  \
           \"problem\": \"clear problem statement\",\n  \
           \"hint\": \"a helpful hint\",\n  \
           \"input\": \"example input value\",\n  \
           \"output\": \"expected output for the given input\"\n\
         }}"
    )
}

/// Parse the object spanning the first `{` to the last `}` of `text`.
///
/// Generated replies often wrap the JSON in prose or code fences; anything
/// outside that span is ignored. All four fields must be strings.
pub fn extract_problem(text: &str) -> Result<GeneratedProblem> {
    let start = text
        .find('{')
        .ok_or_else(|| Error::Parse("no JSON object found in generated text".to_string()))?;
    let end = text
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| Error::Parse("no JSON object found in generated text".to_string()))?;

    serde_json::from_str(&text[start..=end]).map_err(|e| Error::Parse(e.to_string()))
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Client for a Gemini `generateContent` endpoint
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeneratorConfig,
}

impl GeminiClient {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(GeneratorConfig::from_env()?))
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("request failed: {}", e.without_url())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Generation(format!("HTTP {}: {}", status, body)));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(format!("malformed response body: {}", e.without_url())))?;

        parsed
            .into_text()
            .ok_or_else(|| Error::Generation("response carried no candidate text".to_string()))
    }
}

#[async_trait]
impl ProblemSource for GeminiClient {
    #[instrument(skip(self))]
    async fn generate(
        &self,
        topic: &str,
        difficulty: Difficulty,
        language: Language,
    ) -> Result<GeneratedProblem> {
        let prompt = build_prompt(topic, difficulty, language);
        let text = self.complete(&prompt).await?;
        debug!(response_chars = text.len(), "Received generated text");
        extract_problem(&text)
    }
}
