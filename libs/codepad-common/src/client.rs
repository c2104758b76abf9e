/// Remote Job Client - Judge0 Submit and Fetch
///
/// **Protocol:**
/// - `POST {base}/submissions` with `{source_code, language_id, stdin}` returns `{token}`
/// - `GET {base}/submissions/{token}` returns status and optional output fields
///
/// **Error Mapping:**
/// - Submit: non-2xx, malformed body or missing token → `Error::Submission`
/// - Fetch: non-2xx carrying a `message` → message-only `JobResult`
/// - Fetch: any other failure → `Error::Transport`
///
/// Endpoint and credentials come from `JudgeConfig`; nothing is hardcoded here.

use crate::config::JudgeConfig;
use crate::error::{Error, Result};
use crate::types::{JobHandle, JobRequest, JobResult};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use tracing::{debug, warn};

pub const API_KEY_HEADER: &str = "x-rapidapi-key";
pub const API_HOST_HEADER: &str = "x-rapidapi-host";

/// Seam between the poll scheduler / session flows and the transport
#[async_trait]
pub trait JobBackend: Send + Sync {
    async fn submit(&self, request: &JobRequest) -> Result<JobHandle>;

    async fn fetch(&self, handle: &JobHandle) -> Result<JobResult>;
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for a Judge0-compatible backend
#[derive(Debug, Clone)]
pub struct Judge0Client {
    http: reqwest::Client,
    base_url: String,
    headers: HeaderMap,
}

impl Judge0Client {
    pub fn new(config: &JudgeConfig) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: auth_headers(config)?,
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(&JudgeConfig::from_env()?)
    }

    fn submissions_url(&self) -> String {
        format!("{}/submissions", self.base_url)
    }

    fn submission_url(&self, handle: &JobHandle) -> String {
        format!("{}/submissions/{}", self.base_url, handle.token)
    }
}

fn auth_headers(config: &JudgeConfig) -> Result<HeaderMap> {
    let mut api_key = HeaderValue::from_str(&config.api_key)
        .map_err(|e| Error::Configuration(format!("API key is not a valid header value: {}", e)))?;
    api_key.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
    headers.insert(
        HeaderName::from_static(API_HOST_HEADER),
        HeaderValue::from_str(&config.api_host)
            .map_err(|e| Error::Configuration(format!("API host is not a valid header value: {}", e)))?,
    );
    Ok(headers)
}

#[async_trait]
impl JobBackend for Judge0Client {
    async fn submit(&self, request: &JobRequest) -> Result<JobHandle> {
        let response = self
            .http
            .post(self.submissions_url())
            .headers(self.headers.clone())
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Submission(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Submission rejected");
            return Err(Error::Submission(format!("HTTP {}: {}", status, body)));
        }

        let body: SubmitResponse = response
            .json()
            .await
            .map_err(|e| Error::Submission(format!("malformed response body: {}", e)))?;

        match body.token.filter(|t| !t.is_empty()) {
            Some(token) => {
                debug!(token = %token, language_id = request.language_id, "Job submitted");
                Ok(JobHandle { token })
            }
            None => Err(Error::Submission("response carried no token".to_string())),
        }
    }

    async fn fetch(&self, handle: &JobHandle) -> Result<JobResult> {
        let response = self
            .http
            .get(self.submission_url(handle))
            .headers(self.headers.clone())
            .send()
            .await
            .map_err(|e| Error::Transport(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Transport(format!("failed to read response body: {}", e)))?;

        if status.is_success() {
            return serde_json::from_str(&body)
                .map_err(|e| Error::Transport(format!("malformed response body: {}", e)));
        }

        // Error replies with a message are surfaced as results for the classifier
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(ErrorBody { message: Some(message) }) => {
                warn!(token = %handle, status = %status, "Backend returned an error message");
                Ok(JobResult::from_message(message))
            }
            _ => Err(Error::Transport(format!("HTTP {}: {}", status, body))),
        }
    }
}
