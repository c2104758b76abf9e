mod common;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use codepad_common::{
    Error, Feedback, JobBackend, JobHandle, JobRequest, Judge0Client, JudgeConfig, Language,
    OutcomeKind, Playground, PollPolicy, SessionOptions,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const API_KEY: &str = "test-key";

/// Judge0 stand-in: jobs stay queued for `in_flight_polls` fetches, then finish
#[derive(Default)]
struct MockJudge {
    submissions: Mutex<Vec<Value>>,
    polls: AtomicU32,
    in_flight_polls: u32,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("x-rapidapi-key")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == API_KEY)
}

async fn submit(
    State(state): State<Arc<MockJudge>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    if !authorized(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid API key" })),
        );
    }
    state.submissions.lock().unwrap().push(body);
    (StatusCode::CREATED, Json(json!({ "token": "tok-1" })))
}

async fn fetch(
    State(state): State<Arc<MockJudge>>,
    headers: HeaderMap,
    Path(token): Path<String>,
) -> axum::response::Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "unauthorized").into_response();
    }
    match token.as_str() {
        "tok-1" => {}
        "rate-limited" => {
            return (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({ "message": "You have exceeded the rate limit" })),
            )
                .into_response();
        }
        "garbled" => return (StatusCode::OK, "<html>").into_response(),
        _ => return (StatusCode::NOT_FOUND, "no such submission").into_response(),
    }

    let n = state.polls.fetch_add(1, Ordering::SeqCst) + 1;
    let body = if n <= state.in_flight_polls {
        json!({
            "status": { "id": 1 + (n % 2), "description": "Processing" },
            "stdout": null,
            "stderr": null,
            "compile_output": null,
            "message": null
        })
    } else {
        json!({
            "status": { "id": 3, "description": "Accepted" },
            "stdout": "Hello, World!\n",
            "stderr": null,
            "compile_output": null,
            "message": null,
            "time": "0.012",
            "memory": 3200
        })
    };
    (StatusCode::OK, Json(body)).into_response()
}

async fn spawn_judge(in_flight_polls: u32) -> (String, Arc<MockJudge>) {
    let state = Arc::new(MockJudge {
        in_flight_polls,
        ..MockJudge::default()
    });
    let app = Router::new()
        .route("/submissions", post(submit))
        .route("/submissions/:token", get(fetch))
        .with_state(state.clone());
    (common::spawn(app).await, state)
}

fn client(base_url: &str, key: &str) -> Judge0Client {
    Judge0Client::new(&JudgeConfig::new(base_url, key)).unwrap()
}

fn handle(token: &str) -> JobHandle {
    JobHandle {
        token: token.to_string(),
    }
}

#[tokio::test]
async fn test_submit_posts_payload_and_returns_token() {
    let (url, judge) = spawn_judge(0).await;
    let request = JobRequest {
        source_code: "print(input())".to_string(),
        language_id: 71,
        stdin: "abc".to_string(),
    };

    let handle = client(&url, API_KEY).submit(&request).await.unwrap();

    assert_eq!(handle.token, "tok-1");
    let submissions = judge.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions[0],
        json!({ "source_code": "print(input())", "language_id": 71, "stdin": "abc" })
    );
}

#[tokio::test]
async fn test_submit_rejected_credentials() {
    let (url, _judge) = spawn_judge(0).await;
    let request = JobRequest {
        source_code: String::new(),
        language_id: 63,
        stdin: String::new(),
    };

    let err = client(&url, "wrong").submit(&request).await.unwrap_err();

    match err {
        Error::Submission(msg) => assert!(msg.contains("401"), "{}", msg),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_without_token_in_body() {
    let app = Router::new().route(
        "/submissions",
        post(|| async { (StatusCode::CREATED, Json(json!({ "error": "busy" }))) }),
    );
    let url = common::spawn(app).await;
    let request = JobRequest {
        source_code: String::new(),
        language_id: 63,
        stdin: String::new(),
    };

    let err = client(&url, API_KEY).submit(&request).await.unwrap_err();
    assert!(matches!(err, Error::Submission(_)));
}

#[tokio::test]
async fn test_fetch_error_message_becomes_result() {
    let (url, _judge) = spawn_judge(0).await;

    let result = client(&url, API_KEY).fetch(&handle("rate-limited")).await.unwrap();

    assert!(result.status.is_none());
    assert_eq!(result.message.as_deref(), Some("You have exceeded the rate limit"));
}

#[tokio::test]
async fn test_fetch_error_without_message_is_transport_error() {
    let (url, _judge) = spawn_judge(0).await;

    let err = client(&url, API_KEY).fetch(&handle("unknown")).await.unwrap_err();

    match err {
        Error::Transport(msg) => assert!(msg.contains("404"), "{}", msg),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_malformed_success_body() {
    let (url, _judge) = spawn_judge(0).await;
    let err = client(&url, API_KEY).fetch(&handle("garbled")).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn test_unreachable_backend() {
    let url = common::dead_url().await;
    let backend = client(&url, API_KEY);

    assert!(matches!(backend.fetch(&handle("tok-1")).await, Err(Error::Transport(_))));

    let request = JobRequest {
        source_code: String::new(),
        language_id: 63,
        stdin: String::new(),
    };
    assert!(matches!(backend.submit(&request).await, Err(Error::Submission(_))));
}

#[tokio::test]
async fn test_playground_runs_against_http_backend() {
    let (url, judge) = spawn_judge(2).await;
    let options = SessionOptions::new(PollPolicy::new(10, Duration::from_millis(5)));
    let mut playground = Playground::new(client(&url, API_KEY), options);
    playground.select_language(Language::Python);

    let feedback = playground.run().await.clone();

    match feedback {
        Feedback::Outcome(outcome) => {
            assert_eq!(outcome.kind, OutcomeKind::Success);
            assert_eq!(outcome.to_string(), "Status: Accepted\n\nHello, World!\n");
        }
        other => panic!("unexpected feedback: {:?}", other),
    }
    assert_eq!(judge.polls.load(Ordering::SeqCst), 3);
    assert_eq!(judge.submissions.lock().unwrap()[0]["language_id"], 71);
}

#[tokio::test]
async fn test_playground_poll_budget_exhausted() {
    let (url, judge) = spawn_judge(100).await;
    let options = SessionOptions::new(PollPolicy::new(3, Duration::from_millis(5)));
    let mut playground = Playground::new(client(&url, API_KEY), options);

    let feedback = playground.run().await.clone();

    assert_eq!(judge.polls.load(Ordering::SeqCst), 3);
    match feedback {
        Feedback::Outcome(outcome) => assert_eq!(outcome.kind, OutcomeKind::Unknown),
        other => panic!("unexpected feedback: {:?}", other),
    }

    let flagged = SessionOptions::new(PollPolicy::new(2, Duration::from_millis(5))).with_poll_timeouts(true);
    let mut playground = Playground::new(client(&url, API_KEY), flagged);
    match playground.run().await {
        Feedback::Outcome(outcome) => assert_eq!(outcome.kind, OutcomeKind::PollTimeout),
        other => panic!("unexpected feedback: {:?}", other),
    }
}
