//! End-to-end tests for the HTTP surface.
//!
//! The axum app is driven in-process with `oneshot`; providers are replaced
//! with recording fakes so every outbound call can be inspected.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use boogchat::{
    app, ChatClient, Container, ContainerConfig, DomainError, PromptContext, SearchResult,
    SearchService,
};

const UPSTREAM_SECRET: &str = "rate_limit_exceeded: org-1234 quota";

struct FakeChat {
    reply: Result<String, ()>,
    prompts: Mutex<Vec<PromptContext>>,
}

#[async_trait]
impl ChatClient for FakeChat {
    async fn complete(&self, prompt: &PromptContext) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.reply
            .clone()
            .map_err(|_| DomainError::upstream(format!("API returned 429: {UPSTREAM_SECRET}")))
    }

    fn model_name(&self) -> &str {
        "fake-chat"
    }
}

struct FakeSearch {
    results: Result<Vec<SearchResult>, ()>,
    calls: Mutex<usize>,
}

#[async_trait]
impl SearchService for FakeSearch {
    async fn search(&self, _query: &str, limit: usize) -> Result<Vec<SearchResult>, DomainError> {
        *self.calls.lock().unwrap() += 1;
        self.results
            .clone()
            .map(|mut r| {
                r.truncate(limit);
                r
            })
            .map_err(|_| DomainError::upstream("connection refused"))
    }

    fn provider_name(&self) -> &str {
        "fake-search"
    }
}

struct TestEnv {
    chat: Arc<FakeChat>,
    search: Arc<FakeSearch>,
    container: Container,
}

impl TestEnv {
    fn new(reply: Result<&str, ()>, results: Result<Vec<SearchResult>, ()>) -> Self {
        let chat = Arc::new(FakeChat {
            reply: reply.map(String::from),
            prompts: Mutex::new(Vec::new()),
        });
        let search = Arc::new(FakeSearch {
            results,
            calls: Mutex::new(0),
        });
        let container = Container::with_providers(
            chat.clone(),
            search.clone(),
            ContainerConfig::default(),
        );
        Self {
            chat,
            search,
            container,
        }
    }

    fn chat_calls(&self) -> usize {
        self.chat.prompts.lock().unwrap().len()
    }

    fn search_calls(&self) -> usize {
        *self.search.calls.lock().unwrap()
    }

    fn last_user_turn(&self) -> String {
        self.chat
            .prompts
            .lock()
            .unwrap()
            .last()
            .and_then(|p| p.user_text().map(String::from))
            .expect("chat client was not called")
    }

    async fn post_chat(&self, body: Value) -> (StatusCode, Value) {
        self.post_raw(serde_json::to_string(&body).unwrap()).await
    }

    async fn post_raw(&self, body: String) -> (StatusCode, Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/chat")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let resp = app(&self.container).oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}

fn france() -> SearchResult {
    SearchResult::new(
        "France",
        "https://en.wikipedia.org/wiki/France",
        "Paris is the capital of France.",
    )
}

#[tokio::test]
async fn test_index_serves_chat_page() {
    let env = TestEnv::new(Ok("unused"), Ok(vec![]));
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();

    let resp = app(&env.container).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("/chat"));
}

#[tokio::test]
async fn test_ai_mode_returns_response() {
    let env = TestEnv::new(Ok("Meow! Hello there."), Ok(vec![france()]));

    let (status, body) = env.post_chat(json!({"message": "Hello!", "mode": "ai"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"response": "Meow! Hello there."}));
    assert_eq!(env.search_calls(), 0);
    assert_eq!(env.last_user_turn(), "Hello!");
}

#[tokio::test]
async fn test_web_mode_grounds_prompt_with_search_results() {
    let env = TestEnv::new(Ok("Paris (source)."), Ok(vec![france()]));

    let (status, body) = env
        .post_chat(json!({"message": "capital of France", "mode": "web"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["response"].as_str().unwrap().is_empty());
    assert_eq!(env.search_calls(), 1);
    let user = env.last_user_turn();
    assert!(user.contains("Paris is the capital of France."));
    assert!(user.contains("https://en.wikipedia.org/wiki/France"));
}

#[tokio::test]
async fn test_web_mode_survives_search_failure() {
    let env = TestEnv::new(Ok("I'll wing it."), Err(()));

    let (status, body) = env
        .post_chat(json!({"message": "capital of France", "mode": "web"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "I'll wing it.");
    assert_eq!(env.chat_calls(), 1);
    assert_eq!(env.last_user_turn(), "capital of France");
}

#[tokio::test]
async fn test_llm_failure_is_502_without_upstream_detail() {
    let env = TestEnv::new(Err(()), Ok(vec![]));

    let (status, body) = env.post_chat(json!({"message": "Hello!", "mode": "ai"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error = body["error"].as_str().unwrap();
    assert!(!error.is_empty());
    assert!(!error.contains(UPSTREAM_SECRET));
    assert!(!error.contains("429"));
    assert!(body.get("response").is_none());
}

#[tokio::test]
async fn test_missing_message_is_rejected_without_outbound_calls() {
    let env = TestEnv::new(Ok("unused"), Ok(vec![france()]));

    let (status, body) = env.post_chat(json!({"mode": "ai"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "message is required"}));
    assert_eq!(env.chat_calls(), 0);
    assert_eq!(env.search_calls(), 0);
}

#[tokio::test]
async fn test_null_message_is_rejected_as_missing() {
    let env = TestEnv::new(Ok("unused"), Ok(vec![france()]));

    let (status, body) = env
        .post_chat(json!({"message": null, "mode": "web"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "message is required"}));
    assert_eq!(env.chat_calls(), 0);
    assert_eq!(env.search_calls(), 0);
}

#[tokio::test]
async fn test_invalid_mode_is_rejected_without_outbound_calls() {
    let env = TestEnv::new(Ok("unused"), Ok(vec![france()]));

    let (status, body) = env
        .post_chat(json!({"message": "Hello!", "mode": "roast"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "mode must be one of: ai, web"}));
    assert_eq!(env.chat_calls(), 0);
    assert_eq!(env.search_calls(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_400_with_error_body() {
    let env = TestEnv::new(Ok("unused"), Ok(vec![]));

    let (status, body) = env.post_raw("{not json".to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "request body must be a JSON object"}));
    assert_eq!(env.chat_calls(), 0);
}

#[tokio::test]
async fn test_missing_api_key_is_500_with_error_body() {
    struct Unconfigured;

    #[async_trait]
    impl ChatClient for Unconfigured {
        async fn complete(&self, _: &PromptContext) -> Result<String, DomainError> {
            Err(DomainError::configuration("OPENAI_API_KEY is not set"))
        }

        fn model_name(&self) -> &str {
            "unconfigured"
        }
    }

    let container = Container::with_providers(
        Arc::new(Unconfigured),
        Arc::new(FakeSearch {
            results: Ok(vec![]),
            calls: Mutex::new(0),
        }),
        ContainerConfig::default(),
    );
    let req = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"message": "Hello!", "mode": "ai"}"#))
        .unwrap();

    let resp = app(&container).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_mock_providers_answer_web_requests() {
    let container = Container::new(ContainerConfig {
        mock_providers: true,
        ..ContainerConfig::default()
    });
    let req = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"message": "rust", "mode": "web"}"#))
        .unwrap();

    let resp = app(&container).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["response"]
        .as_str()
        .unwrap()
        .starts_with("Meow. The web says: Result 1 for rust"));
}
