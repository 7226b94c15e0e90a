use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use summery_core::{
    ArticleLookup, ArticleRef, ChatService, DialogueSettings, SessionRegistry, SummarizeError,
    Summarizer,
};
use summery_server::router;

struct EchoSummarizer;

#[async_trait]
impl Summarizer for EchoSummarizer {
    async fn summarize(
        &self,
        text: &str,
        _max_length: u32,
        _min_length: u32,
    ) -> Result<String, SummarizeError> {
        Ok(text.to_string())
    }
}

struct NoArticles;

#[async_trait]
impl ArticleLookup for NoArticles {
    async fn search_related(&self, _query: &str, _max_results: usize) -> Vec<ArticleRef> {
        Vec::new()
    }
}

fn service() -> ChatService {
    ChatService::new(Arc::new(SessionRegistry::new(
        Arc::new(EchoSummarizer),
        Arc::new(NoArticles),
        DialogueSettings::default(),
    )))
}

async fn post_json(app: axum::Router, body: Value) -> (StatusCode, Value) {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/get")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn chat_endpoint_runs_a_turn() {
    let svc = service();
    let (status, body) = post_json(router(svc.clone()), json!({"uid": "u1", "message": "hello"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uid"], "u1");
    assert_eq!(
        body["response"],
        "I'm Summery Bot, paste your long text and I'll summarize it."
    );
    assert!(svc.registry().contains("u1"));
}

#[tokio::test]
async fn missing_uid_is_reported_in_body() {
    let (status, body) = post_json(router(service()), json!({"message": "hello"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["uid"], "");
    assert_eq!(body["response"], "Error: 'uid' is missing from the request.");
}

#[tokio::test]
async fn state_persists_across_requests() {
    let svc = service();
    let text = "Please summarize this fifteen word long piece of sample text for testing purposes now";
    let (_, body) = post_json(router(svc.clone()), json!({"uid": "u2", "message": text})).await;
    assert_eq!(
        body["response"],
        "How long would you like the summary to be? Please provide the number of words."
    );

    let (_, body) = post_json(router(svc.clone()), json!({"uid": "u2", "message": "50"})).await;
    let reply = body["response"].as_str().unwrap();
    assert!(reply.starts_with(&format!("<strong>Summary:</strong> {text}.")));
    assert!(reply.contains("No related articles found."));
}

#[tokio::test]
async fn health_reports_session_count() {
    let svc = service();
    svc.handle(summery_core::ChatRequest::new("a", "hi")).await;
    let resp = router(svc)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "ok", "sessions": 1}));
}
