// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini function-calling loop against a local stub of the API.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json, Router,
};
use fitness_architect::services::{
    Enricher, GeminiOrchestrator, Instruction, Orchestrator, OrchestratorError, Task,
    ToolRegistry,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

mod common;

/// Replays canned responses in order and records every request body.
#[derive(Clone, Default)]
struct Stub {
    requests: Arc<Mutex<Vec<Value>>>,
    uris: Arc<Mutex<Vec<String>>>,
    api_keys: Arc<Mutex<Vec<Option<String>>>>,
    replies: Arc<Mutex<VecDeque<(StatusCode, Value)>>>,
}

async fn handle(
    State(stub): State<Stub>,
    uri: axum::http::Uri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    stub.requests.lock().unwrap().push(body);
    stub.uris.lock().unwrap().push(uri.to_string());
    stub.api_keys.lock().unwrap().push(
        headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    );
    let (status, reply) = stub
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((StatusCode::OK, json!({"candidates": []})));
    (status, Json(reply))
}

async fn spawn_stub(replies: Vec<(StatusCode, Value)>) -> (String, Stub) {
    let stub = Stub::default();
    stub.replies.lock().unwrap().extend(replies);

    let app = Router::new().fallback(handle).with_state(stub.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), stub)
}

fn tools() -> ToolRegistry {
    ToolRegistry::new(Enricher::new(Arc::new(common::FakeSearch)))
}

fn instruction() -> Instruction {
    Instruction {
        prompt: "How many calories should I eat?".to_string(),
        task: Task::Chat {
            message: "How many calories should I eat?".to_string(),
        },
    }
}

fn call(name: &str, args: Value) -> Value {
    json!({"candidates": [{"content": {"role": "model",
        "parts": [{"functionCall": {"name": name, "args": args}}]}}]})
}

fn text(text: &str) -> Value {
    json!({"candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]})
}

#[tokio::test]
async fn test_tool_results_are_sent_back() {
    let (url, stub) = spawn_stub(vec![
        (
            StatusCode::OK,
            call(
                "compute_diet_plan",
                json!({"goal": "weight_loss", "weight_kg": 85, "height_cm": 180,
                       "age": 32.0, "gender": "male", "activity_level": "light"}),
            ),
        ),
        (StatusCode::OK, text("Aim for 2103 kcal per day.")),
    ])
    .await;

    let gemini = GeminiOrchestrator::new("test-key".to_string(), "test-model".to_string(), 5)
        .with_base_url(url);
    let reply = gemini.run(&instruction(), &tools()).await.unwrap();
    assert_eq!(reply, "Aim for 2103 kcal per day.");

    let requests = stub.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);

    // The key travels in a header, never in the URL.
    let uris = stub.uris.lock().unwrap();
    assert_eq!(uris[0], "/models/test-model:generateContent");
    assert!(uris.iter().all(|u| !u.contains("test-key")));
    assert!(stub
        .api_keys
        .lock()
        .unwrap()
        .iter()
        .all(|k| k.as_deref() == Some("test-key")));

    let first = &requests[0];
    assert_eq!(first["contents"][0]["role"], "user");
    assert_eq!(
        first["tools"][0]["function_declarations"]
            .as_array()
            .unwrap()
            .len(),
        5
    );

    // Second round carries the model's call and our response.
    let contents = requests[1]["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[1]["parts"][0]["functionCall"]["name"], "compute_diet_plan");
    let response = &contents[2]["parts"][0]["functionResponse"];
    assert_eq!(response["name"], "compute_diet_plan");
    assert_eq!(response["response"]["result"]["daily_calories"], 2103);
}

#[tokio::test]
async fn test_unknown_tool_is_reported_to_model() {
    let (url, stub) = spawn_stub(vec![
        (StatusCode::OK, call("launch_rocket", json!({}))),
        (StatusCode::OK, text("Sorry, I can't do that.")),
    ])
    .await;

    let gemini = GeminiOrchestrator::new("k".to_string(), "m".to_string(), 5).with_base_url(url);
    let reply = gemini.run(&instruction(), &tools()).await.unwrap();
    assert_eq!(reply, "Sorry, I can't do that.");

    let requests = stub.requests.lock().unwrap();
    let response = &requests[1]["contents"][2]["parts"][0]["functionResponse"]["response"];
    assert_eq!(response["error"], "Unknown tool: launch_rocket");
}

#[tokio::test]
async fn test_iteration_limit() {
    let replies = (0..3)
        .map(|_| (StatusCode::OK, call("get_motivational_content", json!({}))))
        .collect();
    let (url, stub) = spawn_stub(replies).await;

    let gemini = GeminiOrchestrator::new("k".to_string(), "m".to_string(), 2).with_base_url(url);
    let err = gemini.run(&instruction(), &tools()).await.unwrap_err();

    assert!(matches!(err, OrchestratorError::IterationLimit(2)));
    assert_eq!(stub.requests.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_api_error_status() {
    let (url, _stub) = spawn_stub(vec![(
        StatusCode::BAD_REQUEST,
        json!({"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}),
    )])
    .await;

    let gemini = GeminiOrchestrator::new("bad".to_string(), "m".to_string(), 5).with_base_url(url);
    let err = gemini.run(&instruction(), &tools()).await.unwrap_err();

    match err {
        OrchestratorError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "API key not valid");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_candidates() {
    let (url, _stub) = spawn_stub(vec![]).await;

    let gemini = GeminiOrchestrator::new("k".to_string(), "m".to_string(), 5).with_base_url(url);
    let err = gemini.run(&instruction(), &tools()).await.unwrap_err();

    assert!(matches!(err, OrchestratorError::EmptyResponse));
}

/// Address of a port with nothing listening on it.
async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

#[tokio::test]
async fn test_transport_error_does_not_expose_key() {
    let gemini = GeminiOrchestrator::new("SUPERSECRETKEY".to_string(), "m".to_string(), 5)
        .with_base_url(closed_port_url().await);

    let err = gemini.run(&instruction(), &tools()).await.unwrap_err();

    assert!(matches!(err, OrchestratorError::Request(_)));
    assert!(!err.to_string().contains("SUPERSECRETKEY"));
}

#[tokio::test]
async fn test_transport_error_responses_do_not_expose_key() {
    let gemini = GeminiOrchestrator::new("SUPERSECRETKEY".to_string(), "m".to_string(), 5)
        .with_base_url(closed_port_url().await);
    let (app, _state) = common::create_test_app_with(Arc::new(gemini));

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/api/sessions/s1/plan",
            &common::sample_profile(),
        ))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("An error occurred: LLM request failed"));
    assert!(!body.to_string().contains("SUPERSECRETKEY"));

    let response = app
        .clone()
        .oneshot(common::post_json(
            "/api/sessions/s1/chat",
            &json!({"message": "hello"}),
        ))
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert!(!body.to_string().contains("SUPERSECRETKEY"));

    let response = app
        .oneshot(common::post_json(
            "/api/sessions/s1/calories",
            &json!({"food_item": "banana"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = common::body_json(response).await;
    assert!(!body.to_string().contains("SUPERSECRETKEY"));
}
