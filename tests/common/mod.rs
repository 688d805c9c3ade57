// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
};
use fitness_architect::config::Config;
use fitness_architect::routes::create_router;
use fitness_architect::services::{
    Enricher, Instruction, Orchestrator, OrchestratorError, Planner, ScriptedOrchestrator,
    SearchBackend, SearchError, SearchResult, SessionStore, ToolRegistry,
};
use fitness_architect::AppState;
use serde_json::Value;
use std::sync::Arc;

#[allow(dead_code)]
pub const BANANA_SNIPPET: &str = "A medium banana (118g) contains about 105 calories.";

/// Offline search backend with canned answers.
///
/// Video queries get a YouTube hit titled after the workout; every other
/// query is treated as a calorie search.
#[allow(dead_code)]
pub struct FakeSearch;

#[async_trait]
impl SearchBackend for FakeSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        if let Some(workout) = query
            .strip_suffix("' workout video youtube.com")
            .and_then(|q| q.strip_prefix('\''))
        {
            return Ok(vec![SearchResult {
                title: Some(format!("{} Guide", workout)),
                url: Some("https://www.youtube.com/watch?v=test".to_string()),
                content: None,
            }]);
        }
        Ok(vec![SearchResult {
            title: Some("Banana nutrition".to_string()),
            url: Some("https://example.com/banana".to_string()),
            content: Some(BANANA_SNIPPET.to_string()),
        }])
    }
}

/// Orchestrator that always fails as an unreachable model would.
#[allow(dead_code)]
pub struct FailingOrchestrator;

#[async_trait]
impl Orchestrator for FailingOrchestrator {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn run(
        &self,
        _instruction: &Instruction,
        _tools: &ToolRegistry,
    ) -> Result<String, OrchestratorError> {
        Err(OrchestratorError::Api {
            status: 503,
            message: "model overloaded".to_string(),
        })
    }
}

/// Orchestrator that answers with fixed text.
#[allow(dead_code)]
pub struct FixedReply(pub &'static str);

#[async_trait]
impl Orchestrator for FixedReply {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn run(
        &self,
        _instruction: &Instruction,
        _tools: &ToolRegistry,
    ) -> Result<String, OrchestratorError> {
        Ok(self.0.to_string())
    }
}

/// Create a test app with the scripted orchestrator and offline search.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Arc::new(ScriptedOrchestrator))
}

/// Create a test app around a specific orchestrator.
#[allow(dead_code)]
pub fn create_test_app_with(orchestrator: Arc<dyn Orchestrator>) -> (axum::Router, Arc<AppState>) {
    let tools = ToolRegistry::new(Enricher::new(Arc::new(FakeSearch)));
    let planner = Planner::new(orchestrator, tools, SessionStore::new());

    let state = Arc::new(AppState {
        config: Config::test_default(),
        planner,
    });

    (create_router(state.clone()), state)
}

/// The profile used throughout the tests: 2103 kcal on weight loss.
#[allow(dead_code)]
pub fn sample_profile() -> Value {
    serde_json::json!({
        "goal": "weight_loss",
        "weight_kg": 85,
        "height_cm": 180,
        "age": 32,
        "gender": "male",
        "activity_level": "light",
        "experience_level": "beginner"
    })
}

#[allow(dead_code)]
pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
