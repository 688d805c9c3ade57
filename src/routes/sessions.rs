// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session routes: plan generation, chat and calorie lookups.

use crate::error::{AppError, Result};
use crate::models::{ChatMessage, Role, UserProfile};
use crate::services::planner::PlanOutcome;
use crate::services::sessions::is_valid_session_id;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub const MAX_MESSAGE_LEN: u64 = 2000;
pub const MAX_FOOD_ITEM_LEN: u64 = 100;

/// Session routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session))
        .route("/api/sessions/{id}/plan", post(generate_plan))
        .route("/api/sessions/{id}/chat", post(chat))
        .route("/api/sessions/{id}/calories", post(lookup_calories))
}

fn check_session_id(id: &str) -> Result<()> {
    if is_valid_session_id(id) {
        Ok(())
    } else {
        Err(AppError::BadRequest(
            "Invalid session id: expected 1-128 characters of [A-Za-z0-9_-]".to_string(),
        ))
    }
}

/// Reject input that is only whitespace.
fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("'{}' must not be blank", field)));
    }
    Ok(())
}

// ─── Session Lifecycle ───────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

async fn create_session(State(state): State<Arc<AppState>>) -> Json<CreateSessionResponse> {
    let session_id = state.planner.sessions().create();
    Json(CreateSessionResponse { session_id })
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    pub session_id: String,
    pub profile: Option<UserProfile>,
    pub has_plan: bool,
    pub transcript: Vec<ChatMessage>,
    pub created_at: String,
    pub updated_at: String,
}

/// Current session state; unknown ids read as an empty session.
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>> {
    check_session_id(&id)?;

    let session = state.planner.sessions().peek(&id);
    Ok(Json(SessionResponse {
        session_id: id,
        profile: session.profile,
        has_plan: session.plan_context.is_some(),
        transcript: session.transcript,
        created_at: session.created_at,
        updated_at: session.updated_at,
    }))
}

// ─── Plan ────────────────────────────────────────────────────

/// Generate the initial plan.
///
/// Orchestrator and formatting failures come back as `error` with a 200,
/// so the client can show them in place of the plan.
async fn generate_plan(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(profile): Json<UserProfile>,
) -> Result<Json<PlanOutcome>> {
    check_session_id(&id)?;

    let outcome = state.planner.generate_initial_plan(&id, profile).await;
    Ok(Json(outcome))
}

// ─── Chat ────────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = MAX_MESSAGE_LEN))]
    pub message: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChatResponse {
    pub reply: String,
    pub transcript: Vec<ChatMessage>,
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>> {
    check_session_id(&id)?;
    req.validate()?;
    require_text("message", &req.message)?;

    let transcript = state.planner.respond_in_chat(&id, &req.message).await;
    let reply = transcript
        .iter()
        .rev()
        .find(|m| m.role == Role::Assistant)
        .map(|m| m.content.clone())
        .unwrap_or_default();

    Ok(Json(ChatResponse { reply, transcript }))
}

// ─── Calories ────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct CaloriesRequest {
    #[validate(length(min = 1, max = MAX_FOOD_ITEM_LEN))]
    pub food_item: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CaloriesResponse {
    pub food_item: String,
    pub result: String,
}

async fn lookup_calories(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<CaloriesRequest>,
) -> Result<Json<CaloriesResponse>> {
    check_session_id(&id)?;
    req.validate()?;
    require_text("food_item", &req.food_item)?;

    let food_item = req.food_item.trim().to_string();
    let result = state.planner.lookup_calories(&id, &food_item).await?;

    Ok(Json(CaloriesResponse { food_item, result }))
}
