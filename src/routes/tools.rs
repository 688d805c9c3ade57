// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Direct tool access, bypassing the orchestrator.

use crate::error::{AppError, Result};
use crate::services::tools::ToolDefinition;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Tool routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tools", get(list_tools))
        .route("/api/tools/{name}", post(invoke_tool))
}

#[derive(Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolDefinition>,
}

async fn list_tools(State(state): State<Arc<AppState>>) -> Json<ToolsResponse> {
    Json(ToolsResponse {
        tools: state.planner.tools().definitions(),
    })
}

#[derive(Serialize)]
pub struct ToolInvocationResponse {
    pub tool: String,
    pub result: Value,
}

/// Invoke one tool. An empty body is passed to the tool as `null`.
async fn invoke_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<ToolInvocationResponse>> {
    let args = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?
    };

    tracing::debug!(tool = %name, "Direct tool invocation");
    let result = state.planner.tools().invoke(&name, args).await?;

    Ok(Json(ToolInvocationResponse { tool: name, result }))
}
