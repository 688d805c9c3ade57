// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini function-calling orchestrator.
//!
//! The model sees the tool declarations and decides which to call. Each
//! round, requested calls are dispatched through the registry and their
//! results sent back as function responses, until the model answers with
//! text or the iteration limit is reached.

use super::{Instruction, Orchestrator, OrchestratorError};
use crate::services::tools::{ToolDefinition, ToolRegistry};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

const SYSTEM_INSTRUCTION: &str = "You are a fitness planning assistant. \
    Use the provided tools for every calculation, schedule, video and calorie lookup; \
    never invent their results. When asked for a plan, reply with only a JSON object \
    with keys 'diet_plan', 'workout_plan' and 'motivational_content', built from the \
    tool results. Otherwise answer in plain text.";

// ─── Wire Types ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: &'a [GeminiContent],
    system_instruction: GeminiContent,
    tools: Vec<GeminiTool>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

impl GeminiContent {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(String::from),
            parts: vec![ContentPart::Text {
                text: text.to_string(),
            }],
        }
    }

    fn function_calls(&self) -> Vec<&FunctionCall> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                ContentPart::FunctionCall { function_call } => Some(function_call),
                _ => None,
            })
            .collect()
    }

    fn joined_text(&self) -> Option<String> {
        let text: Vec<&str> = self
            .parts
            .iter()
            .filter_map(|p| match p {
                ContentPart::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        (!text.is_empty()).then(|| text.concat())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: FunctionCall,
    },
    FunctionResponse {
        #[serde(rename = "functionResponse")]
        function_response: FunctionResponse,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Serialize)]
struct GeminiTool {
    function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Serialize)]
struct FunctionDeclaration {
    name: &'static str,
    description: &'static str,
    parameters: Value,
}

impl From<ToolDefinition> for FunctionDeclaration {
    fn from(def: ToolDefinition) -> Self {
        Self {
            name: def.name,
            description: def.description,
            parameters: def.parameters,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ─── Orchestrator ────────────────────────────────────────────

/// Orchestrator backed by the Gemini `generateContent` API.
#[derive(Clone)]
pub struct GeminiOrchestrator {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_iterations: u32,
}

impl GeminiOrchestrator {
    pub fn new(api_key: String, model: String, max_iterations: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: API_BASE_URL.to_string(),
            api_key,
            model,
            max_iterations,
        }
    }

    /// Point the client at a different host (for local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn generate(
        &self,
        contents: &[GeminiContent],
        tools: &ToolRegistry,
    ) -> Result<GeminiContent, OrchestratorError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let request = GeminiRequest {
            contents,
            system_instruction: GeminiContent::text(None, SYSTEM_INSTRUCTION),
            tools: vec![GeminiTool {
                function_declarations: tools
                    .definitions()
                    .into_iter()
                    .map(FunctionDeclaration::from)
                    .collect(),
            }],
            generation_config: GenerationConfig { temperature: 0.0 },
        };

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        if !status.is_success() {
            tracing::error!(status = %status, "Gemini API error");
            return Err(OrchestratorError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        parse_candidate(&body)
    }
}

#[async_trait]
impl Orchestrator for GeminiOrchestrator {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn run(
        &self,
        instruction: &Instruction,
        tools: &ToolRegistry,
    ) -> Result<String, OrchestratorError> {
        let mut contents = vec![GeminiContent::text(Some("user"), &instruction.prompt)];

        for round in 1..=self.max_iterations {
            let reply = self.generate(&contents, tools).await?;
            let calls: Vec<FunctionCall> = reply.function_calls().into_iter().cloned().collect();

            if calls.is_empty() {
                tracing::info!(rounds = round, model = %self.model, "Agent finished");
                return reply.joined_text().ok_or(OrchestratorError::EmptyResponse);
            }

            tracing::debug!(round, calls = calls.len(), "Agent requested tool calls");
            contents.push(reply);

            let mut responses = Vec::with_capacity(calls.len());
            for call in calls {
                let response = match tools.invoke(&call.name, call.args).await {
                    Ok(result) => json!({ "result": result }),
                    Err(e) => {
                        tracing::warn!(tool = %call.name, error = %e, "Tool call rejected");
                        json!({ "error": e.to_string() })
                    }
                };
                responses.push(ContentPart::FunctionResponse {
                    function_response: FunctionResponse {
                        name: call.name,
                        response,
                    },
                });
            }
            contents.push(GeminiContent {
                role: Some("user".to_string()),
                parts: responses,
            });
        }

        tracing::warn!(max = self.max_iterations, "Agent hit iteration limit");
        Err(OrchestratorError::IterationLimit(self.max_iterations))
    }
}

/// Transport errors carry the request URL; keep it out of error text.
fn request_error(e: reqwest::Error) -> OrchestratorError {
    OrchestratorError::Request(e.without_url().to_string())
}

/// Extract the first candidate's content from a response body.
fn parse_candidate(body: &str) -> Result<GeminiContent, OrchestratorError> {
    let response: GeminiResponse = serde_json::from_str(body).map_err(|e| {
        tracing::error!(error = %e, "Failed to parse Gemini response");
        OrchestratorError::Request(format!("Failed to parse Gemini response: {}", e))
    })?;

    if let Some(error) = response.error {
        return Err(OrchestratorError::Api {
            status: 200,
            message: error.message,
        });
    }

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .filter(|c| !c.parts.is_empty())
        .ok_or(OrchestratorError::EmptyResponse)
}

/// Prefer the API's own error message over the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<GeminiResponse>(body)
        .ok()
        .and_then(|r| r.error)
        .map_or_else(|| body.to_string(), |e| e.message)
}
