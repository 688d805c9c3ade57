// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Orchestrators: turn an instruction into final text using the tool registry.
//!
//! An orchestrator decides which tools to call and in what order, then
//! returns free-form text (for plan requests, expected to be the JSON plan
//! envelope). Two implementations exist:
//! - [`GeminiOrchestrator`]: a hosted model drives the calls via function calling
//! - [`ScriptedOrchestrator`]: fixed call sequence, no model required

mod gemini;
mod scripted;

pub use gemini::{GeminiOrchestrator, DEFAULT_MODEL};
pub use scripted::{assemble_plan, ScriptedOrchestrator, CHAT_UNAVAILABLE_REPLY};

use crate::models::UserProfile;
use crate::services::tools::ToolRegistry;
use async_trait::async_trait;

/// What the instruction was built from.
#[derive(Debug, Clone)]
pub enum Task {
    GeneratePlan(UserProfile),
    Chat { message: String },
    LookupCalories { food_item: String },
}

/// Natural-language prompt plus the structured task behind it.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub prompt: String,
    pub task: Task,
}

/// Errors from an orchestrator run.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("LLM request failed: {0}")]
    Request(String),

    #[error("LLM API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned no usable content")]
    EmptyResponse,

    #[error("Agent stopped after {0} iterations without a final answer")]
    IterationLimit(u32),

    #[error("Failed to assemble plan: {0}")]
    Assembly(String),
}

/// Sequences tool calls for an instruction and returns the final text.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn run(
        &self,
        instruction: &Instruction,
        tools: &ToolRegistry,
    ) -> Result<String, OrchestratorError>;
}
