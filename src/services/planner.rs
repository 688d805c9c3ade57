// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plan generation and chat workflow.
//!
//! Handles:
//! 1. Initial plan: store the profile, run the orchestrator, render the envelope
//! 2. Chat turns: answer with the stored plan as context
//! 3. Calorie lookups routed through the orchestrator
//!
//! Plan and chat failures never escape this layer; they are turned into
//! text the caller can show in place of the result.

use crate::models::{ChatMessage, UserProfile};
use crate::services::orchestrator::{Instruction, Orchestrator, OrchestratorError, Task};
use crate::services::render::{render_plan, RenderedPlan};
use crate::services::sessions::SessionStore;
use crate::services::tools::{
    ToolRegistry, COMPUTE_DIET_PLAN, GET_MOTIVATIONAL_CONTENT, LOOKUP_CALORIES, LOOKUP_VIDEO,
    SELECT_WORKOUT_SCHEDULE,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// First assistant message after a plan is generated.
pub const INITIAL_CHAT_MESSAGE: &str = "Ask me anything related to Fitness. like:\n\n\
    - 'What are the benefits of a Full Body Strength workout?'\n\
    - 'Find calories for a banana.'\n\
    - 'Tell me another motivational quote.'\n\
    - 'Can you adjust my diet plan for 1600 calories?'";

/// Context used for chat before any plan exists.
const NO_PLAN_CONTEXT: &str = "No plan generated yet.";

/// Result of an initial plan request.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlanOutcome {
    /// Rendered plan, if the orchestrator produced a usable envelope
    pub plan: Option<RenderedPlan>,
    /// Error text shown in place of the plan
    pub error: Option<String>,
    /// Session transcript after the request
    pub transcript: Vec<ChatMessage>,
}

/// Runs plan, chat and lookup flows against the session store.
#[derive(Clone)]
pub struct Planner {
    orchestrator: Arc<dyn Orchestrator>,
    tools: ToolRegistry,
    sessions: SessionStore,
}

impl Planner {
    pub fn new(
        orchestrator: Arc<dyn Orchestrator>,
        tools: ToolRegistry,
        sessions: SessionStore,
    ) -> Self {
        Self {
            orchestrator,
            tools,
            sessions,
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn orchestrator_name(&self) -> &'static str {
        self.orchestrator.name()
    }

    /// Generate the first plan for a session.
    pub async fn generate_initial_plan(&self, session_id: &str, profile: UserProfile) -> PlanOutcome {
        tracing::info!(
            session_id,
            goal = %profile.goal,
            orchestrator = self.orchestrator.name(),
            "Generating plan"
        );

        let profile_json = serde_json::to_string(&profile).unwrap_or_default();
        self.sessions
            .update(session_id, |s| s.profile = Some(profile.clone()));

        let instruction = Instruction {
            prompt: plan_prompt(&profile, &profile_json),
            task: Task::GeneratePlan(profile),
        };

        let raw = match self.orchestrator.run(&instruction, &self.tools).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(session_id, error = %e, "Plan generation failed");
                let transcript = self.sessions.snapshot(session_id).transcript;
                return PlanOutcome {
                    plan: None,
                    error: Some(format!("An error occurred: {}", e)),
                    transcript,
                };
            }
        };

        let (plan, error) = match render_plan(&raw) {
            Ok(rendered) => (Some(rendered), None),
            Err(e) => {
                tracing::warn!(session_id, error = %e, "Orchestrator output is not a plan");
                (None, Some(e.to_string()))
            }
        };

        let plan_json = plan
            .as_ref()
            .and_then(|p| serde_json::to_string_pretty(&p.data).ok())
            .unwrap_or_else(|| "null".to_string());
        let context = format!(
            "Original user details: {}\n\nGenerated Plan (JSON): {}",
            profile_json, plan_json
        );

        let transcript = self.sessions.update(session_id, |s| {
            s.plan_context = Some(context);
            s.transcript = vec![ChatMessage::assistant(INITIAL_CHAT_MESSAGE)];
            s.transcript.clone()
        });

        PlanOutcome {
            plan,
            error,
            transcript,
        }
    }

    /// Answer a chat message and return the updated transcript.
    pub async fn respond_in_chat(&self, session_id: &str, message: &str) -> Vec<ChatMessage> {
        let context = self.sessions.update(session_id, |s| {
            s.transcript.push(ChatMessage::user(message));
            s.plan_context.clone()
        });

        let instruction = Instruction {
            prompt: chat_prompt(context.as_deref().unwrap_or(NO_PLAN_CONTEXT), message),
            task: Task::Chat {
                message: message.to_string(),
            },
        };

        let reply = match self.orchestrator.run(&instruction, &self.tools).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(session_id, error = %e, "Chat turn failed");
                format!("An error occurred: {}", e)
            }
        };

        self.sessions.update(session_id, |s| {
            s.transcript.push(ChatMessage::assistant(reply));
            s.transcript.clone()
        })
    }

    /// Look up calories for a food item through the orchestrator.
    ///
    /// Unlike plan and chat requests, orchestrator failures are returned.
    pub async fn lookup_calories(
        &self,
        session_id: &str,
        food_item: &str,
    ) -> Result<String, OrchestratorError> {
        tracing::info!(session_id, food_item, "Calorie lookup");

        // Lookups count as session activity.
        self.sessions.update(session_id, |_| ());

        let instruction = Instruction {
            prompt: calorie_prompt(food_item),
            task: Task::LookupCalories {
                food_item: food_item.to_string(),
            },
        };
        self.orchestrator.run(&instruction, &self.tools).await
    }
}

// ─── Prompts ─────────────────────────────────────────────────

fn plan_prompt(profile: &UserProfile, profile_json: &str) -> String {
    format!(
        "My primary goal is {goal}. My details are: {details}.\n\n\
         Your task is to generate a complete and detailed fitness plan. \
         To do this, you MUST perform the following sequence of actions:\n\
         1. Call the `{diet}` tool with all the user's details to get their nutrition and 7-day meal plan.\n\
         2. Call the `{schedule}` tool to get their 7-day workout schedule.\n\
         3. For EACH of the 7 days in the workout schedule that is NOT a rest day, call the `{video}` tool \
         with the \"Workout Type\" for that day and add the returned link to that day as \"Video Link\".\n\
         4. Call the `{motivation}` tool.\n\
         5. Finally, combine all the results from the tools into a single, final JSON object \
         with keys: 'diet_plan', 'workout_plan', 'motivational_content'.",
        goal = profile.goal,
        details = profile_json,
        diet = COMPUTE_DIET_PLAN,
        schedule = SELECT_WORKOUT_SCHEDULE,
        video = LOOKUP_VIDEO,
        motivation = GET_MOTIVATIONAL_CONTENT,
    )
}

fn chat_prompt(context: &str, message: &str) -> String {
    format!(
        "Context: {}\nUser's new request: \"{}\"\n\
         Based on the context and the new request, generate an updated JSON plan if needed, \
         or answer the question textually.",
        context, message
    )
}

fn calorie_prompt(food_item: &str) -> String {
    format!(
        "Use your `{}` tool to find the calories for '{}'",
        LOOKUP_CALORIES, food_item
    )
}
