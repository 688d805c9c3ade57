// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod calculator;
pub mod enrichment;
pub mod motivation;
pub mod orchestrator;
pub mod planner;
pub mod render;
pub mod schedule;
pub mod search;
pub mod sessions;
pub mod tools;

pub use calculator::{compute_diet_plan, DietPlanOutcome};
pub use enrichment::{Enricher, LookupOutcome, NotFoundReason, VideoLink};
pub use motivation::get_motivational_content;
pub use orchestrator::{
    GeminiOrchestrator, Instruction, Orchestrator, OrchestratorError, ScriptedOrchestrator, Task,
};
pub use planner::{PlanOutcome, Planner, INITIAL_CHAT_MESSAGE};
pub use render::{render_plan, RenderError, RenderedPlan};
pub use schedule::select_workout_schedule;
pub use search::{SearchBackend, SearchError, SearchResult, TavilyClient};
pub use sessions::SessionStore;
pub use tools::{ToolDefinition, ToolError, ToolRegistry};
