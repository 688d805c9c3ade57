// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tool registry exposed to the orchestrator.
//!
//! Each tool has a stable name, a description and a JSON Schema for its
//! arguments. Invocation takes a JSON argument object and returns JSON.

use crate::services::calculator::compute_diet_plan;
use crate::services::enrichment::Enricher;
use crate::services::motivation::get_motivational_content;
use crate::services::schedule::select_workout_schedule;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const COMPUTE_DIET_PLAN: &str = "compute_diet_plan";
pub const SELECT_WORKOUT_SCHEDULE: &str = "select_workout_schedule";
pub const LOOKUP_VIDEO: &str = "lookup_video";
pub const LOOKUP_CALORIES: &str = "lookup_calories";
pub const GET_MOTIVATIONAL_CONTENT: &str = "get_motivational_content";

/// Name, description and argument schema of a tool.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

/// Errors from tool invocation.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments { tool: &'static str, reason: String },

    #[error("Failed to serialize result of {tool}: {reason}")]
    Serialization { tool: &'static str, reason: String },
}

#[derive(Deserialize)]
struct DietPlanArgs {
    goal: String,
    weight_kg: f64,
    height_cm: f64,
    // Models sometimes send whole numbers as floats.
    age: f64,
    gender: String,
    activity_level: String,
}

#[derive(Deserialize)]
struct ScheduleArgs {
    goal: String,
    #[serde(default)]
    experience_level: String,
}

#[derive(Deserialize)]
struct VideoArgs {
    workout_type: String,
}

#[derive(Deserialize)]
struct CalorieArgs {
    food_item: String,
}

#[derive(Deserialize, Default)]
struct MotivationArgs {
    #[serde(default)]
    topic: Option<String>,
}

/// The fixed set of tools available to an orchestrator.
#[derive(Clone)]
pub struct ToolRegistry {
    enricher: Enricher,
}

impl ToolRegistry {
    pub fn new(enricher: Enricher) -> Self {
        Self { enricher }
    }

    pub fn enricher(&self) -> &Enricher {
        &self.enricher
    }

    /// Declarations for every registered tool.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        vec![
            ToolDefinition {
                name: COMPUTE_DIET_PLAN,
                description: "Calculates daily calorie and macronutrient targets and a 7-day meal plan. \
                    'goal' must be one of: 'weight_loss', 'maintenance', 'muscle_gain'. \
                    'activity_level' must be one of: 'sedentary', 'light', 'moderate', 'active'.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "goal": {"type": "string"},
                        "weight_kg": {"type": "number"},
                        "height_cm": {"type": "number"},
                        "age": {"type": "integer"},
                        "gender": {"type": "string", "description": "'male' or 'female'"},
                        "activity_level": {"type": "string"}
                    },
                    "required": ["goal", "weight_kg", "height_cm", "age", "gender", "activity_level"]
                }),
            },
            ToolDefinition {
                name: SELECT_WORKOUT_SCHEDULE,
                description: "Generates a detailed 7-day workout schedule.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "goal": {"type": "string"},
                        "experience_level": {
                            "type": "string",
                            "description": "'beginner', 'intermediate' or 'advanced'"
                        }
                    },
                    "required": ["goal", "experience_level"]
                }),
            },
            ToolDefinition {
                name: LOOKUP_VIDEO,
                description: "Searches the web for a YouTube video for a workout type and returns a Markdown link.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "workout_type": {"type": "string"}
                    },
                    "required": ["workout_type"]
                }),
            },
            ToolDefinition {
                name: LOOKUP_CALORIES,
                description: "Performs a live web search to find the calorie count for a food item.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "food_item": {"type": "string"}
                    },
                    "required": ["food_item"]
                }),
            },
            ToolDefinition {
                name: GET_MOTIVATIONAL_CONTENT,
                description: "Provides a motivational quote and a fitness fact.",
                parameters: json!({
                    "type": "object",
                    "properties": {
                        "topic": {"type": "string"}
                    }
                }),
            },
        ]
    }

    /// Invoke a tool by name.
    pub async fn invoke(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        tracing::info!(tool = name, "Invoking tool");

        match name {
            COMPUTE_DIET_PLAN => {
                let args: DietPlanArgs = parse_args(COMPUTE_DIET_PLAN, args)?;
                let outcome = compute_diet_plan(
                    &args.goal,
                    args.weight_kg,
                    args.height_cm,
                    args.age.max(0.0).round() as u32,
                    &args.gender,
                    &args.activity_level,
                );
                to_json(COMPUTE_DIET_PLAN, &outcome.plan)
            }
            SELECT_WORKOUT_SCHEDULE => {
                let args: ScheduleArgs = parse_args(SELECT_WORKOUT_SCHEDULE, args)?;
                let schedule = select_workout_schedule(&args.goal, &args.experience_level);
                to_json(SELECT_WORKOUT_SCHEDULE, &schedule)
            }
            LOOKUP_VIDEO => {
                let args: VideoArgs = parse_args(LOOKUP_VIDEO, args)?;
                let outcome = self.enricher.lookup_video(&args.workout_type).await;
                Ok(Value::String(outcome.to_tool_text()))
            }
            LOOKUP_CALORIES => {
                let args: CalorieArgs = parse_args(LOOKUP_CALORIES, args)?;
                let outcome = self.enricher.lookup_calories(&args.food_item).await;
                Ok(Value::String(outcome.to_tool_text()))
            }
            GET_MOTIVATIONAL_CONTENT => {
                let args: MotivationArgs = if args.is_null() {
                    MotivationArgs::default()
                } else {
                    parse_args(GET_MOTIVATIONAL_CONTENT, args)?
                };
                to_json(
                    GET_MOTIVATIONAL_CONTENT,
                    &get_motivational_content(args.topic.as_deref()),
                )
            }
            other => {
                tracing::warn!(tool = other, "Unknown tool requested");
                Err(ToolError::UnknownTool(other.to_string()))
            }
        }
    }
}

fn parse_args<T: DeserializeOwned>(tool: &'static str, args: Value) -> Result<T, ToolError> {
    serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments {
        tool,
        reason: e.to_string(),
    })
}

fn to_json<T: Serialize>(tool: &'static str, value: &T) -> Result<Value, ToolError> {
    serde_json::to_value(value).map_err(|e| ToolError::Serialization {
        tool,
        reason: e.to_string(),
    })
}
