// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fixed-sequence orchestrator.
//!
//! Plan requests run the standard sequence: diet plan, workout schedule,
//! a video lookup per non-rest day, motivational content. The result is
//! the plan envelope as JSON.

use super::{Instruction, Orchestrator, OrchestratorError, Task};
use crate::models::{PlanEnvelope, UserProfile};
use crate::services::calculator::diet_plan_for_profile;
use crate::services::motivation::get_motivational_content;
use crate::services::schedule::select_workout_schedule;
use crate::services::tools::ToolRegistry;
use async_trait::async_trait;

/// Reply for chat turns when no model is configured.
pub const CHAT_UNAVAILABLE_REPLY: &str = "Free-form chat needs a language model. \
    Set GEMINI_API_KEY to enable it; plan generation and calorie lookups work without one.";

/// Orchestrator that follows a fixed call sequence instead of a model.
#[derive(Debug, Default, Clone)]
pub struct ScriptedOrchestrator;

#[async_trait]
impl Orchestrator for ScriptedOrchestrator {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn run(
        &self,
        instruction: &Instruction,
        tools: &ToolRegistry,
    ) -> Result<String, OrchestratorError> {
        match &instruction.task {
            Task::GeneratePlan(profile) => {
                let envelope = assemble_plan(profile, tools).await;
                serde_json::to_string_pretty(&envelope)
                    .map_err(|e| OrchestratorError::Assembly(e.to_string()))
            }
            Task::LookupCalories { food_item } => Ok(tools
                .enricher()
                .lookup_calories(food_item)
                .await
                .to_tool_text()),
            Task::Chat { .. } => Ok(CHAT_UNAVAILABLE_REPLY.to_string()),
        }
    }
}

/// Build the full plan envelope for a profile.
///
/// Video links are attached only where a video was actually found.
pub async fn assemble_plan(profile: &UserProfile, tools: &ToolRegistry) -> PlanEnvelope {
    let diet = diet_plan_for_profile(profile);
    let mut workout_plan = select_workout_schedule(&profile.goal, &profile.experience_level);

    for day in workout_plan.iter_mut().filter(|d| !d.is_rest_day()) {
        let outcome = tools.enricher().lookup_video(&day.workout_type).await;
        day.video_link = outcome.found().map(|link| link.markdown());
    }

    let linked = workout_plan.iter().filter(|d| d.video_link.is_some()).count();
    tracing::info!(
        daily_calories = diet.plan.daily_calories,
        fallbacks = ?diet.fallbacks,
        video_links = linked,
        "Plan assembled"
    );

    PlanEnvelope {
        diet_plan: diet.plan,
        workout_plan,
        motivational_content: get_motivational_content(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::enrichment::Enricher;
    use crate::services::search::{SearchBackend, SearchError, SearchResult};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Returns a YouTube hit for strength days only, counting queries.
    #[derive(Default)]
    struct StrengthVideos {
        queries: AtomicUsize,
    }

    #[async_trait]
    impl SearchBackend for StrengthVideos {
        async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            if query.contains("Strength") {
                Ok(vec![SearchResult {
                    title: Some("Strength Basics".to_string()),
                    url: Some("https://www.youtube.com/watch?v=abc".to_string()),
                    content: None,
                }])
            } else {
                Ok(vec![])
            }
        }
    }

    fn profile(goal: &str) -> UserProfile {
        UserProfile {
            goal: goal.to_string(),
            weight_kg: 85.0,
            height_cm: 180.0,
            age: 32,
            gender: "male".to_string(),
            activity_level: "light".to_string(),
            experience_level: "beginner".to_string(),
        }
    }

    #[tokio::test]
    async fn test_plan_links_only_found_videos() {
        let search = Arc::new(StrengthVideos::default());
        let tools = ToolRegistry::new(Enricher::new(search.clone()));

        let envelope = assemble_plan(&profile("weight_loss"), &tools).await;

        // Six non-rest days are looked up; Sunday is skipped.
        assert_eq!(search.queries.load(Ordering::SeqCst), 6);
        assert_eq!(envelope.workout_plan.len(), 7);
        assert_eq!(
            envelope.workout_plan[0].video_link.as_deref(),
            Some("[Strength Basics](https://www.youtube.com/watch?v=abc)")
        );
        assert!(envelope.workout_plan[1].video_link.is_none());
        assert!(envelope.workout_plan[6].video_link.is_none());
        assert_eq!(envelope.diet_plan.daily_calories, 2103);
    }

    #[tokio::test]
    async fn test_run_returns_envelope_json() {
        let tools = ToolRegistry::new(Enricher::new(Arc::new(StrengthVideos::default())));
        let instruction = Instruction {
            prompt: String::new(),
            task: Task::GeneratePlan(profile("muscle_gain")),
        };

        let text = ScriptedOrchestrator.run(&instruction, &tools).await.unwrap();
        let envelope: PlanEnvelope = serde_json::from_str(&text).unwrap();

        assert_eq!(envelope.workout_plan[0].workout_type, "Upper Body Strength");
        assert_eq!(envelope.diet_plan.macros.protein_g, 170);
    }

    #[tokio::test]
    async fn test_chat_without_model() {
        let tools = ToolRegistry::new(Enricher::new(Arc::new(StrengthVideos::default())));
        let instruction = Instruction {
            prompt: "hi".to_string(),
            task: Task::Chat {
                message: "hi".to_string(),
            },
        };

        let text = ScriptedOrchestrator.run(&instruction, &tools).await.unwrap();
        assert_eq!(text, CHAT_UNAVAILABLE_REPLY);
    }
}
