// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Best-effort enrichment lookups over web search.
//!
//! Handles:
//! - Workout video lookup (first YouTube link in result order)
//! - Calorie lookup (first result's text snippet)
//!
//! Lookups never fail. Search failures come back as
//! [`LookupOutcome::TransportError`] so callers can branch on them; the
//! tool layer turns outcomes into the plain sentences a model expects.

use crate::services::search::{SearchBackend, SearchResult};
use serde::Serialize;
use std::sync::Arc;

/// URL fragments that identify a playable YouTube video.
const YOUTUBE_PATTERNS: [&str; 2] = ["youtube.com/watch", "youtu.be/"];

/// Result of an enrichment lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum LookupOutcome<T> {
    Found(T),
    NotFound(NotFoundReason),
    TransportError(String),
}

/// Why a lookup came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundReason {
    /// The search returned no results at all.
    NoResults,
    /// Results came back but none were usable.
    NoMatch,
}

impl<T> LookupOutcome<T> {
    pub fn found(self) -> Option<T> {
        match self {
            LookupOutcome::Found(value) => Some(value),
            _ => None,
        }
    }
}

/// A video title and its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoLink {
    pub title: String,
    pub url: String,
}

impl VideoLink {
    /// Format as a markdown link.
    pub fn markdown(&self) -> String {
        format!("[{}]({})", self.title, self.url)
    }
}

impl LookupOutcome<VideoLink> {
    /// Text handed back to the orchestrator.
    pub fn to_tool_text(&self) -> String {
        match self {
            LookupOutcome::Found(link) => link.markdown(),
            LookupOutcome::NotFound(NotFoundReason::NoResults) => {
                "Could not find any relevant search results for a video.".to_string()
            }
            LookupOutcome::NotFound(NotFoundReason::NoMatch) => {
                "Could not find a direct YouTube video link in search results.".to_string()
            }
            LookupOutcome::TransportError(detail) => {
                format!("Could not find a video link due to an error: {}", detail)
            }
        }
    }
}

impl LookupOutcome<String> {
    /// Text handed back to the orchestrator.
    pub fn to_tool_text(&self) -> String {
        match self {
            LookupOutcome::Found(snippet) => snippet.clone(),
            LookupOutcome::NotFound(NotFoundReason::NoResults) => {
                "Could not find calorie information.".to_string()
            }
            LookupOutcome::NotFound(NotFoundReason::NoMatch) => {
                "Could not find calorie information in the search results.".to_string()
            }
            LookupOutcome::TransportError(detail) => {
                format!("Could not find calorie information due to an error: {}", detail)
            }
        }
    }
}

/// Runs enrichment lookups against a search backend.
#[derive(Clone)]
pub struct Enricher {
    search: Arc<dyn SearchBackend>,
}

impl Enricher {
    pub fn new(search: Arc<dyn SearchBackend>) -> Self {
        Self { search }
    }

    /// Find a YouTube video for a workout type.
    pub async fn lookup_video(&self, workout_type: &str) -> LookupOutcome<VideoLink> {
        match self.search.search(&video_query(workout_type)).await {
            Ok(results) => {
                let outcome = first_video_link(workout_type, &results);
                tracing::debug!(
                    workout_type,
                    results = results.len(),
                    found = matches!(outcome, LookupOutcome::Found(_)),
                    "Video lookup finished"
                );
                outcome
            }
            Err(e) => {
                tracing::warn!(workout_type, error = %e, "Video lookup failed");
                LookupOutcome::TransportError(e.to_string())
            }
        }
    }

    /// Find calorie information for a food item.
    pub async fn lookup_calories(&self, food_item: &str) -> LookupOutcome<String> {
        match self.search.search(&calorie_query(food_item)).await {
            Ok(results) => first_calorie_snippet(&results),
            Err(e) => {
                tracing::warn!(food_item, error = %e, "Calorie lookup failed");
                LookupOutcome::TransportError(e.to_string())
            }
        }
    }
}

pub fn video_query(workout_type: &str) -> String {
    format!("'{}' workout video youtube.com", workout_type)
}

pub fn calorie_query(food_item: &str) -> String {
    format!("calories in {}", food_item)
}

/// Pick the first result, in order, whose URL points at a YouTube video.
pub fn first_video_link(workout_type: &str, results: &[SearchResult]) -> LookupOutcome<VideoLink> {
    if results.is_empty() {
        return LookupOutcome::NotFound(NotFoundReason::NoResults);
    }

    results
        .iter()
        .find_map(|result| {
            let url = result.url.as_deref()?;
            if !YOUTUBE_PATTERNS.iter().any(|p| url.contains(p)) {
                return None;
            }
            let title = result
                .title
                .clone()
                .unwrap_or_else(|| format!("{} Workout Video", workout_type));
            Some(VideoLink {
                title,
                url: url.to_string(),
            })
        })
        .map_or(
            LookupOutcome::NotFound(NotFoundReason::NoMatch),
            LookupOutcome::Found,
        )
}

/// Take the first result's content verbatim. Later results are not consulted.
pub fn first_calorie_snippet(results: &[SearchResult]) -> LookupOutcome<String> {
    let Some(first) = results.first() else {
        return LookupOutcome::NotFound(NotFoundReason::NoResults);
    };

    match first.content.as_deref() {
        Some(content) if !content.is_empty() => LookupOutcome::Found(content.to_string()),
        _ => LookupOutcome::NotFound(NotFoundReason::NoMatch),
    }
}
