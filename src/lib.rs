// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fitness Architect: personalized diet and workout plans with a chat assistant
//!
//! This crate provides the backend API that computes nutrition targets,
//! selects a weekly workout schedule, enriches it with web lookups and
//! lets an orchestrator (a hosted model or a fixed script) assemble the plan.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::Planner;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub planner: Planner,
}
