// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitness Architect API Server
//!
//! Generates diet and workout plans from a user profile and answers
//! follow-up questions in a per-session chat.

use fitness_architect::{
    config::Config,
    services::{
        Enricher, GeminiOrchestrator, Orchestrator, Planner, ScriptedOrchestrator, SessionStore,
        TavilyClient, ToolRegistry,
    },
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Fitness Architect API");

    if config.tavily_api_key.is_none() {
        tracing::warn!("TAVILY_API_KEY not set; video and calorie lookups will fail");
    }
    let search = TavilyClient::new(config.tavily_api_key.clone(), config.tavily_max_results);
    let tools = ToolRegistry::new(Enricher::new(Arc::new(search)));

    let orchestrator: Arc<dyn Orchestrator> = match &config.gemini_api_key {
        Some(key) => Arc::new(GeminiOrchestrator::new(
            key.clone(),
            config.gemini_model.clone(),
            config.agent_max_iterations,
        )),
        None => {
            tracing::warn!("GEMINI_API_KEY not set; using scripted orchestrator");
            Arc::new(ScriptedOrchestrator)
        }
    };
    tracing::info!(
        orchestrator = orchestrator.name(),
        model = %config.gemini_model,
        "Orchestrator initialized"
    );

    let planner = Planner::new(orchestrator, tools, SessionStore::new());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        planner,
    });

    // Build router
    let app = fitness_architect::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitness_architect=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
