// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file is read first if present. API keys are optional: without a
//! search key lookups report a transport error, and without a model key the
//! scripted orchestrator is used.

use crate::services::orchestrator::DEFAULT_MODEL;
use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_RESULTS: u32 = 5;
const DEFAULT_MAX_ITERATIONS: u32 = 15;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,

    // --- Web search ---
    /// Tavily API key
    pub tavily_api_key: Option<String>,
    /// Results requested per search
    pub tavily_max_results: u32,

    // --- Orchestrator ---
    /// Gemini API key; the scripted orchestrator runs when unset
    pub gemini_api_key: Option<String>,
    /// Gemini model name
    pub gemini_model: String,
    /// Model rounds allowed per request
    pub agent_max_iterations: u32,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: parse_var("PORT", DEFAULT_PORT)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            tavily_api_key: optional_secret("TAVILY_API_KEY"),
            tavily_max_results: parse_var("TAVILY_MAX_RESULTS", DEFAULT_MAX_RESULTS)?,
            gemini_api_key: optional_secret("GEMINI_API_KEY"),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            agent_max_iterations: parse_var("AGENT_MAX_ITERATIONS", DEFAULT_MAX_ITERATIONS)?,
        })
    }

    /// Config for tests: no API keys, defaults everywhere else.
    pub fn test_default() -> Self {
        Self {
            port: DEFAULT_PORT,
            frontend_url: "http://localhost:5173".to_string(),
            tavily_api_key: None,
            tavily_max_results: DEFAULT_MAX_RESULTS,
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            agent_max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Trimmed value of a secret, `None` when unset or blank.
fn optional_secret(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
