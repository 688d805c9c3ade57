// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-conversation session state.

use crate::models::UserProfile;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// State held for one session. Lives until the process exits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Profile from the most recent plan request
    pub profile: Option<UserProfile>,
    /// Profile and last generated plan, as text handed to chat turns
    pub plan_context: Option<String>,
    /// Chat transcript, oldest first
    pub transcript: Vec<ChatMessage>,
    /// When the session was first accessed (ISO 8601)
    pub created_at: String,
    /// Last time the session changed (ISO 8601)
    pub updated_at: String,
}

impl SessionState {
    pub fn new(now: &str) -> Self {
        Self {
            profile: None,
            plan_context: None,
            transcript: Vec::new(),
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }
}
