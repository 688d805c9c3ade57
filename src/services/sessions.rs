// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory session store.
//!
//! Sessions are keyed by an opaque id and created lazily on first access.
//! Nothing is persisted; all sessions are lost when the process exits.
//! Guards on the underlying map are never held across an await: callers
//! take a snapshot, do their slow work, then write back with [`SessionStore::update`].

use crate::models::SessionState;
use crate::time_utils::now_rfc3339;
use dashmap::DashMap;
use std::sync::Arc;

/// Longest accepted session id.
pub const MAX_SESSION_ID_LEN: usize = 128;

/// Shared session map, cheap to clone.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, SessionState>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session under a fresh random id.
    pub fn create(&self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.sessions
            .insert(id.clone(), SessionState::new(&now_rfc3339()));
        tracing::info!(session_id = %id, "Session created");
        id
    }

    /// Copy of the session's state, creating it if needed.
    pub fn snapshot(&self, id: &str) -> SessionState {
        self.sessions
            .entry(id.to_string())
            .or_insert_with(|| {
                tracing::debug!(session_id = id, "Session created on first access");
                SessionState::new(&now_rfc3339())
            })
            .clone()
    }

    /// Copy of the session's state, or a fresh one for unknown ids.
    /// Never inserts.
    pub fn peek(&self, id: &str) -> SessionState {
        self.sessions
            .get(id)
            .map(|s| s.value().clone())
            .unwrap_or_else(|| SessionState::new(&now_rfc3339()))
    }

    /// Mutate a session in place, creating it if needed.
    pub fn update<R>(&self, id: &str, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let now = now_rfc3339();
        let mut entry = self
            .sessions
            .entry(id.to_string())
            .or_insert_with(|| SessionState::new(&now));
        let result = f(entry.value_mut());
        entry.updated_at = now;
        result
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Session ids are 1-128 characters of `[A-Za-z0-9_-]`.
pub fn is_valid_session_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= MAX_SESSION_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatMessage;

    #[test]
    fn test_lazy_creation_on_snapshot() {
        let store = SessionStore::new();
        assert!(store.is_empty());

        let state = store.snapshot("abc");
        assert!(state.transcript.is_empty());
        assert!(state.profile.is_none());
        assert!(store.contains("abc"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_peek_does_not_create() {
        let store = SessionStore::new();

        let state = store.peek("ghost");
        assert!(state.transcript.is_empty());
        assert!(!store.contains("ghost"));
        assert!(store.is_empty());

        store.update("real", |s| s.plan_context = Some("plan".to_string()));
        assert_eq!(store.peek("real").plan_context.as_deref(), Some("plan"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_persists_between_accesses() {
        let store = SessionStore::new();
        store.update("s1", |s| s.transcript.push(ChatMessage::user("hello")));
        store.update("s1", |s| s.transcript.push(ChatMessage::assistant("hi")));

        let state = store.snapshot("s1");
        assert_eq!(state.transcript.len(), 2);
        assert_eq!(state.transcript[1].content, "hi");
    }

    #[test]
    fn test_sessions_are_independent() {
        let store = SessionStore::new();
        store.update("a", |s| s.plan_context = Some("plan a".to_string()));

        assert!(store.snapshot("b").plan_context.is_none());
        assert_eq!(store.snapshot("a").plan_context.as_deref(), Some("plan a"));
    }

    #[test]
    fn test_create_returns_uuid() {
        let store = SessionStore::new();
        let id = store.create();

        assert!(uuid::Uuid::parse_str(&id).is_ok());
        assert!(store.contains(&id));
        assert!(is_valid_session_id(&id));
    }

    #[test]
    fn test_session_id_validation() {
        assert!(is_valid_session_id("session_01-A"));
        assert!(!is_valid_session_id(""));
        assert!(!is_valid_session_id("has space"));
        assert!(!is_valid_session_id("../etc"));
        assert!(!is_valid_session_id(&"a".repeat(MAX_SESSION_ID_LEN + 1)));
    }
}
