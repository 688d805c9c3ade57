// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_session_id_with_invalid_characters() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(common::get("/api/sessions/bad.id"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(state.planner.sessions().is_empty());
}

#[tokio::test]
async fn test_session_id_too_long() {
    let (app, _state) = common::create_test_app();

    let long_id = "a".repeat(129);
    let response = app
        .oneshot(common::post_json(
            &format!("/api/sessions/{}/chat", long_id),
            &json!({"message": "hi"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_chat_message_too_long() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(common::post_json(
            "/api/sessions/v1/chat",
            &json!({"message": "a".repeat(2001)}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "bad_request");

    // Rejected before touching the session.
    assert!(!state.planner.sessions().contains("v1"));
}

#[tokio::test]
async fn test_blank_chat_message() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::post_json(
            "/api/sessions/v2/chat",
            &json!({"message": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_food_item_too_long() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::post_json(
            "/api/sessions/v3/calories",
            &json!({"food_item": "b".repeat(101)}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_food_item() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(common::post_json(
            "/api/sessions/v4/calories",
            &json!({"food_item": ""}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_missing_field_is_rejected() {
    let (app, _state) = common::create_test_app();

    let mut profile = common::sample_profile();
    profile.as_object_mut().unwrap().remove("weight_kg");

    let response = app
        .oneshot(common::post_json("/api/sessions/v5/plan", &profile))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_profile_without_experience_uses_default() {
    let (app, state) = common::create_test_app();

    let mut profile = common::sample_profile();
    profile.as_object_mut().unwrap().remove("experience_level");

    let response = app
        .oneshot(common::post_json("/api/sessions/v6/plan", &profile))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let stored = state.planner.sessions().snapshot("v6").profile.unwrap();
    assert_eq!(stored.experience_level, "beginner");
}
