// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end tests: log events over HTTP, then read stats and rewards back.

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;
use tower::ServiceExt;
use training_tracker::time_utils::format_utc_rfc3339;

mod common;

const LOGS: &str = "/api/training-logs";

fn today() -> String {
    format_utc_rfc3339(Utc::now())
}

async fn log_event(
    app: &axum::Router,
    token: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(common::post_json(LOGS, token, body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    common::body_json(response).await
}

#[tokio::test]
async fn test_normal_unlock_when_crossing_thirty() {
    let (app, state, _) = common::create_test_app();
    let token = common::create_test_jwt(1, &state.config.jwt_signing_key);

    let first = log_event(
        &app,
        &token,
        json!({ "performed_at": today(), "exercise_name": "squat", "count": 25 }),
    )
    .await;
    assert!(first["unlocked_reward"].is_null());
    assert_eq!(first["count"], 25);

    let second = log_event(
        &app,
        &token,
        json!({ "performed_at": today(), "exercise_name": "pushup", "count": 10 }),
    )
    .await;
    assert_eq!(second["unlocked_reward"]["tier"], "NORMAL");

    let response = app
        .clone()
        .oneshot(common::get_authed("/api/rewards", &token))
        .await
        .unwrap();
    let collection = common::body_json(response).await;
    assert_eq!(collection["total_owned"], 1);
    assert_eq!(collection["total_available"], 20);
    assert_eq!(
        collection["rewards"][0]["reward_id"],
        second["unlocked_reward"]["id"]
    );
}

#[tokio::test]
async fn test_stats_after_logging() {
    let (app, state, _) = common::create_test_app();
    let token = common::create_test_jwt(2, &state.config.jwt_signing_key);

    let yesterday = format_utc_rfc3339(Utc::now() - Duration::days(1));
    log_event(
        &app,
        &token,
        json!({ "performed_at": yesterday, "exercise_name": "squat", "count": 20 }),
    )
    .await;
    log_event(
        &app,
        &token,
        json!({ "performed_at": today(), "exercise_name": "pushup", "count": 15 }),
    )
    .await;
    log_event(
        &app,
        &token,
        json!({ "performed_at": today(), "exercise_name": "plank", "duration": 60 }),
    )
    .await;

    let response = app
        .oneshot(common::get_authed("/api/training-logs/stats", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats = common::body_json(response).await;

    assert_eq!(stats["streak_days"], 2);
    assert_eq!(stats["grand_total"], 95);

    let total = stats["total_stats"].as_array().unwrap();
    assert_eq!(total.len(), 3);
    assert_eq!(total[0]["exercise_name"], "plank");
    assert_eq!(total[0]["total_duration"], 60);

    // Squat only happened yesterday
    let today_names: Vec<&str> = stats["today_stats"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["exercise_name"].as_str().unwrap())
        .collect();
    assert_eq!(today_names, vec!["plank", "pushup"]);
}

#[tokio::test]
async fn test_empty_user_stats() {
    let (app, state, _) = common::create_test_app();
    let token = common::create_test_jwt(3, &state.config.jwt_signing_key);

    let response = app
        .oneshot(common::get_authed("/api/training-logs/stats", &token))
        .await
        .unwrap();
    let stats = common::body_json(response).await;

    assert_eq!(stats["streak_days"], 0);
    assert_eq!(stats["grand_total"], 0);
    assert_eq!(stats["today_stats"], json!([]));
    assert_eq!(stats["total_stats"], json!([]));
}

#[tokio::test]
async fn test_pushup_super_rare_over_http() {
    let (app, state, _) = common::create_test_app();
    let token = common::create_test_jwt(4, &state.config.jwt_signing_key);

    log_event(
        &app,
        &token,
        json!({ "performed_at": today(), "exercise_name": "pushup", "count": 290 }),
    )
    .await;
    let crossing = log_event(
        &app,
        &token,
        json!({ "performed_at": today(), "exercise_name": "pushup", "count": 15 }),
    )
    .await;

    assert_eq!(crossing["unlocked_reward"]["id"], 202);
    assert_eq!(crossing["unlocked_reward"]["tier"], "SR");
}

#[tokio::test]
async fn test_history_is_paginated_newest_first() {
    let (app, state, _) = common::create_test_app();
    let token = common::create_test_jwt(5, &state.config.jwt_signing_key);

    for day in 1..=5 {
        log_event(
            &app,
            &token,
            json!({
                "performed_at": format!("2024-03-0{}T07:00:00Z", day),
                "exercise_name": "squat",
                "count": 1
            }),
        )
        .await;
    }

    let response = app
        .oneshot(common::get_authed(
            "/api/training-logs?page=2&per_page=2",
            &token,
        ))
        .await
        .unwrap();
    let page = common::body_json(response).await;

    assert_eq!(page["total"], 5);
    assert_eq!(page["per_page"], 2);
    let logs = page["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["performed_at"], "2024-03-03T07:00:00Z");
    assert_eq!(logs[1]["performed_at"], "2024-03-02T07:00:00Z");
}

#[tokio::test]
async fn test_users_do_not_see_each_other() {
    let (app, state, _) = common::create_test_app();
    let alice = common::create_test_jwt(10, &state.config.jwt_signing_key);
    let bob = common::create_test_jwt(11, &state.config.jwt_signing_key);

    log_event(
        &app,
        &alice,
        json!({ "performed_at": today(), "exercise_name": "squat", "count": 40 }),
    )
    .await;

    let response = app
        .clone()
        .oneshot(common::get_authed("/api/training-logs/stats", &bob))
        .await
        .unwrap();
    let stats = common::body_json(response).await;
    assert_eq!(stats["grand_total"], 0);

    let response = app
        .oneshot(common::get_authed("/api/rewards", &bob))
        .await
        .unwrap();
    let collection = common::body_json(response).await;
    assert_eq!(collection["total_owned"], 0);
}

#[tokio::test]
async fn test_offline_store_reports_unavailable() {
    let (app, state) = common::create_offline_app();
    let token = common::create_test_jwt(6, &state.config.jwt_signing_key);

    let response = app
        .oneshot(common::post_json(
            LOGS,
            &token,
            json!({ "performed_at": today(), "exercise_name": "squat", "count": 5 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = common::body_json(response).await;
    assert_eq!(body["error"], "store_unavailable");
}

#[tokio::test]
async fn test_catalog_lists_every_reward() {
    let (app, _, _) = common::create_test_app();

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .uri("/api/rewards/catalog")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let catalog = common::body_json(response).await;
    let entries = catalog.as_array().unwrap();

    assert_eq!(entries.len(), 20);
    assert_eq!(entries[0]["id"], 1);
    assert_eq!(entries[19]["id"], 401);
    assert_eq!(entries[19]["tier"], "SECRET");
}
