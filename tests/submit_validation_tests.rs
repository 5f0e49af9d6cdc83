// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Submission input validation tests.
//!
//! The store in these tests is the offline mock, which errors on any
//! access, so a 400 also proves validation ran before persistence.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use std::sync::Arc;
use tower::ServiceExt;
use weather_covid_api::session::SESSION_COOKIE;
use weather_covid_api::AppState;

mod common;

async fn submit(
    app: axum::Router,
    state: &Arc<AppState>,
    session_id: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/submit")
                .header("x-api-key", state.config.api_key.clone())
                .header(
                    header::COOKIE,
                    format!("{}={}", SESSION_COOKIE, session_id),
                )
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn full_body() -> serde_json::Value {
    serde_json::json!({
        "country": "Germany",
        "weather": {
            "temperature": 21.5,
            "humidity": 60.0,
            "description": "partly cloudy",
            "windSpeed": 3.2,
            "city": "Berlin"
        },
        "covidStats": {
            "cases": 1000,
            "deaths": 10,
            "recovered": 900,
            "active": 90,
            "todayCases": 12,
            "todayDeaths": 0
        }
    })
}

#[tokio::test]
async fn test_submit_without_country() {
    let (app, state) = common::create_test_app();
    let session_id = common::login_session(&state, common::test_user("u1", "u1@example.com")).await;

    let mut body = full_body();
    body.as_object_mut().unwrap().remove("country");

    let (status, json) = submit(app, &state, &session_id, body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "bad_request");
    assert_eq!(
        json["details"],
        "Missing required fields: country, weather, covidStats"
    );
}

#[tokio::test]
async fn test_submit_without_weather() {
    let (app, state) = common::create_test_app();
    let session_id = common::login_session(&state, common::test_user("u1", "u1@example.com")).await;

    let mut body = full_body();
    body.as_object_mut().unwrap().remove("weather");

    let (status, _) = submit(app, &state, &session_id, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_without_covid_stats() {
    let (app, state) = common::create_test_app();
    let session_id = common::login_session(&state, common::test_user("u1", "u1@example.com")).await;

    let mut body = full_body();
    body.as_object_mut().unwrap().remove("covidStats");

    let (status, _) = submit(app, &state, &session_id, body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_empty_body_object() {
    let (app, state) = common::create_test_app();
    let session_id = common::login_session(&state, common::test_user("u1", "u1@example.com")).await;

    let (status, _) = submit(app, &state, &session_id, serde_json::json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_valid_submit_reaches_the_store() {
    let (app, state) = common::create_test_app();
    let session_id = common::login_session(&state, common::test_user("u1", "u1@example.com")).await;

    let (status, json) = submit(app, &state, &session_id, full_body()).await;

    // Validation passed; the offline mock store then fails, and the
    // store error detail is passed through to the response body.
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "database_error");
    assert!(json["details"].as_str().unwrap().contains("offline"));
}

#[tokio::test]
async fn test_sub_fields_are_optional() {
    let (app, state) = common::create_test_app();
    let session_id = common::login_session(&state, common::test_user("u1", "u1@example.com")).await;

    // Empty sub-objects are valid: only top-level presence is required
    let body = serde_json::json!({
        "country": "Germany",
        "weather": {},
        "covidStats": {}
    });

    let (status, json) = submit(app, &state, &session_id, body).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "database_error");
}
