// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Record submission and retrieval routes.
//!
//! Every route here sits behind the API-key gate and the session gate;
//! the gates are layered in routes/mod.rs.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::mongo::RECORD_LIST_LIMIT;
use crate::error::{AppError, Result};
use crate::middleware::CurrentUser;
use crate::models::{CovidStats, Record, RecordView, WeatherReport};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/submit", post(submit))
        .route("/records", get(list_records))
        .route("/records/{id}", get(get_record))
}

/// Submission body. Presence of the three top-level fields is the only
/// validation; sub-fields are free-form optionals.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub country: Option<String>,
    pub weather: Option<WeatherReport>,
    pub covid_stats: Option<CovidStats>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub record_id: String,
}

/// Submit one aggregated observation for the current user.
async fn submit(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>)> {
    let (Some(country), Some(weather), Some(covid_stats)) =
        (body.country, body.weather, body.covid_stats)
    else {
        return Err(AppError::BadRequest(
            "Missing required fields: country, weather, covidStats".to_string(),
        ));
    };

    let record = Record {
        id: None,
        country,
        weather,
        covid_stats,
        timestamp: DateTime::now(),
        user_id: current.user.id.clone(),
        user_email: current.user.primary_email().map(str::to_string),
    };

    let record_id = state.store.insert_record(&record).await?;

    tracing::info!(
        user_id = %current.user.id,
        record_id = %record_id,
        country = %record.country,
        "Record stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            success: true,
            message: "Data stored successfully".to_string(),
            record_id,
        }),
    ))
}

#[derive(Serialize)]
pub struct RecordsResponse {
    pub success: bool,
    pub count: usize,
    pub records: Vec<RecordView>,
}

/// The current user's most recent records, newest first.
async fn list_records(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
) -> Result<Json<RecordsResponse>> {
    let records = state
        .store
        .recent_records_for_user(&current.user.id, RECORD_LIST_LIMIT)
        .await?;

    let records: Vec<RecordView> = records.into_iter().map(RecordView::from).collect();

    Ok(Json(RecordsResponse {
        success: true,
        count: records.len(),
        records,
    }))
}

#[derive(Serialize)]
pub struct RecordResponse {
    pub success: bool,
    pub record: RecordView,
}

/// A single record owned by the current user.
///
/// "Does not exist" and "exists but belongs to someone else" both
/// read as 404.
async fn get_record(
    State(state): State<Arc<AppState>>,
    Extension(current): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<RecordResponse>> {
    let record = state
        .store
        .find_owned_record(&id, &current.user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Record not found".to_string()))?;

    Ok(Json(RecordResponse {
        success: true,
        record: record.into(),
    }))
}
