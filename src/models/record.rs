// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Observation record model for storage and API.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// Stored record in the `records` collection.
///
/// Field names are camelCase on the wire and in the store, matching the
/// documents written by the original Node service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Document ID, assigned by MongoDB on insert
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Country the observation is about
    pub country: String,
    /// Weather snapshot (all fields optional)
    pub weather: WeatherReport,
    /// Pandemic statistics snapshot (all fields optional)
    pub covid_stats: CovidStats,
    /// Creation time, set server-side
    pub timestamp: DateTime,
    /// Provider id of the submitting user (owner, never reassigned)
    pub user_id: String,
    /// Denormalized first email of the submitter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

/// Weather sub-document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// Pandemic statistics sub-document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CovidStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cases: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deaths: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovered: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today_cases: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today_deaths: Option<i64>,
}

/// API view of a record: ObjectId as hex, timestamp as RFC 3339.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    pub id: String,
    pub country: String,
    pub weather: WeatherReport,
    pub covid_stats: CovidStats,
    pub timestamp: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

impl From<Record> for RecordView {
    fn from(record: Record) -> Self {
        Self {
            id: record.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            country: record.country,
            weather: record.weather,
            covid_stats: record.covid_stats,
            timestamp: record
                .timestamp
                .try_to_rfc3339_string()
                .unwrap_or_default(),
            user_id: record.user_id,
            user_email: record.user_email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        Record {
            id: Some(ObjectId::new()),
            country: "Germany".to_string(),
            weather: WeatherReport {
                temperature: Some(21.5),
                wind_speed: Some(3.2),
                city: Some("Berlin".to_string()),
                ..Default::default()
            },
            covid_stats: CovidStats {
                cases: Some(1000),
                today_cases: Some(12),
                ..Default::default()
            },
            timestamp: DateTime::from_millis(1_700_000_000_000),
            user_id: "google-123".to_string(),
            user_email: Some("user@example.com".to_string()),
        }
    }

    #[test]
    fn test_wire_field_names_are_camel_case() {
        let json = serde_json::to_value(sample_record()).unwrap();

        assert!(json.get("covidStats").is_some());
        assert!(json.get("userId").is_some());
        assert!(json["weather"].get("windSpeed").is_some());
        assert!(json["covidStats"].get("todayCases").is_some());
        // Unset optional fields are omitted, not null
        assert!(json["weather"].get("humidity").is_none());
    }

    #[test]
    fn test_view_renders_id_and_timestamp() {
        let record = sample_record();
        let hex = record.id.unwrap().to_hex();

        let view = RecordView::from(record);
        assert_eq!(view.id, hex);
        // RFC 3339, parseable back into a datetime
        assert!(chrono::DateTime::parse_from_rfc3339(&view.timestamp).is_ok());
    }
}
