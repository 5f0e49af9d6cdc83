// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! MongoDB client wrapper with typed record operations.
//!
//! Provides high-level operations for:
//! - Inserting submitted records
//! - Listing a user's most recent records
//! - Owned single-record lookup (ownership folded into the predicate)

use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::ClientOptions,
    Client, Collection, Database, IndexModel,
};
use std::time::Duration;

use crate::db::collections;
use crate::error::AppError;
use crate::models::Record;

const DEFAULT_DATABASE: &str = "weather-covid-db";

/// How many records a listing returns at most.
pub const RECORD_LIST_LIMIT: i64 = 50;

/// MongoDB-backed record store.
#[derive(Clone)]
pub struct RecordStore {
    db: Option<Database>,
}

impl RecordStore {
    /// Connect to MongoDB and prepare the record collection.
    ///
    /// The database name is taken from the URI path, falling back to
    /// `weather-covid-db`. The connection is verified before returning.
    pub async fn connect(uri: &str) -> Result<Self, AppError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| AppError::Database(format!("Invalid MongoDB URI: {}", e)))?;

        options.connect_timeout = Some(Duration::from_secs(5));
        options.server_selection_timeout = Some(Duration::from_secs(5));

        let db_name = options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(options)
            .map_err(|e| AppError::Database(format!("Failed to create MongoDB client: {}", e)))?;
        let db = client.database(&db_name);

        // Verify the connection before serving traffic
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        tracing::info!(database = %db_name, "Connected to MongoDB");

        let store = Self { db: Some(db) };
        store.ensure_indexes().await?;
        Ok(store)
    }

    /// Create a mock store for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { db: None }
    }

    /// Ensure the index backing the per-user listing query.
    async fn ensure_indexes(&self) -> Result<(), AppError> {
        let index = IndexModel::builder()
            .keys(doc! { "userId": 1, "timestamp": -1 })
            .build();

        self.records()?
            .create_index(index)
            .await
            .map_err(|e| AppError::Database(format!("Failed to create index: {}", e)))?;

        tracing::debug!("Record indexes ready");
        Ok(())
    }

    /// Helper to get the database or return an error if offline.
    fn get_db(&self) -> Result<&Database, AppError> {
        self.db
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    fn records(&self) -> Result<Collection<Record>, AppError> {
        Ok(self.get_db()?.collection(collections::RECORDS))
    }

    // ─── Record Operations ───────────────────────────────────────

    /// Insert a new record, returning its id as hex.
    pub async fn insert_record(&self, record: &Record) -> Result<String, AppError> {
        let result = self
            .records()?
            .insert_one(record)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        result
            .inserted_id
            .as_object_id()
            .map(|oid| oid.to_hex())
            .ok_or_else(|| AppError::Database("Insert did not return an ObjectId".to_string()))
    }

    /// Most recent records for a user, newest first, capped at `limit`.
    pub async fn recent_records_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<Record>, AppError> {
        self.records()?
            .find(doc! { "userId": user_id })
            .sort(doc! { "timestamp": -1 })
            .limit(limit)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Look up a single record owned by `user_id`.
    ///
    /// A nonexistent id, an id owned by someone else, and a string that
    /// is not an ObjectId all read as `None`.
    pub async fn find_owned_record(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<Option<Record>, AppError> {
        let Ok(object_id) = ObjectId::parse_str(id) else {
            return Ok(None);
        };

        self.records()?
            .find_one(doc! { "_id": object_id, "userId": user_id })
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
