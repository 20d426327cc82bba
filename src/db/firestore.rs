// SPDX-License-Identifier: MIT

//! Firestore client wrapper with typed operations.
//!
//! Documents are addressed through the fixed hierarchy
//! `users/{user_id}/workouts/{workout_id}/sets/{set_id}/reps/{rep_id}`.
//! Reads return [`RawDoc`]s (document name plus stored fields); the
//! assembly into the nested workout structure happens in the service
//! layer.

use std::path::Path;

use serde_json::{Map, Value};

use crate::config::{Config, ConfigError};
use crate::db::collections;
use crate::error::AppError;
use crate::models::RawDoc;

/// Firestore database client.
#[derive(Clone, Debug)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client from configuration.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated
        // connection to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(&config.gcp_project_id).await;
        }

        let path = config
            .google_application_credentials
            .as_deref()
            .ok_or(ConfigError::Missing("GOOGLE_APPLICATION_CREDENTIALS"))?;

        Self::with_credentials_file(&config.gcp_project_id, path).await
    }

    /// Create a Firestore client authenticated by a service account file.
    pub async fn with_credentials_file(project_id: &str, path: &Path) -> Result<Self, AppError> {
        if !path.is_file() {
            return Err(ConfigError::Credentials(format!(
                "Credential file not found: {}",
                path.display()
            ))
            .into());
        }

        tracing::debug!(
            credentials = %path.display(),
            "Initializing Firestore client with credentials"
        );

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::File(path.to_path_buf()),
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // ExternalJwtFunctionSource provides a dummy token without needing
        // a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Read Operations ─────────────────────────────────────────

    /// Get a single workout document, or `None` if it does not exist.
    pub async fn get_workout_doc(
        &self,
        user_id: &str,
        workout_id: &str,
    ) -> Result<Option<RawDoc>, AppError> {
        let client = self.get_client()?;
        let parent = client
            .parent_path(collections::USERS, user_id)
            .map_err(|e| AppError::Database(e.to_string()))?;

        client
            .fluent()
            .select()
            .by_id_in(collections::WORKOUTS)
            .parent(&parent)
            .obj()
            .one(workout_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all set documents under a workout, in stream order.
    pub async fn list_set_docs(
        &self,
        user_id: &str,
        workout_id: &str,
    ) -> Result<Vec<RawDoc>, AppError> {
        let client = self.get_client()?;
        let parent = client
            .parent_path(collections::USERS, user_id)
            .and_then(|p| p.at(collections::WORKOUTS, workout_id))
            .map_err(|e| AppError::Database(e.to_string()))?;

        client
            .fluent()
            .select()
            .from(collections::SETS)
            .parent(&parent)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List all rep documents under a set, in stream order.
    pub async fn list_rep_docs(
        &self,
        user_id: &str,
        workout_id: &str,
        set_id: &str,
    ) -> Result<Vec<RawDoc>, AppError> {
        let client = self.get_client()?;
        let parent = client
            .parent_path(collections::USERS, user_id)
            .and_then(|p| p.at(collections::WORKOUTS, workout_id))
            .and_then(|p| p.at(collections::SETS, set_id))
            .map_err(|e| AppError::Database(e.to_string()))?;

        client
            .fluent()
            .select()
            .from(collections::REPS)
            .parent(&parent)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Write Operations ────────────────────────────────────────

    /// Create or update a workout document with the given field map.
    pub async fn upsert_workout(
        &self,
        user_id: &str,
        workout_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;
        let parent = client
            .parent_path(collections::USERS, user_id)
            .map_err(|e| AppError::Database(e.to_string()))?;

        let _: () = client
            .fluent()
            .update()
            .in_col(collections::WORKOUTS)
            .document_id(workout_id)
            .parent(&parent)
            .object(fields)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Create or update a set document under a workout.
    pub async fn upsert_set(
        &self,
        user_id: &str,
        workout_id: &str,
        set_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;
        let parent = client
            .parent_path(collections::USERS, user_id)
            .and_then(|p| p.at(collections::WORKOUTS, workout_id))
            .map_err(|e| AppError::Database(e.to_string()))?;

        let _: () = client
            .fluent()
            .update()
            .in_col(collections::SETS)
            .document_id(set_id)
            .parent(&parent)
            .object(fields)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Create or update a rep document under a set.
    pub async fn upsert_rep(
        &self,
        user_id: &str,
        workout_id: &str,
        set_id: &str,
        rep_id: &str,
        fields: &Map<String, Value>,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;
        let parent = client
            .parent_path(collections::USERS, user_id)
            .and_then(|p| p.at(collections::WORKOUTS, workout_id))
            .and_then(|p| p.at(collections::SETS, set_id))
            .map_err(|e| AppError::Database(e.to_string()))?;

        let _: () = client
            .fluent()
            .update()
            .in_col(collections::REPS)
            .document_id(rep_id)
            .parent(&parent)
            .object(fields)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
