// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.

use std::env;
use std::path::{Path, PathBuf};

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the service account credential file.
    ///
    /// May be absent when running against the Firestore emulator.
    pub google_application_credentials: Option<PathBuf>,
    /// GCP project ID
    pub gcp_project_id: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads an optional `.env` file first. `GOOGLE_APPLICATION_CREDENTIALS`
    /// is required unless `FIRESTORE_EMULATOR_HOST` is set. The project ID
    /// comes from `GCP_PROJECT_ID` when set, otherwise from the credential
    /// file's `project_id` field.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let credentials = env::var("GOOGLE_APPLICATION_CREDENTIALS")
            .ok()
            .map(PathBuf::from);
        let emulator = env::var("FIRESTORE_EMULATOR_HOST").is_ok();

        if credentials.is_none() && !emulator {
            return Err(ConfigError::Missing("GOOGLE_APPLICATION_CREDENTIALS"));
        }

        let gcp_project_id = match env::var("GCP_PROJECT_ID") {
            Ok(project) => project,
            Err(_) => match &credentials {
                Some(path) => project_id_from_credentials(path)?,
                None => "local-dev".to_string(),
            },
        };

        Ok(Self {
            google_application_credentials: credentials,
            gcp_project_id,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            google_application_credentials: None,
            gcp_project_id: "test-project".to_string(),
        }
    }
}

/// Read the `project_id` field out of a service account credential file.
fn project_id_from_credentials(path: &Path) -> Result<String, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        ConfigError::Credentials(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let parsed: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
        ConfigError::Credentials(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    parsed
        .get("project_id")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            ConfigError::Credentials(format!("No project_id field in {}", path.display()))
        })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid credential file: {0}")]
    Credentials(String),
}
