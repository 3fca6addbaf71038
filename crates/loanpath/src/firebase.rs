//! Firebase project handle built once from [`FirebaseConfig`] and shared with collaborators.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{CredentialSource, FirebaseConfig};

/// Fields read from a Google service-account key file.
#[derive(Debug, Clone, Deserialize)]
struct ServiceAccountKey {
    #[serde(rename = "type")]
    kind: String,
    client_email: String,
    private_key: String,
}

/// Initialised Firebase binding. Cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseApp {
    project_id: String,
    credential: ResolvedCredential,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ResolvedCredential {
    ServiceAccount { path: PathBuf, client_email: String },
    ApplicationDefault,
}

/// Status view exposed by the health endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseStatus {
    pub project_id: String,
    pub credentials: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum FirebaseError {
    #[error("unable to read service account key {path}: {source}")]
    ReadKey {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("service account key {path} is not valid JSON: {source}")]
    ParseKey {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("service account key {path} is unusable: {reason}")]
    InvalidKey { path: PathBuf, reason: String },
}

impl FirebaseApp {
    pub fn initialize(config: &FirebaseConfig) -> Result<Self, FirebaseError> {
        let app = match &config.credentials {
            CredentialSource::ServiceAccountFile(path) => {
                let key = read_service_account(path)?;
                Self {
                    project_id: config.project_id.clone(),
                    credential: ResolvedCredential::ServiceAccount {
                        path: path.clone(),
                        client_email: key.client_email,
                    },
                }
            }
            CredentialSource::ApplicationDefaultCredentials => Self {
                project_id: config.project_id.clone(),
                credential: ResolvedCredential::ApplicationDefault,
            },
        };

        info!(project_id = %app.project_id, credentials = app.credential_label(), "firebase initialized");
        Ok(app)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn credential_label(&self) -> &'static str {
        match self.credential {
            ResolvedCredential::ServiceAccount { .. } => "service_account_file",
            ResolvedCredential::ApplicationDefault => "application_default_credentials",
        }
    }

    pub fn status(&self) -> FirebaseStatus {
        let client_email = match &self.credential {
            ResolvedCredential::ServiceAccount { client_email, .. } => Some(client_email.clone()),
            ResolvedCredential::ApplicationDefault => None,
        };

        FirebaseStatus {
            project_id: self.project_id.clone(),
            credentials: self.credential_label(),
            client_email,
        }
    }
}

fn read_service_account(path: &Path) -> Result<ServiceAccountKey, FirebaseError> {
    let raw = std::fs::read_to_string(path).map_err(|source| FirebaseError::ReadKey {
        path: path.to_path_buf(),
        source,
    })?;
    let key: ServiceAccountKey =
        serde_json::from_str(&raw).map_err(|source| FirebaseError::ParseKey {
            path: path.to_path_buf(),
            source,
        })?;

    if key.kind != "service_account" {
        return Err(FirebaseError::InvalidKey {
            path: path.to_path_buf(),
            reason: format!("expected type 'service_account', found '{}'", key.kind),
        });
    }
    if key.private_key.trim().is_empty() {
        return Err(FirebaseError::InvalidKey {
            path: path.to_path_buf(),
            reason: "private_key is empty".to_string(),
        });
    }

    Ok(key)
}
