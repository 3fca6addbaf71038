use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::domain::{PreferencesPatch, SyncRequest, UserPreferences, UserRecord};
use super::repository::UserRepository;
use crate::simulations::RepositoryError;

pub struct UserService<R> {
    repository: Arc<R>,
}

impl<R> UserService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Return the stored user, creating it with default preferences on first sign-in.
    pub fn sync(
        &self,
        request: SyncRequest,
        now: DateTime<Utc>,
    ) -> Result<UserRecord, UserServiceError> {
        let uid = request.firebase_uid.trim();
        let email = request.email.trim();
        if uid.is_empty() || email.is_empty() {
            return Err(UserServiceError::Validation(
                "firebaseUID and email are required".to_string(),
            ));
        }

        if let Some(existing) = self.repository.fetch(uid)? {
            return Ok(existing);
        }

        let created = self
            .repository
            .upsert(UserRecord::new(uid.to_string(), email.to_string(), now))?;
        info!(firebase_uid = %created.firebase_uid, "user created");
        Ok(created)
    }

    pub fn preferences(&self, firebase_uid: &str) -> Result<UserPreferences, UserServiceError> {
        Ok(self
            .repository
            .fetch(firebase_uid)?
            .map(|user| user.preferences)
            .unwrap_or_default())
    }

    /// Merge the patch into the stored preferences, creating a bare user when none exists.
    pub fn update_preferences(
        &self,
        firebase_uid: &str,
        patch: PreferencesPatch,
        now: DateTime<Utc>,
    ) -> Result<UserPreferences, UserServiceError> {
        let mut user = self
            .repository
            .fetch(firebase_uid)?
            .unwrap_or_else(|| UserRecord::new(firebase_uid.to_string(), String::new(), now));

        user.preferences.merge(patch);
        user.updated_at = now;

        let stored = self.repository.upsert(user)?;
        Ok(stored.preferences)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
