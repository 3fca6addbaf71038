use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::UserRecord;
use crate::simulations::RepositoryError;

pub trait UserRepository: Send + Sync {
    fn fetch(&self, firebase_uid: &str) -> Result<Option<UserRecord>, RepositoryError>;
    /// Insert or replace the record keyed by its `firebase_uid`.
    fn upsert(&self, record: UserRecord) -> Result<UserRecord, RepositoryError>;
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<HashMap<String, UserRecord>>>,
}

impl UserRepository for InMemoryUserRepository {
    fn fetch(&self, firebase_uid: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let guard = self
            .users
            .lock()
            .map_err(|_| RepositoryError::Unavailable("user store poisoned".to_string()))?;
        Ok(guard.get(firebase_uid).cloned())
    }

    fn upsert(&self, record: UserRecord) -> Result<UserRecord, RepositoryError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|_| RepositoryError::Unavailable("user store poisoned".to_string()))?;
        guard.insert(record.firebase_uid.clone(), record.clone());
        Ok(record)
    }
}
