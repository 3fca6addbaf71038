use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{SimulationId, SimulationRecord};

/// Storage abstraction so the service can run against Firestore or process memory.
pub trait SimulationRepository: Send + Sync {
    fn insert(&self, record: SimulationRecord) -> Result<SimulationRecord, RepositoryError>;
    fn delete(&self, id: &SimulationId) -> Result<(), RepositoryError>;
    /// Every record owned by `user_id`, in no particular order.
    fn for_user(&self, user_id: &str) -> Result<Vec<SimulationRecord>, RepositoryError>;
    fn all(&self) -> Result<Vec<SimulationRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store used by the gateway binary and tests.
#[derive(Debug, Default, Clone)]
pub struct InMemorySimulationRepository {
    records: Arc<Mutex<HashMap<SimulationId, SimulationRecord>>>,
}

impl InMemorySimulationRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<SimulationId, SimulationRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("simulation store poisoned".to_string()))
    }

    pub fn len(&self) -> usize {
        self.lock().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SimulationRepository for InMemorySimulationRepository {
    fn insert(&self, record: SimulationRecord) -> Result<SimulationRecord, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn delete(&self, id: &SimulationId) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn for_user(&self, user_id: &str) -> Result<Vec<SimulationRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .values()
            .filter(|record| record.user_id == user_id)
            .cloned()
            .collect())
    }

    fn all(&self) -> Result<Vec<SimulationRecord>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.values().cloned().collect())
    }
}
