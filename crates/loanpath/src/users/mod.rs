//! User sync and loan preference storage.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{PreferencesPatch, SyncRequest, UserPreferences, UserRecord};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use router::user_router;
pub use service::{UserService, UserServiceError};
