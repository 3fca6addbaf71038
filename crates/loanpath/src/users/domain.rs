use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::offers::LoanPreference;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    #[serde(default)]
    pub loan_preference: LoanPreference,
}

impl UserPreferences {
    pub fn merge(&mut self, patch: PreferencesPatch) {
        if let Some(preference) = patch.loan_preference {
            self.loan_preference = preference;
        }
    }
}

/// Partial preference update; absent fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    #[serde(default)]
    pub loan_preference: Option<LoanPreference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(rename = "firebaseUID")]
    pub firebase_uid: String,
    pub email: String,
    pub name: String,
    pub gender: String,
    pub age: Option<u32>,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(firebase_uid: String, email: String, now: DateTime<Utc>) -> Self {
        Self {
            firebase_uid,
            email,
            name: String::new(),
            gender: String::new(),
            age: None,
            preferences: UserPreferences::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRequest {
    #[serde(default, rename = "firebaseUID")]
    pub firebase_uid: String,
    #[serde(default)]
    pub email: String,
}
