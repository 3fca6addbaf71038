use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::scoring::{fallback, FinancialProfile};
use crate::simulations::domain::{NewSimulation, SimulationId, SimulationRecord};
use crate::simulations::repository::{
    InMemorySimulationRepository, RepositoryError, SimulationRepository,
};
use crate::simulations::SimulationService;

pub(super) fn instant(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 30, 0)
        .single()
        .expect("valid instant")
}

pub(super) fn scored_request(user_id: &str, profile: FinancialProfile, when: &str) -> NewSimulation {
    let result = fallback::score(&profile);
    NewSimulation {
        user_id: user_id.to_string(),
        financial_data: profile,
        score: result.prediction,
        explanation: result.explanation,
        risk_category: result.risk_category.label().to_string(),
        estimated_apr: result.estimated_apr,
        timestamp: Some(when.to_string()),
    }
}

pub(super) fn strained_profile() -> FinancialProfile {
    FinancialProfile {
        income: 20_000.0,
        expenses: 18_000.0,
        credit_utilization: 80.0,
        debt_ratio: 50.0,
        savings: 1_000.0,
        credit_score: 600.0,
        employment_years: 0.0,
    }
}

pub(super) fn build_service() -> (
    Arc<SimulationService<InMemorySimulationRepository>>,
    Arc<InMemorySimulationRepository>,
) {
    let repository = Arc::new(InMemorySimulationRepository::default());
    let service = Arc::new(SimulationService::new(repository.clone()));
    (service, repository)
}

/// Seeds three simulations for `uid-1` across February and March plus one for another user.
pub(super) fn seeded_service() -> Arc<SimulationService<InMemorySimulationRepository>> {
    let (service, _) = build_service();
    let now = instant(2026, 3, 20);
    for request in [
        scored_request("uid-1", FinancialProfile::default(), "2026-02-03T10:00:00Z"),
        scored_request("uid-1", strained_profile(), "2026-03-01T08:00:00Z"),
        scored_request("uid-1", FinancialProfile::default(), "2026-03-18T16:45:00Z"),
        scored_request("uid-2", strained_profile(), "2026-03-05T12:00:00Z"),
    ] {
        service.save(request, now).expect("seed saves");
    }
    service
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) async fn text_body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

/// Repository whose backend is always down.
pub(super) struct UnavailableRepository;

impl SimulationRepository for UnavailableRepository {
    fn insert(&self, _record: SimulationRecord) -> Result<SimulationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("firestore offline".to_string()))
    }

    fn delete(&self, _id: &SimulationId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("firestore offline".to_string()))
    }

    fn for_user(&self, _user_id: &str) -> Result<Vec<SimulationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("firestore offline".to_string()))
    }

    fn all(&self) -> Result<Vec<SimulationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("firestore offline".to_string()))
    }
}
