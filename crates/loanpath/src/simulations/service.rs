use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::domain::{
    parse_instant, NewSimulation, Pagination, SimulationId, SimulationPage, SimulationQuery,
    SimulationRecord,
};
use super::export::{write_csv, EXPORT_ROW_LIMIT};
use super::repository::{RepositoryError, SimulationRepository};
use crate::statistics::{summarize, StatisticsSummary, TimeRange};

/// Service composing the repository with paging, statistics, and export.
pub struct SimulationService<R> {
    repository: Arc<R>,
}

impl<R> SimulationService<R>
where
    R: SimulationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Persist a new simulation, stamping it with `now` when no timestamp was supplied.
    pub fn save(
        &self,
        request: NewSimulation,
        now: DateTime<Utc>,
    ) -> Result<SimulationRecord, SimulationServiceError> {
        let user_id = required_user(&request.user_id)?;
        let timestamp = match request.timestamp.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => {
                parse_instant(raw).map_err(SimulationServiceError::Validation)?
            }
            _ => now,
        };

        let record = SimulationRecord {
            id: SimulationId::generate(),
            user_id,
            financial_data: request.financial_data,
            score: request.score,
            explanation: request.explanation,
            risk_category: request.risk_category,
            estimated_apr: request.estimated_apr,
            timestamp,
        };

        let stored = self.repository.insert(record)?;
        info!(simulation_id = %stored.id.0, user_id = %stored.user_id, "simulation saved");
        Ok(stored)
    }

    /// Newest-first page of a user's simulations within the optional inclusive date bounds.
    pub fn list(
        &self,
        user_id: &str,
        query: &SimulationQuery,
    ) -> Result<SimulationPage, SimulationServiceError> {
        let user_id = required_user(user_id)?;
        let page = query.page.max(1);
        let limit = query.limit.max(1);

        let mut records: Vec<SimulationRecord> = self
            .repository
            .for_user(&user_id)?
            .into_iter()
            .filter(|record| query.start.map_or(true, |start| record.timestamp >= start))
            .filter(|record| query.end.map_or(true, |end| record.timestamp <= end))
            .collect();
        records.sort_by_key(|record| Reverse(record.timestamp));

        let total = records.len();
        let simulations = records
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .collect();

        Ok(SimulationPage {
            simulations,
            pagination: Pagination {
                page,
                limit,
                total,
                pages: total.div_ceil(limit),
            },
        })
    }

    pub fn delete(&self, id: &SimulationId) -> Result<(), SimulationServiceError> {
        self.repository.delete(id)?;
        info!(simulation_id = %id.0, "simulation deleted");
        Ok(())
    }

    /// Aggregate every stored simulation.
    pub fn statistics(
        &self,
        range: Option<TimeRange>,
        now: DateTime<Utc>,
    ) -> Result<StatisticsSummary, SimulationServiceError> {
        let records = self.repository.all()?;
        Ok(summarize(&records, range, now))
    }

    /// CSV rendering of the user's most recent simulations.
    pub fn export_csv(&self, user_id: &str) -> Result<String, SimulationServiceError> {
        let page = self.list(user_id, &SimulationQuery::first(EXPORT_ROW_LIMIT))?;
        Ok(write_csv(&page.simulations)?)
    }
}

fn required_user(user_id: &str) -> Result<String, SimulationServiceError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(SimulationServiceError::Validation(
            "userId is required".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

/// Error raised by the simulation service.
#[derive(Debug, thiserror::Error)]
pub enum SimulationServiceError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("export failed: {0}")]
    Export(#[from] csv::Error),
}
