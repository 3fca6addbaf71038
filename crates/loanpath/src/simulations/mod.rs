//! Simulation history: persistence seam, paging, statistics, and CSV export.

pub mod domain;
mod export;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    NewSimulation, Pagination, SimulationId, SimulationPage, SimulationQuery, SimulationRecord,
};
pub use export::{ExportFormat, EXPORT_ROW_LIMIT};
pub use repository::{InMemorySimulationRepository, RepositoryError, SimulationRepository};
pub use router::simulation_router;
pub use service::{SimulationService, SimulationServiceError};
