//! Loan readiness scoring, simulation history, and statistics aggregation.

pub mod config;
pub mod error;
pub mod firebase;
pub mod offers;
pub mod scoring;
pub mod simulations;
pub mod statistics;
pub mod telemetry;
pub mod users;
