use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::{parse_instant, NewSimulation, SimulationId, SimulationQuery};
use super::export::ExportFormat;
use super::repository::{RepositoryError, SimulationRepository};
use super::service::{SimulationService, SimulationServiceError};
use crate::statistics::TimeRange;

/// Router builder exposing simulation history, statistics, and export endpoints.
pub fn simulation_router<R>(service: Arc<SimulationService<R>>) -> Router
where
    R: SimulationRepository + 'static,
{
    Router::new()
        .route(
            "/api/simulations",
            get(list_handler::<R>).post(save_handler::<R>),
        )
        .route("/api/simulations/:id", delete(delete_handler::<R>))
        .route("/api/statistics", get(statistics_handler::<R>))
        .route("/api/export/:format", get(export_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListParams {
    #[serde(default)]
    pub(crate) user_id: Option<String>,
    #[serde(default)]
    pub(crate) page: Option<usize>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    #[serde(default)]
    pub(crate) start_date: Option<String>,
    #[serde(default)]
    pub(crate) end_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatisticsParams {
    #[serde(default)]
    pub(crate) time_range: Option<String>,
    /// Accepted for client compatibility; records carry no loan type.
    #[serde(default)]
    #[allow(dead_code)]
    pub(crate) loan_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExportParams {
    #[serde(default)]
    pub(crate) user_id: Option<String>,
}

pub(crate) async fn save_handler<R>(
    State(service): State<Arc<SimulationService<R>>>,
    Json(request): Json<NewSimulation>,
) -> Response
where
    R: SimulationRepository + 'static,
{
    match service.save(request, Utc::now()) {
        Ok(simulation) => (
            StatusCode::OK,
            Json(json!({
                "message": "Simulation saved successfully",
                "simulation": simulation,
            })),
        )
            .into_response(),
        Err(err) => service_error(err),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<SimulationService<R>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    R: SimulationRepository + 'static,
{
    let defaults = SimulationQuery::default();
    let start = match params.start_date.as_deref().map(parse_instant).transpose() {
        Ok(start) => start,
        Err(message) => return error_body(StatusCode::BAD_REQUEST, message),
    };
    let end = match params.end_date.as_deref().map(parse_instant).transpose() {
        Ok(end) => end,
        Err(message) => return error_body(StatusCode::BAD_REQUEST, message),
    };
    let query = SimulationQuery {
        page: params.page.unwrap_or(defaults.page),
        limit: params.limit.unwrap_or(defaults.limit),
        start,
        end,
    };

    let user_id = params.user_id.unwrap_or_default();
    match service.list(&user_id, &query) {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => service_error(err),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<SimulationService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: SimulationRepository + 'static,
{
    match service.delete(&SimulationId(id)) {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "message": "Simulation deleted successfully" })),
        )
            .into_response(),
        Err(err) => service_error(err),
    }
}

pub(crate) async fn statistics_handler<R>(
    State(service): State<Arc<SimulationService<R>>>,
    Query(params): Query<StatisticsParams>,
) -> Response
where
    R: SimulationRepository + 'static,
{
    let range = params.time_range.as_deref().and_then(TimeRange::parse);
    match service.statistics(range, Utc::now()) {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(err) => service_error(err),
    }
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<SimulationService<R>>>,
    Path(format): Path<String>,
    Query(params): Query<ExportParams>,
) -> Response
where
    R: SimulationRepository + 'static,
{
    let user_id = params.user_id.unwrap_or_default();
    if user_id.trim().is_empty() {
        return error_body(StatusCode::BAD_REQUEST, "userId is required");
    }

    match ExportFormat::parse(&format) {
        Some(ExportFormat::Csv) => match service.export_csv(&user_id) {
            Ok(csv) => (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv"),
                    (
                        header::CONTENT_DISPOSITION,
                        "attachment; filename=simulations.csv",
                    ),
                ],
                csv,
            )
                .into_response(),
            Err(err) => service_error(err),
        },
        Some(ExportFormat::Pdf) => {
            error_body(StatusCode::NOT_IMPLEMENTED, "PDF export not yet implemented")
        }
        None => error_body(StatusCode::BAD_REQUEST, "Invalid format. Use csv or pdf"),
    }
}

fn service_error(err: SimulationServiceError) -> Response {
    match err {
        SimulationServiceError::Validation(message) => error_body(StatusCode::BAD_REQUEST, message),
        SimulationServiceError::Repository(RepositoryError::NotFound) => {
            error_body(StatusCode::NOT_FOUND, "simulation not found")
        }
        SimulationServiceError::Repository(RepositoryError::Conflict) => {
            error_body(StatusCode::CONFLICT, "simulation already exists")
        }
        other => {
            error!(error = %other, "simulation request failed");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
        }
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, Json(payload)).into_response()
}
