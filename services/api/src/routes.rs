use crate::infra::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use loanpath::error::AppError;
use loanpath::offers::offer_router;
use loanpath::scoring::{FinancialProfile, PredictionClient, ScoringService};
use loanpath::simulations::{simulation_router, SimulationRepository, SimulationService};
use loanpath::users::{user_router, UserRepository, UserService};
use serde_json::json;
use std::sync::Arc;

/// Names the scorer that produced a `/api/predict` body.
pub(crate) const SCORE_SOURCE_HEADER: &str = "x-score-source";

pub(crate) fn gateway_router<C, S, U>(
    scoring: Arc<ScoringService<C>>,
    simulations: Arc<SimulationService<S>>,
    users: Arc<UserService<U>>,
) -> Router
where
    C: PredictionClient + 'static,
    S: SimulationRepository + 'static,
    U: UserRepository + 'static,
{
    Router::new()
        .route("/api/predict", post(predict_endpoint::<C>))
        .with_state(scoring)
        .merge(simulation_router(simulations))
        .merge(user_router(users))
        .merge(offer_router())
        .route("/api/health", get(api_health))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn predict_endpoint<C>(
    State(service): State<Arc<ScoringService<C>>>,
    payload: Result<Json<FinancialProfile>, JsonRejection>,
) -> Result<Response, AppError>
where
    C: PredictionClient + 'static,
{
    let Json(profile) =
        payload.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;

    let outcome = service.predict(&profile).await;
    Ok((
        StatusCode::OK,
        [(SCORE_SOURCE_HEADER, outcome.source.label())],
        Json(outcome.result),
    )
        .into_response())
}

pub(crate) async fn api_health(Extension(state): Extension<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "predictionServiceUrl": state.prediction_endpoint,
        "firebase": state.firebase.status(),
    }))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
