use crate::cli::ServeArgs;
use crate::infra::{cors_layer, AppState};
use crate::routes::gateway_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loanpath::config::AppConfig;
use loanpath::error::AppError;
use loanpath::firebase::FirebaseApp;
use loanpath::scoring::{HttpPredictionClient, PredictionClient, ScoringService};
use loanpath::simulations::{InMemorySimulationRepository, SimulationService};
use loanpath::telemetry;
use loanpath::users::{InMemoryUserRepository, UserService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let firebase = Arc::new(FirebaseApp::initialize(&config.firebase)?);
    let client = Arc::new(HttpPredictionClient::new(&config.prediction)?);
    let prediction_endpoint = client.endpoint();

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        firebase: firebase.clone(),
        prediction_endpoint: prediction_endpoint.clone(),
    };

    let scoring = Arc::new(ScoringService::new(client));
    let simulations = Arc::new(SimulationService::new(Arc::new(
        InMemorySimulationRepository::default(),
    )));
    let users = Arc::new(UserService::new(Arc::new(InMemoryUserRepository::default())));

    let app = gateway_router(scoring, simulations, users)
        .layer(Extension(app_state))
        .layer(cors_layer(&config.server)?)
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        prediction = %prediction_endpoint,
        firebase_project = firebase.project_id(),
        "loanpath gateway ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
