use axum::http::{header, HeaderValue, Method};
use loanpath::config::{ConfigError, ServerConfig};
use loanpath::firebase::FirebaseApp;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) firebase: Arc<FirebaseApp>,
    pub(crate) prediction_endpoint: String,
}

/// Browser access for the configured frontends, with credentials.
pub(crate) fn cors_layer(server: &ServerConfig) -> Result<CorsLayer, ConfigError> {
    let origins = server
        .allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|_| ConfigError::InvalidOrigin(origin.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(origins: &[&str]) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            allowed_origins: origins.iter().map(|origin| origin.to_string()).collect(),
        }
    }

    #[test]
    fn builds_layer_for_configured_origins() {
        assert!(cors_layer(&server(&["http://localhost:3000", "https://app.example"])).is_ok());
    }

    #[test]
    fn rejects_origin_that_is_not_a_header_value() {
        let err = cors_layer(&server(&["http://localhost:3000", "bad\norigin"]))
            .expect_err("newline rejected");
        assert!(matches!(err, ConfigError::InvalidOrigin(origin) if origin == "bad\norigin"));
    }
}
