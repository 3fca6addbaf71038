use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PREDICTION_URL: &str = "http://localhost:5001";
const DEFAULT_PREDICTION_TIMEOUT_SECS: u64 = 10;
const DEFAULT_FIREBASE_PROJECT: &str = "loanpath-dev";
const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:3001"];

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the gateway process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub prediction: PredictionConfig,
    pub firebase: FirebaseConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let allowed_origins = DEFAULT_CORS_ORIGINS
            .iter()
            .map(|origin| origin.to_string())
            .chain(non_empty_var("FRONTEND_URL"))
            .chain(non_empty_var("NGROK_URL"))
            .collect();

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let base_url = non_empty_var("PREDICTION_SERVICE_URL")
            .unwrap_or_else(|| DEFAULT_PREDICTION_URL.to_string());
        let timeout_secs = match non_empty_var("PREDICTION_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidPredictionTimeout)?,
            None => DEFAULT_PREDICTION_TIMEOUT_SECS,
        };

        let project_id = non_empty_var("FIREBASE_PROJECT_ID")
            .unwrap_or_else(|| DEFAULT_FIREBASE_PROJECT.to_string());
        let credentials = match non_empty_var("FIREBASE_SERVICE_ACCOUNT_KEY") {
            Some(path) => CredentialSource::ServiceAccountFile(PathBuf::from(path)),
            None => CredentialSource::ApplicationDefaultCredentials,
        };

        Ok(Self {
            environment,
            server: ServerConfig {
                host,
                port,
                allowed_origins,
            },
            telemetry: TelemetryConfig { log_level },
            prediction: PredictionConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout: Duration::from_secs(timeout_secs),
            },
            firebase: FirebaseConfig {
                project_id,
                credentials,
            },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Browser origins permitted by the CORS layer.
    pub allowed_origins: Vec<String>,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the external prediction service and the single-attempt budget.
#[derive(Debug, Clone)]
pub struct PredictionConfig {
    pub base_url: String,
    pub timeout: Duration,
}

/// Firebase project binding, resolved once at startup and injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    pub project_id: String,
    pub credentials: CredentialSource,
}

/// How the process authenticates against Firebase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    ServiceAccountFile(PathBuf),
    ApplicationDefaultCredentials,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidPredictionTimeout,
    InvalidOrigin(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidPredictionTimeout => {
                write!(f, "PREDICTION_TIMEOUT_SECS must be a positive integer")
            }
            ConfigError::InvalidOrigin(origin) => {
                write!(f, "CORS origin '{origin}' is not a valid header value")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidPredictionTimeout
            | ConfigError::InvalidOrigin(_) => None,
        }
    }
}
