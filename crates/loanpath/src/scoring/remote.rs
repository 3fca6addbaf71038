use std::future::Future;

use reqwest::StatusCode;

use super::{FinancialProfile, ScoreResult};
use crate::config::PredictionConfig;

/// Outbound call to the model-backed scoring service.
pub trait PredictionClient: Send + Sync {
    fn predict(
        &self,
        profile: &FinancialProfile,
    ) -> impl Future<Output = Result<ScoreResult, PredictionError>> + Send;

    /// Human-readable target for logs and the health endpoint.
    fn endpoint(&self) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("prediction service timed out")]
    Timeout,
    #[error("prediction service unreachable: {0}")]
    Transport(String),
    #[error("prediction service answered {0}")]
    Status(StatusCode),
    #[error("prediction payload could not be decoded: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for PredictionError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            PredictionError::Timeout
        } else if value.is_decode() {
            PredictionError::Decode(value.to_string())
        } else if let Some(status) = value.status() {
            PredictionError::Status(status)
        } else {
            PredictionError::Transport(value.to_string())
        }
    }
}

/// `POST {base_url}/predict` with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    predict_url: String,
}

impl HttpPredictionClient {
    pub fn new(config: &PredictionConfig) -> Result<Self, PredictionError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| PredictionError::Transport(err.to_string()))?;

        Ok(Self {
            http,
            predict_url: format!("{}/predict", config.base_url.trim_end_matches('/')),
        })
    }
}

impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, profile: &FinancialProfile) -> Result<ScoreResult, PredictionError> {
        let response = self.http.post(&self.predict_url).json(profile).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictionError::Status(status));
        }

        let result = response.json::<ScoreResult>().await?;
        Ok(result.normalized())
    }

    fn endpoint(&self) -> String {
        self.predict_url.clone()
    }
}
