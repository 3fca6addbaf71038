use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::fallback::FallbackScorer;
use super::remote::PredictionClient;
use super::{FinancialProfile, ScoreResult};

/// Which scorer produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    Remote,
    Fallback,
}

impl ScoreSource {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreSource::Remote => "remote",
            ScoreSource::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    pub result: ScoreResult,
    pub source: ScoreSource,
}

/// One attempt against the prediction service, then the local heuristic.
pub struct ScoringService<C> {
    client: Arc<C>,
    fallback: FallbackScorer,
}

impl<C> ScoringService<C>
where
    C: PredictionClient + 'static,
{
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            fallback: FallbackScorer,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub async fn predict(&self, profile: &FinancialProfile) -> ScoreOutcome {
        match self.client.predict(profile).await {
            Ok(result) => {
                debug!(prediction = result.prediction, "prediction service answered");
                ScoreOutcome {
                    result,
                    source: ScoreSource::Remote,
                }
            }
            Err(err) => {
                warn!(error = %err, endpoint = %self.client.endpoint(), "prediction service failed; using fallback scorer");
                ScoreOutcome {
                    result: self.fallback.score(profile),
                    source: ScoreSource::Fallback,
                }
            }
        }
    }
}
