//! Loan readiness scoring: the remote prediction seam and the local fallback heuristic.

mod explanation;
pub mod fallback;
mod profile;
pub mod remote;
mod service;

pub use explanation::Explanation;
pub use fallback::FallbackScorer;
pub use profile::FinancialProfile;
pub use remote::{HttpPredictionClient, PredictionClient, PredictionError};
pub use service::{ScoreOutcome, ScoreSource, ScoringService};

use serde::{Deserialize, Serialize};

/// Three-level bucket derived from the readiness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl RiskCategory {
    pub fn ordered() -> [RiskCategory; 3] {
        [RiskCategory::Low, RiskCategory::Moderate, RiskCategory::High]
    }

    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            RiskCategory::Low
        } else if score < 50.0 {
            RiskCategory::High
        } else {
            RiskCategory::Moderate
        }
    }

    /// Exact, case-sensitive match against the stored label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(RiskCategory::Low),
            "Moderate" => Some(RiskCategory::Moderate),
            "High" => Some(RiskCategory::High),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
        }
    }

    pub fn base_apr(&self) -> f64 {
        match self {
            RiskCategory::Low => 3.5,
            RiskCategory::Moderate => 6.0,
            RiskCategory::High => 9.5,
        }
    }
}

/// Scoring response shared by the remote service and the fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub prediction: f64,
    pub explanation: Explanation,
    pub risk_category: RiskCategory,
    #[serde(rename = "estimatedAPR")]
    pub estimated_apr: f64,
}

impl ScoreResult {
    /// Clamp and round a result that did not originate from the fallback scorer.
    pub fn normalized(mut self) -> Self {
        let prediction = if self.prediction.is_finite() {
            self.prediction.clamp(0.0, 100.0)
        } else {
            0.0
        };
        self.prediction = round_to_tenth(prediction);
        self.estimated_apr = round_to_tenth(self.estimated_apr);
        self
    }
}

pub fn estimated_apr(score: f64, category: RiskCategory) -> f64 {
    round_to_tenth(category.base_apr() + (100.0 - score) * 0.05)
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_category_boundaries() {
        assert_eq!(RiskCategory::from_score(75.0), RiskCategory::Low);
        assert_eq!(RiskCategory::from_score(74.9), RiskCategory::Moderate);
        assert_eq!(RiskCategory::from_score(50.0), RiskCategory::Moderate);
        assert_eq!(RiskCategory::from_score(49.9), RiskCategory::High);
    }

    #[test]
    fn labels_match_exactly() {
        assert_eq!(RiskCategory::from_label("Low"), Some(RiskCategory::Low));
        assert_eq!(RiskCategory::from_label("low"), None);
        assert_eq!(RiskCategory::from_label("Unknown"), None);
    }

    #[test]
    fn apr_rounds_half_up() {
        assert_eq!(estimated_apr(35.0, RiskCategory::High), 12.8);
        assert_eq!(estimated_apr(100.0, RiskCategory::Low), 3.5);
        assert_eq!(estimated_apr(60.0, RiskCategory::Moderate), 8.0);
    }

    #[test]
    fn normalized_clamps_remote_predictions() {
        let result = ScoreResult {
            prediction: 104.37,
            explanation: Explanation::default(),
            risk_category: RiskCategory::Low,
            estimated_apr: 3.269,
        }
        .normalized();

        assert_eq!(result.prediction, 100.0);
        assert_eq!(result.estimated_apr, 3.3);
    }

    #[test]
    fn score_result_uses_gateway_field_names() {
        let result = ScoreResult {
            prediction: 82.5,
            explanation: Explanation::default(),
            risk_category: RiskCategory::Low,
            estimated_apr: 4.4,
        };

        let value = serde_json::to_value(&result).expect("serializes");
        assert_eq!(value["prediction"], 82.5);
        assert_eq!(value["riskCategory"], "Low");
        assert_eq!(value["estimatedAPR"], 4.4);
        assert!(value["explanation"].is_object());
    }
}
