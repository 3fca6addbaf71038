use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{Explanation, FinancialProfile};
use crate::statistics::ScoreSample;

/// Identifier wrapper for stored simulations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationId(pub String);

impl SimulationId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

/// Persisted scoring run. Never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRecord {
    #[serde(alias = "_id")]
    pub id: SimulationId,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub financial_data: FinancialProfile,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub explanation: Explanation,
    /// Stored as received so that unrecognised labels remain visible to statistics.
    /// Absent in older documents, which leaves it empty.
    #[serde(default)]
    pub risk_category: String,
    #[serde(default, rename = "estimatedAPR")]
    pub estimated_apr: f64,
    pub timestamp: DateTime<Utc>,
}

impl ScoreSample for SimulationRecord {
    fn score(&self) -> f64 {
        self.score
    }

    fn risk_label(&self) -> &str {
        &self.risk_category
    }

    fn recorded_at(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

fn default_risk_category() -> String {
    "Moderate".to_string()
}

/// `null` and blank labels fall back to the default category.
fn deserialize_risk_category<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(default_risk_category))
}

/// Save request body. Everything except `userId` has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSimulation {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub financial_data: FinancialProfile,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub explanation: Explanation,
    #[serde(
        default = "default_risk_category",
        deserialize_with = "deserialize_risk_category"
    )]
    pub risk_category: String,
    #[serde(default, rename = "estimatedAPR")]
    pub estimated_apr: f64,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Default for NewSimulation {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            financial_data: FinancialProfile::default(),
            score: 0.0,
            explanation: Explanation::default(),
            risk_category: default_risk_category(),
            estimated_apr: 0.0,
            timestamp: None,
        }
    }
}

/// Listing filters. Page numbering starts at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationQuery {
    pub page: usize,
    pub limit: usize,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Default for SimulationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 50,
            start: None,
            end: None,
        }
    }
}

impl SimulationQuery {
    pub fn first(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationPage {
    pub simulations: Vec<SimulationRecord>,
    pub pagination: Pagination,
}

/// Accepts RFC 3339 instants or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(|date| Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 instant or YYYY-MM-DD ({err})"))
}
