//! Summary metrics over stored simulation results.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::scoring::{round_to_tenth, RiskCategory};

const TREND_MONTHS: u32 = 6;
const SUCCESS_THRESHOLD: f64 = 70.0;

/// Anything carrying a score, a risk label and an instant can be aggregated.
pub trait ScoreSample {
    fn score(&self) -> f64;
    /// Raw stored label. Only exact `Low`, `Moderate`, `High` are bucketed.
    fn risk_label(&self) -> &str;
    fn recorded_at(&self) -> DateTime<Utc>;
}

/// Lookback window applied before aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Week,
    Month,
    Year,
}

impl TimeRange {
    /// Unknown values, including `all`, mean no filtering.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "week" => Some(TimeRange::Week),
            "month" => Some(TimeRange::Month),
            "year" => Some(TimeRange::Year),
            _ => None,
        }
    }

    pub fn window(&self) -> Duration {
        match self {
            TimeRange::Week => Duration::days(7),
            TimeRange::Month => Duration::days(30),
            TimeRange::Year => Duration::days(365),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskBucket {
    pub name: &'static str,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsSummary {
    pub average_score: f64,
    pub total_simulations: usize,
    pub success_rate: f64,
    pub risk_distribution: Vec<RiskBucket>,
    pub trend_data: Vec<TrendPoint>,
    /// Records whose category matched none of the three buckets.
    pub unrecognized_risk_categories: usize,
}

pub fn summarize<S: ScoreSample>(
    samples: &[S],
    range: Option<TimeRange>,
    now: DateTime<Utc>,
) -> StatisticsSummary {
    let filtered: Vec<&S> = match range {
        Some(range) => {
            let cutoff = now - range.window();
            samples
                .iter()
                .filter(|sample| sample.recorded_at() >= cutoff)
                .collect()
        }
        None => samples.iter().collect(),
    };

    let total = filtered.len();
    let average_score = round_to_tenth(mean(filtered.iter().map(|sample| sample.score())));

    let mut counts = [0usize; 3];
    let mut unrecognized = 0;
    for sample in &filtered {
        match RiskCategory::from_label(sample.risk_label()) {
            Some(RiskCategory::Low) => counts[0] += 1,
            Some(RiskCategory::Moderate) => counts[1] += 1,
            Some(RiskCategory::High) => counts[2] += 1,
            None => unrecognized += 1,
        }
    }
    let risk_distribution = RiskCategory::ordered()
        .into_iter()
        .zip(counts)
        .map(|(category, value)| RiskBucket {
            name: category.label(),
            value,
        })
        .collect();

    let success_rate = if total == 0 {
        0.0
    } else {
        let successes = filtered
            .iter()
            .filter(|sample| sample.score() >= SUCCESS_THRESHOLD)
            .count();
        round_to_tenth(successes as f64 / total as f64 * 100.0)
    };

    StatisticsSummary {
        average_score,
        total_simulations: total,
        success_rate,
        risk_distribution,
        trend_data: monthly_trend(&filtered, now),
        unrecognized_risk_categories: unrecognized,
    }
}

/// Six calendar months (UTC) ending with the month containing `now`, oldest first.
fn monthly_trend<S: ScoreSample>(samples: &[&S], now: DateTime<Utc>) -> Vec<TrendPoint> {
    let current = first_of_month(now.date_naive());

    (0..TREND_MONTHS)
        .rev()
        .map(|offset| {
            let start_date = current
                .checked_sub_months(Months::new(offset))
                .unwrap_or(current);
            let end_date = start_date
                .checked_add_months(Months::new(1))
                .unwrap_or(start_date);
            let start = midnight_utc(start_date);
            let end = midnight_utc(end_date);

            let average = mean(
                samples
                    .iter()
                    .filter(|sample| {
                        let at = sample.recorded_at();
                        at >= start && at < end
                    })
                    .map(|sample| sample.score()),
            );

            TrendPoint {
                month: start_date.format("%b").to_string(),
                score: average.round(),
            }
        })
        .collect()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN))
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
