//! Deterministic readiness heuristic used when the prediction service cannot answer.
//!
//! The numeric score and the explanation breakdown come from two separate threshold tables.
//! Their cutoffs and magnitudes differ for the same factor and both are kept as published.

use super::{estimated_apr, round_to_tenth, Explanation, FinancialProfile, RiskCategory, ScoreResult};

const BASE_SCORE: f64 = 50.0;

/// Stateless scorer. Exists as a type so the scoring service can hold it beside the client.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackScorer;

impl FallbackScorer {
    pub fn score(&self, profile: &FinancialProfile) -> ScoreResult {
        score(profile)
    }
}

pub fn score(profile: &FinancialProfile) -> ScoreResult {
    let points = readiness_points(profile);
    let risk_category = RiskCategory::from_score(points);

    ScoreResult {
        prediction: round_to_tenth(points),
        explanation: explain(profile),
        risk_category,
        estimated_apr: estimated_apr(points, risk_category),
    }
}

/// Additive point model, clamped to [0, 100].
pub fn readiness_points(profile: &FinancialProfile) -> f64 {
    let mut score = BASE_SCORE;

    score += income_points(profile.income);
    score += credit_score_points(profile.credit_score);
    score += debt_ratio_points(profile.debt_ratio);
    score += utilization_points(profile.credit_utilization);
    score += savings_points(profile.savings);
    score += employment_points(profile.employment_years);
    score -= expense_drag(profile);

    score.clamp(0.0, 100.0)
}

fn income_points(income: f64) -> f64 {
    if income > 40_000.0 {
        15.0
    } else if income > 30_000.0 {
        10.0
    } else {
        0.0
    }
}

fn credit_score_points(credit_score: f64) -> f64 {
    if credit_score >= 750.0 {
        25.0
    } else if credit_score >= 700.0 {
        18.0
    } else if credit_score >= 650.0 {
        10.0
    } else {
        0.0
    }
}

fn debt_ratio_points(debt_ratio: f64) -> f64 {
    if debt_ratio < 20.0 {
        15.0
    } else if debt_ratio < 30.0 {
        10.0
    } else if debt_ratio < 40.0 {
        5.0
    } else {
        0.0
    }
}

fn utilization_points(utilization: f64) -> f64 {
    if utilization < 30.0 {
        15.0
    } else if utilization < 50.0 {
        8.0
    } else {
        0.0
    }
}

fn savings_points(savings: f64) -> f64 {
    if savings > 20_000.0 {
        10.0
    } else if savings > 10_000.0 {
        6.0
    } else if savings > 5_000.0 {
        3.0
    } else {
        0.0
    }
}

fn employment_points(years: f64) -> f64 {
    if years >= 5.0 {
        10.0
    } else if years >= 3.0 {
        6.0
    } else if years >= 1.0 {
        3.0
    } else {
        0.0
    }
}

/// Penalty for spending a large share of income. Skipped when income is not positive.
fn expense_drag(profile: &FinancialProfile) -> f64 {
    match profile.expense_ratio() {
        Some(ratio) if ratio > 60.0 => 15.0,
        Some(ratio) if ratio > 50.0 => 10.0,
        _ => 0.0,
    }
}

/// SHAP-style breakdown shown to the user alongside a fallback score.
pub fn explain(profile: &FinancialProfile) -> Explanation {
    let mut explanation = Explanation::new();

    let income = if profile.income > 40_000.0 {
        28.0
    } else if profile.income > 30_000.0 {
        18.0
    } else {
        8.0
    };
    explanation.insert("Stable Income History", income);

    if profile.credit_utilization > 70.0 {
        explanation.insert("High Credit Utilization", -37.0);
    } else if profile.credit_utilization > 50.0 {
        explanation.insert("Moderate Credit Utilization", -22.0);
    } else {
        explanation.insert("Low Credit Utilization", 15.0);
    }

    if profile.debt_ratio < 20.0 {
        explanation.insert("Low Debt-to-Income Ratio", 22.0);
    } else if profile.debt_ratio < 30.0 {
        explanation.insert("Moderate Debt-to-Income Ratio", 10.0);
    } else {
        explanation.insert("High Debt-to-Income Ratio", -18.0);
    }

    if profile.credit_score >= 750.0 {
        explanation.insert("Good Credit Score", 35.0);
    } else if profile.credit_score >= 700.0 {
        explanation.insert("Fair Credit Score", 22.0);
    } else {
        explanation.insert("Poor Credit Score", -15.0);
    }

    let employment = if profile.employment_years >= 5.0 {
        18.0
    } else if profile.employment_years >= 3.0 {
        12.0
    } else {
        5.0
    };
    explanation.insert("Employment Stability", employment);

    let savings = if profile.savings > 20_000.0 {
        15.0
    } else if profile.savings > 10_000.0 {
        9.0
    } else {
        3.0
    };
    explanation.insert("Savings Buffer", savings);

    explanation
}
