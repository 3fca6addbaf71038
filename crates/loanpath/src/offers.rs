//! Synthetic lender catalogue ranked by the borrower's stated preference.

use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanPreference {
    #[default]
    #[serde(rename = "lowestEMI")]
    LowestEmi,
    #[serde(rename = "lowestInterest")]
    LowestInterest,
    #[serde(rename = "fastestApproval")]
    FastestApproval,
}

impl LoanPreference {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "lowestEMI" => Some(LoanPreference::LowestEmi),
            "lowestInterest" => Some(LoanPreference::LowestInterest),
            "fastestApproval" => Some(LoanPreference::FastestApproval),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanOffer {
    pub id: u32,
    pub bank_name: &'static str,
    pub interest_rate: f64,
    /// Months.
    pub tenure: u32,
    pub eligibility_range: &'static str,
    pub approval_time: &'static str,
    /// Fastest advertised turnaround, used for ordering.
    pub approval_hours: u32,
    pub emi: u32,
    pub max_amount: u32,
}

pub fn catalogue() -> Vec<LoanOffer> {
    vec![
        LoanOffer {
            id: 1,
            bank_name: "Prime Bank",
            interest_rate: 4.5,
            tenure: 60,
            eligibility_range: "50000-200000",
            approval_time: "2-3 days",
            approval_hours: 48,
            emi: 1865,
            max_amount: 200_000,
        },
        LoanOffer {
            id: 2,
            bank_name: "Quick Finance",
            interest_rate: 5.2,
            tenure: 48,
            eligibility_range: "30000-150000",
            approval_time: "1-2 days",
            approval_hours: 24,
            emi: 1932,
            max_amount: 150_000,
        },
        LoanOffer {
            id: 3,
            bank_name: "Secure Lending",
            interest_rate: 3.8,
            tenure: 72,
            eligibility_range: "60000-250000",
            approval_time: "5-7 days",
            approval_hours: 120,
            emi: 1756,
            max_amount: 250_000,
        },
        LoanOffer {
            id: 4,
            bank_name: "FastTrack Loans",
            interest_rate: 5.8,
            tenure: 36,
            eligibility_range: "25000-100000",
            approval_time: "24 hours",
            approval_hours: 24,
            emi: 2100,
            max_amount: 100_000,
        },
        LoanOffer {
            id: 5,
            bank_name: "Elite Banking",
            interest_rate: 4.2,
            tenure: 84,
            eligibility_range: "80000-300000",
            approval_time: "3-5 days",
            approval_hours: 72,
            emi: 1820,
            max_amount: 300_000,
        },
    ]
}

/// Stable ordering; `None` keeps catalogue order.
pub fn ranked(preference: Option<LoanPreference>) -> Vec<LoanOffer> {
    let mut offers = catalogue();
    match preference {
        Some(LoanPreference::LowestEmi) => offers.sort_by_key(|offer| offer.emi),
        Some(LoanPreference::LowestInterest) => {
            offers.sort_by(|a, b| a.interest_rate.total_cmp(&b.interest_rate))
        }
        Some(LoanPreference::FastestApproval) => offers.sort_by_key(|offer| offer.approval_hours),
        None => {}
    }
    offers
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OfferParams {
    #[serde(default)]
    preference: Option<String>,
}

pub fn offer_router() -> Router {
    Router::new().route("/api/loans", get(offers_handler))
}

pub(crate) async fn offers_handler(Query(params): Query<OfferParams>) -> Json<Vec<LoanOffer>> {
    let preference = match params.preference.as_deref() {
        Some(raw) => LoanPreference::parse(raw),
        None => Some(LoanPreference::default()),
    };
    Json(ranked(preference))
}
