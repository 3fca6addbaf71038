use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use loanpath::scoring::{FallbackScorer, FinancialProfile};
use loanpath::simulations::{
    InMemorySimulationRepository, NewSimulation, SimulationQuery, SimulationService,
};
use loanpath::statistics::TimeRange;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 20, 9, 30, 0)
        .single()
        .expect("valid instant")
}

fn scored(user_id: &str, profile: FinancialProfile, at: DateTime<Utc>) -> NewSimulation {
    let result = FallbackScorer.score(&profile);
    NewSimulation {
        user_id: user_id.to_string(),
        financial_data: profile,
        score: result.prediction,
        explanation: result.explanation,
        risk_category: result.risk_category.label().to_string(),
        estimated_apr: result.estimated_apr,
        timestamp: Some(at.to_rfc3339()),
    }
}

fn strained() -> FinancialProfile {
    FinancialProfile {
        income: 20_000.0,
        expenses: 18_000.0,
        credit_utilization: 80.0,
        debt_ratio: 50.0,
        savings: 1_000.0,
        credit_score: 600.0,
        employment_years: 0.0,
    }
}

#[test]
fn scored_history_feeds_listing_statistics_and_export() {
    let repository = Arc::new(InMemorySimulationRepository::default());
    let service = SimulationService::new(repository.clone());

    service
        .save(scored("uid-a", FinancialProfile::default(), now() - Duration::days(40)), now())
        .expect("saved");
    service
        .save(scored("uid-a", strained(), now() - Duration::days(3)), now())
        .expect("saved");
    let latest = service
        .save(scored("uid-a", FinancialProfile::default(), now() - Duration::hours(1)), now())
        .expect("saved");
    service
        .save(scored("uid-b", strained(), now() - Duration::days(1)), now())
        .expect("saved");
    assert_eq!(repository.len(), 4);

    let page = service
        .list("uid-a", &SimulationQuery::first(2))
        .expect("listed");
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.pages, 2);
    assert_eq!(page.simulations[0].id, latest.id);
    assert_eq!(page.simulations[1].score, 35.0);

    let all_time = service.statistics(None, now()).expect("summary");
    assert_eq!(all_time.total_simulations, 4);
    assert_eq!(all_time.average_score, 67.5);
    assert_eq!(all_time.success_rate, 50.0);
    let buckets: Vec<_> = all_time
        .risk_distribution
        .iter()
        .map(|bucket| (bucket.name, bucket.value))
        .collect();
    assert_eq!(buckets, vec![("Low", 2), ("Moderate", 0), ("High", 2)]);
    assert_eq!(all_time.trend_data.last().map(|point| point.score), Some(57.0));
    assert_eq!(all_time.trend_data[4].score, 100.0);

    let last_week = service
        .statistics(Some(TimeRange::Week), now())
        .expect("summary");
    assert_eq!(last_week.total_simulations, 3);

    let csv = service.export_csv("uid-a").expect("exported");
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], "Date,Score,Risk Category,Income,Expenses,Credit Score");
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("2026-04-20T08:30:00"));
    assert!(lines[2].contains(",35,High,20000,18000,600"));

    service.delete(&latest.id).expect("deleted");
    let page = service
        .list("uid-a", &SimulationQuery::default())
        .expect("listed");
    assert_eq!(page.pagination.total, 2);
}
