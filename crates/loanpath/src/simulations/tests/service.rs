use super::common::*;
use crate::scoring::FinancialProfile;
use crate::simulations::domain::{NewSimulation, SimulationId, SimulationQuery};
use crate::simulations::repository::RepositoryError;
use crate::simulations::SimulationServiceError;
use crate::statistics::TimeRange;

#[test]
fn save_requires_a_user() {
    let (service, repository) = build_service();

    let err = service
        .save(NewSimulation::default(), instant(2026, 3, 1))
        .expect_err("missing user rejected");

    assert!(matches!(err, SimulationServiceError::Validation(_)));
    assert!(repository.is_empty());
}

#[test]
fn save_defaults_timestamp_and_category() {
    let (service, _) = build_service();
    let now = instant(2026, 3, 1);

    let record = service
        .save(
            NewSimulation {
                user_id: " uid-7 ".to_string(),
                ..NewSimulation::default()
            },
            now,
        )
        .expect("saves");

    assert_eq!(record.user_id, "uid-7");
    assert_eq!(record.timestamp, now);
    assert_eq!(record.risk_category, "Moderate");
    assert_eq!(record.financial_data, FinancialProfile::default());
    assert!(!record.id.0.is_empty());
}

#[test]
fn save_rejects_unparseable_timestamps() {
    let (service, _) = build_service();

    let err = service
        .save(
            NewSimulation {
                user_id: "uid-1".to_string(),
                timestamp: Some("yesterday".to_string()),
                ..NewSimulation::default()
            },
            instant(2026, 3, 1),
        )
        .expect_err("bad timestamp rejected");

    assert!(matches!(err, SimulationServiceError::Validation(_)));
}

#[test]
fn list_orders_newest_first_and_scopes_to_user() {
    let service = seeded_service();

    let page = service
        .list("uid-1", &SimulationQuery::default())
        .expect("lists");

    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.pages, 1);
    let stamps: Vec<_> = page
        .simulations
        .iter()
        .map(|record| record.timestamp.format("%Y-%m-%d").to_string())
        .collect();
    assert_eq!(stamps, vec!["2026-03-18", "2026-03-01", "2026-02-03"]);
    assert!(page.simulations.iter().all(|record| record.user_id == "uid-1"));
}

#[test]
fn list_paginates() {
    let service = seeded_service();

    let second = service
        .list(
            "uid-1",
            &SimulationQuery {
                page: 2,
                limit: 2,
                ..SimulationQuery::default()
            },
        )
        .expect("lists");

    assert_eq!(second.pagination.total, 3);
    assert_eq!(second.pagination.pages, 2);
    assert_eq!(second.simulations.len(), 1);
    assert_eq!(
        second.simulations[0].timestamp.format("%Y-%m-%d").to_string(),
        "2026-02-03"
    );

    let beyond = service
        .list(
            "uid-1",
            &SimulationQuery {
                page: 5,
                limit: 2,
                ..SimulationQuery::default()
            },
        )
        .expect("lists");
    assert!(beyond.simulations.is_empty());
}

#[test]
fn list_date_bounds_are_inclusive() {
    let service = seeded_service();

    let page = service
        .list(
            "uid-1",
            &SimulationQuery {
                start: Some(
                    chrono::DateTime::parse_from_rfc3339("2026-03-01T08:00:00Z")
                        .expect("valid")
                        .into(),
                ),
                end: Some(
                    chrono::DateTime::parse_from_rfc3339("2026-03-18T16:45:00Z")
                        .expect("valid")
                        .into(),
                ),
                ..SimulationQuery::default()
            },
        )
        .expect("lists");

    assert_eq!(page.pagination.total, 2);
}

#[test]
fn zero_limit_is_treated_as_one() {
    let service = seeded_service();

    let page = service
        .list(
            "uid-1",
            &SimulationQuery {
                page: 0,
                limit: 0,
                ..SimulationQuery::default()
            },
        )
        .expect("lists");

    assert_eq!(page.pagination.page, 1);
    assert_eq!(page.pagination.limit, 1);
    assert_eq!(page.pagination.pages, 3);
    assert_eq!(page.simulations.len(), 1);
}

#[test]
fn delete_removes_and_reports_missing_ids() {
    let service = seeded_service();
    let page = service
        .list("uid-2", &SimulationQuery::default())
        .expect("lists");
    let id = page.simulations[0].id.clone();

    service.delete(&id).expect("deletes");
    let err = service.delete(&id).expect_err("second delete fails");
    assert!(matches!(
        err,
        SimulationServiceError::Repository(RepositoryError::NotFound)
    ));

    let err = service
        .delete(&SimulationId("missing".to_string()))
        .expect_err("unknown id");
    assert!(matches!(
        err,
        SimulationServiceError::Repository(RepositoryError::NotFound)
    ));
}

#[test]
fn statistics_cover_every_user() {
    let service = seeded_service();

    let summary = service
        .statistics(None, instant(2026, 3, 20))
        .expect("aggregates");

    assert_eq!(summary.total_simulations, 4);
    assert_eq!(summary.average_score, 67.5);
    assert_eq!(summary.success_rate, 50.0);
    let values: Vec<_> = summary.risk_distribution.iter().map(|b| b.value).collect();
    assert_eq!(values, vec![2, 0, 2]);
    let trend: Vec<_> = summary.trend_data.iter().map(|p| p.score).collect();
    assert_eq!(trend, vec![0.0, 0.0, 0.0, 0.0, 100.0, 57.0]);
}

#[test]
fn statistics_respect_time_range() {
    let service = seeded_service();

    let summary = service
        .statistics(Some(TimeRange::Week), instant(2026, 3, 20))
        .expect("aggregates");

    assert_eq!(summary.total_simulations, 1);
    assert_eq!(summary.average_score, 100.0);
}

#[test]
fn export_renders_header_and_rows() {
    let service = seeded_service();

    let csv = service.export_csv("uid-1").expect("exports");
    let lines: Vec<_> = csv.lines().collect();

    assert_eq!(lines[0], "Date,Score,Risk Category,Income,Expenses,Credit Score");
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[1], "2026-03-18T16:45:00.000Z,100,Low,50000,20000,720");
    assert_eq!(lines[2], "2026-03-01T08:00:00.000Z,35,High,20000,18000,600");
}

#[test]
fn export_of_unknown_user_is_header_only() {
    let service = seeded_service();

    let csv = service.export_csv("nobody").expect("exports");
    assert_eq!(csv.lines().count(), 1);
}
