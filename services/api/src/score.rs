use chrono::{DateTime, Utc};
use clap::Args;
use loanpath::error::AppError;
use loanpath::scoring::{FallbackScorer, FinancialProfile, ScoreResult};
use loanpath::simulations::SimulationRecord;
use loanpath::statistics::{summarize, StatisticsSummary, TimeRange};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Annual income
    #[arg(long)]
    pub(crate) income: Option<f64>,
    /// Annual expenses
    #[arg(long)]
    pub(crate) expenses: Option<f64>,
    /// Credit utilization percent (0-100)
    #[arg(long)]
    pub(crate) credit_utilization: Option<f64>,
    /// Debt-to-income percent (0-100)
    #[arg(long)]
    pub(crate) debt_ratio: Option<f64>,
    /// Liquid savings
    #[arg(long)]
    pub(crate) savings: Option<f64>,
    /// Credit score (300-850)
    #[arg(long)]
    pub(crate) credit_score: Option<f64>,
    /// Years with the current employer
    #[arg(long)]
    pub(crate) employment_years: Option<f64>,
    /// Emit the result as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

impl ScoreArgs {
    pub(crate) fn profile(&self) -> FinancialProfile {
        let defaults = FinancialProfile::default();
        FinancialProfile {
            income: self.income.unwrap_or(defaults.income),
            expenses: self.expenses.unwrap_or(defaults.expenses),
            credit_utilization: self
                .credit_utilization
                .unwrap_or(defaults.credit_utilization),
            debt_ratio: self.debt_ratio.unwrap_or(defaults.debt_ratio),
            savings: self.savings.unwrap_or(defaults.savings),
            credit_score: self.credit_score.unwrap_or(defaults.credit_score),
            employment_years: self.employment_years.unwrap_or(defaults.employment_years),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct StatsArgs {
    /// JSON file holding an array of simulation records
    #[arg(long)]
    pub(crate) records: PathBuf,
    /// Lookback window: week, month or year (anything else means all)
    #[arg(long)]
    pub(crate) time_range: Option<String>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let result = FallbackScorer.score(&args.profile());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_score(&result));
    }
    Ok(())
}

pub(crate) fn run_stats(args: StatsArgs) -> Result<(), AppError> {
    let summary = load_summary(&args, Utc::now())?;
    print!("{}", render_stats(&summary));
    Ok(())
}

fn load_summary(args: &StatsArgs, now: DateTime<Utc>) -> Result<StatisticsSummary, AppError> {
    let raw = std::fs::read_to_string(&args.records)?;
    let records: Vec<SimulationRecord> = serde_json::from_str(&raw)?;
    let range = args.time_range.as_deref().and_then(TimeRange::parse);

    Ok(summarize(&records, range, now))
}

fn render_score(result: &ScoreResult) -> String {
    let mut out = String::new();
    out.push_str("LoanPath readiness (offline scorer)\n");
    out.push_str(&format!("  Score:         {:.1}\n", result.prediction));
    out.push_str(&format!("  Risk category: {}\n", result.risk_category.label()));
    out.push_str(&format!("  Estimated APR: {:.1}%\n", result.estimated_apr));
    out.push_str("  Factors:\n");
    for (label, contribution) in result.explanation.iter() {
        out.push_str(&format!("    {label:<32} {contribution:>+6.0}\n"));
    }
    out
}

fn render_stats(summary: &StatisticsSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("Simulations:   {}\n", summary.total_simulations));
    out.push_str(&format!("Average score: {:.1}\n", summary.average_score));
    out.push_str(&format!("Success rate:  {:.1}%\n", summary.success_rate));
    out.push_str("Risk distribution:\n");
    for bucket in &summary.risk_distribution {
        out.push_str(&format!("  {:<9} {}\n", bucket.name, bucket.value));
    }
    if summary.unrecognized_risk_categories > 0 {
        out.push_str(&format!(
            "  (unrecognized) {}\n",
            summary.unrecognized_risk_categories
        ));
    }
    out.push_str("Trend:\n");
    for point in &summary.trend_data {
        out.push_str(&format!("  {} {:.0}\n", point.month, point.score));
    }
    out
}
