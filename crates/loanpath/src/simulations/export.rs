use super::domain::SimulationRecord;

/// Maximum number of records written by a single export.
pub const EXPORT_ROW_LIMIT: usize = 1000;

const CSV_HEADER: [&str; 6] = [
    "Date",
    "Score",
    "Risk Category",
    "Income",
    "Expenses",
    "Credit Score",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    /// Recognised but not rendered.
    Pdf,
}

impl ExportFormat {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }
}

pub(crate) fn write_csv(records: &[SimulationRecord]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for record in records {
        writer.write_record([
            record.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            number(record.score),
            record.risk_category.clone(),
            number(record.financial_data.income),
            number(record.financial_data.expenses),
            number(record.financial_data.credit_score),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| csv::Error::from(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
