use serde::{Deserialize, Serialize};

/// Normalized financial inputs. Absent fields take the documented defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialProfile {
    /// Annual income.
    pub income: f64,
    pub expenses: f64,
    /// Percent of available credit in use, 0-100.
    pub credit_utilization: f64,
    /// Debt-to-income percent, 0-100.
    pub debt_ratio: f64,
    pub savings: f64,
    /// 300-850.
    pub credit_score: f64,
    pub employment_years: f64,
}

impl Default for FinancialProfile {
    fn default() -> Self {
        Self {
            income: 50_000.0,
            expenses: 20_000.0,
            credit_utilization: 30.0,
            debt_ratio: 25.0,
            savings: 10_000.0,
            credit_score: 720.0,
            employment_years: 5.0,
        }
    }
}

impl FinancialProfile {
    /// Expenses as a percentage of income, undefined when income is not positive.
    pub fn expense_ratio(&self) -> Option<f64> {
        if self.income > 0.0 {
            Some(self.expenses / self.income * 100.0)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let profile: FinancialProfile =
            serde_json::from_str(r#"{"income": 82000, "creditScore": 790}"#).expect("parses");

        assert_eq!(profile.income, 82_000.0);
        assert_eq!(profile.credit_score, 790.0);
        assert_eq!(profile.expenses, 20_000.0);
        assert_eq!(profile.credit_utilization, 30.0);
        assert_eq!(profile.debt_ratio, 25.0);
        assert_eq!(profile.savings, 10_000.0);
        assert_eq!(profile.employment_years, 5.0);
    }

    #[test]
    fn empty_payload_is_the_default_profile() {
        let profile: FinancialProfile = serde_json::from_str("{}").expect("parses");
        assert_eq!(profile, FinancialProfile::default());
    }

    #[test]
    fn expense_ratio_is_undefined_without_income() {
        let profile = FinancialProfile {
            income: 0.0,
            ..FinancialProfile::default()
        };
        assert_eq!(profile.expense_ratio(), None);
        assert_eq!(FinancialProfile::default().expense_ratio(), Some(40.0));
    }
}
