//! Withdrawal-phase inputs and outputs

use serde::{Deserialize, Serialize};

use crate::error::{require_finite, require_non_negative, ProjectionError, Result};
use crate::input::require_horizon;

/// How the yearly withdrawal amount is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalPolicy {
    /// Rate applied to the current balance every year (the "4% rule" as usually quoted)
    #[default]
    PercentOfBalance,
    /// Rate applied once to the starting balance; that amount is withdrawn every year
    FixedInitialAmount,
}

/// Inputs for one withdrawal-phase run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecumulationInput {
    /// Balance when withdrawals begin
    pub starting_balance: f64,

    /// Annual withdrawal rate in percent
    pub withdrawal_rate_pct: f64,

    /// Whole years of withdrawals
    pub horizon_years: u32,

    /// Annual portfolio return during withdrawals, in percent
    pub return_rate_pct: f64,

    /// Fixed yearly income from outside the portfolio (pension etc.); never compounded
    #[serde(default)]
    pub external_annual_income: f64,

    #[serde(default)]
    pub withdrawal_policy: WithdrawalPolicy,
}

impl Default for DecumulationInput {
    fn default() -> Self {
        Self {
            starting_balance: 1_000_000.0,
            withdrawal_rate_pct: 4.0,
            horizon_years: 30,
            return_rate_pct: 5.0,
            external_annual_income: 0.0,
            withdrawal_policy: WithdrawalPolicy::PercentOfBalance,
        }
    }
}

impl DecumulationInput {
    pub fn validate(&self) -> Result<()> {
        require_non_negative("starting_balance", self.starting_balance)?;
        require_non_negative("withdrawal_rate_pct", self.withdrawal_rate_pct)?;
        if self.withdrawal_rate_pct >= 100.0 {
            return Err(ProjectionError::invalid_input(
                "withdrawal_rate_pct",
                self.withdrawal_rate_pct,
                "must be below 100",
            ));
        }
        require_horizon(self.horizon_years)?;
        require_finite("return_rate_pct", self.return_rate_pct)?;
        if self.return_rate_pct <= -100.0 {
            return Err(ProjectionError::invalid_input(
                "return_rate_pct",
                self.return_rate_pct,
                "must be above -100",
            ));
        }
        require_non_negative("external_annual_income", self.external_annual_income)?;
        Ok(())
    }
}

/// One year of the withdrawal phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecumulationYear {
    /// 0-based year of retirement
    pub year: u32,
    pub annual_withdrawal: f64,
    /// Withdrawal plus external income
    pub annual_income: f64,
    /// Balance after this year's return and withdrawal; may be negative
    pub remaining_balance: f64,
}

/// Complete withdrawal-phase result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecumulationResult {
    pub years: Vec<DecumulationYear>,
    pub total_withdrawn: f64,
    pub total_income: f64,
    pub final_balance: f64,
    /// First year the balance went below zero, if it ever did
    pub depletion_year: Option<u32>,
}

impl DecumulationResult {
    pub(crate) fn from_years(years: Vec<DecumulationYear>) -> Self {
        let total_withdrawn = years.iter().map(|y| y.annual_withdrawal).sum();
        let total_income = years.iter().map(|y| y.annual_income).sum();
        let final_balance = years.last().map(|y| y.remaining_balance).unwrap_or(0.0);
        let depletion_year = years
            .iter()
            .find(|y| y.remaining_balance < 0.0)
            .map(|y| y.year);

        Self {
            years,
            total_withdrawn,
            total_income,
            final_balance,
            depletion_year,
        }
    }

    /// Whether the plan ran the portfolio below zero
    pub fn is_depleted(&self) -> bool {
        self.depletion_year.is_some()
    }

    /// Row for a 0-based retirement year
    pub fn year(&self, year: u32) -> Option<&DecumulationYear> {
        self.years.get(year as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let base = DecumulationInput::default();
        assert!(base.validate().is_ok());
        assert!(DecumulationInput { withdrawal_rate_pct: 0.0, ..base }.validate().is_ok());

        let cases = [
            (DecumulationInput { starting_balance: -5.0, ..base }, "starting_balance"),
            (DecumulationInput { withdrawal_rate_pct: 100.0, ..base }, "withdrawal_rate_pct"),
            (DecumulationInput { withdrawal_rate_pct: -1.0, ..base }, "withdrawal_rate_pct"),
            (DecumulationInput { horizon_years: 0, ..base }, "horizon_years"),
            (DecumulationInput { horizon_years: 400_000_000, ..base }, "horizon_years"),
            (DecumulationInput { return_rate_pct: -100.0, ..base }, "return_rate_pct"),
            (DecumulationInput { return_rate_pct: f64::NAN, ..base }, "return_rate_pct"),
            (DecumulationInput { external_annual_income: -1.0, ..base }, "external_annual_income"),
        ];
        for (input, field) in cases {
            assert_eq!(input.validate().unwrap_err().field(), Some(field));
        }
    }

    #[test]
    fn test_policy_defaults_when_missing_from_json() {
        let json = r#"{"starting_balance":500000,"withdrawal_rate_pct":3.5,"horizon_years":25,"return_rate_pct":4}"#;
        let input: DecumulationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.withdrawal_policy, WithdrawalPolicy::PercentOfBalance);
        assert_eq!(input.external_annual_income, 0.0);
    }
}
