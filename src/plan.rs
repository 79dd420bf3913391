//! Retirement plan: accumulation feeding a withdrawal phase, checked against an income goal

use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::{analyze_gap, GapAnalysis, IncomeTarget};
use crate::decumulation::{simulate_decumulation, DecumulationInput, DecumulationResult, WithdrawalPolicy};
use crate::error::Result;
use crate::input::ProjectionInput;
use crate::projection::{simulate_accumulation, ProjectionResult};

/// Assumptions for the years after contributions stop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementAssumptions {
    /// Years of withdrawals
    pub retirement_years: u32,

    /// Withdrawal rate in percent; also used as the safe withdrawal rate for the gap check
    pub withdrawal_rate_pct: f64,

    /// Return during retirement, usually more conservative than the accumulation rate
    pub retirement_return_pct: f64,

    #[serde(default)]
    pub withdrawal_policy: WithdrawalPolicy,

    /// Desired income in today's money
    pub desired_monthly_income: f64,

    /// Pension or similar income outside the portfolio
    #[serde(default)]
    pub external_monthly_income: f64,
}

impl Default for RetirementAssumptions {
    fn default() -> Self {
        Self {
            retirement_years: 30,
            withdrawal_rate_pct: 4.0,
            retirement_return_pct: 5.0,
            withdrawal_policy: WithdrawalPolicy::PercentOfBalance,
            desired_monthly_income: 4_000.0,
            external_monthly_income: 0.0,
        }
    }
}

impl RetirementAssumptions {
    fn income_target(&self) -> IncomeTarget {
        IncomeTarget {
            desired_monthly_income: self.desired_monthly_income,
            safe_withdrawal_rate_pct: self.withdrawal_rate_pct,
            external_monthly_income: self.external_monthly_income,
        }
    }

    fn decumulation_input(&self, starting_balance: f64) -> DecumulationInput {
        DecumulationInput {
            starting_balance,
            withdrawal_rate_pct: self.withdrawal_rate_pct,
            horizon_years: self.retirement_years,
            return_rate_pct: self.retirement_return_pct,
            external_annual_income: self.external_monthly_income * 12.0,
            withdrawal_policy: self.withdrawal_policy,
        }
    }
}

/// Full retirement projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementPlan {
    pub accumulation: ProjectionResult,
    pub decumulation: DecumulationResult,
    pub gap: GapAnalysis,
}

/// Run accumulation, then withdrawals from its ending balance, then the income gap check.
///
/// The target is validated before anything runs, so the call either returns a
/// complete plan or fails without partial results.
pub fn plan_retirement(
    input: &ProjectionInput,
    assumptions: &RetirementAssumptions,
) -> Result<RetirementPlan> {
    assumptions.income_target().validate()?;
    assumptions.decumulation_input(0.0).validate()?;

    let accumulation = simulate_accumulation(input)?;
    let decumulation =
        simulate_decumulation(&assumptions.decumulation_input(accumulation.ending_balance))?;
    let gap = analyze_gap(&accumulation, &assumptions.income_target())?;

    info!(
        "retirement plan: {:.2} saved after {} years, {} for {} years of withdrawals",
        accumulation.ending_balance,
        input.horizon_years,
        if decumulation.is_depleted() { "depleted" } else { "sustained" },
        assumptions.retirement_years,
    );

    Ok(RetirementPlan {
        accumulation,
        decumulation,
        gap,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MAX_HORIZON_YEARS;
    use approx::assert_relative_eq;

    #[test]
    fn test_decumulation_starts_from_accumulated_balance() {
        let input = ProjectionInput::default();
        let plan = plan_retirement(&input, &RetirementAssumptions::default()).unwrap();

        let start = plan.accumulation.ending_balance;
        let first = plan.decumulation.year(0).unwrap();
        assert_relative_eq!(first.annual_withdrawal, start * 0.04, max_relative = 1e-12);
        assert_eq!(plan.decumulation.years.len(), 31);
        assert_eq!(plan.accumulation.trajectory.len(), 10);
    }

    #[test]
    fn test_external_income_flows_to_both_phases() {
        let assumptions = RetirementAssumptions {
            external_monthly_income: 1_500.0,
            ..Default::default()
        };
        let plan = plan_retirement(&ProjectionInput::default(), &assumptions).unwrap();

        let first = plan.decumulation.year(0).unwrap();
        assert_relative_eq!(first.annual_income - first.annual_withdrawal, 18_000.0, max_relative = 1e-9);
        assert_relative_eq!(
            plan.gap.achieved_monthly_income,
            plan.accumulation.ending_balance * 0.04 / 12.0 + 1_500.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_invalid_assumptions_fail_before_projection() {
        let err = plan_retirement(
            &ProjectionInput::default(),
            &RetirementAssumptions { retirement_years: 0, ..Default::default() },
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("horizon_years"));

        let err = plan_retirement(
            &ProjectionInput { horizon_years: 0, ..Default::default() },
            &RetirementAssumptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("horizon_years"));

        // the income target is checked before the withdrawal phase
        for rate in [0.0, 100.0] {
            let err = plan_retirement(
                &ProjectionInput::default(),
                &RetirementAssumptions { withdrawal_rate_pct: rate, ..Default::default() },
            )
            .unwrap_err();
            assert_eq!(err.field(), Some("safe_withdrawal_rate_pct"));
        }

        let err = plan_retirement(
            &ProjectionInput { horizon_years: MAX_HORIZON_YEARS + 1, ..Default::default() },
            &RetirementAssumptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("horizon_years"));
    }
}
