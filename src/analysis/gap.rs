//! Income and future-value gap analysis
//!
//! Compares a finished accumulation against a target and, when the target is
//! missed, solves for the extra periodic contribution that closes the gap by
//! inverting the ordinary-annuity future-value formula.

use log::debug;
use serde::{Deserialize, Serialize};

use super::inflation::inflate;
use crate::error::{require_non_negative, ProjectionError, Result};
use crate::projection::ProjectionResult;

/// Retirement income goal, expressed in today's money
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeTarget {
    pub desired_monthly_income: f64,

    /// Share of the portfolio drawn each year, in percent
    pub safe_withdrawal_rate_pct: f64,

    /// Monthly income from outside the portfolio
    #[serde(default)]
    pub external_monthly_income: f64,
}

impl Default for IncomeTarget {
    fn default() -> Self {
        Self {
            desired_monthly_income: 4_000.0,
            safe_withdrawal_rate_pct: 4.0,
            external_monthly_income: 0.0,
        }
    }
}

impl IncomeTarget {
    pub fn validate(&self) -> Result<()> {
        require_non_negative("desired_monthly_income", self.desired_monthly_income)?;
        require_non_negative("safe_withdrawal_rate_pct", self.safe_withdrawal_rate_pct)?;
        if self.safe_withdrawal_rate_pct == 0.0 || self.safe_withdrawal_rate_pct >= 100.0 {
            return Err(ProjectionError::invalid_input(
                "safe_withdrawal_rate_pct",
                self.safe_withdrawal_rate_pct,
                "must be between 0 and 100 (exclusive)",
            ));
        }
        require_non_negative("external_monthly_income", self.external_monthly_income)?;
        Ok(())
    }
}

/// Outcome of comparing projected retirement income with the target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapAnalysis {
    /// Desired income inflated to the projection's ending-year money
    pub target_monthly_income: f64,
    pub achieved_monthly_income: f64,
    /// Target minus achieved: positive is a shortfall, negative a surplus
    pub monthly_shortfall_or_surplus: f64,
    pub additional_periodic_contribution_needed: f64,
    /// True when the target is met and nothing extra is needed
    pub on_track: bool,
}

/// Outcome of comparing the projected ending balance with a nominal target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FutureValueGap {
    pub target_future_value: f64,
    pub achieved_future_value: f64,
    /// Target minus achieved: positive is a shortfall, negative a surplus
    pub shortfall_or_surplus: f64,
    pub additional_periodic_contribution_needed: f64,
    pub on_track: bool,
}

/// Future value of 1 paid at the end of each of `periods` periods at `period_rate`.
///
/// Falls back to `periods` when the rate is zero.
pub fn annuity_future_value_factor(period_rate: f64, periods: u32) -> f64 {
    if period_rate.abs() < 1e-12 {
        return periods as f64;
    }
    ((1.0 + period_rate).powi(periods as i32) - 1.0) / period_rate
}

/// Extra periodic contribution that grows to `future_capital` over the projection horizon
fn contribution_for_capital(accumulation: &ProjectionResult, future_capital: f64) -> f64 {
    let input = &accumulation.input;
    let factor = annuity_future_value_factor(input.per_period_rate(), input.total_periods());
    future_capital / factor
}

/// Compare the income an accumulation supports with the desired income
pub fn analyze_gap(accumulation: &ProjectionResult, target: &IncomeTarget) -> Result<GapAnalysis> {
    target.validate()?;

    let input = &accumulation.input;
    let swr = target.safe_withdrawal_rate_pct / 100.0;

    let achieved_monthly_income =
        accumulation.ending_balance * swr / 12.0 + target.external_monthly_income;
    // ending_balance is always nominal, so the target is inflated whether or
    // not real values were reported
    let target_monthly_income =
        inflate(target.desired_monthly_income, input.inflation_rate, input.horizon_years);
    let gap = target_monthly_income - achieved_monthly_income;

    let (additional, on_track) = if gap > 0.0 {
        let required_future_capital = gap * 12.0 / swr;
        (contribution_for_capital(accumulation, required_future_capital), false)
    } else {
        (0.0, true)
    };

    debug!(
        "income gap: target {:.2}/month, achieved {:.2}/month, extra contribution {:.2}",
        target_monthly_income, achieved_monthly_income, additional,
    );

    Ok(GapAnalysis {
        target_monthly_income,
        achieved_monthly_income,
        monthly_shortfall_or_surplus: gap,
        additional_periodic_contribution_needed: additional,
        on_track,
    })
}

/// Compare the projected ending balance with a nominal future-value target
pub fn analyze_future_value_gap(
    accumulation: &ProjectionResult,
    target_future_value: f64,
) -> Result<FutureValueGap> {
    require_non_negative("target_future_value", target_future_value)?;

    let gap = target_future_value - accumulation.ending_balance;
    let (additional, on_track) = if gap > 0.0 {
        (contribution_for_capital(accumulation, gap), false)
    } else {
        (0.0, true)
    };

    Ok(FutureValueGap {
        target_future_value,
        achieved_future_value: accumulation.ending_balance,
        shortfall_or_surplus: gap,
        additional_periodic_contribution_needed: additional,
        on_track,
    })
}
