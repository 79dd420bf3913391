//! Withdrawal-phase simulation on whole-year steps

use log::{debug, warn};

use super::data::{DecumulationInput, DecumulationResult, DecumulationYear, WithdrawalPolicy};
use crate::error::Result;

/// Simulate the withdrawal phase.
///
/// Produces `horizon_years + 1` rows, for years 0 through `horizon_years`.
/// Each year the withdrawal is taken from the balance at the start of the
/// year, and the year's return is earned on that same starting balance.
/// Negative balances are reported as they are, never floored.
pub fn simulate_decumulation(input: &DecumulationInput) -> Result<DecumulationResult> {
    input.validate()?;

    let rate = input.withdrawal_rate_pct / 100.0;
    let growth = 1.0 + input.return_rate_pct / 100.0;
    let fixed_withdrawal = input.starting_balance * rate;

    let mut remaining = input.starting_balance;
    let mut years = Vec::with_capacity(input.horizon_years as usize + 1);

    for year in 0..=input.horizon_years {
        let annual_withdrawal = match input.withdrawal_policy {
            WithdrawalPolicy::PercentOfBalance => remaining * rate,
            WithdrawalPolicy::FixedInitialAmount => fixed_withdrawal,
        };
        remaining = remaining * growth - annual_withdrawal;

        years.push(DecumulationYear {
            year,
            annual_withdrawal,
            annual_income: annual_withdrawal + input.external_annual_income,
            remaining_balance: remaining,
        });
    }

    let result = DecumulationResult::from_years(years);
    if let Some(year) = result.depletion_year {
        warn!(
            "withdrawal plan depletes the portfolio in year {} of {}",
            year, input.horizon_years
        );
    }
    debug!(
        "decumulation over {} years: withdrawn {:.2}, final balance {:.2}",
        input.horizon_years, result.total_withdrawn, result.final_balance,
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn four_percent_rule() -> DecumulationInput {
        DecumulationInput {
            starting_balance: 1_000_000.0,
            withdrawal_rate_pct: 4.0,
            horizon_years: 20,
            return_rate_pct: 5.0,
            external_annual_income: 0.0,
            withdrawal_policy: WithdrawalPolicy::PercentOfBalance,
        }
    }

    #[test]
    fn test_withdrawal_below_return_grows_portfolio() {
        let result = simulate_decumulation(&four_percent_rule()).unwrap();

        assert_eq!(result.years.len(), 21);
        let first = result.year(0).unwrap();
        let last = result.year(20).unwrap();
        assert!(last.remaining_balance > first.remaining_balance);

        assert_relative_eq!(first.annual_withdrawal, 40_000.0);
        assert_relative_eq!(first.remaining_balance, 1_010_000.0);
        // Net growth of 1% a year on the current balance, 21 applications
        assert_relative_eq!(last.remaining_balance, 1_000_000.0 * 1.01_f64.powi(21), max_relative = 1e-12);
        assert!(!result.is_depleted());
    }

    #[test]
    fn test_withdrawal_uses_current_balance() {
        let result = simulate_decumulation(&four_percent_rule()).unwrap();
        for pair in result.years.windows(2) {
            assert_relative_eq!(
                pair[1].annual_withdrawal,
                pair[0].remaining_balance * 0.04,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_external_income_added_not_compounded() {
        let input = DecumulationInput {
            external_annual_income: 18_000.0,
            ..four_percent_rule()
        };
        let with_income = simulate_decumulation(&input).unwrap();
        let without = simulate_decumulation(&four_percent_rule()).unwrap();

        for (a, b) in with_income.years.iter().zip(&without.years) {
            assert_eq!(a.remaining_balance, b.remaining_balance);
            assert_relative_eq!(a.annual_income, b.annual_withdrawal + 18_000.0);
        }
        assert_relative_eq!(with_income.total_income - with_income.total_withdrawn, 18_000.0 * 21.0, max_relative = 1e-9);
    }

    #[test]
    fn test_zero_withdrawal_rate_is_not_an_error() {
        let result = simulate_decumulation(&DecumulationInput {
            withdrawal_rate_pct: 0.0,
            return_rate_pct: 0.0,
            ..four_percent_rule()
        })
        .unwrap();
        for year in &result.years {
            assert_eq!(year.annual_withdrawal, 0.0);
            assert_eq!(year.remaining_balance, 1_000_000.0);
        }
    }

    #[test]
    fn test_fixed_withdrawal_surfaces_negative_balance() {
        let result = simulate_decumulation(&DecumulationInput {
            starting_balance: 100_000.0,
            withdrawal_rate_pct: 10.0,
            horizon_years: 12,
            return_rate_pct: 0.0,
            external_annual_income: 0.0,
            withdrawal_policy: WithdrawalPolicy::FixedInitialAmount,
        })
        .unwrap();

        for year in &result.years {
            assert_relative_eq!(year.annual_withdrawal, 10_000.0);
        }
        assert_eq!(result.depletion_year, Some(10));
        assert_relative_eq!(result.final_balance, -30_000.0);
        assert!(result.is_depleted());
    }

    #[test]
    fn test_invalid_input_rejected() {
        let err = simulate_decumulation(&DecumulationInput {
            withdrawal_rate_pct: 150.0,
            ..four_percent_rule()
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("withdrawal_rate_pct"));
    }

    #[test]
    fn test_restartable() {
        let input = four_percent_rule();
        assert_eq!(simulate_decumulation(&input).unwrap(), simulate_decumulation(&input).unwrap());
    }
}
