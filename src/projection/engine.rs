//! Accumulation engine: periodic compounding with periodic contributions

use log::{debug, trace};

use super::state::AccumulationState;
use super::trajectory::{ProjectionResult, ProjectionSummary, YearSnapshot};
use crate::analysis::inflation::{deflate, deflation_factor};
use crate::error::Result;
use crate::input::ProjectionInput;

/// Main accumulation engine
///
/// Construction validates the input, so a built engine always produces a
/// complete trajectory.
#[derive(Debug, Clone)]
pub struct AccumulationEngine {
    input: ProjectionInput,
}

impl AccumulationEngine {
    /// Create an engine for the given input, rejecting invalid fields
    pub fn new(input: ProjectionInput) -> Result<Self> {
        input.validate()?;
        Ok(Self { input })
    }

    /// Run the projection across the whole horizon
    pub fn project(&self) -> ProjectionResult {
        let input = &self.input;
        let mut state = AccumulationState::from_principal(input.principal);
        let mut trajectory = Vec::with_capacity(input.horizon_years as usize);

        for _year in 1..=input.horizon_years {
            state.advance_year();
            let snapshot = self.calculate_year(&mut state);
            trace!(
                "year {}: start={:.2} interest={:.2} contributions={:.2} end={:.2}",
                snapshot.year,
                snapshot.starting_balance,
                snapshot.interest_earned,
                snapshot.contributions_made,
                snapshot.ending_balance,
            );
            trajectory.push(snapshot);
        }

        let ending_balance = state.balance;
        let real_ending_value = trajectory
            .last()
            .map(|s| s.real_value)
            .unwrap_or(ending_balance);
        let total_contributed = input.total_contributed();

        debug!(
            "accumulation over {} years ({} periods): ending balance {:.2}, real {:.2}",
            input.horizon_years,
            input.total_periods(),
            ending_balance,
            real_ending_value,
        );

        ProjectionResult {
            input: *input,
            ending_balance,
            total_contributed,
            total_interest: ending_balance - total_contributed,
            real_ending_value,
            purchasing_power_ratio: deflation_factor(
                input.effective_inflation_rate(),
                input.horizon_years,
            ),
            summary: ProjectionSummary::from_totals(
                ending_balance,
                real_ending_value,
                total_contributed,
                input.horizon_years,
            ),
            trajectory,
        }
    }

    /// Run every sub-year period of the current year and record the snapshot
    fn calculate_year(&self, state: &mut AccumulationState) -> YearSnapshot {
        let input = &self.input;
        let period_rate = input.per_period_rate();

        for _period in 0..input.periods_per_year.periods_per_year() {
            state.apply_period(
                input.contribution_timing,
                period_rate,
                input.periodic_contribution,
            );
        }

        YearSnapshot {
            year: state.year,
            starting_balance: state.starting_balance,
            interest_earned: state.ytd_interest,
            contributions_made: state.ytd_contributions,
            ending_balance: state.balance,
            real_value: deflate(state.balance, input.effective_inflation_rate(), state.year),
        }
    }
}

/// Simulate the accumulation phase for one input.
///
/// Fails with `InvalidInput` before producing any snapshot when a
/// precondition is violated.
pub fn simulate_accumulation(input: &ProjectionInput) -> Result<ProjectionResult> {
    Ok(AccumulationEngine::new(*input)?.project())
}
