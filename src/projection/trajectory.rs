//! Year-by-year output structures for accumulation projections

use serde::{Deserialize, Serialize};

use crate::input::ProjectionInput;

/// One simulated year of the accumulation phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    /// 1-based year relative to the start of the simulation
    pub year: u32,

    pub starting_balance: f64,
    pub interest_earned: f64,
    pub contributions_made: f64,
    pub ending_balance: f64,

    /// `ending_balance` in time-zero purchasing power
    pub real_value: f64,
}

/// Summary ratios derived from a finished projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    /// Ending balance relative to everything contributed, in percent
    pub nominal_growth_pct: f64,

    /// Real ending value relative to everything contributed, in percent
    pub real_growth_pct: f64,

    /// Constant annual rate turning total contributions into the ending balance.
    /// Reported as 0.0 when nothing was contributed.
    pub compound_annual_growth_rate_pct: f64,

    /// Nominal amount lost to inflation (ending balance minus real ending value)
    pub inflation_erosion: f64,
}

/// Complete accumulation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Inputs this result was computed from
    pub input: ProjectionInput,

    pub ending_balance: f64,
    pub total_contributed: f64,
    pub total_interest: f64,
    pub real_ending_value: f64,

    /// Real ending value per unit of nominal ending value
    pub purchasing_power_ratio: f64,

    /// One snapshot per simulated year, ascending
    pub trajectory: Vec<YearSnapshot>,

    pub summary: ProjectionSummary,
}

impl ProjectionResult {
    /// Number of simulated years
    pub fn years(&self) -> usize {
        self.trajectory.len()
    }

    /// Snapshot for a 1-based year, if it was simulated
    pub fn year(&self, year: u32) -> Option<&YearSnapshot> {
        year.checked_sub(1)
            .and_then(|idx| self.trajectory.get(idx as usize))
    }
}

impl ProjectionSummary {
    pub(crate) fn from_totals(
        ending_balance: f64,
        real_ending_value: f64,
        total_contributed: f64,
        horizon_years: u32,
    ) -> Self {
        // Zero contributions is a legal degenerate case: report zero growth.
        let (nominal_growth_pct, real_growth_pct, compound_annual_growth_rate_pct) =
            if total_contributed > 0.0 {
                let growth = ending_balance / total_contributed;
                (
                    (growth - 1.0) * 100.0,
                    (real_ending_value / total_contributed - 1.0) * 100.0,
                    (growth.powf(1.0 / horizon_years as f64) - 1.0) * 100.0,
                )
            } else {
                (0.0, 0.0, 0.0)
            };

        Self {
            nominal_growth_pct,
            real_growth_pct,
            compound_annual_growth_rate_pct,
            inflation_erosion: ending_balance - real_ending_value,
        }
    }
}
