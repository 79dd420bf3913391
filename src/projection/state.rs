//! Running balance state for a single accumulation projection

use crate::input::ContributionTiming;

/// State of the balance at a point in time during projection
#[derive(Debug, Clone)]
pub struct AccumulationState {
    /// Current projection year (1-indexed once advanced, 0 before the first year)
    pub year: u32,

    /// Balance at the start of the current year
    pub starting_balance: f64,

    /// Running balance within the current year
    pub balance: f64,

    /// Interest credited so far this year
    pub ytd_interest: f64,

    /// Contributions credited so far this year
    pub ytd_contributions: f64,
}

impl AccumulationState {
    /// Initialize state at time zero
    pub fn from_principal(principal: f64) -> Self {
        Self {
            year: 0,
            starting_balance: principal,
            balance: principal,
            ytd_interest: 0.0,
            ytd_contributions: 0.0,
        }
    }

    /// Advance to the next year; the new year starts from the prior ending balance
    pub fn advance_year(&mut self) {
        self.year += 1;
        self.starting_balance = self.balance;
        self.ytd_interest = 0.0;
        self.ytd_contributions = 0.0;
    }

    /// Apply one sub-year period.
    ///
    /// `Begin` deposits before interest accrues, so the deposit earns interest
    /// this period. `End` deposits after.
    pub fn apply_period(
        &mut self,
        timing: ContributionTiming,
        period_rate: f64,
        contribution: f64,
    ) {
        let interest = match timing {
            ContributionTiming::Begin => {
                self.balance += contribution;
                let interest = self.balance * period_rate;
                self.balance += interest;
                interest
            }
            ContributionTiming::End => {
                let interest = self.balance * period_rate;
                self.balance += interest;
                self.balance += contribution;
                interest
            }
        };

        self.ytd_interest += interest;
        self.ytd_contributions += contribution;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_deposit_earns_interest() {
        let mut state = AccumulationState::from_principal(1_000.0);
        state.advance_year();
        state.apply_period(ContributionTiming::Begin, 0.25, 100.0);
        assert_eq!(state.ytd_interest, 275.0);
        assert_eq!(state.balance, 1_375.0);
    }

    #[test]
    fn test_end_deposit_earns_nothing_this_period() {
        let mut state = AccumulationState::from_principal(1_000.0);
        state.advance_year();
        state.apply_period(ContributionTiming::End, 0.25, 100.0);
        assert_eq!(state.ytd_interest, 250.0);
        assert_eq!(state.balance, 1_350.0);
    }

    #[test]
    fn test_advance_resets_ytd() {
        let mut state = AccumulationState::from_principal(500.0);
        state.advance_year();
        state.apply_period(ContributionTiming::End, 0.0, 50.0);
        assert_eq!(state.ytd_contributions, 50.0);

        state.advance_year();
        assert_eq!(state.year, 2);
        assert_eq!(state.starting_balance, 550.0);
        assert_eq!(state.ytd_contributions, 0.0);
    }
}
