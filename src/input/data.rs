//! Projection input structures supplied by the calculator front end

use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, ProjectionError, Result};

/// Longest horizon accepted by the simulators, in years
pub const MAX_HORIZON_YEARS: u32 = 1_000;

/// Reject a zero horizon or one beyond [`MAX_HORIZON_YEARS`]
pub(crate) fn require_horizon(horizon_years: u32) -> Result<()> {
    if horizon_years == 0 {
        return Err(ProjectionError::invalid_input(
            "horizon_years",
            horizon_years,
            "must be at least 1",
        ));
    }
    if horizon_years > MAX_HORIZON_YEARS {
        return Err(ProjectionError::invalid_input(
            "horizon_years",
            horizon_years,
            format!("must not exceed {MAX_HORIZON_YEARS}"),
        ));
    }
    Ok(())
}

/// How many contribution/compounding periods make up one year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum CompoundingFrequency {
    Annual,
    Quarterly,
    Monthly,
}

impl CompoundingFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Annual => 1,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
        }
    }
}

impl TryFrom<u32> for CompoundingFrequency {
    type Error = ProjectionError;

    fn try_from(periods: u32) -> Result<Self> {
        match periods {
            1 => Ok(CompoundingFrequency::Annual),
            4 => Ok(CompoundingFrequency::Quarterly),
            12 => Ok(CompoundingFrequency::Monthly),
            other => Err(ProjectionError::invalid_input(
                "periods_per_year",
                other,
                "must be one of 1, 4 or 12",
            )),
        }
    }
}

impl From<CompoundingFrequency> for u32 {
    fn from(frequency: CompoundingFrequency) -> u32 {
        frequency.periods_per_year()
    }
}

/// Whether a period's contribution is credited before or after that period's interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContributionTiming {
    /// Annuity due: the deposit earns interest in the period it is made
    Begin,
    /// Ordinary annuity: the deposit lands after interest accrues
    End,
}

impl std::str::FromStr for ContributionTiming {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "begin" | "beginning" | "start" => Ok(ContributionTiming::Begin),
            "end" => Ok(ContributionTiming::End),
            other => Err(ProjectionError::invalid_input(
                "contribution_timing",
                other,
                "expected 'begin' or 'end'",
            )),
        }
    }
}

/// Inputs for one accumulation run
///
/// Rates are percentages per year (7.0 means 7%). A zero principal gives a
/// pure annuity, a zero contribution a pure lump sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// Balance at time zero
    pub principal: f64,

    /// Nominal annual growth rate in percent
    pub annual_rate: f64,

    /// Whole years to simulate
    pub horizon_years: u32,

    /// Amount added every sub-year period
    pub periodic_contribution: f64,

    pub periods_per_year: CompoundingFrequency,

    pub contribution_timing: ContributionTiming,

    /// Annual inflation in percent
    pub inflation_rate: f64,

    /// Whether real values are deflated by `inflation_rate`
    pub apply_inflation: bool,
}

impl Default for ProjectionInput {
    fn default() -> Self {
        Self {
            principal: 10_000.0,
            annual_rate: 7.0,
            horizon_years: 10,
            periodic_contribution: 500.0,
            periods_per_year: CompoundingFrequency::Monthly,
            contribution_timing: ContributionTiming::End,
            inflation_rate: 3.0,
            apply_inflation: true,
        }
    }
}

impl ProjectionInput {
    /// Check every precondition of the accumulation simulator.
    /// Nothing is clamped; the first violation is reported.
    pub fn validate(&self) -> Result<()> {
        require_non_negative("principal", self.principal)?;
        require_non_negative("annual_rate", self.annual_rate)?;
        require_horizon(self.horizon_years)?;
        require_non_negative("periodic_contribution", self.periodic_contribution)?;
        require_non_negative("inflation_rate", self.inflation_rate)?;
        Ok(())
    }

    /// Interest rate applied in each sub-year period, as a decimal
    pub fn per_period_rate(&self) -> f64 {
        self.annual_rate / 100.0 / self.periods_per_year.periods_per_year() as f64
    }

    /// Number of contribution periods over the whole horizon
    pub fn total_periods(&self) -> u32 {
        self.periods_per_year.periods_per_year() * self.horizon_years
    }

    /// Everything the saver puts in: principal plus all periodic contributions
    pub fn total_contributed(&self) -> f64 {
        self.principal + self.periodic_contribution * self.total_periods() as f64
    }

    /// Inflation rate actually used for deflation (zero when inflation is off)
    pub fn effective_inflation_rate(&self) -> f64 {
        if self.apply_inflation {
            self.inflation_rate
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_from_periods() {
        assert_eq!(CompoundingFrequency::try_from(12).unwrap(), CompoundingFrequency::Monthly);
        assert_eq!(CompoundingFrequency::try_from(4).unwrap(), CompoundingFrequency::Quarterly);

        let err = CompoundingFrequency::try_from(0).unwrap_err();
        assert_eq!(err.field(), Some("periods_per_year"));
        assert!(CompoundingFrequency::try_from(52).is_err());
    }

    #[test]
    fn test_timing_parse() {
        assert_eq!("BEGIN".parse::<ContributionTiming>().unwrap(), ContributionTiming::Begin);
        assert_eq!(" end ".parse::<ContributionTiming>().unwrap(), ContributionTiming::End);
        assert!("middle".parse::<ContributionTiming>().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_fields() {
        let base = ProjectionInput::default();
        assert!(base.validate().is_ok());

        let cases = [
            (ProjectionInput { annual_rate: -0.5, ..base }, "annual_rate"),
            (ProjectionInput { horizon_years: 0, ..base }, "horizon_years"),
            (ProjectionInput { horizon_years: MAX_HORIZON_YEARS + 1, ..base }, "horizon_years"),
            (ProjectionInput { horizon_years: 400_000_000, ..base }, "horizon_years"),
            (ProjectionInput { principal: -1.0, ..base }, "principal"),
            (ProjectionInput { periodic_contribution: f64::NAN, ..base }, "periodic_contribution"),
            (ProjectionInput { inflation_rate: -2.0, ..base }, "inflation_rate"),
        ];
        for (input, field) in cases {
            assert_eq!(input.validate().unwrap_err().field(), Some(field));
        }
    }

    #[test]
    fn test_longest_horizon_is_valid() {
        let input = ProjectionInput { horizon_years: MAX_HORIZON_YEARS, ..Default::default() };
        assert!(input.validate().is_ok());
        assert_eq!(input.total_periods(), 12_000);
    }

    #[test]
    fn test_zero_rate_is_valid() {
        let input = ProjectionInput { annual_rate: 0.0, ..Default::default() };
        assert!(input.validate().is_ok());
        assert_eq!(input.per_period_rate(), 0.0);
    }

    #[test]
    fn test_totals() {
        let input = ProjectionInput::default();
        assert_eq!(input.total_periods(), 120);
        assert_eq!(input.total_contributed(), 10_000.0 + 500.0 * 120.0);
    }

    #[test]
    fn test_serde_periods_as_integer() {
        let json = serde_json::to_string(&ProjectionInput::default()).unwrap();
        assert!(json.contains("\"periods_per_year\":12"));
        assert!(json.contains("\"contribution_timing\":\"end\""));

        let bad = json.replace("\"periods_per_year\":12", "\"periods_per_year\":7");
        assert!(serde_json::from_str::<ProjectionInput>(&bad).is_err());
    }
}
