//! TVM Projection - time-value-of-money engine for savings and retirement calculators
//!
//! This library provides:
//! - Accumulation projections with periodic compounding and contributions
//! - Withdrawal-phase (decumulation) projections
//! - Inflation deflation, growth summaries and income/future-value gap analysis
//! - Parallel scenario comparison and CSV import/export
//!
//! Every calculation is a pure function from an input struct to a result struct.

pub mod error;
pub mod input;
pub mod projection;
pub mod decumulation;
pub mod analysis;
pub mod plan;
pub mod scenario;
pub mod io;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use input::{CompoundingFrequency, ContributionTiming, ProjectionInput, MAX_HORIZON_YEARS};
pub use projection::{simulate_accumulation, ProjectionResult, ProjectionSummary, YearSnapshot};
pub use decumulation::{simulate_decumulation, DecumulationInput, DecumulationResult, DecumulationYear, WithdrawalPolicy};
pub use analysis::{analyze_future_value_gap, analyze_gap, FutureValueGap, GapAnalysis, IncomeTarget};
pub use plan::{plan_retirement, RetirementAssumptions, RetirementPlan};
pub use scenario::{Scenario, ScenarioOutcome, ScenarioRunner};
