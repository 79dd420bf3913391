//! Real-value and gap analytics layered on top of projections

pub mod inflation;
pub mod gap;

pub use inflation::{deflate, deflation_factor, inflate, inflation_factor};
pub use gap::{
    analyze_future_value_gap, analyze_gap, annuity_future_value_factor, FutureValueGap,
    GapAnalysis, IncomeTarget,
};
