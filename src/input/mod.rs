//! Calculator inputs for the accumulation phase

mod data;

pub use data::{CompoundingFrequency, ContributionTiming, ProjectionInput, MAX_HORIZON_YEARS};
pub(crate) use data::require_horizon;
