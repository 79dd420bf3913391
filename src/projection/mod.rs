//! Accumulation projection: savings growth with periodic compounding and contributions

mod state;
mod engine;
mod trajectory;

pub use state::AccumulationState;
pub use engine::{AccumulationEngine, simulate_accumulation};
pub use trajectory::{ProjectionResult, ProjectionSummary, YearSnapshot};
