//! Withdrawal (retirement) phase projection

mod data;
mod engine;

pub use data::{DecumulationInput, DecumulationResult, DecumulationYear, WithdrawalPolicy};
pub use engine::simulate_decumulation;
