//! CSV import of scenario batches and CSV export of trajectories

pub mod loader;
mod export;

pub use loader::{load_scenarios, load_scenarios_from_reader};
pub use export::{write_decumulation, write_trajectory, write_trajectory_to_path};
