//! Scenario runner for side-by-side projections
//!
//! Each scenario is an independent pure projection, so a batch runs fully in
//! parallel with no coordination between runs.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ProjectionError, Result};
use crate::input::ProjectionInput;
use crate::projection::{simulate_accumulation, ProjectionResult};

/// A named projection input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub input: ProjectionInput,
}

impl Scenario {
    pub fn new(name: impl Into<String>, input: ProjectionInput) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

/// Result of one scenario in a batch; failures stay local to their scenario
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<ProjectionResult>,
}

impl ScenarioOutcome {
    pub fn projection(&self) -> Option<&ProjectionResult> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&ProjectionError> {
        self.result.as_ref().err()
    }
}

/// Batch of scenarios to compare
///
/// # Example
/// ```
/// use tvm_projection::{ProjectionInput, ScenarioRunner};
///
/// let mut runner = ScenarioRunner::new();
/// for rate in [5.0, 7.0, 9.0] {
///     runner.add(format!("{rate}%"), ProjectionInput { annual_rate: rate, ..Default::default() });
/// }
/// let outcomes = runner.run_all();
/// assert_eq!(outcomes.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    scenarios: Vec<Scenario>,
}

impl ScenarioRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner from pre-built scenarios
    pub fn with_scenarios(scenarios: Vec<Scenario>) -> Self {
        Self { scenarios }
    }

    pub fn add(&mut self, name: impl Into<String>, input: ProjectionInput) -> &mut Self {
        self.scenarios.push(Scenario::new(name, input));
        self
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Run every scenario in parallel; outcomes keep the insertion order
    pub fn run_all(&self) -> Vec<ScenarioOutcome> {
        self.scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                name: scenario.name.clone(),
                result: simulate_accumulation(&scenario.input),
            })
            .collect()
    }

    /// Run every scenario sequentially; same output as [`ScenarioRunner::run_all`]
    pub fn run_sequential(&self) -> Vec<ScenarioOutcome> {
        self.scenarios
            .iter()
            .map(|scenario| ScenarioOutcome {
                name: scenario.name.clone(),
                result: simulate_accumulation(&scenario.input),
            })
            .collect()
    }
}

/// Name of the successful scenario with the highest real ending value
pub fn best_by_real_value(outcomes: &[ScenarioOutcome]) -> Option<&str> {
    outcomes
        .iter()
        .filter_map(|o| o.projection().map(|p| (o.name.as_str(), p.real_ending_value)))
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_runner_batch() {
        let mut runner = ScenarioRunner::new();
        for rate in [3.0, 5.0, 8.0] {
            runner.add(format!("rate {rate}"), ProjectionInput { annual_rate: rate, ..Default::default() });
        }

        let outcomes = runner.run_all();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].name, "rate 3");

        // Higher growth rate should result in higher ending balance
        let low = outcomes[0].projection().unwrap().ending_balance;
        let high = outcomes[2].projection().unwrap().ending_balance;
        assert!(high > low);
        assert_eq!(best_by_real_value(&outcomes), Some("rate 8"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let runner = ScenarioRunner::with_scenarios(
            (1..=20)
                .map(|years| Scenario::new(format!("{years}y"), ProjectionInput { horizon_years: years, ..Default::default() }))
                .collect(),
        );

        let parallel = runner.run_all();
        let sequential = runner.run_sequential();
        for (p, s) in parallel.iter().zip(&sequential) {
            assert_eq!(p.name, s.name);
            assert_eq!(p.projection(), s.projection());
        }
    }

    #[test]
    fn test_failures_stay_local() {
        let mut runner = ScenarioRunner::new();
        runner
            .add("ok", ProjectionInput::default())
            .add("broken", ProjectionInput { horizon_years: 0, ..Default::default() });

        let outcomes = runner.run_all();
        assert!(outcomes[0].projection().is_some());
        assert_eq!(outcomes[1].error().and_then(|e| e.field()), Some("horizon_years"));
        assert_eq!(best_by_real_value(&outcomes), Some("ok"));
    }

    #[test]
    fn test_empty_runner() {
        let runner = ScenarioRunner::new();
        assert!(runner.is_empty());
        assert!(best_by_real_value(&runner.run_all()).is_none());
    }
}
