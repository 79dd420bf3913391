//! Load scenario batches from CSV

use csv::Reader;
use serde::Deserialize;
use std::path::Path;

use crate::error::Result;
use crate::input::{CompoundingFrequency, ProjectionInput};
use crate::scenario::Scenario;

/// Raw CSV row; one scenario per line
#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    principal: f64,
    annual_rate: f64,
    horizon_years: u32,
    periodic_contribution: f64,
    periods_per_year: u32,
    contribution_timing: String,
    inflation_rate: f64,
    apply_inflation: bool,
}

impl CsvRow {
    fn into_scenario(self) -> Result<Scenario> {
        let input = ProjectionInput {
            principal: self.principal,
            annual_rate: self.annual_rate,
            horizon_years: self.horizon_years,
            periodic_contribution: self.periodic_contribution,
            periods_per_year: CompoundingFrequency::try_from(self.periods_per_year)?,
            contribution_timing: self.contribution_timing.parse()?,
            inflation_rate: self.inflation_rate,
            apply_inflation: self.apply_inflation,
        };
        Ok(Scenario::new(self.name, input))
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>> {
    let reader = Reader::from_path(path)?;
    collect_scenarios(reader)
}

/// Load scenarios from any reader (e.g. string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Scenario>> {
    collect_scenarios(Reader::from_reader(reader))
}

fn collect_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Scenario>> {
    let mut scenarios = Vec::new();
    for row in reader.deserialize() {
        let row: CsvRow = row?;
        scenarios.push(row.into_scenario()?);
    }
    log::debug!("loaded {} scenarios", scenarios.len());
    Ok(scenarios)
}
