//! CSV export of year-by-year results

use csv::Writer;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::decumulation::DecumulationYear;
use crate::error::Result;
use crate::projection::YearSnapshot;

fn write_rows<W: std::io::Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write an accumulation trajectory with a header row
pub fn write_trajectory<W: std::io::Write>(writer: W, trajectory: &[YearSnapshot]) -> Result<()> {
    write_rows(writer, trajectory)
}

pub fn write_trajectory_to_path<P: AsRef<Path>>(path: P, trajectory: &[YearSnapshot]) -> Result<()> {
    write_trajectory(File::create(path)?, trajectory)
}

/// Write a withdrawal-phase schedule with a header row
pub fn write_decumulation<W: std::io::Write>(writer: W, years: &[DecumulationYear]) -> Result<()> {
    write_rows(writer, years)
}
