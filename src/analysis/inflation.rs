//! Inflation deflation primitives
//!
//! Strict exponential compounding: an amount `years` out is divided by
//! `(1 + rate/100)^years`. No linear approximation is used anywhere.

/// Factor that converts a nominal amount `years` out into time-zero purchasing power
pub fn deflation_factor(rate_pct: f64, years: u32) -> f64 {
    1.0 / inflation_factor(rate_pct, years)
}

/// Cumulative price growth after `years` at `rate_pct` per year
pub fn inflation_factor(rate_pct: f64, years: u32) -> f64 {
    (1.0 + rate_pct / 100.0).powi(years as i32)
}

/// Express a future nominal amount in today's money
pub fn deflate(amount: f64, rate_pct: f64, years: u32) -> f64 {
    amount / inflation_factor(rate_pct, years)
}

/// Express today's amount in future nominal money
pub fn inflate(amount: f64, rate_pct: f64, years: u32) -> f64 {
    amount * inflation_factor(rate_pct, years)
}
