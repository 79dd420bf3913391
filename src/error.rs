//! Error types for the projection engine
//!
//! The engine itself only ever fails with [`ProjectionError::InvalidInput`].
//! The CSV and I/O variants come from the scenario loading/export layer.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ProjectionError>;

#[derive(Error, Debug)]
pub enum ProjectionError {
    /// A numeric precondition was violated
    #[error("invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProjectionError {
    pub fn invalid_input(
        field: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ProjectionError::InvalidInput {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, if this is an input error
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ProjectionError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Reject NaN and infinities before any range check runs
pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProjectionError::invalid_input(field, value, "must be a finite number"))
    }
}

pub(crate) fn require_non_negative(field: &'static str, value: f64) -> Result<()> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(ProjectionError::invalid_input(field, value, "must not be negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_field() {
        let err = ProjectionError::invalid_input("annual_rate", -1.0, "must not be negative");
        assert_eq!(err.field(), Some("annual_rate"));
        assert_eq!(
            err.to_string(),
            "invalid input for 'annual_rate': -1 - must not be negative"
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(require_finite("principal", f64::NAN).is_err());
        assert!(require_non_negative("principal", f64::INFINITY).is_err());
        assert!(require_non_negative("principal", 0.0).is_ok());
    }
}
