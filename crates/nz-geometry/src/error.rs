//! Error types for nozzle geometry.

use nz_core::error::NzError;
use thiserror::Error;

/// Errors that can occur while building a wall contour.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: String },

    #[error("Spline construction failed: {what}")]
    Spline { what: String },

    #[error("Degenerate contour: {what}")]
    DegenerateState { what: String },
}

pub type GeometryResult<T> = Result<T, GeometryError>;

impl From<NzError> for GeometryError {
    fn from(e: NzError) -> Self {
        GeometryError::InvalidParameter {
            what: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GeometryError::DegenerateState {
            what: "negative radius".into(),
        };
        assert!(err.to_string().contains("negative radius"));
    }

    #[test]
    fn core_errors_become_invalid_parameters() {
        let err: GeometryError = NzError::InvalidArg {
            what: "throat radius",
        }
        .into();
        assert!(matches!(err, GeometryError::InvalidParameter { .. }));
        assert!(err.to_string().contains("throat radius"));
    }
}
