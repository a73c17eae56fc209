//! Error types for flow calculations.

use nz_core::error::NzError;
use thiserror::Error;

/// Errors raised while evaluating the nozzle exit state.
///
/// None of these are fatal: each evaluation is independent and the caller
/// decides how to surface the failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NozzleError {
    /// Input rejected before any numeric work was attempted.
    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: String },

    /// Area-Mach solve missed its tolerance, its bracket or the supersonic branch.
    #[error("Solver did not converge: {what}")]
    SolverNonConvergence { what: String },

    /// Temperature or pressure evaluated to a non-physical value.
    #[error("Degenerate state: {what}")]
    DegenerateState { what: String },
}

pub type NozzleResult<T> = Result<T, NozzleError>;

impl NozzleError {
    pub(crate) fn invalid(what: impl Into<String>) -> Self {
        NozzleError::InvalidParameter { what: what.into() }
    }

    pub(crate) fn degenerate(what: impl Into<String>) -> Self {
        NozzleError::DegenerateState { what: what.into() }
    }
}

impl From<NzError> for NozzleError {
    fn from(e: NzError) -> Self {
        NozzleError::InvalidParameter {
            what: e.to_string(),
        }
    }
}
