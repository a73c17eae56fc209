//! Error types for the nz-app service layer.

use nz_core::NzError;
use nz_flow::NozzleError;
use nz_geometry::GeometryError;
use std::path::PathBuf;

/// Application error type wrapping the numeric crates' errors plus design
/// file handling, shared by every frontend.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Design error: {0}")]
    Design(String),

    #[error("Failed to read design file: {path}")]
    DesignFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write design file: {path}")]
    DesignFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Design validation failed: {0}")]
    Validation(String),

    #[error("Flow solution failed: {0}")]
    Flow(#[from] NozzleError),

    #[error("Contour generation failed: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for nz-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<NzError> for AppError {
    fn from(err: NzError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
