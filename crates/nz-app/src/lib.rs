//! Shared application service layer for the nozzle calculator.
//!
//! Frontends go through this crate for design file handling, full design
//! evaluation (exit state plus wall contour), parameter sweeps and export.

pub mod design;
pub mod design_service;
pub mod error;
pub mod evaluate_service;
pub mod export;
pub mod sweep;

// Re-export key types for convenience
pub use design::{GeometryDef, NozzleDesign};
pub use design_service::{load_design, save_design, validate_design};
pub use error::{AppError, AppResult};
pub use evaluate_service::{
    ContourPointRow, ContourSummary, DesignReport, EvaluateOptions, ExitReport, ReportInputs,
    evaluate, evaluate_with,
};
pub use export::contour_csv;
pub use sweep::{SweepDefinition, SweepParameter, SweepResult, SweepType, execute_sweep};
