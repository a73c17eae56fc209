//! nz-geometry: axisymmetric wall contour for a bell nozzle.
//!
//! Provides:
//! - Natural cubic spline interpolation
//! - Control-point bell contour scaled by throat radius and area ratio
//! - Contour diagnostics (undershoot, non-monotonic growth)

pub mod contour;
pub mod error;
pub mod spline;

// Re-exports for ergonomics
pub use contour::{
    ContourDiagnostics, DEFAULT_SAMPLES, NozzleContour, WallPoint, contour, control_points,
    generate,
};
pub use error::{GeometryError, GeometryResult};
pub use spline::NaturalCubicSpline;
