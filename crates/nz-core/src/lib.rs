//! nz-core: shared foundation for the nozzle workspace.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - gas (ideal-gas constants passed explicitly into every calculation)
//! - error (shared error types)

pub mod error;
pub mod gas;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{NzError, NzResult};
pub use gas::GasProperties;
pub use numeric::*;
pub use units::*;
