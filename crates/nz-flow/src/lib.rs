//! nz-flow: one-dimensional isentropic exit state of a supersonic nozzle.
//!
//! Provides:
//! - Area-Mach solve restricted to the supersonic branch
//! - Closed-form static temperature, speed of sound and velocity
//! - Expansion regime classification against a back pressure
//! - `compute`, chaining the three for a validated design
//!
//! All functions are pure; gas constants are passed in explicitly.
//!
//! # Example
//!
//! ```
//! use nz_core::GasProperties;
//! use nz_core::units::{k, pa};
//! use nz_flow::{DesignParameters, compute};
//!
//! let params = DesignParameters::new(pa(1.0e6), k(300.0), pa(1.0e5), 5.0).unwrap();
//! let solution = compute(&params, &GasProperties::AIR).unwrap();
//! assert!(solution.mach > 3.0);
//! println!("Exit velocity: {:.0} m/s", solution.velocity.value);
//! ```

pub mod area_mach;
pub mod compute;
pub mod design;
pub mod error;
pub mod expansion;
pub mod isentropic;

// Re-exports for ergonomics
pub use area_mach::{AreaMachConfig, AreaMachSolution, area_ratio};
pub use compute::{FlowState, NozzleSolution, compute, compute_with};
pub use design::DesignParameters;
pub use error::{NozzleError, NozzleResult};
pub use expansion::{
    ExpansionAssessment, ExpansionRegime, PERFECT_EXPANSION_THRESHOLD_PCT, classify,
};
pub use isentropic::{ExitConditions, evaluate};
