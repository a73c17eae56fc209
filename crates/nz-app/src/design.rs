//! Design file schema.

use nz_core::GasProperties;
use nz_core::units::{Length, k, m, pa};
use nz_flow::DesignParameters;
use nz_geometry::DEFAULT_SAMPLES;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// A complete nozzle design as stored on disk.
///
/// Every quantity is in SI units; the field names carry the unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NozzleDesign {
    pub name: String,
    pub stagnation_pressure_pa: f64,
    pub stagnation_temperature_k: f64,
    pub exit_pressure_pa: f64,
    pub area_ratio: f64,
    #[serde(default)]
    pub gas: GasProperties,
    #[serde(default)]
    pub geometry: GeometryDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeometryDef {
    #[serde(default = "default_throat_radius_m")]
    pub throat_radius_m: f64,
    #[serde(default = "default_samples")]
    pub samples: usize,
}

fn default_throat_radius_m() -> f64 {
    0.1
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

impl Default for GeometryDef {
    fn default() -> Self {
        Self {
            throat_radius_m: default_throat_radius_m(),
            samples: default_samples(),
        }
    }
}

impl Default for NozzleDesign {
    /// Air at 1 MPa / 300 K expanding through A_e/A_t = 5 to 100 kPa.
    fn default() -> Self {
        Self {
            name: "Default nozzle".to_string(),
            stagnation_pressure_pa: 1.0e6,
            stagnation_temperature_k: 300.0,
            exit_pressure_pa: 1.0e5,
            area_ratio: 5.0,
            gas: GasProperties::AIR,
            geometry: GeometryDef::default(),
        }
    }
}

impl NozzleDesign {
    /// Validated flow inputs for this design.
    pub fn parameters(&self) -> AppResult<DesignParameters> {
        Ok(DesignParameters::new(
            pa(self.stagnation_pressure_pa),
            k(self.stagnation_temperature_k),
            pa(self.exit_pressure_pa),
            self.area_ratio,
        )?)
    }

    pub fn throat_radius(&self) -> Length {
        m(self.geometry.throat_radius_m)
    }
}
