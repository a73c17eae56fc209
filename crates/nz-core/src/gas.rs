//! Calorically perfect gas constants.

use crate::error::{NzError, NzResult};
use crate::numeric::ensure_finite;

/// Ratio of specific heats and specific gas constant of a perfect gas.
///
/// Passed explicitly into every flow calculation so several gas models can be
/// evaluated side by side.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GasProperties {
    /// Ratio of specific heats cp/cv (dimensionless, > 1)
    pub gamma: f64,
    /// Specific gas constant in J/(kg·K)
    pub gas_constant: f64,
}

impl GasProperties {
    /// Dry air.
    pub const AIR: Self = Self {
        gamma: 1.4,
        gas_constant: 287.0,
    };

    /// Create and validate a gas definition.
    pub fn new(gamma: f64, gas_constant: f64) -> NzResult<Self> {
        let gas = Self {
            gamma,
            gas_constant,
        };
        gas.validate()?;
        Ok(gas)
    }

    pub fn validate(&self) -> NzResult<()> {
        ensure_finite(self.gamma, "gamma")?;
        ensure_finite(self.gas_constant, "gas constant")?;
        if self.gamma <= 1.0 {
            return Err(NzError::InvalidArg {
                what: "gamma must be greater than 1",
            });
        }
        if self.gas_constant <= 0.0 {
            return Err(NzError::InvalidArg {
                what: "gas constant must be positive",
            });
        }
        Ok(())
    }

    /// (γ - 1) / 2, the recurring factor in the isentropic relations.
    #[inline]
    pub fn half_gamma_minus_one(&self) -> f64 {
        0.5 * (self.gamma - 1.0)
    }

    /// γ / (γ - 1), the exponent linking pressure and temperature ratios.
    #[inline]
    pub fn pressure_exponent(&self) -> f64 {
        self.gamma / (self.gamma - 1.0)
    }
}

impl Default for GasProperties {
    fn default() -> Self {
        Self::AIR
    }
}
