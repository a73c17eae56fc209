//! Validated nozzle design inputs.

use crate::error::{NozzleError, NozzleResult};
use nz_core::numeric::{ensure_finite, ensure_positive};
use nz_core::units::{Pressure, Temperature};

/// Stagnation conditions, target back pressure and expansion area ratio.
///
/// Only constructed through [`DesignParameters::new`], so every instance has
/// positive pressures and temperature and an area ratio of at least 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignParameters {
    p0: Pressure,
    t0: Temperature,
    pe: Pressure,
    area_ratio: f64,
}

impl DesignParameters {
    pub fn new(
        p0: Pressure,
        t0: Temperature,
        pe: Pressure,
        area_ratio: f64,
    ) -> NozzleResult<Self> {
        ensure_positive(p0.value, "stagnation pressure")?;
        ensure_positive(t0.value, "stagnation temperature")?;
        ensure_positive(pe.value, "exit pressure")?;
        ensure_finite(area_ratio, "area ratio")?;
        if area_ratio < 1.0 {
            return Err(NozzleError::invalid(format!(
                "area ratio must be at least 1, got {area_ratio}"
            )));
        }

        Ok(Self {
            p0,
            t0,
            pe,
            area_ratio,
        })
    }

    /// Stagnation pressure
    pub fn p0(&self) -> Pressure {
        self.p0
    }

    /// Stagnation temperature
    pub fn t0(&self) -> Temperature {
        self.t0
    }

    /// Target exit (back) pressure
    pub fn pe(&self) -> Pressure {
        self.pe
    }

    /// A_exit / A_throat
    pub fn area_ratio(&self) -> f64 {
        self.area_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nz_core::units::{k, pa};

    #[test]
    fn accepts_valid_design() {
        let d = DesignParameters::new(pa(1e6), k(300.0), pa(1e5), 5.0).unwrap();
        assert_eq!(d.p0().value, 1e6);
        assert_eq!(d.t0().value, 300.0);
        assert_eq!(d.pe().value, 1e5);
        assert_eq!(d.area_ratio(), 5.0);
    }

    #[test]
    fn sonic_area_ratio_is_allowed() {
        assert!(DesignParameters::new(pa(1e6), k(300.0), pa(1e5), 1.0).is_ok());
    }

    #[test]
    fn rejects_invalid_inputs() {
        let cases = [
            (0.0, 300.0, 1e5, 5.0),
            (1e6, -1.0, 1e5, 5.0),
            (1e6, 300.0, 0.0, 5.0),
            (1e6, 300.0, 1e5, 0.99),
            (1e6, 300.0, 1e5, f64::NAN),
            (f64::INFINITY, 300.0, 1e5, 5.0),
        ];
        for (p0, t0, pe, ar) in cases {
            let err = DesignParameters::new(pa(p0), k(t0), pa(pe), ar).unwrap_err();
            assert!(
                matches!(err, NozzleError::InvalidParameter { .. }),
                "expected InvalidParameter for {:?}",
                (p0, t0, pe, ar)
            );
        }
    }
}
