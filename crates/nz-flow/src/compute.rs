//! One-shot evaluation of the nozzle exit state.

use crate::area_mach::{self, AreaMachConfig};
use crate::design::DesignParameters;
use crate::error::NozzleResult;
use crate::expansion::{self, ExpansionRegime};
use crate::isentropic;
use nz_core::GasProperties;
use nz_core::units::{Pressure, Temperature, Velocity};
use tracing::debug;

/// Isentropic exit flow state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowState {
    pub mach: f64,
    pub temperature: Temperature,
    pub speed_of_sound: Velocity,
    pub velocity: Velocity,
    /// Isentropic static pressure
    pub pressure: Pressure,
}

/// Everything the presentation layer shows for one design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NozzleSolution {
    pub mach: f64,
    pub temperature: Temperature,
    pub speed_of_sound: Velocity,
    pub velocity: Velocity,
    pub p_isentropic: Pressure,
    pub mismatch_pct: f64,
    pub regime: ExpansionRegime,
}

impl NozzleSolution {
    pub fn flow_state(&self) -> FlowState {
        FlowState {
            mach: self.mach,
            temperature: self.temperature,
            speed_of_sound: self.speed_of_sound,
            velocity: self.velocity,
            pressure: self.p_isentropic,
        }
    }
}

/// Solve the exit Mach number, propagate it through the isentropic relations
/// and classify the expansion regime.
pub fn compute(params: &DesignParameters, gas: &GasProperties) -> NozzleResult<NozzleSolution> {
    compute_with(params, gas, &AreaMachConfig::default())
}

pub fn compute_with(
    params: &DesignParameters,
    gas: &GasProperties,
    solver: &AreaMachConfig,
) -> NozzleResult<NozzleSolution> {
    gas.validate()?;

    let root = area_mach::solve_with(params.area_ratio(), gas.gamma, solver)?;
    let exit = isentropic::evaluate(root.mach, params.t0(), gas)?;
    let assessment = expansion::classify(
        params.p0(),
        params.t0(),
        exit.temperature,
        params.pe(),
        gas,
    )?;

    debug!(
        area_ratio = params.area_ratio(),
        mach = root.mach,
        t_exit_k = exit.temperature.value,
        v_exit_mps = exit.velocity.value,
        mismatch_pct = assessment.mismatch_pct,
        regime = assessment.regime.key(),
        "nozzle exit state computed"
    );

    Ok(NozzleSolution {
        mach: root.mach,
        temperature: exit.temperature,
        speed_of_sound: exit.speed_of_sound,
        velocity: exit.velocity,
        p_isentropic: assessment.p_isentropic,
        mismatch_pct: assessment.mismatch_pct,
        regime: assessment.regime,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NozzleError;
    use nz_core::units::{k, pa};

    #[test]
    fn flow_state_mirrors_solution() {
        let params = DesignParameters::new(pa(1e6), k(300.0), pa(1e5), 3.0).unwrap();
        let sol = compute(&params, &GasProperties::AIR).unwrap();
        let state = sol.flow_state();
        assert_eq!(state.mach, sol.mach);
        assert_eq!(state.pressure, sol.p_isentropic);
        assert_eq!(state.velocity, sol.velocity);
    }

    #[test]
    fn sonic_design_has_unit_mach() {
        let params = DesignParameters::new(pa(1e6), k(300.0), pa(5e5), 1.0).unwrap();
        let sol = compute(&params, &GasProperties::AIR).unwrap();
        assert_eq!(sol.mach, 1.0);
        assert!((sol.temperature.value - 250.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_gas_is_rejected_before_solving() {
        let params = DesignParameters::new(pa(1e6), k(300.0), pa(1e5), 3.0).unwrap();
        let gas = GasProperties {
            gamma: 1.4,
            gas_constant: -1.0,
        };
        assert!(matches!(
            compute(&params, &gas),
            Err(NozzleError::InvalidParameter { .. })
        ));
    }
}
