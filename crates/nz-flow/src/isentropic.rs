//! Closed-form isentropic relations between stagnation and static state.

use crate::error::{NozzleError, NozzleResult};
use nz_core::GasProperties;
use nz_core::numeric::ensure_positive;
use nz_core::units::{Temperature, Velocity, k, mps};

/// Static conditions at a station of known Mach number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitConditions {
    /// Static temperature
    pub temperature: Temperature,
    /// Local speed of sound
    pub speed_of_sound: Velocity,
    /// Flow velocity
    pub velocity: Velocity,
}

/// T/T0 = 1 / (1 + ½(γ-1)M²)
pub fn temperature_ratio(mach: f64, gas: &GasProperties) -> f64 {
    1.0 / (1.0 + gas.half_gamma_minus_one() * mach * mach)
}

/// p/p0 = (T/T0)^(γ/(γ-1))
pub fn pressure_ratio(mach: f64, gas: &GasProperties) -> f64 {
    temperature_ratio(mach, gas).powf(gas.pressure_exponent())
}

/// Static temperature, speed of sound and velocity at Mach `mach`.
///
/// `mach` usually comes straight out of the area-Mach solve, so it is checked
/// here as well rather than trusted.
pub fn evaluate(mach: f64, t0: Temperature, gas: &GasProperties) -> NozzleResult<ExitConditions> {
    gas.validate()?;
    let t0_k = ensure_positive(t0.value, "stagnation temperature")?;
    if !mach.is_finite() || mach < 0.0 {
        return Err(NozzleError::invalid(format!(
            "Mach number must be finite and non-negative, got {mach}"
        )));
    }

    let denom = 1.0 + gas.half_gamma_minus_one() * mach * mach;
    if !(denom.is_finite() && denom > 0.0) {
        return Err(NozzleError::degenerate(format!(
            "temperature ratio denominator is {denom}"
        )));
    }

    let t = t0_k / denom;
    if !(t.is_finite() && t > 0.0) {
        return Err(NozzleError::degenerate(format!(
            "static temperature evaluated to {t} K"
        )));
    }

    let a = (gas.gamma * gas.gas_constant * t).sqrt();
    let v = mach * a;

    Ok(ExitConditions {
        temperature: k(t),
        speed_of_sound: mps(a),
        velocity: mps(v),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_at_mach_two_and_a_half() {
        let exit = evaluate(2.5, k(300.0), &GasProperties::AIR).unwrap();
        let t = exit.temperature.value;
        assert!((t - 300.0 / (1.0 + 0.2 * 2.5 * 2.5)).abs() < 1e-12);
        assert!((t - 133.33).abs() < 0.01);
    }

    #[test]
    fn velocity_is_mach_times_speed_of_sound() {
        let gas = GasProperties::AIR;
        let exit = evaluate(3.0, k(500.0), &gas).unwrap();
        let a = (gas.gamma * gas.gas_constant * exit.temperature.value).sqrt();
        assert!((exit.speed_of_sound.value - a).abs() < 1e-12);
        assert!((exit.velocity.value - 3.0 * a).abs() < 1e-9);
    }

    #[test]
    fn zero_mach_recovers_stagnation_temperature() {
        let exit = evaluate(0.0, k(300.0), &GasProperties::AIR).unwrap();
        assert_eq!(exit.temperature.value, 300.0);
        assert_eq!(exit.velocity.value, 0.0);
    }

    #[test]
    fn ratios_at_sonic_point() {
        let gas = GasProperties::AIR;
        assert!((temperature_ratio(1.0, &gas) - 0.833_333).abs() < 1e-6);
        assert!((pressure_ratio(1.0, &gas) - 0.528_28).abs() < 1e-5);
    }

    #[test]
    fn rejects_non_positive_stagnation_temperature() {
        let err = evaluate(2.0, k(0.0), &GasProperties::AIR).unwrap_err();
        assert!(matches!(err, NozzleError::InvalidParameter { .. }));
        assert!(evaluate(2.0, k(-10.0), &GasProperties::AIR).is_err());
    }

    #[test]
    fn rejects_nan_or_negative_mach() {
        for mach in [f64::NAN, -1.0, f64::INFINITY] {
            let err = evaluate(mach, k(300.0), &GasProperties::AIR).unwrap_err();
            assert!(matches!(err, NozzleError::InvalidParameter { .. }), "{mach}");
        }
    }

    #[test]
    fn overflowing_mach_is_degenerate() {
        let err = evaluate(1e200, k(300.0), &GasProperties::AIR).unwrap_err();
        assert!(matches!(err, NozzleError::DegenerateState { .. }));
    }

    #[test]
    fn gas_constants_are_validated() {
        let gas = GasProperties {
            gamma: 0.9,
            gas_constant: 287.0,
        };
        assert!(matches!(
            evaluate(2.0, k(300.0), &gas),
            Err(NozzleError::InvalidParameter { .. })
        ));
    }
}
