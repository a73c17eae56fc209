//! Expansion regime from the mismatch between isentropic and back pressure.

use crate::error::{NozzleError, NozzleResult};
use nz_core::GasProperties;
use nz_core::numeric::ensure_positive;
use nz_core::units::{Pressure, Temperature, pa};
use std::fmt;

/// Mismatch below which the nozzle counts as perfectly expanded (percent).
pub const PERFECT_EXPANSION_THRESHOLD_PCT: f64 = 5.0;

/// Qualitative exit regime.
///
/// Under- and over-expansion are deliberately not told apart; only the size of
/// the pressure mismatch matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpansionRegime {
    PerfectlyExpanded,
    UnderOrOverExpanded,
}

impl ExpansionRegime {
    pub fn from_mismatch(mismatch_pct: f64) -> Self {
        if mismatch_pct < PERFECT_EXPANSION_THRESHOLD_PCT {
            Self::PerfectlyExpanded
        } else {
            Self::UnderOrOverExpanded
        }
    }

    /// Stable snake_case key for reports.
    pub fn key(self) -> &'static str {
        match self {
            Self::PerfectlyExpanded => "perfectly_expanded",
            Self::UnderOrOverExpanded => "under_or_over_expanded",
        }
    }
}

impl fmt::Display for ExpansionRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerfectlyExpanded => write!(f, "Perfectly expanded"),
            Self::UnderOrOverExpanded => write!(f, "Shocks expected in real flow"),
        }
    }
}

/// Result of comparing the isentropic exit pressure against the back pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpansionAssessment {
    /// Exit static pressure predicted by isentropic expansion
    pub p_isentropic: Pressure,
    /// |pe - p_isentropic| / p_isentropic in percent
    pub mismatch_pct: f64,
    pub regime: ExpansionRegime,
}

/// Classify the exit regime.
///
/// p_isentropic = p0·(T_exit/T0)^(γ/(γ-1))
pub fn classify(
    p0: Pressure,
    t0: Temperature,
    t_exit: Temperature,
    pe: Pressure,
    gas: &GasProperties,
) -> NozzleResult<ExpansionAssessment> {
    gas.validate()?;
    let p0_pa = ensure_positive(p0.value, "stagnation pressure")?;
    let t0_k = ensure_positive(t0.value, "stagnation temperature")?;
    let pe_pa = ensure_positive(pe.value, "exit pressure")?;

    let t_exit_k = t_exit.value;
    if !(t_exit_k.is_finite() && t_exit_k > 0.0) {
        return Err(NozzleError::degenerate(format!(
            "exit temperature is {t_exit_k} K"
        )));
    }

    let p_is = p0_pa * (t_exit_k / t0_k).powf(gas.pressure_exponent());
    if !(p_is.is_finite() && p_is > 0.0) {
        return Err(NozzleError::degenerate(format!(
            "isentropic exit pressure evaluated to {p_is} Pa"
        )));
    }

    let mismatch_pct = (pe_pa - p_is).abs() / p_is * 100.0;

    Ok(ExpansionAssessment {
        p_isentropic: pa(p_is),
        mismatch_pct,
        regime: ExpansionRegime::from_mismatch(mismatch_pct),
    })
}
