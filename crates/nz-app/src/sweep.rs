//! Parametric sweeps over a single design input.
//!
//! Each point is an independent flow evaluation, so points are solved in
//! parallel and a failure at one point never affects the others.

use std::fmt;
use std::str::FromStr;

use nz_core::units::{k, pa};
use nz_flow::{DesignParameters, NozzleError, NozzleResult, NozzleSolution};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::design::NozzleDesign;
use crate::error::{AppError, AppResult};

/// Design input varied by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    AreaRatio,
    StagnationPressure,
    StagnationTemperature,
    ExitPressure,
}

impl SweepParameter {
    pub fn key(self) -> &'static str {
        match self {
            Self::AreaRatio => "area_ratio",
            Self::StagnationPressure => "stagnation_pressure",
            Self::StagnationTemperature => "stagnation_temperature",
            Self::ExitPressure => "exit_pressure",
        }
    }

    /// SI unit of the swept value
    pub fn unit(self) -> &'static str {
        match self {
            Self::AreaRatio => "-",
            Self::StagnationPressure | Self::ExitPressure => "Pa",
            Self::StagnationTemperature => "K",
        }
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaRatio => write!(f, "Area ratio"),
            Self::StagnationPressure => write!(f, "Stagnation pressure"),
            Self::StagnationTemperature => write!(f, "Stagnation temperature"),
            Self::ExitPressure => write!(f, "Exit pressure"),
        }
    }
}

impl FromStr for SweepParameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "area_ratio" | "ar" => Ok(Self::AreaRatio),
            "stagnation_pressure" | "p0" => Ok(Self::StagnationPressure),
            "stagnation_temperature" | "t0" => Ok(Self::StagnationTemperature),
            "exit_pressure" | "pe" => Ok(Self::ExitPressure),
            other => Err(format!(
                "unknown sweep parameter '{}' (expected area-ratio, p0, t0 or pe)",
                other
            )),
        }
    }
}

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepType {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

/// Definition of a single parameter sweep, bounds in SI units.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub parameter: SweepParameter,
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    pub fn new(
        parameter: SweepParameter,
        start: f64,
        end: f64,
        num_points: usize,
        sweep_type: SweepType,
    ) -> AppResult<Self> {
        if !(start.is_finite() && end.is_finite()) {
            return Err(AppError::InvalidInput(
                "Sweep bounds must be finite".to_string(),
            ));
        }
        if num_points < 2 {
            return Err(AppError::InvalidInput(
                "Sweep must have at least 2 points".to_string(),
            ));
        }
        if (start - end).abs() < 1e-12 {
            return Err(AppError::InvalidInput(
                "Start and end values must be different".to_string(),
            ));
        }
        if sweep_type == SweepType::Logarithmic && (start <= 0.0 || end <= 0.0) {
            return Err(AppError::InvalidInput(
                "Logarithmic sweep bounds must be positive".to_string(),
            ));
        }

        Ok(Self {
            parameter,
            start,
            end,
            num_points,
            sweep_type,
        })
    }

    /// Generate all points in the sweep. The last point is exactly `end`.
    pub fn generate_points(&self) -> Vec<f64> {
        match self.sweep_type {
            SweepType::Linear => nz_core::numeric::linspace(self.start, self.end, self.num_points),
            SweepType::Logarithmic => {
                let mut points: Vec<f64> =
                    nz_core::numeric::linspace(self.start.ln(), self.end.ln(), self.num_points)
                        .into_iter()
                        .map(f64::exp)
                        .collect();
                if let Some(first) = points.first_mut() {
                    *first = self.start;
                }
                if let Some(last) = points.last_mut() {
                    *last = self.end;
                }
                points
            }
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sweep {} from {} to {} {} ({} points, {})",
            self.parameter,
            self.start,
            self.end,
            self.parameter.unit(),
            self.num_points,
            self.sweep_type
        )
    }
}

/// Outcome of a sweep, one slot per generated point.
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub parameter: SweepParameter,
    /// Swept values, in generation order
    pub values: Vec<f64>,
    pub outcomes: Vec<NozzleResult<NozzleSolution>>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepResult {
    /// Successful points as (swept value, solution).
    pub fn successful(&self) -> Vec<(f64, &NozzleSolution)> {
        self.values
            .iter()
            .zip(&self.outcomes)
            .filter_map(|(v, o)| o.as_ref().ok().map(|s| (*v, s)))
            .collect()
    }

    /// Failed points as (swept value, error).
    pub fn failures(&self) -> Vec<(f64, &NozzleError)> {
        self.values
            .iter()
            .zip(&self.outcomes)
            .filter_map(|(v, o)| o.as_ref().err().map(|e| (*v, e)))
            .collect()
    }

    /// Exit Mach numbers (excluding failed points)
    pub fn mach(&self) -> Vec<f64> {
        self.successful().iter().map(|(_, s)| s.mach).collect()
    }

    /// Exit velocities in m/s (excluding failed points)
    pub fn velocity_mps(&self) -> Vec<f64> {
        self.successful()
            .iter()
            .map(|(_, s)| s.velocity.value)
            .collect()
    }
}

/// Evaluate `design` at every point of `definition`.
pub fn execute_sweep(design: &NozzleDesign, definition: &SweepDefinition) -> SweepResult {
    let values = definition.generate_points();
    let outcomes: Vec<NozzleResult<NozzleSolution>> = values
        .par_iter()
        .map(|&value| evaluate_point(design, definition.parameter, value))
        .collect();

    for (value, outcome) in values.iter().zip(&outcomes) {
        if let Err(err) = outcome {
            warn!(
                parameter = definition.parameter.key(),
                value = *value,
                error = %err,
                "sweep point failed"
            );
        }
    }

    let num_failed = outcomes.iter().filter(|o| o.is_err()).count();
    let num_successful = outcomes.len() - num_failed;
    debug!(
        parameter = definition.parameter.key(),
        points = values.len(),
        num_successful,
        num_failed,
        "sweep finished"
    );

    SweepResult {
        parameter: definition.parameter,
        values,
        outcomes,
        num_successful,
        num_failed,
    }
}

fn evaluate_point(
    design: &NozzleDesign,
    parameter: SweepParameter,
    value: f64,
) -> NozzleResult<NozzleSolution> {
    let mut p0 = design.stagnation_pressure_pa;
    let mut t0 = design.stagnation_temperature_k;
    let mut pe = design.exit_pressure_pa;
    let mut area_ratio = design.area_ratio;
    match parameter {
        SweepParameter::AreaRatio => area_ratio = value,
        SweepParameter::StagnationPressure => p0 = value,
        SweepParameter::StagnationTemperature => t0 = value,
        SweepParameter::ExitPressure => pe = value,
    }

    let params = DesignParameters::new(pa(p0), k(t0), pa(pe), area_ratio)?;
    nz_flow::compute(&params, &design.gas)
}
