//! Full evaluation of a design: exit state plus wall contour.

use nz_flow::NozzleSolution;
use nz_geometry::NozzleContour;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::design::NozzleDesign;
use crate::design_service::validate_design;
use crate::error::AppResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluateOptions {
    /// Embed every sampled wall point in the report
    pub include_contour: bool,
}

/// Serializable summary of one evaluated design.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignReport {
    pub name: String,
    pub inputs: ReportInputs,
    pub exit: ExitReport,
    pub contour: ContourSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contour_points: Option<Vec<ContourPointRow>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportInputs {
    pub stagnation_pressure_pa: f64,
    pub stagnation_temperature_k: f64,
    pub exit_pressure_pa: f64,
    pub area_ratio: f64,
    pub gamma: f64,
    pub gas_constant_j_per_kg_k: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExitReport {
    pub mach: f64,
    pub temperature_k: f64,
    pub speed_of_sound_mps: f64,
    pub velocity_mps: f64,
    pub p_isentropic_pa: f64,
    pub mismatch_pct: f64,
    /// Machine-readable regime key
    pub regime: String,
    /// Human-readable regime message
    pub regime_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContourSummary {
    pub throat_radius_m: f64,
    pub exit_radius_m: f64,
    pub length_m: f64,
    pub samples: usize,
    pub min_radius_m: f64,
    pub min_radius_x_m: f64,
    pub control_points_monotonic: bool,
    pub downstream_decreases: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ContourPointRow {
    pub x_m: f64,
    pub r_m: f64,
}

/// Evaluate a design without embedding the sampled contour.
pub fn evaluate(design: &NozzleDesign) -> AppResult<DesignReport> {
    evaluate_with(design, &EvaluateOptions::default())
}

pub fn evaluate_with(design: &NozzleDesign, options: &EvaluateOptions) -> AppResult<DesignReport> {
    validate_design(design)?;

    let params = design.parameters()?;
    let solution = nz_flow::compute(&params, &design.gas)?;
    let contour = nz_geometry::generate(
        design.area_ratio,
        design.throat_radius(),
        design.geometry.samples,
    )?;

    debug!(
        design = %design.name,
        mach = solution.mach,
        exit_radius_m = contour.exit_radius().value,
        "design evaluated"
    );

    Ok(build_report(design, &solution, &contour, options))
}

fn build_report(
    design: &NozzleDesign,
    solution: &NozzleSolution,
    contour: &NozzleContour,
    options: &EvaluateOptions,
) -> DesignReport {
    let diagnostics = contour.diagnostics();

    DesignReport {
        name: design.name.clone(),
        inputs: ReportInputs {
            stagnation_pressure_pa: design.stagnation_pressure_pa,
            stagnation_temperature_k: design.stagnation_temperature_k,
            exit_pressure_pa: design.exit_pressure_pa,
            area_ratio: design.area_ratio,
            gamma: design.gas.gamma,
            gas_constant_j_per_kg_k: design.gas.gas_constant,
        },
        exit: ExitReport {
            mach: solution.mach,
            temperature_k: solution.temperature.value,
            speed_of_sound_mps: solution.speed_of_sound.value,
            velocity_mps: solution.velocity.value,
            p_isentropic_pa: solution.p_isentropic.value,
            mismatch_pct: solution.mismatch_pct,
            regime: solution.regime.key().to_string(),
            regime_label: solution.regime.to_string(),
        },
        contour: ContourSummary {
            throat_radius_m: contour.throat_radius().value,
            exit_radius_m: contour.exit_radius().value,
            length_m: contour.length().value,
            samples: contour.len(),
            min_radius_m: diagnostics.min_radius,
            min_radius_x_m: diagnostics.min_radius_x,
            control_points_monotonic: diagnostics.control_points_monotonic,
            downstream_decreases: diagnostics.downstream_decreases,
        },
        contour_points: options.include_contour.then(|| {
            contour
                .points()
                .iter()
                .map(|p| ContourPointRow { x_m: p.x, r_m: p.r })
                .collect()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use nz_flow::NozzleError;

    #[test]
    fn default_design_report() {
        let report = evaluate(&NozzleDesign::default()).unwrap();
        assert!((report.exit.mach - 3.17).abs() < 0.01);
        assert_eq!(report.exit.regime, "under_or_over_expanded");
        assert_eq!(report.exit.regime_label, "Shocks expected in real flow");
        assert_eq!(report.contour.samples, 800);
        assert_eq!(report.contour.exit_radius_m, 0.1 * 5.0_f64.sqrt());
        assert!(report.contour_points.is_none());
    }

    #[test]
    fn contour_points_are_opt_in() {
        let mut design = NozzleDesign::default();
        design.geometry.samples = 25;
        let report = evaluate_with(
            &design,
            &EvaluateOptions {
                include_contour: true,
            },
        )
        .unwrap();
        let points = report.contour_points.unwrap();
        assert_eq!(points.len(), 25);
        assert_eq!(points[24].r_m, report.contour.exit_radius_m);
    }

    #[test]
    fn report_serializes_with_unit_suffixes() {
        let report = evaluate(&NozzleDesign::default()).unwrap();
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"velocity_mps\""));
        assert!(json.contains("\"p_isentropic_pa\""));
        assert!(!json.contains("contour_points"));
        let back: DesignReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.exit.regime, report.exit.regime);
        assert!((back.exit.velocity_mps - report.exit.velocity_mps).abs() < 1e-9);
    }

    #[test]
    fn invalid_design_fails_validation() {
        let design = NozzleDesign {
            area_ratio: 0.8,
            ..NozzleDesign::default()
        };
        assert!(matches!(evaluate(&design), Err(AppError::Validation(_))));
    }

    #[test]
    fn degenerate_contour_propagates() {
        let design = NozzleDesign {
            area_ratio: 520.0,
            ..NozzleDesign::default()
        };
        assert!(matches!(evaluate(&design), Err(AppError::Geometry(_))));
    }

    #[test]
    fn flow_errors_keep_their_kind() {
        let err: AppError = NozzleError::SolverNonConvergence {
            what: "test".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            AppError::Flow(NozzleError::SolverNonConvergence { .. })
        ));
    }
}
