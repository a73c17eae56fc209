//! Axisymmetric bell wall contour from normalized control points.
//!
//! Eight hand-tuned (x/R_t, r/R_t) pairs approximate a Rao-type bell. The exit
//! point is replaced by √(A_e/A_t) so the wall always ends at the requested exit
//! radius, then a natural cubic spline is sampled uniformly along the axis.

use crate::error::{GeometryError, GeometryResult};
use crate::spline::NaturalCubicSpline;
use nz_core::numeric::{ensure_finite, ensure_positive, linspace};
use nz_core::units::{Length, m};
use tracing::{debug, warn};

/// Normalized axial stations, throat at x = 0.
pub const CONTROL_X: [f64; 8] = [-1.5, -1.0, -0.5, 0.0, 0.4, 0.8, 1.2, 1.6];

/// Normalized radii for every station except the exit.
pub const CONTROL_R: [f64; 7] = [2.0, 1.55, 1.15, 1.0, 1.0, 1.3, 1.8];

/// Index of the throat control point.
pub const THROAT_INDEX: usize = 3;

/// Default number of wall samples.
pub const DEFAULT_SAMPLES: usize = 800;

/// A point on the upper wall, in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallPoint {
    pub x: f64,
    pub r: f64,
}

/// Shape checks on a sampled contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourDiagnostics {
    /// Smallest sampled radius (m)
    pub min_radius: f64,
    /// Axial station of the smallest sampled radius (m)
    pub min_radius_x: f64,
    /// Control radii never decrease downstream of the throat
    pub control_points_monotonic: bool,
    /// Number of sample-to-sample radius decreases downstream of the throat
    pub downstream_decreases: usize,
}

/// Sampled upper wall plus the interpolant it came from.
#[derive(Debug, Clone)]
pub struct NozzleContour {
    throat_radius: f64,
    exit_radius: f64,
    control_points: Vec<WallPoint>,
    spline: NaturalCubicSpline,
    points: Vec<WallPoint>,
    diagnostics: ContourDiagnostics,
}

impl NozzleContour {
    /// Upper wall samples, ordered by axial position.
    pub fn points(&self) -> &[WallPoint] {
        &self.points
    }

    /// Lower wall: the upper wall mirrored about the axis.
    pub fn lower_wall(&self) -> Vec<WallPoint> {
        self.points
            .iter()
            .map(|p| WallPoint { x: p.x, r: -p.r })
            .collect()
    }

    /// Scaled control points the spline passes through.
    pub fn control_points(&self) -> &[WallPoint] {
        &self.control_points
    }

    /// Interpolated wall radius at axial position `x` (m).
    pub fn radius_at(&self, x: f64) -> f64 {
        self.spline.eval(x)
    }

    /// Wall slope dr/dx at axial position `x`.
    pub fn slope_at(&self, x: f64) -> f64 {
        self.spline.derivative(x)
    }

    pub fn throat_radius(&self) -> Length {
        m(self.throat_radius)
    }

    pub fn exit_radius(&self) -> Length {
        m(self.exit_radius)
    }

    /// Axial extent from the convergent inlet to the exit plane.
    pub fn length(&self) -> Length {
        let (start, end) = self.spline.domain();
        m(end - start)
    }

    pub fn diagnostics(&self) -> &ContourDiagnostics {
        &self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Scaled control points for area ratio `area_ratio` and throat radius `throat_radius_m`.
pub fn control_points(area_ratio: f64, throat_radius_m: f64) -> GeometryResult<Vec<WallPoint>> {
    validate(area_ratio, throat_radius_m)?;
    let exit_radius = throat_radius_m * area_ratio.sqrt();

    Ok(CONTROL_X
        .iter()
        .enumerate()
        .map(|(i, &x_norm)| WallPoint {
            x: x_norm * throat_radius_m,
            r: CONTROL_R.get(i).map_or(exit_radius, |&r| r * throat_radius_m),
        })
        .collect())
}

/// Wall contour with the default sample count.
pub fn contour(area_ratio: f64, throat_radius: Length) -> GeometryResult<NozzleContour> {
    generate(area_ratio, throat_radius, DEFAULT_SAMPLES)
}

/// Fit the control points with a natural spline and sample it at
/// `sample_count` uniformly spaced axial stations.
pub fn generate(
    area_ratio: f64,
    throat_radius: Length,
    sample_count: usize,
) -> GeometryResult<NozzleContour> {
    let r_t = throat_radius.value;
    if sample_count < 2 {
        return Err(GeometryError::InvalidParameter {
            what: format!("sample count must be at least 2, got {sample_count}"),
        });
    }

    let control = control_points(area_ratio, r_t)?;
    let xs: Vec<f64> = control.iter().map(|p| p.x).collect();
    let rs: Vec<f64> = control.iter().map(|p| p.r).collect();
    let spline = NaturalCubicSpline::new(&xs, &rs)?;

    let (x_start, x_end) = spline.domain();
    let points: Vec<WallPoint> = linspace(x_start, x_end, sample_count)
        .into_iter()
        .map(|x| WallPoint {
            x,
            r: spline.eval(x),
        })
        .collect();

    let diagnostics = diagnose(&control, &points);
    if !(diagnostics.min_radius.is_finite() && diagnostics.min_radius >= 0.0) {
        return Err(GeometryError::DegenerateState {
            what: format!(
                "wall radius reaches {:.6} m at x = {:.6} m for area ratio {}",
                diagnostics.min_radius, diagnostics.min_radius_x, area_ratio
            ),
        });
    }
    if !diagnostics.control_points_monotonic {
        warn!(
            area_ratio,
            "exit radius is below the last divergent control point; contour narrows before the exit"
        );
    }
    debug!(
        area_ratio,
        throat_radius_m = r_t,
        samples = sample_count,
        min_radius_m = diagnostics.min_radius,
        downstream_decreases = diagnostics.downstream_decreases,
        "nozzle contour generated"
    );

    Ok(NozzleContour {
        throat_radius: r_t,
        exit_radius: rs[rs.len() - 1],
        control_points: control,
        spline,
        points,
        diagnostics,
    })
}

fn validate(area_ratio: f64, throat_radius_m: f64) -> GeometryResult<()> {
    ensure_finite(area_ratio, "area ratio")?;
    ensure_positive(throat_radius_m, "throat radius")?;
    if area_ratio < 1.0 {
        return Err(GeometryError::InvalidParameter {
            what: format!("area ratio must be at least 1, got {area_ratio}"),
        });
    }
    Ok(())
}

fn diagnose(control: &[WallPoint], points: &[WallPoint]) -> ContourDiagnostics {
    let (min_radius, min_radius_x) = points
        .iter()
        .fold((f64::INFINITY, 0.0), |(r_min, x_min), p| {
            if p.r < r_min { (p.r, p.x) } else { (r_min, x_min) }
        });

    let control_points_monotonic = control[THROAT_INDEX..]
        .windows(2)
        .all(|w| w[1].r >= w[0].r);

    let downstream_decreases = points
        .windows(2)
        .filter(|w| w[0].x >= 0.0 && w[1].r < w[0].r)
        .count();

    ContourDiagnostics {
        min_radius,
        min_radius_x,
        control_points_monotonic,
        downstream_decreases,
    }
}
