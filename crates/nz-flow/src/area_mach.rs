//! Supersonic root of the isentropic area-Mach relation.
//!
//! A/A* = (1/M)·[(2 + (γ-1)M²)/(γ+1)]^((γ+1)/(2(γ-1)))
//!
//! Every A/A* > 1 has one subsonic and one supersonic root. The solver keeps a
//! bracket on `[1, M_hi]` so only the supersonic root can be returned, and takes
//! Newton steps inside that bracket with bisection as the fallback.

use crate::error::{NozzleError, NozzleResult};
use nz_core::numeric::{ensure_finite, relative_error};
use tracing::{debug, warn};

/// Upper limit for bracket expansion.
pub const MAX_MACH: f64 = 1.0e3;

/// Area-Mach solver configuration.
#[derive(Debug, Clone, Copy)]
pub struct AreaMachConfig {
    /// Seed for the Newton iteration (must be supersonic)
    pub initial_guess: f64,
    /// Maximum iterations
    pub max_iterations: usize,
    /// Relative residual |f(M)| / (A/A*) at which iteration stops
    pub rel_tol: f64,
    /// Relative step size at which iteration is considered stagnant
    pub step_tol: f64,
    /// Relative residual a returned root must satisfy
    pub acceptance_tol: f64,
}

impl Default for AreaMachConfig {
    fn default() -> Self {
        Self {
            initial_guess: 2.5,
            max_iterations: 100,
            rel_tol: 1e-12,
            step_tol: 1e-15,
            acceptance_tol: 1e-6,
        }
    }
}

/// Converged supersonic root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaMachSolution {
    /// Mach number on the supersonic branch
    pub mach: f64,
    /// Final relative residual
    pub residual: f64,
    /// Number of iterations
    pub iterations: usize,
}

/// Area ratio A/A* reached by isentropic flow at `mach`.
pub fn area_ratio(mach: f64, gamma: f64) -> f64 {
    let exponent = (gamma + 1.0) / (2.0 * (gamma - 1.0));
    let base = (2.0 + (gamma - 1.0) * mach * mach) / (gamma + 1.0);
    base.powf(exponent) / mach
}

/// dA/dM of [`area_ratio`]; zero at the sonic point.
pub fn area_ratio_derivative(mach: f64, gamma: f64) -> f64 {
    let m2 = mach * mach;
    area_ratio(mach, gamma) * (m2 - 1.0) / (mach * (1.0 + 0.5 * (gamma - 1.0) * m2))
}

/// Supersonic Mach number for the area ratio `ratio` with default settings.
pub fn solve(ratio: f64, gamma: f64) -> NozzleResult<f64> {
    solve_with(ratio, gamma, &AreaMachConfig::default()).map(|s| s.mach)
}

/// Supersonic Mach number for the area ratio `ratio`.
///
/// `ratio == 1` is the sonic throat and returns M = 1 without iterating.
pub fn solve_with(
    ratio: f64,
    gamma: f64,
    config: &AreaMachConfig,
) -> NozzleResult<AreaMachSolution> {
    validate_inputs(ratio, gamma, config)?;

    if ratio == 1.0 {
        debug!("area ratio is exactly 1, returning sonic throat");
        return Ok(AreaMachSolution {
            mach: 1.0,
            residual: 0.0,
            iterations: 0,
        });
    }

    let residual = |mach: f64| area_ratio(mach, gamma) - ratio;
    let rel_residual = |mach: f64| relative_error(area_ratio(mach, gamma), ratio);

    // f(1) = 1 - ratio < 0, so M = 1 is always a valid lower bracket.
    let mut lo = 1.0;
    let mut hi = config.initial_guess.max(2.0);
    loop {
        let r_hi = residual(hi);
        if r_hi.is_nan() {
            return Err(non_convergence(format!("area relation is undefined at M = {hi}")));
        }
        if r_hi > 0.0 {
            break;
        }
        lo = hi;
        hi *= 2.0;
        if hi > MAX_MACH {
            return Err(non_convergence(format!(
                "no supersonic root below M = {MAX_MACH} for area ratio {ratio}"
            )));
        }
    }

    let mut mach = if config.initial_guess > lo && config.initial_guess < hi {
        config.initial_guess
    } else {
        0.5 * (lo + hi)
    };

    for iter in 0..config.max_iterations {
        let r = residual(mach);
        if r.is_nan() {
            return Err(non_convergence(format!(
                "residual became NaN at M = {mach} (iteration {iter})"
            )));
        }

        let rel = rel_residual(mach);
        if rel <= config.rel_tol {
            return accept(mach, rel, iter, ratio, config);
        }

        if r < 0.0 {
            lo = mach;
        } else {
            hi = mach;
        }

        let newton = mach - r / area_ratio_derivative(mach, gamma);
        let next = if newton.is_finite() && newton > lo && newton < hi {
            newton
        } else {
            0.5 * (lo + hi)
        };

        if (next - mach).abs() <= config.step_tol * mach {
            let rel = rel_residual(next);
            return accept(next, rel, iter + 1, ratio, config);
        }
        mach = next;
    }

    let rel = rel_residual(mach);
    warn!(
        area_ratio = ratio,
        mach,
        residual = rel,
        "area-Mach solve hit its iteration limit"
    );
    Err(non_convergence(format!(
        "maximum iterations {} reached, relative residual = {rel:e}",
        config.max_iterations
    )))
}

fn validate_inputs(ratio: f64, gamma: f64, config: &AreaMachConfig) -> NozzleResult<()> {
    ensure_finite(ratio, "area ratio")?;
    ensure_finite(gamma, "gamma")?;
    ensure_finite(config.initial_guess, "initial Mach guess")?;
    if ratio < 1.0 {
        return Err(NozzleError::invalid(format!(
            "area ratio must be at least 1, got {ratio}"
        )));
    }
    if gamma <= 1.0 {
        return Err(NozzleError::invalid(format!(
            "gamma must be greater than 1, got {gamma}"
        )));
    }
    if config.initial_guess <= 1.0 {
        return Err(NozzleError::invalid(format!(
            "initial Mach guess must be supersonic, got {}",
            config.initial_guess
        )));
    }
    Ok(())
}

/// Post-condition on a candidate root: finite, supersonic, small residual.
fn accept(
    mach: f64,
    residual: f64,
    iterations: usize,
    ratio: f64,
    config: &AreaMachConfig,
) -> NozzleResult<AreaMachSolution> {
    if !mach.is_finite() || mach <= 1.0 {
        return Err(non_convergence(format!(
            "root M = {mach} is not on the supersonic branch"
        )));
    }
    if residual.is_nan() || residual > config.acceptance_tol {
        return Err(non_convergence(format!(
            "root M = {mach} leaves relative residual {residual:e} for area ratio {ratio}"
        )));
    }
    debug!(
        area_ratio = ratio,
        mach,
        iterations,
        residual,
        "area-Mach solve converged"
    );
    Ok(AreaMachSolution {
        mach,
        residual,
        iterations,
    })
}

fn non_convergence(what: String) -> NozzleError {
    NozzleError::SolverNonConvergence { what }
}
