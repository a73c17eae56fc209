//! Natural cubic spline interpolation.
//!
//! The spline is stored as knot values plus second derivatives at the knots.
//! Natural end conditions fix the second derivative to zero at both ends, which
//! leaves a tridiagonal system for the interior knots.

use crate::error::{GeometryError, GeometryResult};
use nalgebra::{DMatrix, DVector};

/// C²-continuous piecewise cubic through a set of knots.
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalCubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivative at each knot
    m: Vec<f64>,
}

impl NaturalCubicSpline {
    /// Fit a natural spline through `(xs[i], ys[i])`.
    ///
    /// Requires at least two knots with strictly increasing, finite abscissae.
    pub fn new(xs: &[f64], ys: &[f64]) -> GeometryResult<Self> {
        let n = xs.len();
        if n != ys.len() {
            return Err(spline_error(format!(
                "knot count mismatch: {} x values, {} y values",
                n,
                ys.len()
            )));
        }
        if n < 2 {
            return Err(spline_error(format!("need at least 2 knots, got {n}")));
        }
        if let Some(bad) = xs.iter().chain(ys).find(|v| !v.is_finite()) {
            return Err(spline_error(format!("non-finite knot value {bad}")));
        }
        if let Some(i) = xs.windows(2).position(|w| w[1] <= w[0]) {
            return Err(spline_error(format!(
                "knots must be strictly increasing (x[{}] = {}, x[{}] = {})",
                i,
                xs[i],
                i + 1,
                xs[i + 1]
            )));
        }

        let m = second_derivatives(xs, ys)?;

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            m,
        })
    }

    /// Knot abscissae and ordinates.
    pub fn knots(&self) -> (&[f64], &[f64]) {
        (&self.xs, &self.ys)
    }

    /// Interpolation interval `[x_first, x_last]`.
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Spline value at `x`. Knots are reproduced exactly; outside the domain the
    /// end segment's cubic is extended.
    pub fn eval(&self, x: f64) -> f64 {
        let (i, h, a, b) = self.locate(x);
        if b == 0.0 {
            return self.ys[i];
        }
        if a == 0.0 {
            return self.ys[i + 1];
        }
        let (m0, m1) = (self.m[i], self.m[i + 1]);
        m0 * a.powi(3) / (6.0 * h)
            + m1 * b.powi(3) / (6.0 * h)
            + (self.ys[i] / h - m0 * h / 6.0) * a
            + (self.ys[i + 1] / h - m1 * h / 6.0) * b
    }

    /// First derivative at `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        let (i, h, a, b) = self.locate(x);
        let (m0, m1) = (self.m[i], self.m[i + 1]);
        -m0 * a * a / (2.0 * h) + m1 * b * b / (2.0 * h) + (self.ys[i + 1] - self.ys[i]) / h
            - (m1 - m0) * h / 6.0
    }

    /// Second derivative at `x`.
    pub fn second_derivative(&self, x: f64) -> f64 {
        let (i, h, a, b) = self.locate(x);
        (self.m[i] * a + self.m[i + 1] * b) / h
    }

    /// Segment index, its width, and the distances `x_{i+1} - x` and `x - x_i`.
    fn locate(&self, x: f64) -> (usize, f64, f64, f64) {
        let last = self.xs.len() - 2;
        let i = self.xs.partition_point(|&k| k <= x).saturating_sub(1).min(last);
        let h = self.xs[i + 1] - self.xs[i];
        (i, h, self.xs[i + 1] - x, x - self.xs[i])
    }
}

/// Solve for the knot second derivatives with M_0 = M_{n-1} = 0.
fn second_derivatives(xs: &[f64], ys: &[f64]) -> GeometryResult<Vec<f64>> {
    let n = xs.len();
    let mut m = vec![0.0; n];
    if n < 3 {
        return Ok(m);
    }

    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let interior = n - 2;
    let mut a = DMatrix::<f64>::zeros(interior, interior);
    let mut rhs = DVector::<f64>::zeros(interior);

    for row in 0..interior {
        let i = row + 1;
        if row > 0 {
            a[(row, row - 1)] = h[i - 1];
        }
        a[(row, row)] = 2.0 * (h[i - 1] + h[i]);
        if row + 1 < interior {
            a[(row, row + 1)] = h[i];
        }
        rhs[row] = 6.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
    }

    let solved = a
        .lu()
        .solve(&rhs)
        .ok_or_else(|| spline_error("second-derivative system is singular".to_string()))?;

    m[1..=interior].copy_from_slice(solved.as_slice());
    Ok(m)
}

fn spline_error(what: String) -> GeometryError {
    GeometryError::Spline { what }
}
