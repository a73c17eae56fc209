use crate::NzError;

/// Floating point type used throughout system
pub type Real = f64;

/// |a - b| / |b|, or |a - b| when `b` is zero.
pub fn relative_error(a: Real, b: Real) -> Real {
    let diff = (a - b).abs();
    if b == 0.0 { diff } else { diff / b.abs() }
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, NzError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(NzError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, NzError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(NzError::InvalidArg { what })
    }
}

/// `n` uniformly spaced points from `start` to `end`.
///
/// The last point is pinned to `end` so callers can rely on an exact endpoint.
pub fn linspace(start: Real, end: Real, n: usize) -> Vec<Real> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (end - start) / (n - 1) as Real;
            let mut points: Vec<Real> = (0..n).map(|i| start + i as Real * delta).collect();
            points[n - 1] = end;
            points
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn linspace_is_increasing_with_exact_ends(
            start in -10.0_f64..10.0,
            span in 1e-3_f64..100.0,
            n in 2_usize..2000,
        ) {
            let end = start + span;
            let pts = linspace(start, end, n);
            prop_assert_eq!(pts.len(), n);
            prop_assert_eq!(pts[0], start);
            prop_assert_eq!(pts[n - 1], end);
            prop_assert!(pts.windows(2).all(|w| w[1] > w[0]));
        }
    }
}
