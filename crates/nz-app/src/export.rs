//! CSV export.

use nz_geometry::NozzleContour;

/// Sampled wall as CSV text, one row per sample.
///
/// Columns are `x_m,r_upper_m`, plus `r_lower_m` when `include_lower` is set.
pub fn contour_csv(contour: &NozzleContour, include_lower: bool) -> String {
    let mut csv = if include_lower {
        String::from("x_m,r_upper_m,r_lower_m\n")
    } else {
        String::from("x_m,r_upper_m\n")
    };

    if include_lower {
        for (upper, lower) in contour.points().iter().zip(contour.lower_wall()) {
            csv.push_str(&format!("{},{},{}\n", upper.x, upper.r, lower.r));
        }
    } else {
        for p in contour.points() {
            csv.push_str(&format!("{},{}\n", p.x, p.r));
        }
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use nz_core::units::m;

    #[test]
    fn upper_wall_only() {
        let contour = nz_geometry::generate(4.0, m(0.1), 3).unwrap();
        let csv = contour_csv(&contour, false);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "x_m,r_upper_m");
        assert_eq!(lines[3], format!("{},{}", 1.6 * 0.1, 0.1 * 2.0));
    }

    #[test]
    fn lower_wall_is_negated() {
        let contour = nz_geometry::generate(4.0, m(0.1), 10).unwrap();
        let csv = contour_csv(&contour, true);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("x_m,r_upper_m,r_lower_m"));
        for line in lines {
            let cols: Vec<f64> = line.split(',').map(|c| c.parse().unwrap()).collect();
            assert_eq!(cols.len(), 3);
            assert_eq!(cols[2], -cols[1]);
        }
    }

    #[test]
    fn lower_column_matches_lower_wall() {
        let contour = nz_geometry::generate(6.0, m(0.05), 16).unwrap();
        let csv = contour_csv(&contour, true);
        let lower = contour.lower_wall();
        for (line, wall) in csv.lines().skip(1).zip(&lower) {
            let cols: Vec<f64> = line.split(',').map(|c| c.parse().unwrap()).collect();
            assert_eq!(cols[0], wall.x);
            assert_eq!(cols[2], wall.r);
        }
        assert_eq!(csv.lines().count(), lower.len() + 1);
    }
}
