//! Circular angle arithmetic on the ecliptic.
//!
//! All functions work in degrees and do not rely on the sign convention of
//! the `%` operator: results are normalized explicitly.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_degree(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

/// Signed shortest-path difference from `b` to `a`, in (-180, 180].
///
/// Points on opposite sides of 0° register as a small difference:
/// `angular_difference(1.0, 359.0) == 2.0`.
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let d = normalize_degree(a - b);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Unsigned circular distance between two longitudes, in [0, 180].
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (normalize_degree(a) - normalize_degree(b)).abs();
    d.min(360.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_basic() {
        assert!((normalize_degree(0.0) - 0.0).abs() < 1e-15);
        assert!((normalize_degree(45.0) - 45.0).abs() < 1e-15);
        assert!((normalize_degree(360.0) - 0.0).abs() < 1e-15);
        assert!((normalize_degree(-10.0) - 350.0).abs() < 1e-12);
        assert!((normalize_degree(730.0) - 10.0).abs() < 1e-10);
        assert!((normalize_degree(-370.0) - 350.0).abs() < 1e-10);
    }

    #[test]
    fn normalize_tiny_negative_stays_below_360() {
        let r = normalize_degree(-1e-18);
        assert!((0.0..360.0).contains(&r), "got {r}");
    }

    #[test]
    fn difference_wraps() {
        assert!((angular_difference(1.0, 359.0) - 2.0).abs() < 1e-12);
        assert!((angular_difference(359.0, 1.0) + 2.0).abs() < 1e-12);
        assert!((angular_difference(90.0, 0.0) - 90.0).abs() < 1e-12);
        assert!((angular_difference(0.0, 90.0) + 90.0).abs() < 1e-12);
    }

    #[test]
    fn difference_half_turn_is_positive_180() {
        assert!((angular_difference(180.0, 0.0) - 180.0).abs() < 1e-12);
        assert!((angular_difference(0.0, 180.0) - 180.0).abs() < 1e-12);
    }

    #[test]
    fn difference_accepts_unnormalized() {
        assert!((angular_difference(725.0, -5.0) - 10.0).abs() < 1e-10);
    }

    #[test]
    fn distance_basic() {
        assert!((circular_distance(359.0, 1.0) - 2.0).abs() < 1e-12);
        assert!((circular_distance(10.0, 190.0) - 180.0).abs() < 1e-12);
        assert!((circular_distance(100.0, 100.0)).abs() < 1e-12);
    }
}
