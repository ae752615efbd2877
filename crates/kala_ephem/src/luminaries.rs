//! Low-precision Sun, Moon and lunar node longitudes.
//!
//! Sun and Moon: the low-precision series of the *Astronomical Almanac*
//! (Section C for the Sun, ~0.01 deg; Section D for the Moon, ~0.3 deg).
//! Mean node: polynomial from Meeus, *Astronomical Algorithms* 2nd ed.,
//! Chapter 47. All longitudes are referred to the mean equinox of date.

use kala_core::normalize_degree;

/// Apparent geocentric ecliptic longitude of the Sun in degrees [0, 360).
///
/// `days` = days since J2000.0.
pub fn sun_longitude_deg(days: f64) -> f64 {
    let mean_lon = 280.460 + 0.985_647_4 * days;
    let g = (357.528 + 0.985_600_3 * days).to_radians();
    normalize_degree(mean_lon + 1.915 * g.sin() + 0.020 * (2.0 * g).sin())
}

/// Geocentric ecliptic longitude of the Moon in degrees [0, 360).
///
/// `t` = Julian centuries since J2000.0.
pub fn moon_longitude_deg(t: f64) -> f64 {
    // [amplitude_deg, phase_deg, rate_deg_per_century]
    #[rustfmt::skip]
    static TERMS: [[f64; 3]; 6] = [
        [ 6.29, 135.0,  477_198.87],
        [-1.27, 259.3, -413_335.36],
        [ 0.66, 235.7,  890_534.22],
        [ 0.21, 269.9,  954_397.74],
        [-0.19, 357.5,   35_999.05],
        [-0.11, 186.5,  966_404.03],
    ];

    let periodic: f64 = TERMS
        .iter()
        .map(|[amp, phase, rate]| amp * (phase + rate * t).to_radians().sin())
        .sum();
    normalize_degree(218.32 + 481_267.881 * t + periodic)
}

/// Mean ascending node of the lunar orbit in degrees [0, 360).
///
/// `t` = Julian centuries since J2000.0.
pub fn mean_north_node_deg(t: f64) -> f64 {
    let omega = 125.044_52 - 1_934.136_261 * t + 0.002_070_8 * t * t + t * t * t / 450_000.0;
    normalize_degree(omega)
}

/// Mean descending node, always opposite the ascending node.
pub fn mean_south_node_deg(t: f64) -> f64 {
    normalize_degree(mean_north_node_deg(t) + 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sun_at_j2000() {
        // Almanac value for 2000-01-01 12h: ~280.37 deg.
        let lon = sun_longitude_deg(0.0);
        assert!((lon - 280.37).abs() < 0.05, "got {lon}");
    }

    #[test]
    fn sun_near_march_equinox_2024() {
        // 2024-03-20 03:06 UTC equinox is 8844.63 days after J2000.
        let lon = sun_longitude_deg(8_844.63);
        let off = lon.min(360.0 - lon);
        assert!(off < 0.05, "got {lon}");
    }

    #[test]
    fn moon_at_j2000() {
        // Meeus-class ephemerides give ~223.3 deg for 2000-01-01 12h.
        let lon = moon_longitude_deg(0.0);
        assert!((lon - 223.3).abs() < 0.5, "got {lon}");
    }

    #[test]
    fn node_at_j2000() {
        assert!((mean_north_node_deg(0.0) - 125.044_52).abs() < 1e-9);
    }

    #[test]
    fn node_regresses() {
        // ~19.34 deg per year westward.
        let a = mean_north_node_deg(0.0);
        let b = mean_north_node_deg(0.01);
        let delta = kala_core::angular_difference(b, a);
        assert!((delta + 19.34).abs() < 0.01, "got {delta}");
    }

    #[test]
    fn south_node_opposite() {
        for t in [-1.0, 0.0, 0.26] {
            let d = kala_core::circular_distance(mean_north_node_deg(t), mean_south_node_deg(t));
            assert!((d - 180.0).abs() < 1e-9);
        }
    }
}
