//! Geocentric planetary longitudes from mean Keplerian elements.
//!
//! Elements and secular rates are the JPL "approximate positions of the
//! planets" set (E. M. Standish), valid 1800 AD to 2050 AD, referred to the
//! mean ecliptic and equinox of J2000. The heliocentric position of each
//! planet and of the Earth-Moon barycenter is solved from Kepler's equation,
//! differenced to geocentric, and the longitude is precessed to the equinox
//! of date. Typical error is well under a degree for the outer planets and a
//! few tenths of a degree for the inner ones.

use kala_core::normalize_degree;

/// General precession in longitude, degrees per Julian century.
const PRECESSION_DEG_PER_CENTURY: f64 = 1.396_971;

/// Kepler solver stops once the eccentric-anomaly update drops below this.
const KEPLER_TOLERANCE_RAD: f64 = 1e-12;

/// Kepler solver iteration cap.
const KEPLER_MAX_ITER: u32 = 30;

/// Planets whose geocentric longitude can be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Planet {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// Every planet in order of distance from the Sun.
pub const ALL_PLANETS: [Planet; 8] = [
    Planet::Mercury,
    Planet::Venus,
    Planet::Mars,
    Planet::Jupiter,
    Planet::Saturn,
    Planet::Uranus,
    Planet::Neptune,
    Planet::Pluto,
];

/// Mean elements at J2000 plus rates per Julian century.
///
/// Order: `[a, a_dot, e, e_dot, i, i_dot, L, L_dot, varpi, varpi_dot, node, node_dot]`
/// with `a` in AU and all angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MeanElements([f64; 12]);

/// Earth-Moon barycenter, the observer for geocentric positions.
#[rustfmt::skip]
const EARTH_MOON_BARYCENTER: MeanElements = MeanElements([
    1.000_002_61, 0.000_005_62, 0.016_711_23, -0.000_043_92,
    -0.000_015_31, -0.012_946_68, 100.464_571_66, 35_999.372_449_81,
    102.937_681_93, 0.323_273_64, 0.0, 0.0,
]);

#[rustfmt::skip]
fn elements(planet: Planet) -> MeanElements {
    MeanElements(match planet {
        Planet::Mercury => [
            0.387_099_27, 0.000_000_37, 0.205_635_93, 0.000_019_06,
            7.004_979_02, -0.005_947_49, 252.250_323_50, 149_472.674_111_75,
            77.457_796_28, 0.160_476_89, 48.330_765_93, -0.125_340_81,
        ],
        Planet::Venus => [
            0.723_335_66, 0.000_003_90, 0.006_776_72, -0.000_041_07,
            3.394_676_05, -0.000_788_90, 181.979_099_50, 58_517.815_387_29,
            131.602_467_18, 0.002_683_29, 76.679_842_55, -0.277_694_18,
        ],
        Planet::Mars => [
            1.523_710_34, 0.000_018_47, 0.093_394_10, 0.000_078_82,
            1.849_691_42, -0.008_131_31, -4.553_432_05, 19_140.302_684_99,
            -23.943_629_59, 0.444_410_88, 49.559_538_91, -0.292_573_43,
        ],
        Planet::Jupiter => [
            5.202_887_00, -0.000_116_07, 0.048_386_24, -0.000_132_53,
            1.304_396_95, -0.001_837_14, 34.396_440_51, 3_034.746_127_75,
            14.728_479_83, 0.212_526_68, 100.473_909_09, 0.204_691_06,
        ],
        Planet::Saturn => [
            9.536_675_94, -0.001_250_60, 0.053_861_79, -0.000_509_91,
            2.485_991_87, 0.001_936_09, 49.954_244_23, 1_222.493_622_01,
            92.598_878_31, -0.418_972_16, 113.662_424_48, -0.288_677_94,
        ],
        Planet::Uranus => [
            19.189_164_64, -0.001_961_76, 0.047_257_44, -0.000_043_97,
            0.772_637_83, -0.002_429_39, 313.238_104_51, 428.482_027_85,
            170.954_276_30, 0.408_052_81, 74.016_925_03, 0.042_405_89,
        ],
        Planet::Neptune => [
            30.069_922_76, 0.000_262_91, 0.008_590_48, 0.000_051_05,
            1.770_043_47, 0.000_353_72, -55.120_029_69, 218.459_453_25,
            44.964_762_27, -0.322_414_64, 131.784_225_74, -0.005_086_64,
        ],
        Planet::Pluto => [
            39.482_116_75, -0.000_315_96, 0.248_827_30, 0.000_051_70,
            17.140_012_06, 0.000_048_18, 238.929_038_33, 145.207_805_15,
            224.068_916_29, -0.040_629_42, 110.303_936_84, -0.011_834_82,
        ],
    })
}

/// Solve Kepler's equation `E - e sin E = M` by Newton iteration.
///
/// `mean_anomaly` in radians; returns the eccentric anomaly in radians.
pub(crate) fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ecc = mean_anomaly + e * mean_anomaly.sin();
    for _ in 0..KEPLER_MAX_ITER {
        let delta = (ecc - e * ecc.sin() - mean_anomaly) / (1.0 - e * ecc.cos());
        ecc -= delta;
        if delta.abs() < KEPLER_TOLERANCE_RAD {
            break;
        }
    }
    ecc
}

/// Heliocentric ecliptic (J2000) x, y in AU.
fn heliocentric_xy(elements: MeanElements, t: f64) -> (f64, f64) {
    let MeanElements(el) = elements;
    let a = el[0] + el[1] * t;
    let e = el[2] + el[3] * t;
    let incl = (el[4] + el[5] * t).to_radians();
    let mean_lon = el[6] + el[7] * t;
    let varpi = el[8] + el[9] * t;
    let node = el[10] + el[11] * t;

    let arg_peri = (varpi - node).to_radians();
    // Mean anomaly reduced to [-180, 180) before solving.
    let mean_anomaly = (normalize_degree(mean_lon - varpi + 180.0) - 180.0).to_radians();
    let ecc = solve_kepler(mean_anomaly, e);

    let x_orb = a * (ecc.cos() - e);
    let y_orb = a * (1.0 - e * e).sqrt() * ecc.sin();

    let (sw, cw) = arg_peri.sin_cos();
    let (so, co) = node.to_radians().sin_cos();
    let ci = incl.cos();

    let x = (cw * co - sw * so * ci) * x_orb + (-sw * co - cw * so * ci) * y_orb;
    let y = (cw * so + sw * co * ci) * x_orb + (-sw * so + cw * co * ci) * y_orb;
    (x, y)
}

/// Geocentric ecliptic longitude of a planet in degrees [0, 360), equinox of date.
///
/// `t` = Julian centuries since J2000.0.
pub fn geocentric_longitude_deg(planet: Planet, t: f64) -> f64 {
    let (px, py) = heliocentric_xy(elements(planet), t);
    let (ex, ey) = heliocentric_xy(EARTH_MOON_BARYCENTER, t);
    let lon_j2000 = (py - ey).atan2(px - ex).to_degrees();
    normalize_degree(lon_j2000 + PRECESSION_DEG_PER_CENTURY * t)
}
