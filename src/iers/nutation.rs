//! Abridged lunisolar nutation
//!
//! The largest terms of the IAU 2000B series plus its fixed planetary
//! offsets. Truncation error is a few milliarcseconds, well below the
//! precession and nutation the reduced-precision path leaves out.

use super::precession::ARCSEC_TO_RAD;
use std::f64::consts::TAU;

const CIRCULAR_ARCSECONDS: f64 = 1296000.0;
// Series amplitudes are in units of 0.1 microarcsecond
const UNIT_TO_RAD: f64 = 1e-7 * ARCSEC_TO_RAD;
const PLANETARY_BIAS_LONGITUDE: f64 = -0.135e-3 * ARCSEC_TO_RAD;
const PLANETARY_BIAS_OBLIQUITY: f64 = 0.388e-3 * ARCSEC_TO_RAD;

// Multipliers of (l, l', F, D, Ω), then longitude sin, sin·t, cos and
// obliquity cos, cos·t, sin coefficients.
#[rustfmt::skip]
const LUNISOLAR_TERMS: [(i8, i8, i8, i8, i8, f64, f64, f64, f64, f64, f64); 15] = [
    ( 0,  0,  0,  0, 1, -172064161.0, -174666.0,  33386.0, 92052331.0,  9086.0, 15377.0),
    ( 0,  0,  2, -2, 2,  -13170906.0,   -1675.0, -13696.0,  5730336.0, -3015.0, -4587.0),
    ( 0,  0,  2,  0, 2,   -2276413.0,    -234.0,   2796.0,   978459.0,  -485.0,  1374.0),
    ( 0,  0,  0,  0, 2,    2074554.0,     207.0,   -698.0,  -897492.0,   470.0,  -291.0),
    ( 0,  1,  0,  0, 0,    1475877.0,   -3633.0,  11817.0,    73871.0,  -184.0, -1924.0),
    ( 0,  1,  2, -2, 2,    -516821.0,    1226.0,   -524.0,   224386.0,  -677.0,  -174.0),
    ( 1,  0,  0,  0, 0,     711159.0,      73.0,   -872.0,    -6750.0,     0.0,   358.0),
    ( 0,  0,  2,  0, 1,    -387298.0,    -367.0,    380.0,   200728.0,    18.0,   318.0),
    ( 1,  0,  2,  0, 2,    -301461.0,     -36.0,    816.0,   129025.0,   -63.0,   367.0),
    ( 0, -1,  2, -2, 2,     215829.0,    -494.0,    111.0,   -95929.0,   299.0,   132.0),
    ( 0,  0,  2, -2, 1,     128227.0,     137.0,    181.0,   -68982.0,    -9.0,    39.0),
    (-1,  0,  2,  0, 2,     123457.0,      11.0,     19.0,   -53311.0,    32.0,    -4.0),
    (-1,  0,  0,  2, 0,     156994.0,      10.0,   -168.0,    -1235.0,     0.0,    82.0),
    ( 1,  0,  0,  0, 1,      63110.0,      63.0,     27.0,   -33228.0,     0.0,    -9.0),
    (-1,  0,  0,  0, 1,     -57976.0,     -63.0,   -189.0,    31429.0,     0.0,   -75.0),
];

/// Nutation in longitude and obliquity, radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nutation {
    pub dpsi: f64,
    pub deps: f64,
}

/// Nutation for `t` Julian centuries of TT since J2000.0.
pub fn nutation(t: f64) -> Nutation {
    let delaunay = |a0: f64, a1: f64| (a0 + a1 * t).rem_euclid(CIRCULAR_ARCSECONDS) * ARCSEC_TO_RAD;
    // Moon mean anomaly, Sun mean anomaly, Moon argument of latitude,
    // Moon elongation, Moon ascending node
    let el = delaunay(485868.249036, 1717915923.2178);
    let elp = delaunay(1287104.79305, 129596581.0481);
    let f = delaunay(335779.526232, 1739527262.8478);
    let d = delaunay(1072260.70369, 1602961601.2090);
    let om = delaunay(450160.398036, -6962890.5431);

    let mut dpsi = 0.0;
    let mut deps = 0.0;

    // smallest terms first
    for &(nl, nlp, nf, nd, nom, sp, spt, cp, ce, cet, se) in LUNISOLAR_TERMS.iter().rev() {
        let arg = (nl as f64 * el
            + nlp as f64 * elp
            + nf as f64 * f
            + nd as f64 * d
            + nom as f64 * om)
            .rem_euclid(TAU);
        let (sarg, carg) = arg.sin_cos();

        dpsi += (sp + spt * t) * sarg + cp * carg;
        deps += (ce + cet * t) * carg + se * sarg;
    }

    Nutation {
        dpsi: dpsi * UNIT_TO_RAD + PLANETARY_BIAS_LONGITUDE,
        deps: deps * UNIT_TO_RAD + PLANETARY_BIAS_OBLIQUITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nutation_reference_epoch() {
        let n = nutation(0.2061738884401961);
        assert!((n.dpsi - -7.842975312643518e-05).abs() < 2e-9, "dpsi = {}", n.dpsi);
        assert!((n.deps - 3.5560903601708147e-06).abs() < 3e-9, "deps = {}", n.deps);
    }

    #[test]
    fn test_nutation_amplitude_bounds() {
        // |Δψ| stays below ~19.5" and |Δε| below ~10.5"
        for i in 0..200 {
            let t = -0.5 + i as f64 * 0.005;
            let n = nutation(t);
            assert!(n.dpsi.abs() < 19.5 * ARCSEC_TO_RAD, "t = {}", t);
            assert!(n.deps.abs() < 10.5 * ARCSEC_TO_RAD, "t = {}", t);
        }
    }
}
