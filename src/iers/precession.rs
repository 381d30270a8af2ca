//! IAU 2006 frame bias and precession (Fukushima-Williams angles)

use glam::{DMat3, DVec3};

use crate::core::sidereal_rotation;

pub(crate) const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Fukushima-Williams angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FwAngles {
    pub gamb: f64,
    pub phib: f64,
    pub psib: f64,
    pub epsa: f64,
}

/// F-W angles for `t` Julian centuries of TT since J2000.0 (Hilton et al. 2006).
pub fn fukushima_williams(t: f64) -> FwAngles {
    let gamb = (-0.052928
        + (10.556378
            + (0.4932044 + (-0.00031238 + (-0.000002788 + (0.0000000260) * t) * t) * t) * t)
            * t)
        * ARCSEC_TO_RAD;

    let phib = (84381.412819
        + (-46.811016
            + (0.0511268 + (0.00053289 + (-0.000000440 + (-0.0000000176) * t) * t) * t) * t)
            * t)
        * ARCSEC_TO_RAD;

    let psib = (-0.041775
        + (5038.481484
            + (1.5584175 + (-0.00018522 + (-0.000026452 + (-0.0000000148) * t) * t) * t) * t)
            * t)
        * ARCSEC_TO_RAD;

    FwAngles {
        gamb,
        phib,
        psib,
        epsa: mean_obliquity(t),
    }
}

/// IAU 2006 mean obliquity of the ecliptic (radians).
pub fn mean_obliquity(t: f64) -> f64 {
    (84381.406
        + (-46.836769
            + (-0.0001831 + (0.00200340 + (-0.000000576 + (-0.0000000434) * t) * t) * t) * t)
            * t)
        * ARCSEC_TO_RAD
}

/// GCRS -> true equator and equinox of date, given nutation `dpsi`, `deps` (radians).
///
/// `Rx(-(εA+Δε)) · Rz(-(ψ̄+Δψ)) · Rx(φ̄) · Rz(γ̄)`
pub fn bias_precession_nutation(t: f64, dpsi: f64, deps: f64) -> DMat3 {
    let fw = fukushima_williams(t);
    frame_rot_x(-(fw.epsa + deps))
        * sidereal_rotation(-(fw.psib + dpsi))
        * frame_rot_x(fw.phib)
        * sidereal_rotation(fw.gamb)
}

/// Frame rotation about +X: rows `[1,0,0]`, `[0,c,s]`, `[0,-s,c]`.
pub(crate) fn frame_rot_x(phi: f64) -> DMat3 {
    let (s, c) = phi.sin_cos();
    DMat3::from_cols(
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.0, c, -s),
        DVec3::new(0.0, s, c),
    )
}

/// Frame rotation about +Y: rows `[c,0,-s]`, `[0,1,0]`, `[s,0,c]`.
pub(crate) fn frame_rot_y(theta: f64) -> DMat3 {
    let (s, c) = theta.sin_cos();
    DMat3::from_cols(
        DVec3::new(c, 0.0, s),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::new(-s, 0.0, c),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fw_angles_at_j2000() {
        let fw = fukushima_williams(0.0);
        assert!((fw.gamb - -2.5660218513765524e-07).abs() < 1e-18);
        assert!((fw.phib - 0.4090926336600278).abs() < 1e-15);
        assert!((fw.psib - -2.0253091528350866e-07).abs() < 1e-18);
        assert!((fw.epsa - 0.4090926006005829).abs() < 1e-15);
    }

    #[test]
    fn test_precession_rate_in_longitude() {
        // ~5038 arcsec per century
        let fw = fukushima_williams(1.0);
        let rate = fw.psib / ARCSEC_TO_RAD;
        assert!((rate - 5040.0).abs() < 5.0, "psib = {} arcsec", rate);
    }

    #[test]
    fn test_bias_matrix_is_near_identity() {
        let b = bias_precession_nutation(0.0, 0.0, 0.0);
        // frame bias is tens of milliarcseconds
        assert!(b.abs_diff_eq(DMat3::IDENTITY, 1e-6));
        assert!(!b.abs_diff_eq(DMat3::IDENTITY, 1e-9));
    }

    #[test]
    fn test_npb_is_orthogonal() {
        let m = bias_precession_nutation(0.2061738884401961, -7.84e-5, 3.56e-6);
        assert!((m * m.transpose()).abs_diff_eq(DMat3::IDENTITY, 1e-14));
        assert!((m.determinant() - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_frame_rotations_turn_axes() {
        let half_pi = std::f64::consts::FRAC_PI_2;
        assert!((frame_rot_x(half_pi) * DVec3::Y - -DVec3::Z).length() < 1e-15);
        assert!((frame_rot_y(half_pi) * DVec3::Z - -DVec3::X).length() < 1e-15);
    }
}
