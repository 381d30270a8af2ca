//! Sidereal rotation about the polar axis
//!
//! `R(θ)` rotates an inertial vector into the frame that has turned by θ
//! about +Z; its transpose undoes that rotation.

use glam::{DMat3, DVec3};

use super::cartesian::Cartesian;
use crate::error::{FrameError, FrameResult};

/// Rotation matrix for a sidereal angle (radians).
///
/// Rows are `[cos θ, sin θ, 0]`, `[-sin θ, cos θ, 0]`, `[0, 0, 1]`.
pub fn sidereal_rotation(theta: f64) -> DMat3 {
    let (s, c) = theta.sin_cos();
    // glam is column-major
    DMat3::from_cols(
        DVec3::new(c, -s, 0.0),
        DVec3::new(s, c, 0.0),
        DVec3::new(0.0, 0.0, 1.0),
    )
}

/// Rotate ECI -> ECEF by `R(θ)`
pub fn eci_to_ecef_vec(eci: DVec3, theta: f64) -> DVec3 {
    sidereal_rotation(theta) * eci
}

/// Rotate ECEF -> ECI by `R(θ)ᵀ`
pub fn ecef_to_eci_vec(ecef: DVec3, theta: f64) -> DVec3 {
    sidereal_rotation(theta).transpose() * ecef
}

/// Rotate every ECI position into ECEF.
///
/// `angles` holds either one sidereal angle shared by all positions, or one
/// angle per position in row-major order.
pub fn rotate_eci_to_ecef(positions: &Cartesian, angles: &[f64]) -> FrameResult<Cartesian> {
    rotate_each(positions, angles, |m| m)
}

/// Rotate every ECEF position into ECI. Same broadcast rule as
/// [`rotate_eci_to_ecef`].
pub fn rotate_ecef_to_eci(positions: &Cartesian, angles: &[f64]) -> FrameResult<Cartesian> {
    rotate_each(positions, angles, |m| m.transpose())
}

/// Verify that `angles` can be broadcast over `points` positions.
pub fn check_angle_count(points: usize, angles: usize) -> FrameResult<()> {
    if angles == 1 || (angles == points && angles > 0) {
        Ok(())
    } else {
        Err(FrameError::AngleCountMismatch { points, angles })
    }
}

fn rotate_each(
    positions: &Cartesian,
    angles: &[f64],
    orient: impl Fn(DMat3) -> DMat3,
) -> FrameResult<Cartesian> {
    check_angle_count(positions.len(), angles.len())?;

    let points = positions.points();
    let rotated: Vec<DVec3> = if let [theta] = angles {
        let m = orient(sidereal_rotation(*theta));
        points.iter().map(|p| m * *p).collect()
    } else {
        points
            .iter()
            .zip(angles)
            .map(|(p, theta)| orient(sidereal_rotation(*theta)) * *p)
            .collect()
    };

    Ok(positions.with_points(&rotated))
}
