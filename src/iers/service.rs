//! Built-in high-precision celestial-to-terrestrial transform
//!
//! Equinox-based chain `ITRS = W · R(GAST) · NPB · GCRS`:
//! - NPB: IAU 2006 bias-precession with abridged IAU 2000B nutation
//! - GAST: IAU 2006 GMST plus the equation of the equinoxes
//! - W: polar motion and the TIO locator s'

use chrono::{DateTime, Utc};
use glam::{DMat3, DVec3};
use std::f64::consts::TAU;
use tracing::debug;

use super::nutation::nutation;
use super::precession::{
    ARCSEC_TO_RAD, bias_precession_nutation, frame_rot_x, frame_rot_y, mean_obliquity,
};
use super::{Frame, FrameService};
use crate::core::sidereal_rotation;
use crate::eop::{EopParameters, EopTable};
use crate::error::ServiceError;
use crate::time::{gmst06, julian_centuries_tt, julian_date_utc, modified_julian_date};

/// IAU 2006/2000B frame model, optionally driven by caller-supplied EOP data.
#[derive(Debug, Clone, Default)]
pub struct IauFrameService {
    eop: Option<EopTable>,
    require_coverage: bool,
}

impl IauFrameService {
    /// Model with zero polar motion and UT1 = UTC.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `eop` for polar motion and UT1-UTC.
    pub fn with_eop(mut self, eop: EopTable) -> Self {
        self.eop = Some(eop);
        self
    }

    /// When set, instants outside the EOP table report
    /// [`ServiceError::Unavailable`] instead of assuming zero EOP.
    pub fn require_coverage(mut self, required: bool) -> Self {
        self.require_coverage = required;
        self
    }

    pub fn eop(&self) -> Option<&EopTable> {
        self.eop.as_ref()
    }

    /// EOP values applied at `t`.
    pub fn eop_at(&self, t: DateTime<Utc>) -> Result<EopParameters, ServiceError> {
        let mjd = modified_julian_date(t);
        match self.eop.as_ref().and_then(|table| table.at(mjd)) {
            Some(params) => Ok(params),
            None if self.require_coverage => Err(ServiceError::Unavailable(format!(
                "no EOP coverage for MJD {:.3}",
                mjd
            ))),
            None => {
                debug!(mjd, "no EOP sample, assuming zero polar motion and UT1 = UTC");
                Ok(EopParameters::default())
            }
        }
    }

    /// GCRS -> ITRS rotation matrix at `t`.
    pub fn celestial_to_terrestrial(&self, t: DateTime<Utc>) -> Result<DMat3, ServiceError> {
        let eop = self.eop_at(t)?;
        let t_tt = julian_centuries_tt(t);
        let jd_ut1 = julian_date_utc(t) + eop.dut1_seconds / 86400.0;

        let nut = nutation(t_tt);
        let npb = bias_precession_nutation(t_tt, nut.dpsi, nut.deps);

        let equation_of_equinoxes = nut.dpsi * mean_obliquity(t_tt).cos();
        let gast = (gmst06(jd_ut1, t_tt) + equation_of_equinoxes).rem_euclid(TAU);

        let s_prime = -47e-6 * ARCSEC_TO_RAD * t_tt;
        let polar_motion = frame_rot_x(-eop.y_arcsec * ARCSEC_TO_RAD)
            * frame_rot_y(-eop.x_arcsec * ARCSEC_TO_RAD)
            * sidereal_rotation(s_prime);

        Ok(polar_motion * sidereal_rotation(gast) * npb)
    }

    fn matrix_for(&self, from: Frame, to: Frame, t: DateTime<Utc>) -> Result<DMat3, ServiceError> {
        match (from, to) {
            (Frame::Gcrs, Frame::Itrs) => self.celestial_to_terrestrial(t),
            (Frame::Itrs, Frame::Gcrs) => Ok(self.celestial_to_terrestrial(t)?.transpose()),
            _ => Ok(DMat3::IDENTITY),
        }
    }
}

impl FrameService for IauFrameService {
    fn name(&self) -> &str {
        "iau2006-2000b"
    }

    fn transform(
        &self,
        v: DVec3,
        from: Frame,
        to: Frame,
        t: DateTime<Utc>,
    ) -> Result<DVec3, ServiceError> {
        Ok(self.matrix_for(from, to, t)? * v)
    }

    fn transform_batch(
        &self,
        points: &[DVec3],
        from: Frame,
        to: Frame,
        t: DateTime<Utc>,
    ) -> Result<Vec<DVec3>, ServiceError> {
        let m = self.matrix_for(from, to, t)?;
        Ok(points.iter().map(|p| m * *p).collect())
    }
}
