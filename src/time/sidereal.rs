//! Sidereal time and the Earth rotation angle

use chrono::{DateTime, Utc};
use std::f64::consts::TAU;

use super::julian::{J2000_JD, julian_date_utc};

const SECONDS_PER_DAY: f64 = 86400.0;
const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / (180.0 * 3600.0);

/// Source of Julian dates and Greenwich sidereal time for the
/// reduced-precision rotation.
///
/// Implementations must be deterministic for a given UTC instant.
pub trait SiderealClock: Send + Sync {
    /// Julian date used as the argument of [`Self::greenwich_sidereal_time`].
    fn julian_date(&self, t: DateTime<Utc>) -> f64;

    /// Greenwich sidereal time in radians, normalized to `[0, 2π)`.
    fn greenwich_sidereal_time(&self, jd: f64) -> f64;

    fn sidereal_angle(&self, t: DateTime<Utc>) -> f64 {
        self.greenwich_sidereal_time(self.julian_date(t))
    }
}

/// IAU 1982 mean sidereal time with an optional fixed DUT1 (UT1-UTC) offset.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeanSiderealClock {
    pub dut1_seconds: f64,
}

impl MeanSiderealClock {
    pub fn new(dut1_seconds: f64) -> Self {
        Self { dut1_seconds }
    }
}

impl SiderealClock for MeanSiderealClock {
    fn julian_date(&self, t: DateTime<Utc>) -> f64 {
        julian_date_utc(t) + self.dut1_seconds / SECONDS_PER_DAY
    }

    fn greenwich_sidereal_time(&self, jd: f64) -> f64 {
        gmst82_from_jd(jd)
    }
}

/// Greenwich Mean Sidereal Time (radians) from a UT1 Julian date, IAU 1982 polynomial.
pub fn gmst82_from_jd(jd_ut1: f64) -> f64 {
    let t_cent = (jd_ut1 - J2000_JD) / 36525.0; // Julian centuries from J2000.0

    // GMST in seconds (IAU 1982 with update terms). See Vallado and IERS Conventions.
    let gmst_sec =
        67310.54841 + (876600.0 * 3600.0 + 8640184.812866) * t_cent + 0.093104 * t_cent * t_cent
            - 6.2e-6 * t_cent * t_cent * t_cent;

    // Normalize to [0, 86400)
    let s = gmst_sec.rem_euclid(SECONDS_PER_DAY);
    s * (TAU / SECONDS_PER_DAY)
}

/// Greenwich Mean Sidereal Time (radians) for a UTC instant.
/// Assumes UT1 ~= UTC.
pub fn gmst_rad(t: DateTime<Utc>) -> f64 {
    gmst82_from_jd(julian_date_utc(t))
}

/// Greenwich Mean Sidereal Time (radians) allowing explicit DUT1 (UT1-UTC) seconds.
/// If `dut1_seconds` is 0, this is equivalent to `gmst_rad`.
pub fn gmst_rad_with_dut1(t: DateTime<Utc>, dut1_seconds: f64) -> f64 {
    gmst82_from_jd(julian_date_utc(t) + dut1_seconds / SECONDS_PER_DAY)
}

/// Earth rotation angle (IAU 2000) in radians for a UT1 Julian date.
pub fn earth_rotation_angle(jd_ut1: f64) -> f64 {
    let du = jd_ut1 - J2000_JD;
    let turns = du.rem_euclid(1.0) + 0.7790572732640 + 0.00273781191135448 * du;
    (TAU * turns).rem_euclid(TAU)
}

/// Greenwich Mean Sidereal Time (IAU 2006) in radians.
///
/// `t_tt` is Julian centuries of TT since J2000.0.
pub fn gmst06(jd_ut1: f64, t_tt: f64) -> f64 {
    let t = t_tt;
    let poly = 0.014506
        + (4612.156534
            + (1.3915817 + (-0.00000044 + (-0.000029956 + (-0.0000000368) * t) * t) * t) * t)
            * t;
    (earth_rotation_angle(jd_ut1) + poly * ARCSEC_TO_RAD).rem_euclid(TAU)
}
