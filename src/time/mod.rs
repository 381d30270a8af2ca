//! Time scales and sidereal time
//!
//! Julian dates, leap seconds, and the sidereal angles used to rotate
//! between inertial and Earth-fixed frames.

pub mod julian;
pub mod sidereal;

pub use julian::{
    J2000_JD, MJD_OFFSET, julian_centuries_tt, julian_date_tt, julian_date_utc,
    modified_julian_date, tai_minus_utc, tai_minus_utc_mjd,
};
pub use sidereal::{
    MeanSiderealClock, SiderealClock, earth_rotation_angle, gmst_rad, gmst_rad_with_dut1, gmst06,
    gmst82_from_jd,
};
