//! ECI <-> ECEF transforms
//!
//! [`FrameTransformer`] owns the strategy choice. The free functions below
//! build a default transformer per call and are the simplest entry points.

pub mod dispatcher;

pub use dispatcher::{FrameTransformer, Strategy};

use chrono::{DateTime, Utc};

use crate::core::Cartesian;
use crate::error::FrameResult;

/// ECI -> ECEF using the best available strategy.
pub fn eci_to_ecef(eci: &Cartesian, t: DateTime<Utc>) -> FrameResult<Cartesian> {
    FrameTransformer::new().eci_to_ecef(eci, t)
}

/// ECEF -> ECI using the best available strategy.
pub fn ecef_to_eci(ecef: &Cartesian, t: DateTime<Utc>) -> FrameResult<Cartesian> {
    FrameTransformer::new().ecef_to_eci(ecef, t)
}

/// ECI -> ECEF by rotation through Greenwich mean sidereal time.
pub fn eci_to_ecef_reduced_precision(eci: &Cartesian, t: DateTime<Utc>) -> FrameResult<Cartesian> {
    FrameTransformer::reduced_only().eci_to_ecef_reduced_precision(eci, t)
}

/// ECEF -> ECI by rotation through Greenwich mean sidereal time.
pub fn ecef_to_eci_reduced_precision(
    ecef: &Cartesian,
    t: DateTime<Utc>,
) -> FrameResult<Cartesian> {
    FrameTransformer::reduced_only().ecef_to_eci_reduced_precision(ecef, t)
}
