//! High-precision frame transformation
//!
//! [`FrameService`] is the seam for any engine that can move a Cartesian
//! vector between the inertial (GCRS) and Earth-fixed (ITRS) frames with
//! precession, nutation and polar motion applied. The crate ships one
//! implementation, [`IauFrameService`], behind the `high-precision` feature.

use chrono::{DateTime, Utc};
use glam::DVec3;

use crate::error::ServiceError;

#[cfg(feature = "high-precision")]
pub mod nutation;
#[cfg(feature = "high-precision")]
pub mod precession;
#[cfg(feature = "high-precision")]
pub mod service;

#[cfg(feature = "high-precision")]
pub use service::IauFrameService;

/// Frame tags understood by a [`FrameService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frame {
    /// Geocentric celestial (inertial) frame
    Gcrs,
    /// International terrestrial (Earth-fixed) frame
    Itrs,
}

/// A high-precision frame transformation capability.
///
/// Implementations must be safe to call from several threads at once.
pub trait FrameService: Send + Sync {
    fn name(&self) -> &str;

    /// Re-express `v` (meters) given in `from` in the `to` frame at `t`.
    fn transform(
        &self,
        v: DVec3,
        from: Frame,
        to: Frame,
        t: DateTime<Utc>,
    ) -> Result<DVec3, ServiceError>;

    /// Transform many vectors sharing one instant.
    fn transform_batch(
        &self,
        points: &[DVec3],
        from: Frame,
        to: Frame,
        t: DateTime<Utc>,
    ) -> Result<Vec<DVec3>, ServiceError> {
        points
            .iter()
            .map(|p| self.transform(*p, from, to, t))
            .collect()
    }
}

/// Whether the built-in high-precision model was compiled in.
pub const fn built_in_available() -> bool {
    cfg!(feature = "high-precision")
}

/// The built-in service, when compiled in.
pub fn built_in_service() -> Option<Box<dyn FrameService>> {
    #[cfg(feature = "high-precision")]
    {
        Some(Box::new(IauFrameService::new()))
    }
    #[cfg(not(feature = "high-precision"))]
    {
        None
    }
}
