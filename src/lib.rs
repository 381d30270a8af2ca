//! Conversion between Earth-centered inertial (ECI) and Earth-centered,
//! Earth-fixed (ECEF) Cartesian positions.
//!
//! Two strategies are available. The high-precision path goes through a
//! [`iers::FrameService`] (the built-in IAU 2006/2000B model by default) and
//! accounts for precession, nutation and polar motion. The reduced-precision
//! path is a single rotation about the polar axis by Greenwich mean sidereal
//! time.
//!
//! ```no_run
//! use chrono::Utc;
//! use earthframes::{Cartesian, FrameTransformer};
//!
//! let ft = FrameTransformer::new();
//! let ecef = Cartesian::scalar(-3_880_000.0, 3_970_000.0, 3_510_000.0);
//! let eci = ft.ecef_to_eci(&ecef, Utc::now())?;
//! # Ok::<(), earthframes::FrameError>(())
//! ```

pub mod config;
pub mod core;
pub mod eop;
pub mod error;
pub mod iers;
pub mod time;
pub mod transform;

pub use crate::config::{EopConfig, FrameConfig, StrategyPreference};
pub use crate::core::{Cartesian, geodetic_to_ecef};
pub use crate::error::{FrameError, FrameResult, ServiceError};
pub use crate::iers::{Frame, FrameService};
pub use crate::transform::{
    FrameTransformer, Strategy, ecef_to_eci, ecef_to_eci_reduced_precision, eci_to_ecef,
    eci_to_ecef_reduced_precision,
};
