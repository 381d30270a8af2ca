//! Strategy selection for ECI <-> ECEF transforms

use chrono::{DateTime, Utc};
use glam::DVec3;
use tracing::{debug, warn};

use crate::config::{FrameConfig, StrategyPreference};
use crate::core::{Cartesian, rotate_ecef_to_eci, rotate_eci_to_ecef};
use crate::eop::{EopCache, EopTable, load_configured};
use crate::error::{FrameError, FrameResult, ServiceError};
use crate::iers::{Frame, FrameService, built_in_service};
use crate::time::{MeanSiderealClock, SiderealClock};

/// The algorithm a transform runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Delegated to a [`FrameService`]
    HighPrecision,
    /// Single rotation by Greenwich sidereal time
    ReducedPrecision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    EciToEcef,
    EcefToEci,
}

impl Direction {
    fn frames(self) -> (Frame, Frame) {
        match self {
            Direction::EciToEcef => (Frame::Gcrs, Frame::Itrs),
            Direction::EcefToEci => (Frame::Itrs, Frame::Gcrs),
        }
    }
}

/// ECI/ECEF transformer.
///
/// The high-precision capability is fixed at construction: either a
/// [`FrameService`] is attached or it is not. The auto entry points use it
/// when attached and fall back to the sidereal rotation when it is absent
/// or reports [`ServiceError::Unavailable`].
pub struct FrameTransformer {
    service: Option<Box<dyn FrameService>>,
    clock: Box<dyn SiderealClock>,
}

impl Default for FrameTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTransformer {
    /// Transformer with the built-in high-precision model when it is
    /// compiled in.
    pub fn new() -> Self {
        Self {
            service: built_in_service(),
            clock: Box::new(MeanSiderealClock::default()),
        }
    }

    /// Transformer that only ever uses the sidereal rotation.
    pub fn reduced_only() -> Self {
        Self {
            service: None,
            clock: Box::new(MeanSiderealClock::default()),
        }
    }

    /// Attach (or replace) the high-precision service.
    pub fn with_service(mut self, service: impl FrameService + 'static) -> Self {
        self.service = Some(Box::new(service));
        self
    }

    /// Replace the Julian date / sidereal time source of the reduced path.
    pub fn with_clock(mut self, clock: impl SiderealClock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Build from configuration. `eop` feeds the built-in service.
    pub fn from_config(config: &FrameConfig, eop: Option<EopTable>) -> FrameResult<Self> {
        config.validate()?;
        let clock = Box::new(MeanSiderealClock::new(config.dut1_seconds));

        let service = match config.strategy {
            StrategyPreference::ReducedPrecision => None,
            StrategyPreference::Auto => configured_service(config, eop),
            StrategyPreference::HighPrecision => {
                Some(configured_service(config, eop).ok_or_else(|| {
                    FrameError::CapabilityUnavailable(
                        "built without the high-precision feature".to_string(),
                    )
                })?)
            }
        };

        Ok(Self { service, clock })
    }

    /// Like [`Self::from_config`], with EOP data loaded through `cache` from
    /// `config.eop.source_url`. A load failure is logged and the built-in
    /// service then runs without EOP.
    pub fn from_config_with_cache(config: &FrameConfig, cache: &EopCache) -> FrameResult<Self> {
        config.validate()?;
        let eop = match config.strategy {
            StrategyPreference::ReducedPrecision => None,
            StrategyPreference::Auto | StrategyPreference::HighPrecision => {
                load_configured(&config.eop, cache).unwrap_or_else(|e| {
                    warn!(url = %config.eop.source_url, "EOP data unavailable: {:#}", e);
                    None
                })
            }
        };
        Self::from_config(config, eop)
    }

    /// [`Self::from_config_with_cache`] using the platform cache directory.
    pub fn from_config_default_cache(config: &FrameConfig) -> FrameResult<Self> {
        config.validate()?;
        let cache = EopCache::from_config(&config.eop)
            .map_err(|e| FrameError::Config(format!("EOP cache: {:#}", e)))?;
        Self::from_config_with_cache(config, &cache)
    }

    /// The strategy the auto entry points will attempt.
    pub fn active_strategy(&self) -> Strategy {
        if self.service.is_some() {
            Strategy::HighPrecision
        } else {
            Strategy::ReducedPrecision
        }
    }

    pub fn has_high_precision(&self) -> bool {
        self.service.is_some()
    }

    pub fn service_name(&self) -> Option<&str> {
        self.service.as_deref().map(|s| s.name())
    }

    /// ECI -> ECEF, high precision with fallback.
    pub fn eci_to_ecef(&self, eci: &Cartesian, t: DateTime<Utc>) -> FrameResult<Cartesian> {
        self.auto(eci, &[t], Direction::EciToEcef)
    }

    /// ECEF -> ECI, high precision with fallback.
    pub fn ecef_to_eci(&self, ecef: &Cartesian, t: DateTime<Utc>) -> FrameResult<Cartesian> {
        self.auto(ecef, &[t], Direction::EcefToEci)
    }

    /// ECI -> ECEF by sidereal rotation only.
    pub fn eci_to_ecef_reduced_precision(
        &self,
        eci: &Cartesian,
        t: DateTime<Utc>,
    ) -> FrameResult<Cartesian> {
        self.reduced(eci, &[t], Direction::EciToEcef)
    }

    /// ECEF -> ECI by sidereal rotation only.
    pub fn ecef_to_eci_reduced_precision(
        &self,
        ecef: &Cartesian,
        t: DateTime<Utc>,
    ) -> FrameResult<Cartesian> {
        self.reduced(ecef, &[t], Direction::EcefToEci)
    }

    /// ECI -> ECEF through the service only; fails if it is absent.
    pub fn eci_to_ecef_high_precision(
        &self,
        eci: &Cartesian,
        t: DateTime<Utc>,
    ) -> FrameResult<Cartesian> {
        self.high(eci, &[t], Direction::EciToEcef)
    }

    /// ECEF -> ECI through the service only; fails if it is absent.
    pub fn ecef_to_eci_high_precision(
        &self,
        ecef: &Cartesian,
        t: DateTime<Utc>,
    ) -> FrameResult<Cartesian> {
        self.high(ecef, &[t], Direction::EcefToEci)
    }

    /// ECI -> ECEF with one instant per position (or one shared instant).
    pub fn eci_to_ecef_at(
        &self,
        eci: &Cartesian,
        times: &[DateTime<Utc>],
    ) -> FrameResult<Cartesian> {
        self.auto(eci, times, Direction::EciToEcef)
    }

    /// ECEF -> ECI with one instant per position (or one shared instant).
    pub fn ecef_to_eci_at(
        &self,
        ecef: &Cartesian,
        times: &[DateTime<Utc>],
    ) -> FrameResult<Cartesian> {
        self.auto(ecef, times, Direction::EcefToEci)
    }

    pub fn eci_to_ecef_reduced_precision_at(
        &self,
        eci: &Cartesian,
        times: &[DateTime<Utc>],
    ) -> FrameResult<Cartesian> {
        self.reduced(eci, times, Direction::EciToEcef)
    }

    pub fn ecef_to_eci_reduced_precision_at(
        &self,
        ecef: &Cartesian,
        times: &[DateTime<Utc>],
    ) -> FrameResult<Cartesian> {
        self.reduced(ecef, times, Direction::EcefToEci)
    }

    fn auto(
        &self,
        pos: &Cartesian,
        times: &[DateTime<Utc>],
        dir: Direction,
    ) -> FrameResult<Cartesian> {
        check_instant_count(pos.len(), times.len())?;
        if let Some(service) = self.service.as_deref() {
            match apply_service(service, pos, times, dir) {
                Err(FrameError::CapabilityUnavailable(reason)) => {
                    debug!(
                        service = service.name(),
                        %reason,
                        "high-precision frame service unavailable, using sidereal rotation"
                    );
                }
                result => return result,
            }
        }
        self.reduced(pos, times, dir)
    }

    fn high(
        &self,
        pos: &Cartesian,
        times: &[DateTime<Utc>],
        dir: Direction,
    ) -> FrameResult<Cartesian> {
        check_instant_count(pos.len(), times.len())?;
        let service = self.service.as_deref().ok_or_else(|| {
            FrameError::CapabilityUnavailable("no high-precision frame service attached".into())
        })?;
        apply_service(service, pos, times, dir)
    }

    fn reduced(
        &self,
        pos: &Cartesian,
        times: &[DateTime<Utc>],
        dir: Direction,
    ) -> FrameResult<Cartesian> {
        check_instant_count(pos.len(), times.len())?;
        let angles: Vec<f64> = times.iter().map(|t| self.clock.sidereal_angle(*t)).collect();
        match dir {
            Direction::EciToEcef => rotate_eci_to_ecef(pos, &angles),
            Direction::EcefToEci => rotate_ecef_to_eci(pos, &angles),
        }
    }
}

#[cfg(feature = "high-precision")]
fn configured_service(config: &FrameConfig, eop: Option<EopTable>) -> Option<Box<dyn FrameService>> {
    let mut service =
        crate::iers::IauFrameService::new().require_coverage(config.eop.require_coverage);
    if let Some(table) = eop {
        service = service.with_eop(table);
    }
    Some(Box::new(service))
}

#[cfg(not(feature = "high-precision"))]
fn configured_service(_config: &FrameConfig, _eop: Option<EopTable>) -> Option<Box<dyn FrameService>> {
    None
}

fn check_instant_count(points: usize, instants: usize) -> FrameResult<()> {
    if instants == 1 || (instants == points && instants > 0) {
        Ok(())
    } else {
        Err(FrameError::InstantCountMismatch { points, instants })
    }
}

fn apply_service(
    service: &dyn FrameService,
    pos: &Cartesian,
    times: &[DateTime<Utc>],
    dir: Direction,
) -> FrameResult<Cartesian> {
    let (from, to) = dir.frames();
    let points = pos.points();

    let result = if let [t] = times {
        service.transform_batch(&points, from, to, *t)
    } else {
        points
            .iter()
            .zip(times)
            .map(|(p, t)| service.transform(*p, from, to, *t))
            .collect::<Result<Vec<DVec3>, ServiceError>>()
    };

    let out = result.map_err(|e| match e {
        ServiceError::Unavailable(reason) => FrameError::CapabilityUnavailable(reason),
        ServiceError::Failed(message) => FrameError::Service {
            service: service.name().to_string(),
            message,
        },
    })?;

    if out.len() != points.len() {
        return Err(FrameError::Service {
            service: service.name().to_string(),
            message: format!("returned {} vectors for {} inputs", out.len(), points.len()),
        });
    }
    if let Some(index) = out.iter().position(|v| !v.is_finite()) {
        return Err(FrameError::NonFiniteResult {
            service: service.name().to_string(),
            index,
        });
    }

    Ok(pos.with_points(&out))
}
