//! Boundary to the external planetary-theory engine.
//!
//! Engines answer in whatever convention is native to them and tag the answer
//! with a [`NativeFrame`]; the provider is the only place that converts.

use serde::Serialize;
use worldline_core::vector::Vector3;
use worldline_core::{BodyId, Epoch};

use crate::EphemerisError;
use crate::orientation::BodyOrientation;

/// Reference frames engines are allowed to answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NativeFrame {
    /// Mean ecliptic and equinox of J2000.
    EclipticJ2000,
    /// ICRF/EME2000 equatorial axes.
    EquatorialJ2000,
    /// Mean ecliptic and equinox of the query epoch.
    EclipticOfDate,
}

/// Cartesian state in AU and AU/day, tagged with its native frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeState {
    pub position_au: Vector3,
    pub velocity_au_per_day: Vector3,
    pub frame: NativeFrame,
}

/// Synchronous, CPU-bound source of planetary positions.
pub trait EphemerisEngine {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Heliocentric state of a planet (Mercury through Neptune, Earth included).
    /// Engines return [`EphemerisError::UnsupportedBody`] for the Sun and the Moon.
    fn heliocentric(&self, body: BodyId, epoch: Epoch) -> Result<NativeState, EphemerisError>;

    /// Geocentric state of the Moon.
    fn geocentric_moon(&self, epoch: Epoch) -> Result<NativeState, EphemerisError>;

    /// Orientation straight from the engine, already in ecliptic J2000, if it has one.
    fn orientation(&self, _body: BodyId, _epoch: Epoch) -> Option<BodyOrientation> {
        None
    }
}

impl<E: EphemerisEngine + ?Sized> EphemerisEngine for &E {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn heliocentric(&self, body: BodyId, epoch: Epoch) -> Result<NativeState, EphemerisError> {
        (**self).heliocentric(body, epoch)
    }

    fn geocentric_moon(&self, epoch: Epoch) -> Result<NativeState, EphemerisError> {
        (**self).geocentric_moon(epoch)
    }

    fn orientation(&self, body: BodyId, epoch: Epoch) -> Option<BodyOrientation> {
        (**self).orientation(body, epoch)
    }
}
