//! Provider: frame bookkeeping and orientation on top of an [`EphemerisEngine`].

use serde::Serialize;
use tracing::trace;
use worldline_core::vector::{self, Vector3};
use worldline_core::{BodyId, Epoch, units};

use crate::EphemerisError;
use crate::engine::{EphemerisEngine, NativeState};
use crate::frames::{ecliptic_to_equatorial, to_ecliptic_j2000};
use crate::orientation::{BodyOrientation, rotation_model};
use crate::vsop::Vsop87Engine;

/// Frames the provider can answer in. Everything downstream uses ecliptic J2000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum OutputFrame {
    #[default]
    EclipticJ2000,
    EquatorialJ2000,
}

/// Position (AU) and velocity (AU/day) of a body relative to `reference_body`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateVector {
    pub position_au: Vector3,
    pub velocity_au_per_day: Vector3,
    pub epoch: Epoch,
    pub frame: OutputFrame,
    pub reference_body: BodyId,
}

impl StateVector {
    pub fn distance_au(&self) -> f64 {
        vector::norm(&self.position_au)
    }

    pub fn speed_km_s(&self) -> f64 {
        units::au_per_day_to_km_s(vector::norm(&self.velocity_au_per_day))
    }
}

/// Stateless wrapper: every call goes straight to the engine.
#[derive(Debug, Clone, Default)]
pub struct EphemerisProvider<E = Vsop87Engine> {
    engine: E,
}

impl EphemerisProvider<Vsop87Engine> {
    /// Provider over the bundled VSOP87 engine.
    pub fn vsop87() -> Self {
        Self::new(Vsop87Engine)
    }
}

impl<E: EphemerisEngine> EphemerisProvider<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// State of `body` relative to the Sun.
    pub fn heliocentric_state(
        &self,
        body: BodyId,
        epoch: Epoch,
        frame: OutputFrame,
    ) -> Result<StateVector, EphemerisError> {
        let (position, velocity) = self.heliocentric_ecliptic(body, epoch)?;
        Ok(Self::package(position, velocity, epoch, frame, BodyId::Sun))
    }

    /// State of `body` relative to Earth.
    pub fn geocentric_state(
        &self,
        body: BodyId,
        epoch: Epoch,
        frame: OutputFrame,
    ) -> Result<StateVector, EphemerisError> {
        let (position, velocity) = match body {
            BodyId::Earth => (vector::ZERO, vector::ZERO),
            BodyId::Moon => self.moon_geocentric_ecliptic(epoch)?,
            other => {
                let (body_pos, body_vel) = self.heliocentric_ecliptic(other, epoch)?;
                let (earth_pos, earth_vel) = self.heliocentric_ecliptic(BodyId::Earth, epoch)?;
                (
                    vector::sub(&body_pos, &earth_pos),
                    vector::sub(&body_vel, &earth_vel),
                )
            }
        };
        Ok(Self::package(position, velocity, epoch, frame, BodyId::Earth))
    }

    /// Pole direction and prime-meridian angle; engine data when available,
    /// otherwise the IAU rotation model.
    pub fn body_orientation(&self, body: BodyId, epoch: Epoch) -> BodyOrientation {
        self.engine
            .orientation(body, epoch)
            .unwrap_or_else(|| rotation_model(body).orientation(epoch))
    }

    fn heliocentric_ecliptic(
        &self,
        body: BodyId,
        epoch: Epoch,
    ) -> Result<(Vector3, Vector3), EphemerisError> {
        match body {
            BodyId::Sun => Ok((vector::ZERO, vector::ZERO)),
            BodyId::Moon => {
                let (earth_pos, earth_vel) = self.heliocentric_ecliptic(BodyId::Earth, epoch)?;
                let (moon_pos, moon_vel) = self.moon_geocentric_ecliptic(epoch)?;
                Ok((
                    vector::add(&earth_pos, &moon_pos),
                    vector::add(&earth_vel, &moon_vel),
                ))
            }
            planet => {
                let native = self.engine.heliocentric(planet, epoch)?;
                self.convert(planet, native, epoch)
            }
        }
    }

    fn moon_geocentric_ecliptic(
        &self,
        epoch: Epoch,
    ) -> Result<(Vector3, Vector3), EphemerisError> {
        let native = self.engine.geocentric_moon(epoch)?;
        self.convert(BodyId::Moon, native, epoch)
    }

    fn convert(
        &self,
        body: BodyId,
        native: NativeState,
        epoch: Epoch,
    ) -> Result<(Vector3, Vector3), EphemerisError> {
        let finite = native
            .position_au
            .iter()
            .chain(native.velocity_au_per_day.iter())
            .all(|c| c.is_finite());
        if !finite {
            return Err(EphemerisError::NonFinite { body });
        }
        trace!(
            engine = self.engine.name(),
            %body,
            frame = ?native.frame,
            jd = epoch.julian_day_tt(),
            "converting native state"
        );
        Ok((
            to_ecliptic_j2000(&native.position_au, native.frame, epoch),
            to_ecliptic_j2000(&native.velocity_au_per_day, native.frame, epoch),
        ))
    }

    fn package(
        position: Vector3,
        velocity: Vector3,
        epoch: Epoch,
        frame: OutputFrame,
        reference_body: BodyId,
    ) -> StateVector {
        let (position_au, velocity_au_per_day) = match frame {
            OutputFrame::EclipticJ2000 => (position, velocity),
            OutputFrame::EquatorialJ2000 => (
                ecliptic_to_equatorial(&position),
                ecliptic_to_equatorial(&velocity),
            ),
        };
        StateVector {
            position_au,
            velocity_au_per_day,
            epoch,
            frame,
            reference_body,
        }
    }
}
