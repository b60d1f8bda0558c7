//! Default engine: VSOP87A for the planets, truncated ELP series for the Moon.

use vsop87::vsop87a;
use worldline_core::vector::{self, Vector3};
use worldline_core::{BodyId, Epoch};

use crate::engine::{EphemerisEngine, NativeFrame, NativeState};
use crate::{EphemerisError, lunar};

/// Half-width of the central difference used for velocities.
const VELOCITY_STEP_DAYS: f64 = 0.125;
/// VSOP87 is fitted over roughly four millennia either side of J2000.
const VALID_SPAN_DAYS: f64 = 4_000.0 * 365.25;

/// Analytic engine backed by the `vsop87` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vsop87Engine;

impl Vsop87Engine {
    fn check_range(epoch: Epoch) -> Result<(), EphemerisError> {
        if !epoch.days_since_j2000().is_finite() || epoch.days_since_j2000().abs() > VALID_SPAN_DAYS
        {
            return Err(EphemerisError::EpochOutOfRange {
                julian_day: epoch.julian_day_tt(),
            });
        }
        Ok(())
    }

    fn planet_position(body: BodyId, jde: f64) -> Option<Vector3> {
        let coords = match body {
            BodyId::Mercury => vsop87a::mercury(jde),
            BodyId::Venus => vsop87a::venus(jde),
            BodyId::Earth => vsop87a::earth(jde),
            BodyId::Mars => vsop87a::mars(jde),
            BodyId::Jupiter => vsop87a::jupiter(jde),
            BodyId::Saturn => vsop87a::saturn(jde),
            BodyId::Uranus => vsop87a::uranus(jde),
            BodyId::Neptune => vsop87a::neptune(jde),
            BodyId::Sun | BodyId::Moon => return None,
        };
        Some([coords.x, coords.y, coords.z])
    }
}

fn central_difference(before: &Vector3, after: &Vector3) -> Vector3 {
    vector::scale(&vector::sub(after, before), 0.5 / VELOCITY_STEP_DAYS)
}

impl EphemerisEngine for Vsop87Engine {
    fn name(&self) -> &'static str {
        "vsop87a"
    }

    fn heliocentric(&self, body: BodyId, epoch: Epoch) -> Result<NativeState, EphemerisError> {
        Self::check_range(epoch)?;
        let jde = epoch.julian_day_tt();
        let position = Self::planet_position(body, jde)
            .ok_or(EphemerisError::UnsupportedBody { body })?;
        let before = Self::planet_position(body, jde - VELOCITY_STEP_DAYS)
            .ok_or(EphemerisError::UnsupportedBody { body })?;
        let after = Self::planet_position(body, jde + VELOCITY_STEP_DAYS)
            .ok_or(EphemerisError::UnsupportedBody { body })?;
        Ok(NativeState {
            position_au: position,
            velocity_au_per_day: central_difference(&before, &after),
            frame: NativeFrame::EclipticJ2000,
        })
    }

    fn geocentric_moon(&self, epoch: Epoch) -> Result<NativeState, EphemerisError> {
        Self::check_range(epoch)?;
        let before = lunar::position_of_date_au(epoch.add_days(-VELOCITY_STEP_DAYS));
        let after = lunar::position_of_date_au(epoch.add_days(VELOCITY_STEP_DAYS));
        Ok(NativeState {
            position_au: lunar::position_of_date_au(epoch),
            velocity_au_per_day: central_difference(&before, &after),
            frame: NativeFrame::EclipticOfDate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_sits_near_one_au() {
        let state = Vsop87Engine
            .heliocentric(BodyId::Earth, Epoch::J2000)
            .unwrap();
        let r = vector::norm(&state.position_au);
        assert!((0.98..1.02).contains(&r), "r = {r}");
        assert_eq!(state.frame, NativeFrame::EclipticJ2000);
    }

    #[test]
    fn sun_and_moon_are_not_heliocentric_targets() {
        for body in [BodyId::Sun, BodyId::Moon] {
            assert!(matches!(
                Vsop87Engine.heliocentric(body, Epoch::J2000),
                Err(EphemerisError::UnsupportedBody { .. })
            ));
        }
    }

    #[test]
    fn far_future_is_rejected() {
        let epoch = Epoch::J2000.add_days(10_000.0 * 365.25);
        assert!(matches!(
            Vsop87Engine.geocentric_moon(epoch),
            Err(EphemerisError::EpochOutOfRange { .. })
        ));
    }
}
