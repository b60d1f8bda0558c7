//! Path length traveled in each frame over a duration.
//!
//! Two tiers are available and selected explicitly:
//! * [`DistanceStrategy::Rectilinear`] multiplies speed by duration.
//! * [`DistanceStrategy::EphemerisIntegrated`] follows Earth's actual
//!   heliocentric path through the ephemeris for the orbit frame and the
//!   rotation circle for the spin frame. Galaxy and CMB stay rectilinear.

use serde::{Deserialize, Serialize};
use tracing::debug;
use worldline_core::constants::AU_KM;
use worldline_core::{BodyId, Epoch, vector};
use worldline_ephem::{EphemerisEngine, EphemerisProvider, OutputFrame};

use crate::MotionError;
use crate::velocity::{FrameMetadata, FrameVelocity, ReferenceFrame};

pub const DEFAULT_INTEGRATION_STEP_DAYS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DistanceStrategy {
    #[default]
    Rectilinear,
    EphemerisIntegrated { step_days: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameDistance {
    pub frame: ReferenceFrame,
    pub duration_seconds: f64,
    pub path_length_km: f64,
}

impl FrameDistance {
    /// `velocity × duration`.
    pub fn rectilinear(
        velocity: &FrameVelocity,
        duration_seconds: f64,
    ) -> Result<Self, MotionError> {
        validate_duration(duration_seconds)?;
        Ok(Self {
            frame: velocity.frame,
            duration_seconds,
            path_length_km: velocity.velocity_km_s * duration_seconds,
        })
    }
}

fn validate_duration(seconds: f64) -> Result<(), MotionError> {
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(())
    } else {
        Err(MotionError::InvalidDuration { seconds })
    }
}

/// Tier-A distances for every supplied frame.
pub fn rectilinear_distances(
    velocities: &[FrameVelocity],
    duration_seconds: f64,
) -> Result<Vec<FrameDistance>, MotionError> {
    velocities
        .iter()
        .map(|v| FrameDistance::rectilinear(v, duration_seconds))
        .collect()
}

/// Tier-B distances between `start` and `end`.
pub fn integrated_distances<E: EphemerisEngine>(
    velocities: &[FrameVelocity],
    start: Epoch,
    end: Epoch,
    step_days: f64,
    provider: &EphemerisProvider<E>,
) -> Result<Vec<FrameDistance>, MotionError> {
    let duration_seconds = (end.days_since_j2000() - start.days_since_j2000())
        * worldline_core::constants::SECONDS_PER_DAY;
    validate_duration(duration_seconds)?;
    velocities
        .iter()
        .map(|v| match (v.frame, v.metadata) {
            (ReferenceFrame::Orbit, _) => Ok(FrameDistance {
                frame: ReferenceFrame::Orbit,
                duration_seconds,
                path_length_km: orbit_path_length_km(provider, start, end, step_days)?,
            }),
            (
                ReferenceFrame::Spin,
                FrameMetadata::Spin {
                    parallel_radius_km,
                    angular_velocity_rad_s,
                    ..
                },
            ) => Ok(FrameDistance {
                frame: ReferenceFrame::Spin,
                duration_seconds,
                // Arc length along the parallel: radius × swept angle.
                path_length_km: parallel_radius_km * angular_velocity_rad_s * duration_seconds,
            }),
            _ => FrameDistance::rectilinear(v, duration_seconds),
        })
        .collect()
}

/// Length of Earth's heliocentric path between two epochs, summing chords
/// between samples `step_days` apart.
pub fn orbit_path_length_km<E: EphemerisEngine>(
    provider: &EphemerisProvider<E>,
    start: Epoch,
    end: Epoch,
    step_days: f64,
) -> Result<f64, MotionError> {
    if !(step_days.is_finite() && step_days > 0.0) {
        return Err(MotionError::InvalidStep { step_days });
    }
    let span_days = end.days_since_j2000() - start.days_since_j2000();
    if span_days <= 0.0 {
        return Ok(0.0);
    }
    let steps = (span_days / step_days).ceil() as usize;
    let position = |epoch: Epoch| {
        provider
            .heliocentric_state(BodyId::Earth, epoch, OutputFrame::EclipticJ2000)
            .map(|state| state.position_au)
    };

    let mut previous = position(start)?;
    let mut total_au = 0.0;
    for i in 1..=steps {
        let t = (i as f64 * step_days).min(span_days);
        let current = position(start.add_days(t))?;
        total_au += vector::norm(&vector::sub(&current, &previous));
        previous = current;
    }
    debug!(steps, span_days, total_au, "integrated orbit path");
    Ok(total_au * AU_KM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::velocity::{VelocityOptions, all_frame_velocities, frame_velocity};

    #[test]
    fn doubling_duration_doubles_path_length() {
        let velocities =
            all_frame_velocities(12.0, Epoch::J2000, VelocityOptions::default()).unwrap();
        let one = rectilinear_distances(&velocities, 3_600.0).unwrap();
        let two = rectilinear_distances(&velocities, 7_200.0).unwrap();
        for (a, b) in one.iter().zip(&two) {
            assert_eq!(b.path_length_km, 2.0 * a.path_length_km, "{:?}", a.frame);
        }
    }

    #[test]
    fn negative_duration_is_invalid_input() {
        let v = frame_velocity(
            ReferenceFrame::Galaxy,
            0.0,
            Epoch::J2000,
            VelocityOptions::default(),
        )
        .unwrap();
        assert!(matches!(
            FrameDistance::rectilinear(&v, -1.0),
            Err(MotionError::InvalidDuration { .. })
        ));
    }

    #[test]
    fn integrated_orbit_tracks_rectilinear_over_a_year() {
        let provider = EphemerisProvider::vsop87();
        let start = Epoch::J2000;
        let end = start.add_days(365.25);
        let velocities = all_frame_velocities(0.0, start, VelocityOptions::default()).unwrap();
        let tier_b = integrated_distances(&velocities, start, end, 1.0, &provider).unwrap();
        let tier_a = rectilinear_distances(&velocities, 365.25 * 86_400.0).unwrap();

        let orbit_b = tier_b[1].path_length_km;
        let orbit_a = tier_a[1].path_length_km;
        assert!(
            ((orbit_b - orbit_a) / orbit_a).abs() < 0.01,
            "integrated {orbit_b} vs rectilinear {orbit_a}"
        );
        assert!((tier_b[0].path_length_km - tier_a[0].path_length_km).abs() < 1e-3);
        assert_eq!(tier_b[2].path_length_km, tier_a[2].path_length_km);
    }

    #[test]
    fn zero_step_is_rejected() {
        let provider = EphemerisProvider::vsop87();
        assert!(matches!(
            orbit_path_length_km(&provider, Epoch::J2000, Epoch::J2000.add_days(2.0), 0.0),
            Err(MotionError::InvalidStep { .. })
        ));
    }
}
