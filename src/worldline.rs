//! "How far have I traveled" state: age, per-frame speeds, and path lengths.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use worldline_core::Epoch;
use worldline_ephem::{EphemerisEngine, EphemerisProvider};
use worldline_motion::distance::{integrated_distances, rectilinear_distances};
use worldline_motion::{
    AgeDuration, AgeError, DateInput, DistanceStrategy, FrameDistance, FrameVelocity,
    MotionError, VelocityOptions, all_frame_velocities, breakdown_duration,
    compute_duration_seconds, format_duration,
};

#[derive(Debug, Error)]
pub enum WorldlineError {
    #[error(transparent)]
    Age(#[from] AgeError),
    #[error(transparent)]
    Motion(#[from] MotionError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WorldlineOptions {
    pub strategy: DistanceStrategy,
    pub velocity: VelocityOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldlineState {
    pub birth_utc: String,
    pub target_utc: String,
    pub latitude_deg: f64,
    pub duration: AgeDuration,
    pub formatted_duration: String,
    pub strategy: DistanceStrategy,
    pub velocities: Vec<FrameVelocity>,
    /// Path lengths are zero when the target precedes birth.
    pub distances: Vec<FrameDistance>,
}

/// Tier-A worldline state with the bundled ephemeris.
pub fn compute_worldline_state<'a>(
    birth: impl Into<DateInput<'a>>,
    latitude_deg: f64,
    target: impl Into<DateInput<'a>>,
) -> Result<WorldlineState, WorldlineError> {
    compute_worldline_state_with(
        birth,
        latitude_deg,
        target,
        WorldlineOptions::default(),
        &EphemerisProvider::vsop87(),
    )
}

pub fn compute_worldline_state_with<'a, E: EphemerisEngine>(
    birth: impl Into<DateInput<'a>>,
    latitude_deg: f64,
    target: impl Into<DateInput<'a>>,
    options: WorldlineOptions,
    provider: &EphemerisProvider<E>,
) -> Result<WorldlineState, WorldlineError> {
    let birth = birth.into().resolve()?;
    let target = target.into().resolve()?;
    let seconds = compute_duration_seconds(birth, target)?;
    let duration = breakdown_duration(seconds);

    let target_epoch = Epoch::from_utc(target);
    let velocities = all_frame_velocities(latitude_deg, target_epoch, options.velocity)?;
    let distances = if duration.is_pre_birth {
        rectilinear_distances(&velocities, 0.0)?
    } else {
        match options.strategy {
            DistanceStrategy::Rectilinear => rectilinear_distances(&velocities, seconds)?,
            DistanceStrategy::EphemerisIntegrated { step_days } => integrated_distances(
                &velocities,
                Epoch::from_utc(birth),
                target_epoch,
                step_days,
                provider,
            )?,
        }
    };
    debug!(
        seconds,
        latitude_deg,
        strategy = ?options.strategy,
        "computed worldline state"
    );

    Ok(WorldlineState {
        birth_utc: rfc3339(birth),
        target_utc: rfc3339(target),
        latitude_deg,
        formatted_duration: format_duration(&duration),
        duration,
        strategy: options.strategy,
        velocities,
        distances,
    })
}

fn rfc3339(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use worldline_motion::ReferenceFrame;

    #[test]
    fn pre_birth_reports_zero_travel() {
        let state = compute_worldline_state("2000-01-01", 10.0, "1999-06-01").unwrap();
        assert!(state.duration.is_pre_birth);
        assert!(state.duration.total_seconds < 0.0);
        assert!(state.distances.iter().all(|d| d.path_length_km == 0.0));
        assert_eq!(state.velocities.len(), 4);
    }

    #[test]
    fn invalid_dates_and_latitudes_fail() {
        assert!(matches!(
            compute_worldline_state("not a date", 0.0, "2020-01-01"),
            Err(WorldlineError::Age(AgeError::InvalidDate { .. }))
        ));
        assert!(matches!(
            compute_worldline_state("1990-01-01", 91.0, "2020-01-01"),
            Err(WorldlineError::Motion(MotionError::LatitudeOutOfRange { .. }))
        ));
    }

    #[test]
    fn integrated_orbit_path_is_close_to_rectilinear_over_a_year() {
        let options = WorldlineOptions {
            strategy: DistanceStrategy::EphemerisIntegrated { step_days: 1.0 },
            ..WorldlineOptions::default()
        };
        let state = compute_worldline_state_with(
            "2019-01-01",
            0.0,
            "2020-01-01",
            options,
            &EphemerisProvider::vsop87(),
        )
        .unwrap();
        let orbit = state
            .distances
            .iter()
            .find(|d| d.frame == ReferenceFrame::Orbit)
            .unwrap();
        let rectilinear = orbit.duration_seconds * 29.78;
        let ratio = orbit.path_length_km / rectilinear;
        assert!((0.99..1.01).contains(&ratio), "ratio {ratio}");
        assert_eq!(state.birth_utc, "2019-01-01T00:00:00Z");
    }
}
