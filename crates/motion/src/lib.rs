//! "How far have you traveled" physics: per-frame speeds, path lengths, and age.
//!
//! Frames are reported side by side. Their speeds are never summed: a scalar
//! sum of non-parallel velocities has no physical meaning.

pub mod age;
pub mod distance;
pub mod velocity;

pub use age::{
    AgeDuration, AgeError, DateInput, breakdown_duration, compute_duration_seconds,
    format_duration,
};
pub use distance::{DistanceStrategy, FrameDistance};
pub use velocity::{
    CmbReference, FrameMetadata, FrameVelocity, ReferenceFrame, VelocityOptions,
    all_frame_velocities, frame_velocity,
};

use thiserror::Error;
use worldline_ephem::EphemerisError;

/// Errors from the velocity and distance models.
#[derive(Debug, Error)]
pub enum MotionError {
    #[error("latitude {latitude_deg}° is outside [-90, 90]")]
    LatitudeOutOfRange { latitude_deg: f64 },
    #[error("duration must be finite and non-negative, got {seconds} s")]
    InvalidDuration { seconds: f64 },
    #[error("integration step must be positive, got {step_days} days")]
    InvalidStep { step_days: f64 },
    #[error("ephemeris lookup failed: {0}")]
    Ephemeris(#[from] EphemerisError),
}
