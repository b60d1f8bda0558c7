//! Scale mapping engine.
//!
//! Pure functions from (AU distance, km radius) to scene units. Specs are plain
//! data; every bit of math lives in [`map_distance`] and [`map_radius`].

pub mod preset;
pub mod spec;

pub use preset::{Preset, UnknownPreset};
pub use spec::{
    DistanceScaleSpec, RenderMapping, SizeScaleSpec, map_distance, map_position, map_radius,
};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    #[error("distance must be finite and non-negative, got {au} AU")]
    InvalidDistance { au: f64 },
    #[error("radius must be finite and non-negative, got {km} km")]
    InvalidRadius { km: f64 },
    #[error("scale parameter `{name}` must be finite and positive, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
