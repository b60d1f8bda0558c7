//! Ephemeris provider for the Cosmic Worldline workspace.
//!
//! Planetary theory is delegated to an [`EphemerisEngine`]. The provider owns
//! the frame bookkeeping (everything leaves in ecliptic J2000) and the body
//! orientation fallback. Nothing is cached: each call is independent.

use thiserror::Error;
use worldline_core::BodyId;

pub mod engine;
pub mod frames;
pub mod lunar;
pub mod orientation;
pub mod provider;
pub mod vsop;

#[cfg(feature = "spice")]
pub mod kernels;
#[cfg(feature = "spice")]
pub mod spice;

pub use engine::{EphemerisEngine, NativeFrame, NativeState};
pub use orientation::BodyOrientation;
pub use provider::{EphemerisProvider, OutputFrame, StateVector};
pub use vsop::Vsop87Engine;

/// Errors surfaced while querying an engine.
#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("engine has no direct solution for {body}")]
    UnsupportedBody { body: BodyId },
    #[error("epoch JD {julian_day} lies outside the engine's validity span")]
    EpochOutOfRange { julian_day: f64 },
    #[error("engine returned a non-finite state for {body}")]
    NonFinite { body: BodyId },
    #[cfg(feature = "spice")]
    #[error("kernel `{name}` is missing at {path}; download it from {url}")]
    MissingKernel {
        name: &'static str,
        path: std::path::PathBuf,
        url: &'static str,
    },
    #[cfg(feature = "spice")]
    #[error("kernel `{name}` path contains invalid UTF-8: {path}")]
    InvalidKernelPath {
        name: &'static str,
        path: std::path::PathBuf,
    },
    #[cfg(feature = "spice")]
    #[error("SPICE kernel call failed: {message}")]
    Spice { message: String },
}
