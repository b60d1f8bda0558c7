//! Physics and scale engine behind the cosmic worldline viewer.
//!
//! Member crates do the work; this crate wires them into the two entry points
//! front-ends use: [`compute_worldline_state`] for the "how far have I
//! traveled" readout and [`ViewerSession`] for the solar-system view.

pub mod settings;
pub mod viewer;
pub mod worldline;

pub use worldline_camera as camera;
pub use worldline_config as config;
pub use worldline_core::{BodyId, Epoch, constants, units, vector};
pub use worldline_ephem as ephemeris;
pub use worldline_export as export;
pub use worldline_motion as motion;
pub use worldline_orbits as orbits;
pub use worldline_scale as scale;
pub use worldline_scene as scene;

pub use settings::ViewerSettings;
pub use viewer::{CameraView, ViewerFrame, ViewerSession};
pub use worldline::{
    WorldlineError, WorldlineOptions, WorldlineState, compute_worldline_state,
    compute_worldline_state_with,
};

use thiserror::Error;

/// Errors from building or driving a [`ViewerSession`].
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error(transparent)]
    Config(#[from] worldline_config::ConfigError),
    #[error(transparent)]
    UnknownBody(#[from] worldline_core::UnknownBody),
    #[error("unknown preset or mapping `{name}`")]
    UnknownMapping { name: String },
    #[error("mapping `{mapping}` uses an unsupported scale type")]
    UnsupportedScale { mapping: String },
    #[error("invalid scale mapping: {0}")]
    Scale(#[from] worldline_scale::ScaleError),
    #[error("camera rejected settings: {0}")]
    Camera(#[from] worldline_camera::CameraError),
    #[error("scene resolution failed: {0}")]
    Scene(#[from] worldline_scene::SceneError),
    #[error("{body} is missing from the resolved scene")]
    MissingBody { body: BodyId },
}
