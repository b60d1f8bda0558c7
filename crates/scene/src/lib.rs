//! Scene position resolver.
//!
//! Resolves every body for one (epoch, mapping, focus) triple: AU positions
//! from the ephemeris provider, mapped into scene units, then shifted so the
//! focus body sits at the origin.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, trace, warn};
use worldline_core::vector::{self, Vector3};
use worldline_core::{BodyId, Epoch};
use worldline_ephem::{
    BodyOrientation, EphemerisEngine, EphemerisError, EphemerisProvider, OutputFrame,
};
use worldline_scale::{RenderMapping, ScaleError, map_position};

/// Minimum Moon-to-Earth centre distance, in Earth scene radii, before the
/// Moon's own radius is added.
pub const SATELLITE_MIN_PARENT_RADII: f64 = 3.0;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error(transparent)]
    Scale(#[from] ScaleError),
}

/// One body as the renderer should draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedBody {
    pub id: BodyId,
    /// Scene units, relative to the focus body.
    pub position: Vector3,
    pub radius_scene: f64,
    pub color: u32,
    /// Distance to the parent body in AU (0 for the Sun).
    pub distance_au: f64,
    pub orientation: Option<BodyOrientation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub epoch: Epoch,
    pub focus: BodyId,
    pub bodies: Vec<RenderedBody>,
}

impl Scene {
    pub fn get(&self, body: BodyId) -> Option<&RenderedBody> {
        self.bodies.iter().find(|rendered| rendered.id == body)
    }

    pub fn focus_body(&self) -> Option<&RenderedBody> {
        self.get(self.focus)
    }

    /// Recentered position of `body`'s parent, if both are in the scene.
    pub fn parent_position(&self, body: BodyId) -> Option<Vector3> {
        body.parent()
            .and_then(|parent| self.get(parent))
            .map(|parent| parent.position)
    }
}

/// Resolve all bodies at `epoch` under `mapping`, recentered on `focus`.
pub fn resolve_scene<E: EphemerisEngine>(
    provider: &EphemerisProvider<E>,
    epoch: Epoch,
    mapping: &RenderMapping,
    focus: BodyId,
) -> Result<Scene, SceneError> {
    mapping.validate()?;

    let mut absolute = Vec::with_capacity(BodyId::ALL.len());
    for body in BodyId::ALL {
        if body == BodyId::Moon {
            continue;
        }
        let (position, distance_au) = if body == BodyId::Sun {
            (vector::ZERO, 0.0)
        } else {
            let state = provider.heliocentric_state(body, epoch, OutputFrame::EclipticJ2000)?;
            (
                map_position(&state.position_au, &mapping.distance)?,
                state.distance_au(),
            )
        };
        absolute.push(Placed {
            id: body,
            position,
            distance_au,
        });
    }

    let earth = absolute
        .iter()
        .find(|placed| placed.id == BodyId::Earth)
        .map(|placed| placed.position)
        .unwrap_or(vector::ZERO);
    let moon = provider.geocentric_state(BodyId::Moon, epoch, OutputFrame::EclipticJ2000)?;
    let offset = satellite_offset(&moon.position_au, mapping)?;
    let moon_index = absolute
        .iter()
        .position(|placed| placed.id == BodyId::Earth)
        .map_or(absolute.len(), |index| index + 1);
    absolute.insert(
        moon_index,
        Placed {
            id: BodyId::Moon,
            position: vector::add(&earth, &offset),
            distance_au: moon.distance_au(),
        },
    );

    let origin = absolute
        .iter()
        .find(|placed| placed.id == focus)
        .map(|placed| placed.position)
        .unwrap_or(vector::ZERO);

    let mut bodies = Vec::with_capacity(absolute.len());
    for placed in absolute {
        bodies.push(RenderedBody {
            id: placed.id,
            position: vector::sub(&placed.position, &origin),
            radius_scene: mapping.body_radius(placed.id)?,
            color: placed.id.color(),
            distance_au: placed.distance_au,
            orientation: Some(provider.body_orientation(placed.id, epoch)),
        });
    }

    debug!(
        jd_tt = epoch.julian_day_tt(),
        focus = %focus,
        bodies = bodies.len(),
        "resolved scene"
    );
    Ok(Scene {
        epoch,
        focus,
        bodies,
    })
}

struct Placed {
    id: BodyId,
    position: Vector3,
    distance_au: f64,
}

/// Geocentric Moon offset in scene units, pushed clear of Earth's rendered
/// sphere when the distance mapping compresses it inside.
fn satellite_offset(
    geocentric_au: &Vector3,
    mapping: &RenderMapping,
) -> Result<Vector3, ScaleError> {
    let mapped = map_position(geocentric_au, &mapping.distance)?;
    let clearance = SATELLITE_MIN_PARENT_RADII * mapping.body_radius(BodyId::Earth)?
        + mapping.body_radius(BodyId::Moon)?;
    let length = vector::norm(&mapped);
    if length >= clearance {
        return Ok(mapped);
    }
    let direction = match vector::normalize(&mapped) {
        Some(direction) => {
            trace!(mapped = length, clearance, "moon offset pushed clear of Earth");
            direction
        }
        None => {
            warn!(clearance, "moon offset collapsed to zero, placing it along +X");
            vector::UNIT_X
        }
    };
    Ok(vector::scale(&direction, clearance))
}
