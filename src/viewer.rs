//! Viewer session: the one stateful piece tying scene, orbits and camera.

use serde::Serialize;
use tracing::debug;
use worldline_camera::{
    CameraSemanticState, ClipPlanes, FocusTarget, RetargetMode, SemanticCamera,
};
use worldline_core::vector::Vector3;
use worldline_core::{BodyId, Epoch};
use worldline_ephem::{EphemerisEngine, EphemerisProvider, Vsop87Engine};
use worldline_orbits::{OrbitPath, orbit_paths};
use worldline_scale::{Preset, RenderMapping};
use worldline_scene::{Scene, resolve_scene};

use crate::ViewerError;
use crate::settings::ViewerSettings;

/// Camera output for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraView {
    pub state: CameraSemanticState,
    pub position: Vector3,
    pub look_at: Vector3,
    pub clip_planes: ClipPlanes,
    pub min_distance: f64,
    pub max_distance: f64,
    pub transitioning: bool,
}

impl CameraView {
    fn of(camera: &SemanticCamera) -> Self {
        let (min_distance, max_distance) = camera.distance_limits();
        Self {
            state: camera.state(),
            position: camera.position(),
            look_at: camera.look_at(),
            clip_planes: camera.clip_planes(),
            min_distance,
            max_distance,
            transitioning: camera.is_transitioning(),
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerFrame {
    pub mapping: String,
    pub scene: Scene,
    pub orbits: Vec<OrbitPath>,
    pub camera: CameraView,
}

/// Owns the provider, the active mapping, and one camera. Not meant to be
/// driven from two threads at once.
pub struct ViewerSession<E = Vsop87Engine> {
    provider: EphemerisProvider<E>,
    mapping_name: String,
    mapping: RenderMapping,
    orbit_segments: usize,
    scene: Scene,
    camera: SemanticCamera,
}

impl<E: EphemerisEngine> ViewerSession<E> {
    pub fn new(
        provider: EphemerisProvider<E>,
        settings: &ViewerSettings,
        epoch: Epoch,
    ) -> Result<Self, ViewerError> {
        let scene = resolve_scene(&provider, epoch, &settings.mapping, settings.focus)?;
        let target = focus_target(&scene)?;
        let camera = SemanticCamera::new(settings.camera, target)?;
        Ok(Self {
            provider,
            mapping_name: settings.mapping_name.clone(),
            mapping: settings.mapping,
            orbit_segments: settings.orbit_segments,
            scene,
            camera,
        })
    }

    pub fn focus(&self) -> BodyId {
        self.scene.focus
    }

    pub fn epoch(&self) -> Epoch {
        self.scene.epoch
    }

    pub fn mapping(&self) -> &RenderMapping {
        &self.mapping
    }

    pub fn camera(&self) -> &SemanticCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut SemanticCamera {
        &mut self.camera
    }

    /// Resolve the scene at `epoch` and package it with orbits and camera.
    pub fn frame(&mut self, epoch: Epoch) -> Result<ViewerFrame, ViewerError> {
        if epoch != self.scene.epoch {
            self.scene = resolve_scene(&self.provider, epoch, &self.mapping, self.scene.focus)?;
            self.camera.track(focus_target(&self.scene)?)?;
        }
        Ok(ViewerFrame {
            mapping: self.mapping_name.clone(),
            orbits: orbit_paths(&self.scene, self.orbit_segments),
            scene: self.scene.clone(),
            camera: CameraView::of(&self.camera),
        })
    }

    /// Move the floating origin to `body` and start a camera transition.
    pub fn set_focus(&mut self, body: BodyId, mode: RetargetMode) -> Result<(), ViewerError> {
        let previous = self.scene.focus;
        let scene = resolve_scene(&self.provider, self.scene.epoch, &self.mapping, body)?;
        // The old focus was at the origin; it now sits here.
        let shift = scene
            .get(previous)
            .map(|rendered| rendered.position)
            .ok_or(ViewerError::MissingBody { body: previous })?;
        self.camera.rebase(&shift);
        self.camera.retarget(focus_target(&scene)?, mode)?;
        self.scene = scene;
        debug!(from = %previous, to = %body, "focus changed");
        Ok(())
    }

    pub fn set_preset(&mut self, preset: Preset) -> Result<(), ViewerError> {
        self.set_mapping(preset.key(), preset.mapping())
    }

    /// Swap the scale mapping. The camera keeps its zoom in radii.
    pub fn set_mapping(&mut self, name: &str, mapping: RenderMapping) -> Result<(), ViewerError> {
        let scene = resolve_scene(&self.provider, self.scene.epoch, &mapping, self.scene.focus)?;
        self.camera
            .retarget(focus_target(&scene)?, RetargetMode::Preserve)?;
        self.mapping_name = name.to_string();
        self.mapping = mapping;
        self.scene = scene;
        debug!(mapping = name, "mapping changed");
        Ok(())
    }

    /// Advance camera animation by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        self.camera.advance(dt);
    }
}

fn focus_target(scene: &Scene) -> Result<FocusTarget, ViewerError> {
    FocusTarget::from_scene(scene).ok_or(ViewerError::MissingBody { body: scene.focus })
}
