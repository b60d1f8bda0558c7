//! Semantic camera model.
//!
//! The only persistent quantity is `zoom_radii`, the camera distance divided
//! by the focus body's scene radius. Clip planes and distance limits are
//! derived from the radius on demand.

mod easing;

pub use easing::ease_in_out_quint;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use worldline_core::BodyId;
use worldline_core::vector::{self, Vector3};
use worldline_scene::{RenderedBody, Scene};

/// Lower bound for the near clip plane.
pub const NEAR_EPSILON: f64 = 1e-6;
/// Near plane sits at `radius / NEAR_RADIUS_DIVISOR`.
pub const NEAR_RADIUS_DIVISOR: f64 = 500.0;
/// Far plane is at least this far in scene units.
pub const FAR_FLOOR: f64 = 300.0;
pub const FAR_RADIUS_FACTOR: f64 = 1000.0;

const POLAR_MARGIN: f64 = 1e-3;
const DEFAULT_POLAR: f64 = std::f64::consts::FRAC_PI_3;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CameraError {
    #[error("target radius must be finite and positive, got {radius}")]
    InvalidRadius { radius: f64 },
    #[error("zoom factor must be finite and positive, got {factor}")]
    InvalidZoom { factor: f64 },
    #[error("camera setting `{name}` is out of range: {value}")]
    InvalidConfig { name: &'static str, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraConfig {
    pub fov_deg: f64,
    /// Fraction of the vertical field of view the target should span on fit.
    pub fit_coverage: f64,
    pub transition_seconds: f64,
    pub min_distance_radii: f64,
    pub max_distance_radii: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 50.0,
            fit_coverage: 0.6,
            transition_seconds: 1.5,
            min_distance_radii: 1.2,
            max_distance_radii: 500.0,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), CameraError> {
        let checks = [
            ("fov_deg", self.fov_deg, self.fov_deg > 0.0 && self.fov_deg < 180.0),
            (
                "fit_coverage",
                self.fit_coverage,
                self.fit_coverage > 0.0 && self.fit_coverage <= 1.0,
            ),
            (
                "transition_seconds",
                self.transition_seconds,
                self.transition_seconds >= 0.0,
            ),
            (
                "min_distance_radii",
                self.min_distance_radii,
                self.min_distance_radii > 0.0,
            ),
            (
                "max_distance_radii",
                self.max_distance_radii,
                self.max_distance_radii >= self.min_distance_radii,
            ),
        ];
        for (name, value, ok) in checks {
            if !(value.is_finite() && ok) {
                return Err(CameraError::InvalidConfig { name, value });
            }
        }
        Ok(())
    }

    /// Zoom, in radii, at which a sphere spans `fit_coverage` of the view.
    pub fn fit_zoom_radii(&self) -> f64 {
        let half_angle = (self.fov_deg * self.fit_coverage).to_radians() / 2.0;
        1.0 / half_angle.tan()
    }
}

/// What the camera is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FocusTarget {
    pub body: BodyId,
    pub position: Vector3,
    pub radius: f64,
    /// Extra lower bound on camera distance, in scene units.
    pub min_distance: Option<f64>,
}

impl FocusTarget {
    pub fn from_body(rendered: &RenderedBody) -> Self {
        Self {
            body: rendered.id,
            position: rendered.position,
            radius: rendered.radius_scene,
            min_distance: None,
        }
    }

    pub fn from_scene(scene: &Scene) -> Option<Self> {
        scene.focus_body().map(Self::from_body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RetargetMode {
    /// Keep `zoom_radii` and view direction.
    #[default]
    Preserve,
    /// Recompute `zoom_radii` so the target fills `fit_coverage` of the view.
    FitToView,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraSemanticState {
    pub target: BodyId,
    pub zoom_radii: f64,
    pub azimuth: f64,
    pub polar: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClipPlanes {
    pub near: f64,
    pub far: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from_look_at: Vector3,
    from_offset: Vector3,
    elapsed: f64,
}

/// Camera state machine. One instance per independent view; not shared
/// between threads.
#[derive(Debug, Clone)]
pub struct SemanticCamera {
    config: CameraConfig,
    target: FocusTarget,
    zoom_radii: f64,
    azimuth: f64,
    polar: f64,
    transition: Option<Transition>,
}

impl SemanticCamera {
    /// Camera framing `target` at fit-to-view distance.
    pub fn new(config: CameraConfig, target: FocusTarget) -> Result<Self, CameraError> {
        config.validate()?;
        check_radius(target.radius)?;
        let mut camera = Self {
            config,
            target,
            zoom_radii: config.fit_zoom_radii(),
            azimuth: 0.0,
            polar: DEFAULT_POLAR,
            transition: None,
        };
        camera.clamp_zoom();
        Ok(camera)
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn target(&self) -> &FocusTarget {
        &self.target
    }

    /// Switch to a new target and start a transition from the current view.
    pub fn retarget(&mut self, target: FocusTarget, mode: RetargetMode) -> Result<(), CameraError> {
        check_radius(target.radius)?;
        let from_look_at = self.look_at();
        let from_offset = self.current_offset();
        let previous = self.target.body;
        self.target = target;
        if mode == RetargetMode::FitToView {
            self.zoom_radii = self.config.fit_zoom_radii();
        }
        self.clamp_zoom();
        self.transition = (self.config.transition_seconds > 0.0).then_some(Transition {
            from_look_at,
            from_offset,
            elapsed: 0.0,
        });
        debug!(
            from = %previous,
            to = %target.body,
            ?mode,
            zoom_radii = self.zoom_radii,
            "camera retarget"
        );
        Ok(())
    }

    /// Advance the transition clock by `dt` seconds of wall-clock time.
    pub fn advance(&mut self, dt: f64) {
        let duration = self.config.transition_seconds;
        if let Some(transition) = &mut self.transition {
            transition.elapsed += dt.max(0.0);
            if transition.elapsed >= duration {
                self.transition = None;
                debug!(body = %self.target.body, "camera transition finished");
            }
        }
    }

    /// Shift every stored scene-space point by `shift`. Call when the floating
    /// origin moves so the camera keeps its place relative to the bodies.
    pub fn rebase(&mut self, shift: &Vector3) {
        self.target.position = vector::add(&self.target.position, shift);
        if let Some(transition) = &mut self.transition {
            transition.from_look_at = vector::add(&transition.from_look_at, shift);
        }
    }

    /// Update the target's position and radius without a transition, e.g.
    /// after the scene was re-resolved for a new epoch.
    pub fn track(&mut self, target: FocusTarget) -> Result<(), CameraError> {
        check_radius(target.radius)?;
        self.target = target;
        self.clamp_zoom();
        Ok(())
    }

    /// Rotate around the target. Polar angle stays off the poles.
    pub fn orbit(&mut self, delta_azimuth: f64, delta_polar: f64) {
        self.azimuth = (self.azimuth + delta_azimuth).rem_euclid(std::f64::consts::TAU);
        self.polar = (self.polar + delta_polar)
            .clamp(POLAR_MARGIN, std::f64::consts::PI - POLAR_MARGIN);
    }

    /// Multiply camera distance by `factor`, clamped to the distance limits.
    /// Returns the new distance.
    pub fn zoom_by(&mut self, factor: f64) -> Result<f64, CameraError> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(CameraError::InvalidZoom { factor });
        }
        self.zoom_radii *= factor;
        self.clamp_zoom();
        Ok(self.distance())
    }

    pub fn state(&self) -> CameraSemanticState {
        CameraSemanticState {
            target: self.target.body,
            zoom_radii: self.zoom_radii,
            azimuth: self.azimuth,
            polar: self.polar,
        }
    }

    /// Settled camera distance from the target.
    pub fn distance(&self) -> f64 {
        self.zoom_radii * self.target.radius
    }

    /// Point the camera looks at, animated during a transition.
    pub fn look_at(&self) -> Vector3 {
        match &self.transition {
            Some(transition) => lerp(
                &transition.from_look_at,
                &self.target.position,
                self.progress(transition),
            ),
            None => self.target.position,
        }
    }

    /// Camera position, animated during a transition.
    pub fn position(&self) -> Vector3 {
        vector::add(&self.look_at(), &self.current_offset())
    }

    pub fn clip_planes(&self) -> ClipPlanes {
        let radius = self.target.radius;
        ClipPlanes {
            near: (radius / NEAR_RADIUS_DIVISOR).max(NEAR_EPSILON),
            far: FAR_FLOOR.max(radius * FAR_RADIUS_FACTOR),
        }
    }

    /// `(min, max)` camera distance for orbit controls.
    pub fn distance_limits(&self) -> (f64, f64) {
        let radius = self.target.radius;
        let min = (radius * self.config.min_distance_radii)
            .max(self.target.min_distance.unwrap_or(0.0));
        let max = (radius * self.config.max_distance_radii).max(min);
        (min, max)
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    fn progress(&self, transition: &Transition) -> f64 {
        let duration = self.config.transition_seconds;
        if duration <= 0.0 {
            return 1.0;
        }
        ease_in_out_quint(transition.elapsed / duration)
    }

    fn settled_offset(&self) -> Vector3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        vector::scale(
            &[sin_polar * cos_az, sin_polar * sin_az, cos_polar],
            self.distance(),
        )
    }

    fn current_offset(&self) -> Vector3 {
        let settled = self.settled_offset();
        match &self.transition {
            Some(transition) => lerp(&transition.from_offset, &settled, self.progress(transition)),
            None => settled,
        }
    }

    fn clamp_zoom(&mut self) {
        let (min, max) = self.distance_limits();
        let radius = self.target.radius;
        self.zoom_radii = self.zoom_radii.clamp(min / radius, max / radius);
    }
}

fn check_radius(radius: f64) -> Result<(), CameraError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(CameraError::InvalidRadius { radius })
    }
}

fn lerp(a: &Vector3, b: &Vector3, t: f64) -> Vector3 {
    vector::add(a, &vector::scale(&vector::sub(b, a), t))
}
