//! Configuration records turned into runtime types.

use std::path::Path;

use worldline_camera::CameraConfig;
use worldline_config::{
    CameraSettings, DistanceScaleConfig, DistanceStrategyConfig, MappingConfig, SizeScaleConfig,
    ViewerConfig, load_viewer_config,
};
use worldline_core::BodyId;
use worldline_motion::DistanceStrategy;
use worldline_scale::{DistanceScaleSpec, Preset, RenderMapping, SizeScaleSpec};

use crate::ViewerError;

/// Everything a [`crate::ViewerSession`] needs, validated.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSettings {
    /// Preset key or custom mapping name.
    pub mapping_name: String,
    pub mapping: RenderMapping,
    pub focus: BodyId,
    pub orbit_segments: usize,
    pub camera: CameraConfig,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        let preset = Preset::default();
        Self {
            mapping_name: preset.key().to_string(),
            mapping: preset.mapping(),
            focus: BodyId::Earth,
            orbit_segments: worldline_orbits::DEFAULT_SEGMENTS,
            camera: CameraConfig::default(),
        }
    }
}

impl ViewerSettings {
    pub fn from_config(config: &ViewerConfig) -> Result<Self, ViewerError> {
        let (mapping_name, mapping) = resolve_mapping(&config.preset, &config.mappings)?;
        Ok(Self {
            mapping_name,
            mapping,
            focus: config.focus.parse()?,
            orbit_segments: config.orbit_segments,
            camera: camera_config(&config.camera)?,
        })
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ViewerError> {
        Self::from_config(&load_viewer_config(path)?)
    }
}

/// Built-in presets are matched first, then custom mappings by exact name.
pub fn resolve_mapping(
    name: &str,
    custom: &[MappingConfig],
) -> Result<(String, RenderMapping), ViewerError> {
    if let Ok(preset) = name.parse::<Preset>() {
        return Ok((preset.key().to_string(), preset.mapping()));
    }
    let config = custom
        .iter()
        .find(|mapping| mapping.name == name)
        .ok_or_else(|| ViewerError::UnknownMapping {
            name: name.to_string(),
        })?;
    Ok((config.name.clone(), render_mapping(config)?))
}

pub fn render_mapping(config: &MappingConfig) -> Result<RenderMapping, ViewerError> {
    let unsupported = || ViewerError::UnsupportedScale {
        mapping: config.name.clone(),
    };
    let distance = match config.distance {
        DistanceScaleConfig::Linear { au_to_scene } => DistanceScaleSpec::Linear { au_to_scene },
        DistanceScaleConfig::Log10 { scale, multiplier } => {
            DistanceScaleSpec::Log10 { scale, multiplier }
        }
        DistanceScaleConfig::Piecewise {
            inner_radius_au,
            inner_scale,
            outer_log_scale,
            outer_multiplier,
        } => DistanceScaleSpec::Piecewise {
            inner_radius_au,
            inner_scale,
            outer_log_scale,
            outer_multiplier,
        },
        DistanceScaleConfig::Unsupported => return Err(unsupported()),
    };
    let size = match config.size {
        SizeScaleConfig::Physical { km_to_scene } => SizeScaleSpec::Physical { km_to_scene },
        SizeScaleConfig::Exaggerated {
            km_to_scene,
            factor,
        } => SizeScaleSpec::Exaggerated {
            km_to_scene,
            factor,
        },
        SizeScaleConfig::Compressed {
            exponent,
            multiplier,
            min_radius,
        } => SizeScaleSpec::Compressed {
            exponent,
            multiplier,
            min_radius,
        },
        SizeScaleConfig::Unsupported => return Err(unsupported()),
    };
    let mapping = RenderMapping { distance, size };
    mapping.validate()?;
    Ok(mapping)
}

pub fn camera_config(settings: &CameraSettings) -> Result<CameraConfig, ViewerError> {
    let config = CameraConfig {
        fov_deg: settings.fov_deg,
        fit_coverage: settings.fit_coverage,
        transition_seconds: settings.transition_seconds,
        min_distance_radii: settings.min_distance_radii,
        max_distance_radii: settings.max_distance_radii,
    };
    config.validate()?;
    Ok(config)
}

pub fn distance_strategy(config: &ViewerConfig) -> DistanceStrategy {
    match config.distance_strategy {
        DistanceStrategyConfig::Rectilinear => DistanceStrategy::Rectilinear,
        DistanceStrategyConfig::EphemerisIntegrated => DistanceStrategy::EphemerisIntegrated {
            step_days: config.integration_step_days,
        },
    }
}
