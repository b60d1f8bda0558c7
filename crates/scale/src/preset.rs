use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use worldline_core::BodyId;
use worldline_core::constants::AU_KM;

use crate::spec::{DistanceScaleSpec, RenderMapping, SizeScaleSpec};

/// Named mappings the viewer ships with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Preset {
    /// Log distances, compressed sizes. Everything visible at once.
    #[default]
    SchoolModel,
    /// Sizes at a common physical scale, distances linear then log.
    TrueSizes,
    /// Distances and sizes at one physical scale.
    TruePhysical,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown preset `{0}` (expected schoolModel, trueSizes or truePhysical)")]
pub struct UnknownPreset(pub String);

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::SchoolModel, Preset::TrueSizes, Preset::TruePhysical];

    pub fn key(self) -> &'static str {
        match self {
            Preset::SchoolModel => "schoolModel",
            Preset::TrueSizes => "trueSizes",
            Preset::TruePhysical => "truePhysical",
        }
    }

    pub fn mapping(self) -> RenderMapping {
        match self {
            Preset::SchoolModel => RenderMapping {
                distance: DistanceScaleSpec::Log10 {
                    scale: 3.0,
                    multiplier: 60.0,
                },
                size: SizeScaleSpec::Compressed {
                    exponent: 0.45,
                    multiplier: 1.0,
                    min_radius: 0.3,
                },
            },
            Preset::TrueSizes => RenderMapping {
                distance: DistanceScaleSpec::Piecewise {
                    inner_radius_au: 2.0,
                    inner_scale: 100.0,
                    outer_log_scale: 1.0,
                    outer_multiplier: 300.0,
                },
                // Earth is 0.1 scene units across the radius.
                size: SizeScaleSpec::Physical {
                    km_to_scene: 0.1 / BodyId::Earth.radius_km(),
                },
            },
            Preset::TruePhysical => RenderMapping {
                distance: DistanceScaleSpec::Linear {
                    au_to_scene: 1000.0,
                },
                size: SizeScaleSpec::Physical {
                    km_to_scene: 1000.0 / AU_KM,
                },
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Preset::ALL
            .into_iter()
            .find(|preset| preset.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownPreset(wanted.to_string()))
    }
}
