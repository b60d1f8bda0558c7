//! The closed set of bodies the engine knows how to place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bodies rendered by the visualizer. The Moon is positioned relative to Earth,
/// every other body relative to the Sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BodyId {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

/// Returned when a name does not match any [`BodyId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown body `{0}`")]
pub struct UnknownBody(pub String);

impl BodyId {
    /// All bodies, Sun first, then outward with the Moon after Earth.
    pub const ALL: [BodyId; 10] = [
        BodyId::Sun,
        BodyId::Mercury,
        BodyId::Venus,
        BodyId::Earth,
        BodyId::Moon,
        BodyId::Mars,
        BodyId::Jupiter,
        BodyId::Saturn,
        BodyId::Uranus,
        BodyId::Neptune,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BodyId::Sun => "Sun",
            BodyId::Mercury => "Mercury",
            BodyId::Venus => "Venus",
            BodyId::Earth => "Earth",
            BodyId::Moon => "Moon",
            BodyId::Mars => "Mars",
            BodyId::Jupiter => "Jupiter",
            BodyId::Saturn => "Saturn",
            BodyId::Uranus => "Uranus",
            BodyId::Neptune => "Neptune",
        }
    }

    /// The body this one is positioned relative to.
    pub fn parent(self) -> Option<BodyId> {
        match self {
            BodyId::Sun => None,
            BodyId::Moon => Some(BodyId::Earth),
            BodyId::Mercury
            | BodyId::Venus
            | BodyId::Earth
            | BodyId::Mars
            | BodyId::Jupiter
            | BodyId::Saturn
            | BodyId::Uranus
            | BodyId::Neptune => Some(BodyId::Sun),
        }
    }

    /// Volumetric mean radius in km (IAU WGCCRE 2015 / NASA fact sheets).
    pub fn radius_km(self) -> f64 {
        match self {
            BodyId::Sun => 695_700.0,
            BodyId::Mercury => 2_439.7,
            BodyId::Venus => 6_051.8,
            BodyId::Earth => 6_371.0,
            BodyId::Moon => 1_737.4,
            BodyId::Mars => 3_389.5,
            BodyId::Jupiter => 69_911.0,
            BodyId::Saturn => 58_232.0,
            BodyId::Uranus => 25_362.0,
            BodyId::Neptune => 24_622.0,
        }
    }

    /// Display colour as `0xRRGGBB`.
    pub fn color(self) -> u32 {
        match self {
            BodyId::Sun => 0xFDB813,
            BodyId::Mercury => 0x9E9E9E,
            BodyId::Venus => 0xE8CDA2,
            BodyId::Earth => 0x2E6FD8,
            BodyId::Moon => 0xC8C8C8,
            BodyId::Mars => 0xC1440E,
            BodyId::Jupiter => 0xD8CA9D,
            BodyId::Saturn => 0xE3D9B0,
            BodyId::Uranus => 0x9FD5E0,
            BodyId::Neptune => 0x3F54BA,
        }
    }

    pub fn is_planet(self) -> bool {
        !matches!(self, BodyId::Sun | BodyId::Moon)
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BodyId {
    type Err = UnknownBody;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        BodyId::ALL
            .into_iter()
            .find(|body| body.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownBody(s.to_string()))
    }
}
