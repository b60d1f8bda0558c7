//! Configuration models and loaders for the worldline viewer.
//!
//! Records here are plain data. Turning names into bodies and presets, and
//! checking numeric ranges, happens where the runtime types live.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level viewer configuration. Every field has a default, so an empty
/// file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Built-in preset key or the `name` of an entry in `mappings`.
    pub preset: String,
    pub focus: String,
    pub orbit_segments: usize,
    pub camera: CameraSettings,
    pub observer: ObserverSettings,
    pub distance_strategy: DistanceStrategyConfig,
    pub integration_step_days: f64,
    pub mappings: Vec<MappingConfig>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            preset: "schoolModel".to_string(),
            focus: "Earth".to_string(),
            orbit_segments: 128,
            camera: CameraSettings::default(),
            observer: ObserverSettings::default(),
            distance_strategy: DistanceStrategyConfig::default(),
            integration_step_days: 1.0,
            mappings: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_deg: f64,
    pub fit_coverage: f64,
    pub transition_seconds: f64,
    pub min_distance_radii: f64,
    pub max_distance_radii: f64,
}

impl Default for CameraSettings {
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

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverSettings {
    pub latitude_deg: f64,
    /// Date-like string; RFC 3339 or `YYYY-MM-DD`.
    pub birth: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DistanceStrategyConfig {
    #[default]
    Rectilinear,
    EphemerisIntegrated,
}

/// A named distance/size spec pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    pub name: String,
    pub distance: DistanceScaleConfig,
    pub size: SizeScaleConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DistanceScaleConfig {
    #[serde(rename = "linear")]
    Linear { au_to_scene: f64 },
    #[serde(rename = "log10")]
    Log10 { scale: f64, multiplier: f64 },
    #[serde(rename = "piecewise")]
    Piecewise {
        inner_radius_au: f64,
        inner_scale: f64,
        outer_log_scale: f64,
        outer_multiplier: f64,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SizeScaleConfig {
    #[serde(rename = "physical")]
    Physical { km_to_scene: f64 },
    #[serde(rename = "exaggerated")]
    Exaggerated { km_to_scene: f64, factor: f64 },
    #[serde(rename = "compressed")]
    Compressed {
        exponent: f64,
        multiplier: f64,
        #[serde(default)]
        min_radius: f64,
    },
    #[serde(other)]
    Unsupported,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported configuration format: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Load a viewer configuration from a `.yaml`, `.yml` or `.toml` file.
pub fn load_viewer_config<P: AsRef<Path>>(path: P) -> Result<ViewerConfig, ConfigError> {
    let path = path.as_ref();
    match Format::of(path) {
        Some(Format::Toml) => {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        }
        Some(Format::Yaml) => {
            let reader = File::open(path)?;
            Ok(serde_yaml::from_reader(reader)?)
        }
        None => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Load custom mappings. A directory yields one mapping per `*.toml` file in
/// sorted order; a YAML file holds a list; a TOML file holds one mapping.
pub fn load_mapping_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<MappingConfig>, ConfigError> {
    load_records(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Toml,
}

impl Format {
    fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Some(Format::Toml),
            Some("yaml" | "yml") => Some(Format::Yaml),
            _ => None,
        }
    }
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        return read_dir_records(path);
    }
    match Format::of(path) {
        Some(Format::Toml) => {
            let contents = std::fs::read_to_string(path)?;
            let record: T = toml::from_str(&contents)?;
            Ok(vec![record])
        }
        Some(Format::Yaml) => {
            let reader = File::open(path)?;
            Ok(serde_yaml::from_reader(reader)?)
        }
        None => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| Format::of(path) == Some(Format::Toml))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn empty_yaml_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.yaml");
        fs::write(&path, "{}\n").unwrap();
        let config = load_viewer_config(&path).unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.preset, "schoolModel");
        assert_eq!(config.orbit_segments, 128);
        assert_eq!(config.camera.fov_deg, 50.0);
    }

    #[test]
    fn yaml_overrides_nested_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.yml");
        fs::write(
            &path,
            r#"
preset: trueSizes
focus: jupiter
camera:
  fov_deg: 35
observer:
  latitude_deg: 51.5
  birth: "1990-01-01"
distance_strategy: ephemerisIntegrated
mappings:
  - name: wide
    distance: { type: log10, scale: 1.0, multiplier: 40.0 }
    size: { type: exaggerated, km_to_scene: 0.0001, factor: 50.0 }
"#,
        )
        .unwrap();
        let config = load_viewer_config(&path).unwrap();
        assert_eq!(config.focus, "jupiter");
        assert_eq!(config.camera.fov_deg, 35.0);
        assert_eq!(config.camera.fit_coverage, 0.6);
        assert_eq!(config.observer.birth.as_deref(), Some("1990-01-01"));
        assert_eq!(config.distance_strategy, DistanceStrategyConfig::EphemerisIntegrated);
        assert_eq!(
            config.mappings[0].distance,
            DistanceScaleConfig::Log10 {
                scale: 1.0,
                multiplier: 40.0
            }
        );
    }

    #[test]
    fn toml_config_and_unknown_spec_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.toml");
        fs::write(
            &path,
            r#"
preset = "spiral"
orbit_segments = 32

[[mappings]]
name = "spiral"
distance = { type = "spiral", turns = 3.0 }
size = { type = "compressed", exponent = 0.5, multiplier = 2.0 }
"#,
        )
        .unwrap();
        let config = load_viewer_config(&path).unwrap();
        assert_eq!(config.orbit_segments, 32);
        assert_eq!(config.mappings[0].distance, DistanceScaleConfig::Unsupported);
        assert_eq!(
            config.mappings[0].size,
            SizeScaleConfig::Compressed {
                exponent: 0.5,
                multiplier: 2.0,
                min_radius: 0.0
            }
        );
    }

    #[test]
    fn mapping_catalog_reads_sorted_toml_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("b_linear.toml"),
            "name = \"b\"\ndistance = { type = \"linear\", au_to_scene = 10.0 }\nsize = { type = \"physical\", km_to_scene = 0.001 }\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("a_piecewise.toml"),
            "name = \"a\"\ndistance = { type = \"piecewise\", inner_radius_au = 1.0, inner_scale = 5.0, outer_log_scale = 1.0, outer_multiplier = 9.0 }\nsize = { type = \"physical\", km_to_scene = 0.001 }\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        let catalog = load_mapping_catalog(dir.path()).unwrap();
        let names: Vec<&str> = catalog.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viewer.json");
        fs::write(&path, "{}").unwrap();
        assert!(matches!(
            load_viewer_config(&path),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }
}
