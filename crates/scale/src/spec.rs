use serde::{Deserialize, Serialize};
use worldline_core::BodyId;
use worldline_core::vector::{self, Vector3};

use crate::ScaleError;

/// How heliocentric distance maps to scene distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DistanceScaleSpec {
    /// `au * au_to_scene`. Exact proportions.
    Linear { au_to_scene: f64 },
    /// `log10(1 + au * scale) * multiplier`.
    Log10 { scale: f64, multiplier: f64 },
    /// Linear out to `inner_radius_au`, then log-compressed, joined without a jump.
    Piecewise {
        inner_radius_au: f64,
        inner_scale: f64,
        outer_log_scale: f64,
        outer_multiplier: f64,
    },
}

/// How physical radius maps to scene radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SizeScaleSpec {
    /// `km * km_to_scene`.
    Physical { km_to_scene: f64 },
    /// `km * km_to_scene * factor`.
    Exaggerated { km_to_scene: f64, factor: f64 },
    /// `max(multiplier * (km / R_earth)^exponent, min_radius)`.
    Compressed {
        exponent: f64,
        multiplier: f64,
        min_radius: f64,
    },
}

/// A distance spec and a size spec chosen together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderMapping {
    pub distance: DistanceScaleSpec,
    pub size: SizeScaleSpec,
}

impl RenderMapping {
    pub fn validate(&self) -> Result<(), ScaleError> {
        self.distance.validate()?;
        self.size.validate()
    }

    pub fn map_distance(&self, au: f64) -> Result<f64, ScaleError> {
        map_distance(au, &self.distance)
    }

    pub fn map_radius(&self, km: f64) -> Result<f64, ScaleError> {
        map_radius(km, &self.size)
    }

    /// Scene radius of a catalogued body.
    pub fn body_radius(&self, body: BodyId) -> Result<f64, ScaleError> {
        map_radius(body.radius_km(), &self.size)
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ScaleError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ScaleError::InvalidParameter { name, value })
    }
}

impl DistanceScaleSpec {
    pub fn validate(&self) -> Result<(), ScaleError> {
        match *self {
            DistanceScaleSpec::Linear { au_to_scene } => positive("au_to_scene", au_to_scene),
            DistanceScaleSpec::Log10 { scale, multiplier } => {
                positive("scale", scale)?;
                positive("multiplier", multiplier)
            }
            DistanceScaleSpec::Piecewise {
                inner_radius_au,
                inner_scale,
                outer_log_scale,
                outer_multiplier,
            } => {
                positive("inner_radius_au", inner_radius_au)?;
                positive("inner_scale", inner_scale)?;
                positive("outer_log_scale", outer_log_scale)?;
                positive("outer_multiplier", outer_multiplier)
            }
        }
    }
}

impl SizeScaleSpec {
    pub fn validate(&self) -> Result<(), ScaleError> {
        match *self {
            SizeScaleSpec::Physical { km_to_scene } => positive("km_to_scene", km_to_scene),
            SizeScaleSpec::Exaggerated {
                km_to_scene,
                factor,
            } => {
                positive("km_to_scene", km_to_scene)?;
                positive("factor", factor)
            }
            SizeScaleSpec::Compressed {
                exponent,
                multiplier,
                min_radius,
            } => {
                positive("exponent", exponent)?;
                positive("multiplier", multiplier)?;
                if min_radius.is_finite() && min_radius >= 0.0 {
                    Ok(())
                } else {
                    Err(ScaleError::InvalidParameter {
                        name: "min_radius",
                        value: min_radius,
                    })
                }
            }
        }
    }
}

/// Scene distance for `au`. Zero maps to zero and the mapping is strictly
/// increasing for every valid spec.
pub fn map_distance(au: f64, spec: &DistanceScaleSpec) -> Result<f64, ScaleError> {
    if !(au.is_finite() && au >= 0.0) {
        return Err(ScaleError::InvalidDistance { au });
    }
    spec.validate()?;
    Ok(match *spec {
        DistanceScaleSpec::Linear { au_to_scene } => au * au_to_scene,
        DistanceScaleSpec::Log10 { scale, multiplier } => log10_1p(au * scale) * multiplier,
        DistanceScaleSpec::Piecewise {
            inner_radius_au,
            inner_scale,
            outer_log_scale,
            outer_multiplier,
        } => {
            if au <= inner_radius_au {
                au * inner_scale
            } else {
                let seam = inner_radius_au * inner_scale;
                let beyond = au - inner_radius_au;
                seam + log10_1p(beyond * outer_log_scale) * outer_multiplier
            }
        }
    })
}

// log10(1 + x) without losing precision for tiny x (satellite offsets).
fn log10_1p(x: f64) -> f64 {
    x.ln_1p() / std::f64::consts::LN_10
}

/// Scene radius for a body of physical radius `km`.
pub fn map_radius(km: f64, spec: &SizeScaleSpec) -> Result<f64, ScaleError> {
    if !(km.is_finite() && km >= 0.0) {
        return Err(ScaleError::InvalidRadius { km });
    }
    spec.validate()?;
    Ok(match *spec {
        SizeScaleSpec::Physical { km_to_scene } => km * km_to_scene,
        SizeScaleSpec::Exaggerated {
            km_to_scene,
            factor,
        } => km * km_to_scene * factor,
        SizeScaleSpec::Compressed {
            exponent,
            multiplier,
            min_radius,
        } => (multiplier * (km / BodyId::Earth.radius_km()).powf(exponent)).max(min_radius),
    })
}

/// Map an AU position vector: direction is kept, magnitude goes through `spec`.
pub fn map_position(
    position_au: &Vector3,
    spec: &DistanceScaleSpec,
) -> Result<Vector3, ScaleError> {
    let r = vector::norm(position_au);
    if r == 0.0 {
        spec.validate()?;
        return Ok(vector::ZERO);
    }
    let mapped = map_distance(r, spec)?;
    Ok(vector::scale(position_au, mapped / r))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: DistanceScaleSpec = DistanceScaleSpec::Log10 {
        scale: 3.0,
        multiplier: 60.0,
    };
    const PIECEWISE: DistanceScaleSpec = DistanceScaleSpec::Piecewise {
        inner_radius_au: 2.0,
        inner_scale: 100.0,
        outer_log_scale: 1.0,
        outer_multiplier: 300.0,
    };

    fn sample_grid() -> Vec<f64> {
        let mut grid = vec![0.0, 1e-9, 1e-6, 1e-3];
        grid.extend((1..=4_000).map(|i| f64::from(i) * 0.0125));
        grid
    }

    #[test]
    fn zero_maps_to_zero() {
        for spec in [LOG, PIECEWISE, DistanceScaleSpec::Linear { au_to_scene: 7.0 }] {
            assert_eq!(map_distance(0.0, &spec).unwrap(), 0.0);
        }
    }

    #[test]
    fn compressed_specs_are_strictly_increasing() {
        for spec in [LOG, PIECEWISE] {
            let grid = sample_grid();
            for pair in grid.windows(2) {
                let a = map_distance(pair[0], &spec).unwrap();
                let b = map_distance(pair[1], &spec).unwrap();
                assert!(b > a, "{spec:?} not increasing at {} AU", pair[1]);
            }
        }
    }

    #[test]
    fn piecewise_is_continuous_at_seam() {
        let seam = 2.0;
        let below = map_distance(seam, &PIECEWISE).unwrap();
        let just_above = map_distance(seam + 1e-12, &PIECEWISE).unwrap();
        let just_below = map_distance(seam - 1e-12, &PIECEWISE).unwrap();
        assert!((just_above - below).abs() < 1e-8);
        assert!((below - just_below).abs() < 1e-8);
        assert_eq!(below, 200.0);
    }

    #[test]
    fn linear_preserves_ratios() {
        let spec = DistanceScaleSpec::Linear { au_to_scene: 12.5 };
        let a = map_distance(1.0, &spec).unwrap();
        let b = map_distance(30.0, &spec).unwrap();
        assert_eq!(b / a, 30.0);
    }

    #[test]
    fn rejects_negative_and_non_finite_inputs() {
        assert_eq!(
            map_distance(-0.5, &LOG),
            Err(ScaleError::InvalidDistance { au: -0.5 })
        );
        assert!(map_distance(f64::NAN, &LOG).is_err());
        let size = SizeScaleSpec::Physical { km_to_scene: 1.0 };
        assert!(matches!(
            map_radius(-1.0, &size),
            Err(ScaleError::InvalidRadius { .. })
        ));
    }

    #[test]
    fn rejects_degenerate_parameters() {
        let bad = DistanceScaleSpec::Log10 {
            scale: 0.0,
            multiplier: 1.0,
        };
        assert_eq!(
            map_distance(1.0, &bad),
            Err(ScaleError::InvalidParameter {
                name: "scale",
                value: 0.0
            })
        );
    }

    #[test]
    fn compressed_sizes_keep_order_and_floor() {
        let spec = SizeScaleSpec::Compressed {
            exponent: 0.45,
            multiplier: 1.0,
            min_radius: 0.3,
        };
        let earth = map_radius(BodyId::Earth.radius_km(), &spec).unwrap();
        let jupiter = map_radius(BodyId::Jupiter.radius_km(), &spec).unwrap();
        let pebble = map_radius(1.0, &spec).unwrap();
        assert!((earth - 1.0).abs() < 1e-12);
        assert!(jupiter > earth);
        assert_eq!(pebble, 0.3);
    }

    #[test]
    fn map_position_keeps_direction() {
        let mapped = map_position(&[3.0, 4.0, 0.0], &LOG).unwrap();
        let expected_len = map_distance(5.0, &LOG).unwrap();
        assert!((vector::norm(&mapped) - expected_len).abs() < 1e-12);
        assert!((mapped[0] / mapped[1] - 0.75).abs() < 1e-12);
        assert_eq!(map_position(&vector::ZERO, &LOG).unwrap(), vector::ZERO);
    }

    #[test]
    fn specs_deserialize_from_tagged_json() {
        let spec: DistanceScaleSpec = serde_json::from_str(
            r#"{"type":"piecewise","inner_radius_au":1.5,"inner_scale":10.0,"outer_log_scale":2.0,"outer_multiplier":50.0}"#,
        )
        .unwrap();
        assert!(matches!(
            spec,
            DistanceScaleSpec::Piecewise { inner_radius_au, .. } if inner_radius_au == 1.5
        ));
        let log: DistanceScaleSpec =
            serde_json::from_str(r#"{"type":"log10","scale":1.0,"multiplier":2.0}"#).unwrap();
        assert_eq!(
            log,
            DistanceScaleSpec::Log10 {
                scale: 1.0,
                multiplier: 2.0
            }
        );
    }
}
