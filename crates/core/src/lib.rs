//! Core units, constants, bodies, and shared primitives for the Cosmic Worldline workspace.

pub mod body;
pub mod constants;
pub mod time;

pub use body::{BodyId, UnknownBody};
pub use constants::PhysicalConstant;
pub use time::Epoch;

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{AU_KM, KM_PER_KILOPARSEC};

    /// Convert astronomical units to kilometres.
    #[inline]
    pub fn au_to_km(v: f64) -> f64 {
        v * AU_KM
    }

    /// Convert kilometres to astronomical units.
    #[inline]
    pub fn km_to_au(v: f64) -> f64 {
        v / AU_KM
    }

    /// Convert kiloparsecs to kilometres.
    #[inline]
    pub fn kpc_to_km(v: f64) -> f64 {
        v * KM_PER_KILOPARSEC
    }

    /// Convert AU/day to km/s.
    #[inline]
    pub fn au_per_day_to_km_s(v: f64) -> f64 {
        v * AU_KM / super::constants::SECONDS_PER_DAY
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in AU, km, or scene units depending on context.
    pub type Vector3 = [f64; 3];

    pub const ZERO: Vector3 = [0.0, 0.0, 0.0];
    pub const UNIT_X: Vector3 = [1.0, 0.0, 0.0];
    pub const UNIT_Z: Vector3 = [0.0, 0.0, 1.0];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Right-handed cross product.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector3, s: f64) -> Vector3 {
        [v[0] * s, v[1] * s, v[2] * s]
    }

    /// Unit vector in the direction of `v`, or `None` when `v` is (numerically) zero
    /// or not finite.
    pub fn normalize(v: &Vector3) -> Option<Vector3> {
        let n = norm(v);
        if !n.is_finite() || n <= f64::EPSILON {
            return None;
        }
        Some(scale(v, 1.0 / n))
    }

    /// Rotate `v` about the X axis by `angle_rad`.
    #[inline]
    pub fn rotate_x(v: &Vector3, angle_rad: f64) -> Vector3 {
        let (s, c) = angle_rad.sin_cos();
        [v[0], c * v[1] - s * v[2], s * v[1] + c * v[2]]
    }

    /// Rotate `v` about the Z axis by `angle_rad`.
    #[inline]
    pub fn rotate_z(v: &Vector3, angle_rad: f64) -> Vector3 {
        let (s, c) = angle_rad.sin_cos();
        [c * v[0] - s * v[1], s * v[0] + c * v[1], v[2]]
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn cross_follows_right_hand_rule() {
            assert_eq!(cross(&UNIT_X, &[0.0, 1.0, 0.0]), UNIT_Z);
        }

        #[test]
        fn normalize_rejects_zero_vector() {
            assert!(normalize(&ZERO).is_none());
            let unit = normalize(&[3.0, 0.0, 4.0]).unwrap();
            assert!((norm(&unit) - 1.0).abs() < 1e-15);
        }

        #[test]
        fn rotations_preserve_length() {
            let v = [1.0, 2.0, 3.0];
            let rotated = rotate_z(&rotate_x(&v, 0.7), -1.3);
            assert!((norm(&rotated) - norm(&v)).abs() < 1e-12);
        }
    }
}
