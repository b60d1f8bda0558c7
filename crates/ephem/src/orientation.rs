//! Body orientation from the IAU WGCCRE rotation models.
//!
//! Only the secular (linear) terms are kept. Periodic nutation terms, which
//! matter mostly for the Moon and Neptune, are dropped.

use serde::Serialize;
use worldline_core::vector::Vector3;
use worldline_core::{BodyId, Epoch};

use worldline_core::vector;

use crate::frames::equatorial_to_ecliptic;

/// North pole direction and prime-meridian angle at an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyOrientation {
    /// Unit vector in ecliptic J2000.
    pub north_pole: Vector3,
    /// Prime-meridian angle W in degrees, normalised to `[0, 360)`.
    pub rotation_angle_deg: f64,
}

impl BodyOrientation {
    /// Recover pole and prime meridian from a rotation matrix taking equatorial
    /// J2000 vectors into the body-fixed frame. Rows are the body axes.
    pub fn from_body_frame_matrix(rotate: &[[f64; 3]; 3]) -> Self {
        let x_axis = rotate[0];
        let pole = rotate[2];
        // Ascending node of the body equator on the J2000 equator.
        let node = vector::normalize(&vector::cross(&vector::UNIT_Z, &pole))
            .unwrap_or([0.0, 1.0, 0.0]);
        let quadrature = vector::cross(&pole, &node);
        let w = vector::dot(&x_axis, &quadrature)
            .atan2(vector::dot(&x_axis, &node))
            .to_degrees();
        BodyOrientation {
            north_pole: equatorial_to_ecliptic(&pole),
            rotation_angle_deg: w.rem_euclid(360.0),
        }
    }
}

/// Linear IAU rotation elements. Rates are per Julian century for the pole and
/// per day for the prime meridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationModel {
    pub pole_ra_deg: f64,
    pub pole_ra_rate: f64,
    pub pole_dec_deg: f64,
    pub pole_dec_rate: f64,
    pub meridian_deg: f64,
    pub meridian_rate_deg_per_day: f64,
}

impl RotationModel {
    const fn new(ra: (f64, f64), dec: (f64, f64), w: (f64, f64)) -> Self {
        Self {
            pole_ra_deg: ra.0,
            pole_ra_rate: ra.1,
            pole_dec_deg: dec.0,
            pole_dec_rate: dec.1,
            meridian_deg: w.0,
            meridian_rate_deg_per_day: w.1,
        }
    }

    /// Evaluate the model at `epoch`.
    pub fn orientation(&self, epoch: Epoch) -> BodyOrientation {
        let t = epoch.centuries_since_j2000();
        let d = epoch.days_since_j2000();
        let ra = (self.pole_ra_deg + self.pole_ra_rate * t).to_radians();
        let dec = (self.pole_dec_deg + self.pole_dec_rate * t).to_radians();
        let pole_equatorial = [dec.cos() * ra.cos(), dec.cos() * ra.sin(), dec.sin()];
        BodyOrientation {
            north_pole: equatorial_to_ecliptic(&pole_equatorial),
            rotation_angle_deg: (self.meridian_deg + self.meridian_rate_deg_per_day * d)
                .rem_euclid(360.0),
        }
    }
}

/// IAU WGCCRE 2015 rotation elements for `body`.
pub fn rotation_model(body: BodyId) -> RotationModel {
    match body {
        BodyId::Sun => RotationModel::new((286.13, 0.0), (63.87, 0.0), (84.176, 14.184_400_0)),
        BodyId::Mercury => RotationModel::new(
            (281.0103, -0.0328),
            (61.4155, -0.0049),
            (329.5988, 6.138_510_8),
        ),
        BodyId::Venus => RotationModel::new((272.76, 0.0), (67.16, 0.0), (160.20, -1.481_368_8)),
        BodyId::Earth => {
            RotationModel::new((0.00, -0.641), (90.00, -0.557), (190.147, 360.985_623_5))
        }
        BodyId::Moon => RotationModel::new(
            (269.9949, 0.0031),
            (66.5392, 0.0130),
            (38.3213, 13.176_358_15),
        ),
        BodyId::Mars => RotationModel::new(
            (317.269_202, -0.109_275_47),
            (54.432_516, -0.058_271_05),
            (176.049_863, 350.891_982_443_297),
        ),
        BodyId::Jupiter => RotationModel::new(
            (268.056_595, -0.006_499),
            (64.495_303, 0.002_413),
            (284.95, 870.536_000_0),
        ),
        BodyId::Saturn => {
            RotationModel::new((40.589, -0.036), (83.537, -0.004), (38.90, 810.793_902_4))
        }
        BodyId::Uranus => {
            RotationModel::new((257.311, 0.0), (-15.175, 0.0), (203.81, -501.160_092_8))
        }
        BodyId::Neptune => {
            RotationModel::new((299.36, 0.0), (43.46, 0.0), (249.978, 541.139_775_7))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worldline_core::constants::OBLIQUITY_J2000_DEG;

    #[test]
    fn poles_are_unit_vectors() {
        let epoch = Epoch::J2000.add_days(12_345.6);
        for body in BodyId::ALL {
            let o = rotation_model(body).orientation(epoch);
            assert!((vector::norm(&o.north_pole) - 1.0).abs() < 1e-12, "{body}");
            assert!((0.0..360.0).contains(&o.rotation_angle_deg), "{body}");
        }
    }

    #[test]
    fn earth_pole_is_tilted_by_obliquity() {
        let o = rotation_model(BodyId::Earth).orientation(Epoch::J2000);
        let tilt = o.north_pole[2].acos().to_degrees();
        assert!((tilt - OBLIQUITY_J2000_DEG).abs() < 1e-6);
    }

    #[test]
    fn uranus_pole_lies_near_the_ecliptic() {
        // IAU north is the invariable-plane side, so retrograde Uranus reads
        // ~82° rather than ~98°.
        let o = rotation_model(BodyId::Uranus).orientation(Epoch::J2000);
        let tilt = o.north_pole[2].acos().to_degrees();
        assert!((80.0..85.0).contains(&tilt), "tilt {tilt}");
    }

    #[test]
    fn earth_meridian_advances_one_sidereal_turn_per_day() {
        let model = rotation_model(BodyId::Earth);
        let a = model.orientation(Epoch::J2000).rotation_angle_deg;
        let b = model.orientation(Epoch::J2000.add_days(1.0)).rotation_angle_deg;
        let advance = (b - a).rem_euclid(360.0);
        assert!((advance - 0.985_623_5).abs() < 1e-6);
    }

    fn frame_rotation(axis: usize, angle_deg: f64) -> [[f64; 3]; 3] {
        let (s, c) = angle_deg.to_radians().sin_cos();
        match axis {
            1 => [[1.0, 0.0, 0.0], [0.0, c, s], [0.0, -s, c]],
            _ => [[c, s, 0.0], [-s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    fn multiply(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| a[i][k] * b[k][j]).sum();
            }
        }
        out
    }

    #[test]
    fn body_frame_matrix_recovers_pole_and_meridian() {
        for body in [BodyId::Mars, BodyId::Jupiter, BodyId::Uranus] {
            let model = rotation_model(body);
            let expected = model.orientation(Epoch::J2000);
            // R3(W) R1(90° - dec) R3(90° + ra), the IAU body-fixed construction.
            let rotate = multiply(
                &frame_rotation(3, expected.rotation_angle_deg),
                &multiply(
                    &frame_rotation(1, 90.0 - model.pole_dec_deg),
                    &frame_rotation(3, 90.0 + model.pole_ra_deg),
                ),
            );
            let recovered = BodyOrientation::from_body_frame_matrix(&rotate);
            let pole_error =
                vector::norm(&vector::sub(&recovered.north_pole, &expected.north_pole));
            assert!(pole_error < 1e-12, "{body} pole off by {pole_error}");
            let dw =
                (recovered.rotation_angle_deg - expected.rotation_angle_deg).rem_euclid(360.0);
            assert!(dw.min(360.0 - dw) < 1e-9, "{body} meridian off by {dw}");
        }
    }

    #[test]
    fn body_frame_matrix_handles_pole_on_the_equatorial_axis() {
        let rotate = multiply(&frame_rotation(3, 190.147), &frame_rotation(3, 90.0));
        let recovered = BodyOrientation::from_body_frame_matrix(&rotate);
        assert!((recovered.rotation_angle_deg - 190.147).abs() < 1e-9);
    }
}
