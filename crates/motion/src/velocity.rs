//! Instantaneous or mean speed of an observer in each of four nested frames.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use worldline_core::Epoch;
use worldline_core::constants::{
    CMB_DIPOLE_GALACTIC_LATITUDE_DEG, CMB_DIPOLE_GALACTIC_LONGITUDE_DEG, CMB_DIPOLE_SPEED_KM_S,
    CMB_DIPOLE_SPEED_UNCERTAINTY_KM_S, EARTH_MEAN_ANOMALY_J2000_DEG,
    EARTH_MEAN_MOTION_DEG_PER_DAY, EARTH_MEAN_ORBITAL_SPEED_KM_S, EARTH_ORBITAL_ECCENTRICITY,
    EARTH_SEMI_MAJOR_AXIS_AU, GALACTIC_CENTER_DISTANCE_KPC,
    GALACTIC_CENTER_DISTANCE_UNCERTAINTY_KPC, GALACTIC_ORBITAL_SPEED_KM_S,
    GALACTIC_ORBITAL_SPEED_UNCERTAINTY_KM_S, GALACTIC_YEAR_MYR, LOCAL_GROUP_CMB_SPEED_KM_S,
    LOCAL_GROUP_CMB_SPEED_UNCERTAINTY_KM_S, LOCAL_GROUP_GALACTIC_LATITUDE_DEG,
    LOCAL_GROUP_GALACTIC_LONGITUDE_DEG, SIDEREAL_DAY_SECONDS, WGS84_ECCENTRICITY_SQUARED,
    WGS84_SEMI_MAJOR_AXIS_KM,
};

use crate::MotionError;

/// Nested frames, innermost first: spin ⊂ orbit ⊂ galaxy ⊂ cmb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceFrame {
    Spin,
    Orbit,
    Galaxy,
    Cmb,
}

impl ReferenceFrame {
    pub const ALL: [ReferenceFrame; 4] = [
        ReferenceFrame::Spin,
        ReferenceFrame::Orbit,
        ReferenceFrame::Galaxy,
        ReferenceFrame::Cmb,
    ];
}

/// Which rest frame the CMB speed is quoted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmbReference {
    /// Solar-system barycentre relative to the CMB.
    #[default]
    Barycentric,
    /// Local Group barycentre relative to the CMB.
    LocalGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityOptions {
    pub cmb_reference: CmbReference,
}

/// Frame-specific context shown next to a speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrameMetadata {
    Spin {
        latitude_deg: f64,
        parallel_radius_km: f64,
        angular_velocity_rad_s: f64,
    },
    Orbit {
        eccentricity: f64,
        semi_major_axis_au: f64,
        perihelion_au: f64,
        aphelion_au: f64,
        perihelion_speed_km_s: f64,
        aphelion_speed_km_s: f64,
        mean_anomaly_deg: f64,
        /// Vis-viva speed at the epoch's true anomaly. Informational only.
        instantaneous_speed_km_s: f64,
    },
    Galaxy {
        center_distance_kpc: f64,
        center_distance_uncertainty_kpc: f64,
        period_myr: f64,
    },
    Cmb {
        reference: CmbReference,
        galactic_longitude_deg: f64,
        galactic_latitude_deg: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameVelocity {
    pub frame: ReferenceFrame,
    pub velocity_km_s: f64,
    pub uncertainty_km_s: Option<f64>,
    /// True whenever any non-zero uncertainty is recorded.
    pub has_significant_uncertainty: bool,
    pub metadata: FrameMetadata,
}

impl FrameVelocity {
    fn new(
        frame: ReferenceFrame,
        velocity_km_s: f64,
        uncertainty_km_s: Option<f64>,
        metadata: FrameMetadata,
    ) -> Self {
        Self {
            frame,
            velocity_km_s,
            uncertainty_km_s,
            has_significant_uncertainty: uncertainty_km_s.is_some_and(|u| u > 0.0),
            metadata,
        }
    }
}

/// Speed of an observer at `latitude_deg` in `frame`. `epoch` only affects the
/// orbit frame's informational metadata.
pub fn frame_velocity(
    frame: ReferenceFrame,
    latitude_deg: f64,
    epoch: Epoch,
    options: VelocityOptions,
) -> Result<FrameVelocity, MotionError> {
    validate_latitude(latitude_deg)?;
    Ok(match frame {
        ReferenceFrame::Spin => spin_velocity(latitude_deg),
        ReferenceFrame::Orbit => orbit_velocity(epoch),
        ReferenceFrame::Galaxy => galaxy_velocity(),
        ReferenceFrame::Cmb => cmb_velocity(options.cmb_reference),
    })
}

/// All four frames in nesting order.
pub fn all_frame_velocities(
    latitude_deg: f64,
    epoch: Epoch,
    options: VelocityOptions,
) -> Result<Vec<FrameVelocity>, MotionError> {
    ReferenceFrame::ALL
        .into_iter()
        .map(|frame| frame_velocity(frame, latitude_deg, epoch, options))
        .collect()
}

fn validate_latitude(latitude_deg: f64) -> Result<(), MotionError> {
    if (-90.0..=90.0).contains(&latitude_deg) {
        Ok(())
    } else {
        Err(MotionError::LatitudeOutOfRange { latitude_deg })
    }
}

/// Radius of the parallel of latitude on the WGS84 ellipsoid, km.
pub fn parallel_radius_km(latitude_deg: f64) -> f64 {
    if latitude_deg.abs() == 90.0 {
        return 0.0;
    }
    let phi = latitude_deg.abs().to_radians();
    let sin_phi = phi.sin();
    WGS84_SEMI_MAJOR_AXIS_KM * phi.cos()
        / (1.0 - WGS84_ECCENTRICITY_SQUARED * sin_phi * sin_phi).sqrt()
}

fn spin_velocity(latitude_deg: f64) -> FrameVelocity {
    let omega = TAU / SIDEREAL_DAY_SECONDS;
    let radius = parallel_radius_km(latitude_deg);
    FrameVelocity::new(
        ReferenceFrame::Spin,
        omega * radius,
        None,
        FrameMetadata::Spin {
            latitude_deg,
            parallel_radius_km: radius,
            angular_velocity_rad_s: omega,
        },
    )
}

fn orbit_velocity(epoch: Epoch) -> FrameVelocity {
    let e = EARTH_ORBITAL_ECCENTRICITY;
    let a = EARTH_SEMI_MAJOR_AXIS_AU;
    let v = EARTH_MEAN_ORBITAL_SPEED_KM_S;
    let mean_anomaly_deg = (EARTH_MEAN_ANOMALY_J2000_DEG
        + EARTH_MEAN_MOTION_DEG_PER_DAY * epoch.days_since_j2000())
    .rem_euclid(360.0);
    let m = mean_anomaly_deg.to_radians();
    // Equation of centre to first order in e.
    let true_anomaly = m + 2.0 * e * m.sin() + 1.25 * e * e * (2.0 * m).sin();
    let r = a * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    FrameVelocity::new(
        ReferenceFrame::Orbit,
        v,
        None,
        FrameMetadata::Orbit {
            eccentricity: e,
            semi_major_axis_au: a,
            perihelion_au: a * (1.0 - e),
            aphelion_au: a * (1.0 + e),
            perihelion_speed_km_s: v * ((1.0 + e) / (1.0 - e)).sqrt(),
            aphelion_speed_km_s: v * ((1.0 - e) / (1.0 + e)).sqrt(),
            mean_anomaly_deg,
            instantaneous_speed_km_s: v * (2.0 * a / r - 1.0).sqrt(),
        },
    )
}

fn galaxy_velocity() -> FrameVelocity {
    FrameVelocity::new(
        ReferenceFrame::Galaxy,
        GALACTIC_ORBITAL_SPEED_KM_S,
        Some(GALACTIC_ORBITAL_SPEED_UNCERTAINTY_KM_S),
        FrameMetadata::Galaxy {
            center_distance_kpc: GALACTIC_CENTER_DISTANCE_KPC,
            center_distance_uncertainty_kpc: GALACTIC_CENTER_DISTANCE_UNCERTAINTY_KPC,
            period_myr: GALACTIC_YEAR_MYR,
        },
    )
}

fn cmb_velocity(reference: CmbReference) -> FrameVelocity {
    let (speed, uncertainty, l, b) = match reference {
        CmbReference::Barycentric => (
            CMB_DIPOLE_SPEED_KM_S,
            CMB_DIPOLE_SPEED_UNCERTAINTY_KM_S,
            CMB_DIPOLE_GALACTIC_LONGITUDE_DEG,
            CMB_DIPOLE_GALACTIC_LATITUDE_DEG,
        ),
        CmbReference::LocalGroup => (
            LOCAL_GROUP_CMB_SPEED_KM_S,
            LOCAL_GROUP_CMB_SPEED_UNCERTAINTY_KM_S,
            LOCAL_GROUP_GALACTIC_LONGITUDE_DEG,
            LOCAL_GROUP_GALACTIC_LATITUDE_DEG,
        ),
    };
    FrameVelocity::new(
        ReferenceFrame::Cmb,
        speed,
        Some(uncertainty),
        FrameMetadata::Cmb {
            reference,
            galactic_longitude_deg: l,
            galactic_latitude_deg: b,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn speed(frame: ReferenceFrame, latitude: f64) -> f64 {
        frame_velocity(frame, latitude, Epoch::J2000, VelocityOptions::default())
            .unwrap()
            .velocity_km_s
    }

    #[test]
    fn equator_spins_at_465_m_s() {
        let v = speed(ReferenceFrame::Spin, 0.0);
        assert!((v - 0.4651).abs() < 1e-3, "v = {v}");
    }

    #[test]
    fn poles_spin_at_exactly_zero() {
        assert_eq!(speed(ReferenceFrame::Spin, 90.0), 0.0);
        assert_eq!(speed(ReferenceFrame::Spin, -90.0), 0.0);
        assert!(speed(ReferenceFrame::Spin, -90.0).is_sign_positive());
    }

    #[test]
    fn spin_is_symmetric_about_equator() {
        let mut lat = -90.0;
        while lat <= 90.0 {
            assert_eq!(
                speed(ReferenceFrame::Spin, lat),
                speed(ReferenceFrame::Spin, -lat),
                "latitude {lat}"
            );
            lat += 0.75;
        }
    }

    #[test]
    fn out_of_range_latitude_is_rejected_not_clamped() {
        for bad in [90.000_1, -91.0, f64::NAN, f64::INFINITY] {
            let err = frame_velocity(
                ReferenceFrame::Spin,
                bad,
                Epoch::J2000,
                VelocityOptions::default(),
            )
            .unwrap_err();
            assert!(matches!(err, MotionError::LatitudeOutOfRange { .. }));
        }
    }

    #[test]
    fn outer_frames_ignore_latitude_and_stay_in_bounds() {
        for lat in [-60.0, 0.0, 33.3, 90.0] {
            let orbit = speed(ReferenceFrame::Orbit, lat);
            let galaxy = speed(ReferenceFrame::Galaxy, lat);
            let cmb = speed(ReferenceFrame::Cmb, lat);
            assert!(orbit > 29.0 && orbit < 31.0);
            assert!(galaxy > 200.0 && galaxy < 250.0);
            assert!(cmb > 350.0 && cmb < 400.0);
            assert_eq!(orbit, speed(ReferenceFrame::Orbit, 0.0));
        }
    }

    #[test]
    fn uncertainty_flag_tracks_recorded_uncertainty() {
        let all = all_frame_velocities(45.0, Epoch::J2000, VelocityOptions::default()).unwrap();
        let flags: Vec<bool> = all.iter().map(|v| v.has_significant_uncertainty).collect();
        assert_eq!(flags, vec![false, false, true, true]);
        assert_eq!(
            all.iter().map(|v| v.frame).collect::<Vec<_>>(),
            ReferenceFrame::ALL.to_vec()
        );
    }

    #[test]
    fn local_group_reference_changes_magnitude_and_uncertainty() {
        let options = VelocityOptions {
            cmb_reference: CmbReference::LocalGroup,
        };
        let lg = frame_velocity(ReferenceFrame::Cmb, 0.0, Epoch::J2000, options).unwrap();
        let bary = frame_velocity(
            ReferenceFrame::Cmb,
            0.0,
            Epoch::J2000,
            VelocityOptions::default(),
        )
        .unwrap();
        assert!(lg.velocity_km_s > bary.velocity_km_s);
        assert!(lg.uncertainty_km_s > bary.uncertainty_km_s);
    }

    #[test]
    fn orbit_metadata_brackets_mean_speed() {
        let v = frame_velocity(
            ReferenceFrame::Orbit,
            0.0,
            Epoch::J2000.add_days(100.0),
            VelocityOptions::default(),
        )
        .unwrap();
        match v.metadata {
            FrameMetadata::Orbit {
                perihelion_speed_km_s,
                aphelion_speed_km_s,
                instantaneous_speed_km_s,
                perihelion_au,
                aphelion_au,
                ..
            } => {
                assert!(perihelion_speed_km_s > v.velocity_km_s);
                assert!(aphelion_speed_km_s < v.velocity_km_s);
                assert!(instantaneous_speed_km_s >= aphelion_speed_km_s - 1e-9);
                assert!(instantaneous_speed_km_s <= perihelion_speed_km_s + 1e-9);
                assert!(perihelion_au < 1.0 && aphelion_au > 1.0);
            }
            other => panic!("unexpected metadata {other:?}"),
        }
    }
}
