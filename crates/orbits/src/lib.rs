//! Display orbit reconstruction.
//!
//! Rings are circles around the parent body drawn through the body's current
//! scene position. They are not osculating orbits.

use std::f64::consts::TAU;

use serde::Serialize;
use tracing::warn;
use worldline_core::BodyId;
use worldline_core::vector::{self, Vector3};
use worldline_scene::Scene;

/// Radii below this are treated as a body sitting on its centre.
pub const DEGENERATE_RADIUS: f64 = 1e-12;

/// Sample count used when callers have no preference.
pub const DEFAULT_SEGMENTS: usize = 128;

/// Closed polyline for one body. `points[0] == points[last] == body position`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitPath {
    pub body: BodyId,
    pub center: Vector3,
    pub points: Vec<Vector3>,
}

/// Circle about `center` through `body`, sampled at `segments + 1` points.
///
/// Sampling runs prograde (counter-clockwise seen from +Z). The plane contains
/// the radius vector and the horizontal direction perpendicular to it; when the
/// radius is vertical the world X axis stands in for up. Returns an empty path
/// when `body` coincides with `center` or `segments` is zero.
pub fn reconstruct_orbit(body: &Vector3, center: &Vector3, segments: usize) -> Vec<Vector3> {
    let radial = vector::sub(body, center);
    let radius = vector::norm(&radial);
    if segments == 0 {
        return Vec::new();
    }
    if !radius.is_finite() || radius <= DEGENERATE_RADIUS {
        warn!(radius, "no orbit ring for degenerate geometry");
        return Vec::new();
    }
    let u1 = vector::scale(&radial, 1.0 / radius);
    let Some(u2) = vector::normalize(&vector::cross(&vector::UNIT_Z, &u1))
        .or_else(|| vector::normalize(&vector::cross(&vector::UNIT_X, &u1)))
    else {
        warn!(?radial, "no plane through a non-finite radius vector");
        return Vec::new();
    };

    let mut points = Vec::with_capacity(segments + 1);
    points.push(*body);
    for step in 1..segments {
        let theta = TAU * step as f64 / segments as f64;
        let (sin, cos) = theta.sin_cos();
        let offset = vector::add(
            &vector::scale(&u1, radius * cos),
            &vector::scale(&u2, radius * sin),
        );
        points.push(vector::add(center, &offset));
    }
    points.push(*body);
    points
}

/// Rings for every body that has a parent in `scene`, each centred on that
/// parent (the Sun for planets, Earth for the Moon).
pub fn orbit_paths(scene: &Scene, segments: usize) -> Vec<OrbitPath> {
    scene
        .bodies
        .iter()
        .filter_map(|rendered| {
            let center = scene.parent_position(rendered.id)?;
            let points = reconstruct_orbit(&rendered.position, &center, segments);
            (!points.is_empty()).then_some(OrbitPath {
                body: rendered.id,
                center,
                points,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use worldline_core::Epoch;
    use worldline_ephem::EphemerisProvider;
    use worldline_scale::Preset;
    use worldline_scene::resolve_scene;

    fn close(a: &Vector3, b: &Vector3, tol: f64) -> bool {
        vector::norm(&vector::sub(a, b)) <= tol
    }

    #[test]
    fn ring_passes_through_body_and_closes() {
        let body = [3.0, -4.0, 0.5];
        let center = [1.0, 1.0, 0.0];
        let ring = reconstruct_orbit(&body, &center, 64);
        assert_eq!(ring.len(), 65);
        assert_eq!(ring[0], body);
        assert_eq!(ring[64], body);
        let radius = vector::norm(&vector::sub(&body, &center));
        for point in &ring {
            let r = vector::norm(&vector::sub(point, &center));
            assert!((r - radius).abs() < 1e-9, "point off circle: {r} vs {radius}");
        }
    }

    #[test]
    fn ring_runs_prograde_in_ecliptic_plane() {
        let ring = reconstruct_orbit(&[1.0, 0.0, 0.0], &vector::ZERO, 4);
        assert!(close(&ring[1], &[0.0, 1.0, 0.0], 1e-12));
        assert!(close(&ring[2], &[-1.0, 0.0, 0.0], 1e-12));
    }

    #[test]
    fn vertical_radius_falls_back_to_x_axis() {
        let ring = reconstruct_orbit(&[0.0, 0.0, 2.0], &vector::ZERO, 8);
        assert_eq!(ring.len(), 9);
        assert!(ring.iter().all(|p| p.iter().all(|c| c.is_finite())));
        assert!(ring.iter().all(|p| p[0].abs() < 1e-12));
    }

    #[derive(Clone, Default)]
    struct LogCapture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn warnings_during<T>(f: impl FnOnce() -> T) -> (T, String) {
        let capture = LogCapture::default();
        let sink = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || sink.clone())
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        (value, logs)
    }

    #[test]
    fn coincident_body_yields_no_path_and_warns() {
        let (ring, logs) =
            warnings_during(|| reconstruct_orbit(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], 32));
        assert!(ring.is_empty());
        assert!(logs.contains("WARN") && logs.contains("degenerate"), "{logs}");
    }

    #[test]
    fn zero_segments_is_quiet_and_empty() {
        let (ring, logs) =
            warnings_during(|| reconstruct_orbit(&[1.0, 0.0, 0.0], &vector::ZERO, 0));
        assert!(ring.is_empty());
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn regular_ring_logs_nothing_at_warn() {
        let (ring, logs) =
            warnings_during(|| reconstruct_orbit(&[1.0, 0.0, 0.0], &vector::ZERO, 16));
        assert_eq!(ring.len(), 17);
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn scene_rings_start_at_every_body_for_every_preset() {
        let provider = EphemerisProvider::vsop87();
        let epoch = Epoch::from_julian_day_tt(2_455_000.5);
        for preset in Preset::ALL {
            for focus in [BodyId::Sun, BodyId::Earth, BodyId::Moon, BodyId::Jupiter] {
                let scene = resolve_scene(&provider, epoch, &preset.mapping(), focus).unwrap();
                let paths = orbit_paths(&scene, 48);
                assert_eq!(paths.len(), BodyId::ALL.len() - 1, "{preset} / {focus}");
                for path in paths {
                    let body = scene.get(path.body).unwrap();
                    assert!(close(&path.points[0], &body.position, 1e-9));
                }
            }
        }
    }

    #[test]
    fn moon_ring_is_centred_on_earth() {
        let provider = EphemerisProvider::vsop87();
        let scene = resolve_scene(
            &provider,
            Epoch::J2000,
            &Preset::SchoolModel.mapping(),
            BodyId::Sun,
        )
        .unwrap();
        let paths = orbit_paths(&scene, 16);
        let moon = paths.iter().find(|p| p.body == BodyId::Moon).unwrap();
        assert_eq!(moon.center, scene.get(BodyId::Earth).unwrap().position);
    }
}
