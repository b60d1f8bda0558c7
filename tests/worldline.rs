use cosmic_worldline::compute_worldline_state;
use cosmic_worldline::constants::JULIAN_YEAR_SECONDS;
use cosmic_worldline::motion::{ReferenceFrame, VelocityOptions, all_frame_velocities};
use cosmic_worldline::{Epoch, WorldlineState};

fn distance(state: &WorldlineState, frame: ReferenceFrame) -> f64 {
    state
        .distances
        .iter()
        .find(|d| d.frame == frame)
        .map(|d| d.path_length_km)
        .expect("frame present")
}

fn speed(state: &WorldlineState, frame: ReferenceFrame) -> f64 {
    state
        .velocities
        .iter()
        .find(|v| v.frame == frame)
        .map(|v| v.velocity_km_s)
        .expect("frame present")
}

#[test]
fn thirty_years_from_1990() {
    let state = compute_worldline_state("1990-01-01", 0.0, "2020-01-01").unwrap();
    let seconds = state.duration.total_seconds;
    let years = seconds / JULIAN_YEAR_SECONDS;
    assert!((years - 30.0).abs() < 0.01, "duration = {years} Julian years");
    assert!(!state.duration.is_pre_birth);
    assert_eq!(state.duration.years, 30);

    let orbit = distance(&state, ReferenceFrame::Orbit);
    assert!(
        (orbit / (seconds * 29.78) - 1.0).abs() < 1e-9,
        "orbit distance = {orbit}"
    );
    let galaxy = distance(&state, ReferenceFrame::Galaxy);
    assert!((galaxy / (seconds * 220.0) - 1.0).abs() < 1e-9);
}

#[test]
fn spin_speed_at_equator_and_pole() {
    let equator = compute_worldline_state("1990-01-01", 0.0, "2020-01-01").unwrap();
    let spin = speed(&equator, ReferenceFrame::Spin);
    assert!((spin - 0.465).abs() < 0.001, "equatorial spin = {spin}");

    let pole = compute_worldline_state("1990-01-01", 90.0, "2020-01-01").unwrap();
    assert_eq!(speed(&pole, ReferenceFrame::Spin), 0.0);
    assert_eq!(distance(&pole, ReferenceFrame::Spin), 0.0);
}

#[test]
fn spin_is_symmetric_and_other_frames_ignore_latitude() {
    let epoch = Epoch::parse("2024-03-20").unwrap();
    let options = VelocityOptions::default();
    for lat in [0.0, 12.5, 45.0, 66.6, 89.9] {
        let north = all_frame_velocities(lat, epoch, options).unwrap();
        let south = all_frame_velocities(-lat, epoch, options).unwrap();
        assert_eq!(north[0].velocity_km_s, south[0].velocity_km_s);
        for (n, s) in north.iter().zip(&south).skip(1) {
            assert_eq!(n.velocity_km_s, s.velocity_km_s);
        }
        assert!((29.0..31.0).contains(&north[1].velocity_km_s));
        assert!((200.0..250.0).contains(&north[2].velocity_km_s));
        assert!((350.0..400.0).contains(&north[3].velocity_km_s));
    }
}

#[test]
fn doubling_duration_doubles_path_length() {
    let short = compute_worldline_state("2000-01-01", 30.0, "2005-01-01").unwrap();
    let long = compute_worldline_state("2000-01-01", 30.0, "2010-01-01").unwrap();
    let ratio_seconds = long.duration.total_seconds / short.duration.total_seconds;
    for (a, b) in short.distances.iter().zip(&long.distances) {
        let ratio = b.path_length_km / a.path_length_km;
        assert!((ratio - ratio_seconds).abs() < 1e-12);
    }
}

#[test]
fn formatted_duration_has_fixed_layout() {
    let state =
        compute_worldline_state("2020-01-01T00:00:00Z", 0.0, "2020-01-02T03:04:05Z").unwrap();
    assert_eq!(state.formatted_duration, "0y 0m 1d | 03h:04m:05s");
}
