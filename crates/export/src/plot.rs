//! Top-down PNG of a scene, looking down ecliptic +Z. No text is drawn.

use std::path::Path;

use plotters::prelude::*;
use worldline_orbits::OrbitPath;
use worldline_scene::Scene;

use crate::{ExportError, ensure_parent};

const MIN_MARKER_PX: f64 = 2.0;
const MARGIN: f64 = 1.05;

pub fn render_top_view(
    path: &Path,
    scene: &Scene,
    orbits: &[OrbitPath],
    size: (u32, u32),
) -> Result<(), ExportError> {
    ensure_parent(path)?;
    let extent = half_extent(scene, orbits);
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&BLACK).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(-extent..extent, -extent..extent)
        .map_err(plot_error)?;

    for orbit in orbits {
        let color = body_color(orbit.body.color()).mix(0.35);
        chart
            .draw_series(std::iter::once(PathElement::new(
                orbit.points.iter().map(|p| (p[0], p[1])).collect::<Vec<_>>(),
                ShapeStyle::from(&color).stroke_width(1),
            )))
            .map_err(plot_error)?;
    }

    let px_per_unit = f64::from(size.0.min(size.1)) / (2.0 * extent);
    for body in &scene.bodies {
        let marker = (body.radius_scene * px_per_unit).max(MIN_MARKER_PX);
        chart
            .draw_series(std::iter::once(Circle::new(
                (body.position[0], body.position[1]),
                marker as u32,
                body_color(body.color).filled(),
            )))
            .map_err(plot_error)?;
    }

    root.present().map_err(plot_error)?;
    Ok(())
}

fn half_extent(scene: &Scene, orbits: &[OrbitPath]) -> f64 {
    let bodies = scene
        .bodies
        .iter()
        .map(|body| body.position[0].abs().max(body.position[1].abs()) + body.radius_scene);
    let rings = orbits
        .iter()
        .flat_map(|orbit| orbit.points.iter())
        .map(|p| p[0].abs().max(p[1].abs()));
    let extent = bodies.chain(rings).fold(0.0_f64, f64::max) * MARGIN;
    if extent.is_finite() && extent > 0.0 { extent } else { 1.0 }
}

fn body_color(rgb: u32) -> RGBColor {
    RGBColor((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

fn plot_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::Plot {
        message: err.to_string(),
    }
}
