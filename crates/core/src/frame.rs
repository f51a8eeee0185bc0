//! The per-frame update and render routine.
//!
//! A frame clears the surface, moves and reflects every point, draws it,
//! then scans every unordered pair of points and strokes a link for each
//! pair closer than the connection distance. Motion for all points is
//! finished before the pair scan starts.

use crate::config::FieldConfig;
use crate::point::Point;
use crate::surface::DrawSurface;
use glam::DVec2;
use serde::Serialize;

/// A link between two points found during one frame. `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
    pub opacity: f64,
}

/// Summary of one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub points: usize,
    pub connections: usize,
}

/// Link threshold for a surface: `min(width, height) / divisor`.
pub fn connection_distance(width: u32, height: u32, divisor: f64) -> f64 {
    width.min(height) as f64 / divisor
}

/// Opacity of a link of length `distance`, or `None` when the points are too far apart.
///
/// Decays linearly from `max_opacity` at distance 0 to 0 at `threshold`.
pub fn link_opacity(distance: f64, threshold: f64, max_opacity: f64) -> Option<f64> {
    (distance < threshold).then(|| (1.0 - distance / threshold) * max_opacity)
}

/// Adds velocity to position.
pub fn integrate(point: &mut Point) {
    point.position += point.velocity;
}

/// Negates a velocity component when the point lies outside `[0, size]` on that axis.
///
/// Runs after [`integrate`], so a point overshoots the edge by one frame
/// before turning around. Position is never clamped.
pub fn reflect(point: &mut Point, width: f64, height: f64) {
    let DVec2 { x, y } = point.position;
    if x < 0.0 || x > width {
        point.velocity.x = -point.velocity.x;
    }
    if y < 0.0 || y > height {
        point.velocity.y = -point.velocity.y;
    }
}

/// Finds every pair `(i, j)` with `i < j` closer than `threshold`.
///
/// Plain O(n²) scan. Each point's connection list is rebuilt from scratch.
pub fn find_connections(points: &mut [Point], threshold: f64, max_opacity: f64) -> Vec<Connection> {
    for p in points.iter_mut() {
        p.connections.clear();
    }

    let mut connections = Vec::new();
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let distance = points[i].position.distance(points[j].position);
            if let Some(opacity) = link_opacity(distance, threshold, max_opacity) {
                points[i].connections.push(j);
                points[j].connections.push(i);
                connections.push(Connection {
                    a: i,
                    b: j,
                    distance,
                    opacity,
                });
            }
        }
    }
    connections
}

/// Advances `points` by one frame on a `width` × `height` surface and renders it.
pub fn step_frame(
    points: &mut [Point],
    width: u32,
    height: u32,
    config: &FieldConfig,
    surface: &mut impl DrawSurface,
) -> FrameStats {
    let (w, h) = (width as f64, height as f64);

    surface.clear();
    for point in points.iter_mut() {
        integrate(point);
        reflect(point, w, h);
        surface.fill_circle(point.position, point.radius(), point.color());
    }

    let threshold = connection_distance(width, height, config.connection_divisor);
    let connections = find_connections(points, threshold, config.max_link_opacity);
    for link in &connections {
        let color = config.link_color.with_alpha(link.opacity);
        surface.stroke_line(
            points[link.a].position,
            points[link.b].position,
            config.line_width,
            color,
        );
    }

    log::trace!(
        "frame: {} points, {} connections",
        points.len(),
        connections.len()
    );

    FrameStats {
        points: points.len(),
        connections: connections.len(),
    }
}
