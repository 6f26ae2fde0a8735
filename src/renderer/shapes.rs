//! Shape generation for 2D primitives
//!
//! Everything comes out as a triangle list in world pixels.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::ArcStroke;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a quad from four corners in winding order
pub fn quad(corners: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(d.x, d.y, color),
        Vertex::new(a.x, a.y, color),
    ]
}

/// Axis-aligned filled rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    quad(
        [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ],
        color,
    )
}

/// Triangle fan over `points`, anchored at the first point.
///
/// The outline must be visible in full from that first point.
pub fn polygon(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let anchor = points[0];
    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(anchor.x, anchor.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
    vertices
}

/// Generate vertices for a stroked arc (a band centred on the radius)
pub fn arc_outline(arc: &ArcStroke, color: [f32; 4], segments_per_degree: f32) -> Vec<Vertex> {
    let span = arc.end_angle - arc.start_angle;
    let num_segments = ((span.abs() * segments_per_degree) as u32).max(4);
    let inner_r = (arc.radius - arc.thickness / 2.0).max(0.0);
    let outer_r = arc.radius + arc.thickness / 2.0;

    let mut vertices = Vec::with_capacity((num_segments * 6) as usize);

    for i in 0..num_segments {
        let t1 = i as f32 / num_segments as f32;
        let t2 = (i + 1) as f32 / num_segments as f32;

        let theta1 = (arc.start_angle + t1 * span).to_radians();
        let theta2 = (arc.start_angle + t2 * span).to_radians();

        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());
        let inner1 = arc.center + dir1 * inner_r;
        let outer1 = arc.center + dir1 * outer_r;
        let inner2 = arc.center + dir2 * inner_r;
        let outer2 = arc.center + dir2 * outer_r;

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}
