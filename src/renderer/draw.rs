//! Turns lab state into a triangle list in world pixels

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, look_color, rgb};
use crate::App;
use crate::consts::{GRAPH_HEIGHT, GRAPH_TOP_MARGIN, GRAPH_WIDTH};
use crate::perf::{GRAPH_SAMPLES, PerfGraph};
use crate::{direction_degrees, rotate_degrees};
use crate::sim::{Bounds, Look, MeteorStyle, SceneKind, SceneState, Sprite, SpriteKind};

/// Arc tessellation density
const ARC_SEGMENTS_PER_DEGREE: f32 = 0.25;

/// Ship outline in half-size units, nose up
const SHIP_OUTLINE: [Vec2; 4] = [
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, -0.7),
    Vec2::new(0.0, -0.3),
    Vec2::new(-1.0, -0.7),
];

/// Rock radii around the centre, in half-size units
const ROCK_RADII: [f32; 8] = [1.0, 0.85, 0.95, 0.8, 1.0, 0.9, 0.8, 0.95];

/// Everything drawn this frame, back to front
pub fn frame(app: &App) -> Vec<Vertex> {
    let mut vertices = scene(&app.scene);
    if let Some(graph) = app.perf_graph() {
        vertices.extend(perf_graph(graph, &app.scene.bounds));
    }
    vertices
}

/// Scene contents: background sprites, then the depth-sorted layer, then spirals
pub fn scene(state: &SceneState) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for s in state.background() {
        sprite(s, &mut vertices);
    }
    for s in state.foreground() {
        sprite(s, &mut vertices);
    }
    if state.kind == SceneKind::Spiral {
        for stroke in state.spiral.strokes(state.bounds.center()) {
            vertices.extend(shapes::arc_outline(
                &stroke,
                rgb(stroke.colour),
                ARC_SEGMENTS_PER_DEGREE,
            ));
        }
    }
    vertices
}

/// Append one sprite's silhouette
pub fn sprite(s: &Sprite, out: &mut Vec<Vertex>) {
    let half = s.size * s.scale / 2.0;
    let to_world = |local: Vec2| s.pos + rotate_degrees(local * half, s.angle);
    let color = look_color(s.look);

    match s.kind {
        SpriteKind::Ship { .. } | SpriteKind::Drifter { .. } => {
            out.extend(shapes::polygon(&SHIP_OUTLINE.map(to_world), color));
            out.extend(shapes::circle(
                to_world(Vec2::new(0.0, 0.2)),
                half.x.abs() * 0.2,
                colors::COCKPIT,
                8,
            ));
        }
        SpriteKind::Pilot { .. } => {
            out.extend(shapes::quad(s.corners(), color));
            out.extend(shapes::circle(
                to_world(Vec2::new(0.0, 0.45)),
                half.x.abs() * 0.3,
                colors::PILOT_VISOR,
                8,
            ));
        }
        SpriteKind::Meteor {
            style: MeteorStyle::Circle,
        } => {
            out.extend(shapes::circle(s.pos, half.x.abs(), color, 8));
        }
        SpriteKind::Meteor { .. } => {
            let offset = match s.look {
                Look::Meteor(v) => v as usize,
                _ => 0,
            };
            let mut points = Vec::with_capacity(ROCK_RADII.len() + 2);
            points.push(s.pos);
            for i in 0..=ROCK_RADII.len() {
                let k = i % ROCK_RADII.len();
                let r = ROCK_RADII[(k + offset) % ROCK_RADII.len()];
                let theta = k as f32 * 360.0 / ROCK_RADII.len() as f32;
                points.push(to_world(direction_degrees(theta) * r));
            }
            out.extend(shapes::polygon(&points, color));
        }
    }
}

/// FPS history as bars, centred just below the top edge
pub fn perf_graph(graph: &PerfGraph, bounds: &Bounds) -> Vec<Vertex> {
    let top = bounds.height - GRAPH_TOP_MARGIN;
    let bottom = top - GRAPH_HEIGHT;
    let left = (bounds.width - GRAPH_WIDTH) / 2.0;
    let mut vertices = shapes::rect(
        Vec2::new(left, bottom),
        Vec2::new(left + GRAPH_WIDTH, top),
        colors::GRAPH_FRAME,
    );

    let bar_width = GRAPH_WIDTH / GRAPH_SAMPLES as f32;
    let ceiling = graph.ceiling() as f32;
    for (i, fps) in graph.samples().enumerate() {
        let x = left + i as f32 * bar_width;
        let height = fps as f32 / ceiling * GRAPH_HEIGHT;
        vertices.extend(shapes::rect(
            Vec2::new(x, bottom),
            Vec2::new(x + bar_width, bottom + height),
            colors::GRAPH_BAR,
        ));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Motion;

    fn ship(look: u8, scale: f32) -> Sprite {
        let look = Look::Ship(look);
        Sprite {
            pos: Vec2::new(100.0, 100.0),
            angle: -90.0,
            scale,
            size: look.base_size(),
            motion: Motion::default(),
            kind: SpriteKind::Ship { tumbling: false },
            look,
        }
    }

    #[test]
    fn test_empty_scene_draws_nothing() {
        let state = SceneState::new(SceneKind::Sprites, 1);
        assert!(scene(&state).is_empty());
    }

    #[test]
    fn test_spiral_scene_draws_all_strokes() {
        let state = SceneState::new(SceneKind::Spiral, 1);
        let per_stroke = 22 * 6;
        assert_eq!(scene(&state).len(), 42 * per_stroke);
    }

    #[test]
    fn test_bigger_sprites_draw_last() {
        let mut state = SceneState::new(SceneKind::Sprites, 1);
        state.ships.push(ship(0, 2.0));
        state.ships.push(ship(1, 0.5));
        state.prepare_draw();
        let verts = scene(&state);
        assert_eq!(verts.first().map(|v| v.color), Some(colors::SHIPS[1]));
        let hull: Vec<_> = verts.iter().filter(|v| v.color != colors::COCKPIT).collect();
        assert_eq!(hull.last().map(|v| v.color), Some(colors::SHIPS[0]));
    }

    #[test]
    fn test_meteor_styles_draw() {
        let mut state = SceneState::new(SceneKind::MeteorField, 3);
        let mut rng = rand_pcg::Pcg32::new(1, 1);
        for style in [MeteorStyle::Rotating, MeteorStyle::Fixed, MeteorStyle::Circle] {
            let meteor = Sprite::meteor(&mut rng, &state.bounds, style);
            state.meteors.push(meteor);
        }
        let verts = scene(&state);
        // Two rocks of eight wedges and one eight-segment disc
        assert_eq!(verts.len(), 3 * 8 * 3);
    }

    #[test]
    fn test_perf_graph_is_centred_at_top() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut graph = PerfGraph::default();
        for fps in [30, 60, 90] {
            graph.push(fps);
        }
        let verts = perf_graph(&graph, &bounds);
        assert_eq!(verts.len(), 6 * 4);
        for v in &verts {
            assert!(v.position[0] >= 200.0 && v.position[0] <= 600.0);
            assert!(v.position[1] >= 600.0 - GRAPH_TOP_MARGIN - GRAPH_HEIGHT);
            assert!(v.position[1] <= 600.0 - GRAPH_TOP_MARGIN + 0.001);
        }
    }
}
