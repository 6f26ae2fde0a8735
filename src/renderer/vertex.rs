//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::{Look, Rgb};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for lab elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// One hull color per ship variant
    pub const SHIPS: [[f32; 4]; 5] = [
        [0.25, 0.55, 0.95, 1.0], // Blue
        [0.35, 0.8, 0.35, 1.0],  // Green
        [0.95, 0.6, 0.2, 1.0],   // Orange
        [0.9, 0.25, 0.25, 1.0],  // Red
        [0.85, 0.85, 0.9, 1.0],  // Silver
    ];
    pub const COCKPIT: [f32; 4] = [0.6, 0.9, 1.0, 1.0];
    pub const PILOT_SUIT: [f32; 4] = [0.95, 0.95, 0.95, 1.0];
    pub const PILOT_VISOR: [f32; 4] = [0.2, 0.3, 0.5, 1.0];
    /// Brown and grey rock, alternating by variant
    pub const METEORS: [[f32; 4]; 2] = [[0.55, 0.4, 0.3, 1.0], [0.55, 0.55, 0.55, 1.0]];
    pub const DISC: [f32; 4] = [0.9, 0.9, 0.9, 1.0];
    pub const GRAPH_FRAME: [f32; 4] = [0.4, 0.4, 0.4, 0.6];
    pub const GRAPH_BAR: [f32; 4] = [0.2, 0.9, 0.3, 0.8];
}

/// Fill color for a sprite's look
pub fn look_color(look: Look) -> [f32; 4] {
    match look {
        Look::Ship(v) => colors::SHIPS[v as usize % colors::SHIPS.len()],
        Look::Pilot(_) => colors::PILOT_SUIT,
        Look::Meteor(v) => colors::METEORS[v as usize % colors::METEORS.len()],
        Look::Disc => colors::DISC,
    }
}

/// Opaque color from 8-bit RGB
pub fn rgb(c: Rgb) -> [f32; 4] {
    [
        c[0] as f32 / 255.0,
        c[1] as f32 / 255.0,
        c[2] as f32 / 255.0,
        1.0,
    ]
}
