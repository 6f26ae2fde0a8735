//! Sprite Lab - small visual experiments with sprites and spirals
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawners, lists, scenes)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native runners
//! - `app`: Fixed-timestep frame driver shared by both runners

pub mod app;
pub mod input;
pub mod perf;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, FrameOutcome};
pub use settings::Settings;

use glam::Vec2;

/// Lab configuration constants
pub mod consts {
    /// Fixed simulation timestep (one update per 60 Hz frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default world size for the sprite scenes (pixels)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// The spiral scene uses a square world
    pub const SPIRAL_SIZE: f32 = 800.0;

    /// FPS graph size and offset from the top edge
    pub const GRAPH_WIDTH: f32 = SCREEN_WIDTH / 2.0;
    pub const GRAPH_HEIGHT: f32 = 200.0;
    pub const GRAPH_TOP_MARGIN: f32 = 10.0;
}

/// Unit vector pointing along `angle` degrees (counter-clockwise from +x)
#[inline]
pub fn direction_degrees(angle: f32) -> Vec2 {
    let rad = angle.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Rotate a vector counter-clockwise by `angle` degrees
#[inline]
pub fn rotate_degrees(v: Vec2, angle: f32) -> Vec2 {
    direction_degrees(angle).rotate(v)
}
