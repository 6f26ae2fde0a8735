//! Deterministic simulation module
//!
//! All scene logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod list;
pub mod scene;
pub mod spawner;
pub mod spiral;
pub mod sprite;
pub mod tick;

pub use list::{SpriteList, depth_order};
pub use scene::{ListMode, SceneConfig, SceneKind, SceneState, SpriteCounts};
pub use spawner::{Interval, Spawner};
pub use spiral::{ArcStroke, QuarterArc, Rgb, Spiral, SpiralState};
pub use sprite::{Bounds, Look, MeteorStyle, Motion, PilotRules, Rect, Sprite, SpriteKind};
pub use tick::{Action, SceneEvent, apply, eject_pilot, tick};
