//! Platform runners
//!
//! - `native`: winit window with a wgpu surface
//! - `bench`: headless list-mode benchmark (native only)
//! - `web`: canvas, DOM listeners and `requestAnimationFrame`

#[cfg(not(target_arch = "wasm32"))]
pub mod bench;
#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;

use crate::sim::Bounds;

/// Map a pointer position (origin top-left, y down) in a `viewport` of the
/// given size to world pixels (origin bottom-left, y up)
pub fn screen_to_world(x: f32, y: f32, viewport: (f32, f32), world: &Bounds) -> Vec2 {
    let (w, h) = viewport;
    if w <= 0.0 || h <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(x / w * world.width, (1.0 - y / h) * world.height)
}

/// Seed from the wall clock, for runs without a configured seed
#[cfg(not(target_arch = "wasm32"))]
pub fn time_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
pub fn time_seed() -> u64 {
    js_sys::Date::now() as u64
}
