//! WebGPU rendering module
//!
//! Sprites are drawn as flat-colour triangle lists built on the CPU each
//! frame in world pixels, then mapped to NDC on upload.

pub mod draw;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
