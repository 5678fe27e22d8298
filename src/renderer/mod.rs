//! WebGPU rendering module
//!
//! Scenes are built on the CPU as colored triangle lists and drawn with a
//! single pass-through pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{build_scene, health_text};
pub use vertex::Vertex;
