//! WebGPU rendering module
//!
//! The scene is built as a flat triangle list in surface pixels from a
//! read-only snapshot, then mapped to NDC and drawn in a single pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_frame;
pub use vertex::Vertex;
