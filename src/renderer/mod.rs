//! WebGPU rendering module
//!
//! The scene is rebuilt every frame as a flat-colored triangle list in
//! playfield pixels, then uploaded and drawn in a single pass. HUD text is
//! rasterized with fontdue and joins the same triangle list.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use text::HudFont;
pub use vertex::Vertex;
