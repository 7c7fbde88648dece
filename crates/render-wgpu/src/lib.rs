//! wgpu render backend for skyflap.
//!
//! Draws every [`skyflap_render::DrawCall`] of a frame as one non-instanced
//! draw of a shared static mesh, lit with Lambert diffuse and Blinn-Phong
//! specular.
//!
//! # Invariants
//! - Renderer never mutates game state; it only reads finished frames.
//! - Exactly one `draw` per draw call, in frame order.
//! - Matrices arrive in GL clip conventions and are converted to wgpu depth
//!   range here, nowhere else.

mod context;
mod gpu;
mod mesh;
mod shaders;

pub use context::{GpuContext, RenderInitError};
pub use gpu::WgpuRenderer;
pub use mesh::{Vertex, letter_f_mesh};

/// Returns the crate name and version.
pub fn crate_info() -> &'static str {
    concat!("skyflap-render-wgpu v", env!("CARGO_PKG_VERSION"))
}
