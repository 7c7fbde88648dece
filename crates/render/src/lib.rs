//! Rendering adapter: renderer-agnostic frame driver.
//!
//! # Invariants
//! - Renderers never mutate game state; they consume a finished [`Frame`].
//! - Every transform is built with `skyflap-math`; no other matrix code.
//! - One draw call per renderable, in the order the game produced them.

mod frame;
mod renderer;
mod view;

pub use frame::{DrawCall, Frame, FrameDriver, build_frame, world_matrix};
pub use renderer::{DebugTextRenderer, Renderer};
pub use view::{RenderView, Viewport};

/// Returns the crate name and version.
pub fn crate_info() -> &'static str {
    concat!("skyflap-render v", env!("CARGO_PKG_VERSION"))
}
