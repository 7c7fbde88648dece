//! Shared types for the skyflap workspace.
//!
//! # Invariants
//! - `RenderObject` is plain data; it carries no identity across frames.

pub mod types;

pub use types::{Material, RenderObject, Rgba};
