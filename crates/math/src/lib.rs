//! Matrix library: pure 4x4 matrix construction and composition.
//!
//! Matrices are stored column-major, `multiply(a, b)` yields `a * b`, so when the
//! result is applied to a column vector `b` acts first.
//!
//! # Invariants
//! - Every function is pure; there is no shared state.
//! - Inputs are never validated. A singular matrix passed to `inverse`, or a
//!   degenerate `look_at` (eye equal to target, up parallel to the view axis),
//!   produces non-finite or unstable output rather than an error.

mod mat4;
mod vec;

pub use mat4::Mat4;
pub use vec::{deg_to_rad, normalize};
