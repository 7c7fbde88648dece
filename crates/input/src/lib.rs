//! Input: discrete player actions, queued between ticks.
//!
//! # Invariants
//! - The game consumes actions, never raw window events.
//! - Queued actions are applied in arrival order, once, before the tick's update.

pub mod action;
pub mod queue;

pub use action::Action;
pub use queue::ActionQueue;

/// Returns the crate name and version.
pub fn crate_info() -> &'static str {
    concat!("skyflap-input v", env!("CARGO_PKG_VERSION"))
}
