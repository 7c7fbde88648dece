//! Game kernel: authoritative game state, one tick per rendered frame.
//!
//! # Invariants
//! - All state mutations flow through `update`, `reset`, `jump` and `restore`.
//! - `renderables` is a pure projection of the current state.
//! - The pipe window never changes length after construction.
//! - Randomness comes only from the generator the game was built with.

pub mod config;
pub mod game;
pub mod pipes;

pub use config::{ConfigError, GameConfig};
pub use game::{FlappyGame, GameEvent, GameSnapshot, SnapshotError};
pub use pipes::PipeWindow;
