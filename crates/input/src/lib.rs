//! Terminal input module.
//!
//! Independent of the renderer: it maps `crossterm` key events onto an
//! explicit [`KeyState`] that the game loop owns and polls, replacing any
//! notion of a process-wide "currently pressed keys" table.

pub mod key_state;
pub mod map;

pub use key_state::{KeyState, DEFAULT_RELEASE_TIMEOUT, MAX_HELD_KEYS};
pub use map::{is_quit, step_for};
