//! Terminal backend for the tile engine.
//!
//! This is the crossterm side of the [`Surface`](crate::core::Surface)
//! capability: a viewport renders into a [`TerminalSurface`], which turns
//! tile draws into ANSI commands and flushes them once per frame.
//!
//! Both surface kinds are supported. A terminal keeps what was printed, so
//! `Retained` is the natural fit and only changed cells get written;
//! `Immediate` rewrites the whole grid each frame, which is handy when
//! something else may have drawn over the screen.

pub mod session;
pub mod surface;

pub use unitiles_core as core;
pub use unitiles_types as types;

pub use session::TerminalSession;
pub use surface::{rgb_to_color, TerminalSurface};
