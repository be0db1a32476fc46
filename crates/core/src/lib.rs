//! Tile engine core - viewport buffer, frame resolution and tile cache
//!
//! This crate turns a caller's world (a function from world coordinates to
//! tiles) into a fixed-size grid centered on a focus point, and flushes that
//! grid to a display surface. It does no I/O of its own: drawing goes through
//! the [`Surface`] trait, content comes from caller-supplied closures.
//!
//! # Module Structure
//!
//! - [`surface`]: the display capability (`Immediate` vs `Retained`) and an in-memory surface
//! - [`viewport`]: the W x H tile buffer with checked/raw writes, clear and render
//! - [`engine`]: per-frame world -> viewport resolution with mask, bounds and shader stages
//! - [`cache`]: double-buffered tile cache reused while panning
//!
//! # Example
//!
//! ```
//! use unitiles_core::{Engine, HeadlessSurface, SurfaceKind, Viewport};
//! use unitiles_types::Tile;
//!
//! let surface = HeadlessSurface::new(3, 3, SurfaceKind::Retained);
//! let viewport = Viewport::new(surface, 3, 3);
//! let mut engine = Engine::new(viewport, |x, y| {
//!     let d = (x + y).rem_euclid(10) as u32;
//!     Tile::new(char::from_digit(d, 10).unwrap())
//! });
//!
//! // Focus (5, 5) lands on the center cell (1, 1).
//! engine.update(5, 5)?;
//! assert_eq!(engine.viewport().get(1, 1).glyph(), '0');
//! assert_eq!(engine.viewport().get(0, 0).glyph(), '8');
//!
//! let drawn = engine.viewport_mut().render()?;
//! assert_eq!(drawn, 9);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Threading
//!
//! Single-threaded by construction: callbacks are plain `FnMut` boxes, and a
//! frame (`update` then `render`) must finish before the next one starts.

pub mod cache;
pub mod engine;
pub mod error;
pub mod surface;
pub mod viewport;

pub use unitiles_types as types;

pub use cache::CacheState;
pub use engine::{Engine, FrameStats, MaskFn, ShaderFn, TileFn, WorldBounds};
pub use error::EngineError;
pub use surface::{HeadlessSurface, Surface, SurfaceKind};
pub use viewport::Viewport;
