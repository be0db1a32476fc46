//! Engine: resolves world content into a viewport, one frame per `update`.
//!
//! Each frame places the focus point at the viewport's center cell and walks
//! every cell in row-major order. A cell's world coordinate resolves through
//! this chain, stopping at the first match:
//!
//! 1. outside the world bounds (if set) -> [`NULL_TILE`]
//! 2. mask says hidden (if set) -> [`NULL_TILE`]
//! 3. warm cache has a non-null tile for it -> cached tile
//! 4. tile function
//!
//! With the cache on, the resolved tile is stored before shading. The shader
//! then runs on every non-null tile with one timestamp for the whole frame,
//! and the result goes into the viewport.
//!
//! Callbacks run synchronously. A panicking callback unwinds out of `update`;
//! cells already visited keep their new tiles, the rest keep last frame's,
//! and the cache is not committed for that frame.

use std::time::Instant;

use tracing::{debug, trace};

use crate::cache::{CacheState, TileCache};
use crate::error::EngineError;
use crate::surface::Surface;
use crate::types::{Tile, NULL_TILE};
use crate::viewport::Viewport;

/// World coordinate -> tile.
pub type TileFn = Box<dyn FnMut(i32, i32) -> Tile>;
/// World coordinate -> visible?
pub type MaskFn = Box<dyn FnMut(i32, i32) -> bool>;
/// (tile, world x, world y, frame timestamp in ms) -> shaded tile.
pub type ShaderFn = Box<dyn FnMut(Tile, i32, i32, u64) -> Tile>;

/// Finite world anchored at (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldBounds {
    pub width: u32,
    pub height: u32,
}

impl WorldBounds {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }
}

/// Per-frame counters returned by [`Engine::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub cells: u32,
    /// Tile function calls.
    pub fetched: u32,
    pub cache_hits: u32,
    pub masked: u32,
    pub out_of_bounds: u32,
    /// Shader calls.
    pub shaded: u32,
}

pub struct Engine<S: Surface> {
    viewport: Viewport<S>,
    tile_func: Option<TileFn>,
    mask_func: Option<MaskFn>,
    shader_func: Option<ShaderFn>,
    bounds: Option<WorldBounds>,
    cache: TileCache,
    epoch: Instant,
}

impl<S: Surface> Engine<S> {
    pub fn new<F>(viewport: Viewport<S>, tile_func: F) -> Self
    where
        F: FnMut(i32, i32) -> Tile + 'static,
    {
        let cache = TileCache::new(viewport.width(), viewport.height());
        Self {
            viewport,
            tile_func: Some(Box::new(tile_func)),
            mask_func: None,
            shader_func: None,
            bounds: None,
            cache,
            epoch: Instant::now(),
        }
    }

    pub fn viewport(&self) -> &Viewport<S> {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport<S> {
        &mut self.viewport
    }

    pub fn into_viewport(self) -> Viewport<S> {
        self.viewport
    }

    pub fn set_tile_func<F>(&mut self, f: F)
    where
        F: FnMut(i32, i32) -> Tile + 'static,
    {
        self.tile_func = Some(Box::new(f));
        debug!(target: "engine", "tile function replaced");
    }

    pub fn clear_tile_func(&mut self) {
        self.tile_func = None;
        debug!(target: "engine", "tile function removed");
    }

    pub fn set_mask_func<F>(&mut self, f: F)
    where
        F: FnMut(i32, i32) -> bool + 'static,
    {
        self.mask_func = Some(Box::new(f));
        debug!(target: "engine", "mask function replaced");
    }

    pub fn clear_mask_func(&mut self) {
        self.mask_func = None;
        debug!(target: "engine", "mask function removed");
    }

    pub fn set_shader_func<F>(&mut self, f: F)
    where
        F: FnMut(Tile, i32, i32, u64) -> Tile + 'static,
    {
        self.shader_func = Some(Box::new(f));
        debug!(target: "engine", "shader function replaced");
    }

    pub fn clear_shader_func(&mut self) {
        self.shader_func = None;
        debug!(target: "engine", "shader function removed");
    }

    pub fn has_tile_func(&self) -> bool {
        self.tile_func.is_some()
    }

    pub fn world_bounds(&self) -> Option<WorldBounds> {
        self.bounds
    }

    /// Limit the world to `[0, width) x [0, height)`, or lift the limit with `None`.
    pub fn set_world_bounds(&mut self, bounds: Option<WorldBounds>) {
        self.bounds = bounds;
    }

    /// Turn the tile cache on or off. Turning it on always forces the next
    /// update to refetch every cell.
    pub fn set_cache_enabled(&mut self, enabled: bool) {
        let from = self.cache.state();
        self.cache.set_enabled(enabled);
        debug!(
            target: "engine",
            from = ?from,
            to = ?self.cache.state(),
            "tile cache toggled"
        );
    }

    pub fn cache_state(&self) -> CacheState {
        self.cache.state()
    }

    /// [`Engine::update`] focused on the world origin.
    pub fn update_origin(&mut self) -> Result<FrameStats, EngineError> {
        self.update(0, 0)
    }

    /// Resolve the frame centered on `(focus_x, focus_y)`, stamped with the
    /// milliseconds elapsed since this engine was created.
    pub fn update(&mut self, focus_x: i32, focus_y: i32) -> Result<FrameStats, EngineError> {
        let now = self.epoch.elapsed().as_millis() as u64;
        self.update_at(focus_x, focus_y, now)
    }

    /// Resolve the frame centered on `(focus_x, focus_y)` with an explicit
    /// frame timestamp for the shader.
    pub fn update_at(
        &mut self,
        focus_x: i32,
        focus_y: i32,
        timestamp_ms: u64,
    ) -> Result<FrameStats, EngineError> {
        if self.tile_func.is_none() && !self.cache.enabled() {
            return Err(EngineError::MissingTileSource);
        }

        // World coordinates wrap at the i32 edges instead of overflowing.
        let origin_x = focus_x.wrapping_sub(self.viewport.cx() as i32);
        let origin_y = focus_y.wrapping_sub(self.viewport.cy() as i32);
        let caching = self.cache.enabled();
        let warm = self.cache.is_warm();
        let was = self.cache.state();

        let mut stats = FrameStats::default();
        for j in 0..self.viewport.height() {
            for i in 0..self.viewport.width() {
                let wx = origin_x.wrapping_add(i as i32);
                let wy = origin_y.wrapping_add(j as i32);

                let mut tile = self.resolve(wx, wy, warm, &mut stats);
                if caching {
                    self.cache.store(i, j, tile);
                }
                if !tile.is_null() {
                    if let Some(shader) = self.shader_func.as_mut() {
                        tile = shader(tile, wx, wy, timestamp_ms);
                        stats.shaded += 1;
                    }
                }
                self.viewport.put_raw(tile, i, j);
                stats.cells += 1;
            }
        }

        if caching {
            self.cache.commit((origin_x, origin_y));
            if was != CacheState::Warm {
                debug!(target: "engine", origin_x, origin_y, "tile cache warm");
            }
        }

        trace!(
            target: "engine",
            focus_x,
            focus_y,
            cells = stats.cells,
            fetched = stats.fetched,
            cache_hits = stats.cache_hits,
            masked = stats.masked,
            out_of_bounds = stats.out_of_bounds,
            shaded = stats.shaded,
            "frame"
        );
        Ok(stats)
    }

    #[inline]
    fn resolve(&mut self, wx: i32, wy: i32, warm: bool, stats: &mut FrameStats) -> Tile {
        if let Some(bounds) = self.bounds {
            if !bounds.contains(wx, wy) {
                stats.out_of_bounds += 1;
                return NULL_TILE;
            }
        }
        if let Some(mask) = self.mask_func.as_mut() {
            if !mask(wx, wy) {
                stats.masked += 1;
                return NULL_TILE;
            }
        }
        if warm {
            if let Some(tile) = self.cache.lookup(wx, wy) {
                stats.cache_hits += 1;
                return tile;
            }
        }
        match self.tile_func.as_mut() {
            Some(fetch) => {
                stats.fetched += 1;
                fetch(wx, wy)
            }
            // Cache on, no source: a miss has nothing to show.
            None => NULL_TILE,
        }
    }
}
