//! Frame-to-frame tile cache.
//!
//! Holds last frame's resolved (pre-shader) tiles at viewport-relative
//! positions, plus the world origin they were resolved for. The next frame
//! is written into a second buffer of the same shape; `commit` swaps the two
//! so nothing is reallocated after construction.

use std::mem;

use crate::types::{Tile, NULL_TILE};

/// Observable cache state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Disabled,
    /// Next update fetches every cell.
    Stale,
    /// Next update reuses tiles that stay in view.
    Warm,
}

#[derive(Debug, Clone)]
pub(crate) struct TileCache {
    enabled: bool,
    stale: bool,
    origin: (i32, i32),
    width: u16,
    height: u16,
    current: Vec<Tile>,
    next: Vec<Tile>,
}

impl TileCache {
    pub(crate) fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            enabled: false,
            stale: true,
            origin: (0, 0),
            width,
            height,
            current: vec![NULL_TILE; len],
            next: vec![NULL_TILE; len],
        }
    }

    pub(crate) fn state(&self) -> CacheState {
        match (self.enabled, self.stale) {
            (false, _) => CacheState::Disabled,
            (true, true) => CacheState::Stale,
            (true, false) => CacheState::Warm,
        }
    }

    #[inline]
    pub(crate) fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enabling always marks the cache stale, even if it was already on.
    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if enabled {
            self.stale = true;
        }
    }

    #[inline]
    pub(crate) fn is_warm(&self) -> bool {
        self.enabled && !self.stale
    }

    /// Cached tile for world cell `(wx, wy)`.
    ///
    /// `None` when the cell was outside last frame's footprint, or when the
    /// cached entry is [`NULL_TILE`]: a null entry may only mean the cell was
    /// masked or out of bounds last frame, so it never counts as a hit.
    /// An offset too large for `i32` is a miss.
    #[inline]
    pub(crate) fn lookup(&self, wx: i32, wy: i32) -> Option<Tile> {
        let rx = wx.checked_sub(self.origin.0)?;
        let ry = wy.checked_sub(self.origin.1)?;
        if rx < 0 || ry < 0 || rx >= self.width as i32 || ry >= self.height as i32 {
            return None;
        }
        let tile = self.current[ry as usize * self.width as usize + rx as usize];
        if tile.is_null() {
            None
        } else {
            Some(tile)
        }
    }

    #[inline]
    pub(crate) fn store(&mut self, x: u16, y: u16, tile: Tile) {
        self.next[y as usize * self.width as usize + x as usize] = tile;
    }

    /// Finish a frame resolved at `origin`.
    pub(crate) fn commit(&mut self, origin: (i32, i32)) {
        self.origin = origin;
        mem::swap(&mut self.current, &mut self.next);
        self.stale = false;
    }
}
