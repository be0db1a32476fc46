//! Viewport: fixed-size tile buffer bound to a display surface.
//!
//! The buffer is always fully populated; absent content is [`NULL_TILE`].
//! `render` flushes it to the surface using the strategy picked from the
//! surface kind at construction:
//!
//! - Immediate surfaces get every cell, every frame.
//! - Retained surfaces get only cells whose tile differs from what was last
//!   drawn there. The shadow grid starts out unknown, and `clear`/`invalidate`
//!   reset it so the next render draws everything.

use anyhow::Result;
use tracing::trace;

use crate::surface::{Surface, SurfaceKind};
use crate::types::{Rgb, Tile, NULL_TILE};

pub struct Viewport<S: Surface> {
    surface: S,
    kind: SurfaceKind,
    width: u16,
    height: u16,
    cx: u16,
    cy: u16,
    tiles: Vec<Tile>,
    /// Last tile drawn per cell (retained surfaces only). `None` = unknown.
    shown: Vec<Option<Tile>>,
}

impl<S: Surface> Viewport<S> {
    pub fn new(surface: S, width: u16, height: u16) -> Self {
        let kind = surface.kind();
        let len = width as usize * height as usize;
        let shown = match kind {
            SurfaceKind::Retained => vec![None; len],
            SurfaceKind::Immediate => Vec::new(),
        };
        Self {
            surface,
            kind,
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            tiles: vec![NULL_TILE; len],
            shown,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Center column, `floor(width / 2)`.
    pub fn cx(&self) -> u16 {
        self.cx
    }

    /// Center row, `floor(height / 2)`.
    pub fn cy(&self) -> u16 {
        self.cy
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn surface_kind(&self) -> SurfaceKind {
        self.kind
    }

    /// Row-major view of the buffer.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[inline(always)]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Write `tile` at `(x, y)`; out-of-range coordinates are ignored.
    pub fn put(&mut self, tile: Tile, x: i32, y: i32) {
        if let Some(i) = self.idx(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// Write without the bounds filter.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline(always)]
    pub fn put_raw(&mut self, tile: Tile, x: u16, y: u16) {
        let w = self.width as usize;
        let row = y as usize * w;
        self.tiles[row..row + w][x as usize] = tile;
    }

    /// Tile at `(x, y)`, or [`NULL_TILE`] when out of range.
    pub fn get(&self, x: i32, y: i32) -> Tile {
        self.idx(x, y).map_or(NULL_TILE, |i| self.tiles[i])
    }

    /// Write `text` left to right from `(x, y)`, clipping at the edges.
    pub fn put_str(&mut self, text: &str, x: i32, y: i32, fg: Option<Rgb>) {
        for (dx, ch) in text.chars().enumerate() {
            let mut tile = Tile::new(ch);
            if let Some(c) = fg {
                tile = tile.with_color(c);
            }
            self.put(tile, x.saturating_add(dx as i32), y);
        }
    }

    /// Fill every cell with [`NULL_TILE`] and forget what the surface shows.
    pub fn clear(&mut self) {
        self.clear_with(NULL_TILE.glyph());
    }

    /// Fill every cell with an uncolored `glyph` and forget what the surface shows.
    pub fn clear_with(&mut self, glyph: char) {
        self.tiles.fill(Tile::new(glyph));
        self.invalidate();
    }

    /// Force the next render to draw every cell.
    ///
    /// Useful after a terminal resize or anything else that scribbled over
    /// the surface behind our back.
    pub fn invalidate(&mut self) {
        self.shown.fill(None);
    }

    /// Fill cell `(i, j)` with `f(i + offset_x, j + offset_y)`.
    pub fn procedural_fill<F>(&mut self, mut f: F, offset_x: i32, offset_y: i32)
    where
        F: FnMut(i32, i32) -> Tile,
    {
        let w = self.width as usize;
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            let x = (i % w) as i32;
            let y = (i / w) as i32;
            *tile = f(x + offset_x, y + offset_y);
        }
    }

    /// Flush the buffer to the surface. Returns the number of cells drawn.
    pub fn render(&mut self) -> Result<usize> {
        let w = self.width as usize;
        let mut drawn = 0;

        match self.kind {
            SurfaceKind::Immediate => {
                for (i, tile) in self.tiles.iter().enumerate() {
                    self.surface.draw((i % w) as u16, (i / w) as u16, tile)?;
                }
                drawn = self.tiles.len();
            }
            SurfaceKind::Retained => {
                for (i, tile) in self.tiles.iter().enumerate() {
                    if self.shown[i].as_ref() == Some(tile) {
                        continue;
                    }
                    self.surface.draw((i % w) as u16, (i / w) as u16, tile)?;
                    self.shown[i] = Some(*tile);
                    drawn += 1;
                }
            }
        }

        self.surface.present()?;
        trace!(target: "viewport", kind = self.kind.as_str(), drawn, "render");
        Ok(drawn)
    }
}
