//! Display surface capability consumed by [`crate::Viewport`].
//!
//! A surface is anything that can show a grid of tiles: a terminal, a raster
//! canvas, a retained widget tree, or an in-memory grid for tests. The
//! viewport only needs to put a tile at a cell and then present the frame.

use std::str::FromStr;

use anyhow::{anyhow, ensure, Result};

use crate::types::{Tile, NULL_TILE};

/// How a surface keeps its pixels between frames.
///
/// Read once when a viewport is built; it selects the render strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Nothing survives between frames; every cell is drawn every frame.
    Immediate,
    /// Cells keep their content; only changed cells need drawing.
    Retained,
}

impl SurfaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Immediate => "immediate",
            SurfaceKind::Retained => "retained",
        }
    }
}

/// Case-insensitive.
impl FromStr for SurfaceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "immediate" => Ok(SurfaceKind::Immediate),
            "retained" => Ok(SurfaceKind::Retained),
            other => Err(anyhow!("unknown surface kind {other:?}")),
        }
    }
}

/// Grid-addressable display backend.
pub trait Surface {
    fn kind(&self) -> SurfaceKind;

    /// Show `tile` at cell `(x, y)`. Visible no later than the next [`Surface::present`].
    fn draw(&mut self, x: u16, y: u16, tile: &Tile) -> Result<()>;

    /// Flush everything drawn since the last present.
    fn present(&mut self) -> Result<()>;
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn kind(&self) -> SurfaceKind {
        (**self).kind()
    }

    fn draw(&mut self, x: u16, y: u16, tile: &Tile) -> Result<()> {
        (**self).draw(x, y, tile)
    }

    fn present(&mut self) -> Result<()> {
        (**self).present()
    }
}

/// In-memory surface that records what was drawn.
///
/// Used by tests, benches and the headless perf runner.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    width: u16,
    height: u16,
    kind: SurfaceKind,
    cells: Vec<Tile>,
    draws: u64,
    presents: u64,
}

impl HeadlessSurface {
    pub fn new(width: u16, height: u16, kind: SurfaceKind) -> Self {
        Self {
            width,
            height,
            kind,
            cells: vec![NULL_TILE; width as usize * height as usize],
            draws: 0,
            presents: 0,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Tile> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize])
    }

    /// Glyphs of one row, for assertions.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|t| t.glyph())
            .collect()
    }

    pub fn draw_count(&self) -> u64 {
        self.draws
    }

    pub fn present_count(&self) -> u64 {
        self.presents
    }

    pub fn reset_counters(&mut self) {
        self.draws = 0;
        self.presents = 0;
    }
}

impl Surface for HeadlessSurface {
    fn kind(&self) -> SurfaceKind {
        self.kind
    }

    fn draw(&mut self, x: u16, y: u16, tile: &Tile) -> Result<()> {
        ensure!(
            x < self.width && y < self.height,
            "draw at ({x},{y}) outside {}x{} surface",
            self.width,
            self.height
        );
        self.cells[y as usize * self.width as usize + x as usize] = *tile;
        self.draws += 1;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        Ok(())
    }
}
