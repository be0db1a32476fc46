//! Core types module - tile and color values shared by every crate
//!
//! Everything here is plain data with no external dependencies, so the same
//! values can flow from a game's tile lookup through the engine and into any
//! display backend.
//!
//! # Tiles
//!
//! A [`Tile`] is one character cell: a glyph plus an optional foreground and
//! an optional background color. A color is either fully set (all three
//! channels) or unset, which means "use the surface default".
//!
//! [`NULL_TILE`] is the sentinel for "nothing to draw": a space with no
//! colors. The engine uses it for masked and out-of-bounds cells, and a
//! freshly cleared viewport is filled with it.
//!
//! # Examples
//!
//! ```
//! use unitiles_types::{Rgb, Tile, NULL_TILE};
//!
//! let wall = Tile::coloured('#', 100, 100, 100);
//! assert_eq!(wall.glyph(), '#');
//! assert_eq!(wall.fg(), Some(Rgb::new(100, 100, 100)));
//! assert_eq!(wall.bg(), None);
//!
//! // Tiles are values: copies are independent.
//! let mut lit = wall;
//! lit.set_grey(200);
//! assert_ne!(lit, wall);
//!
//! assert!(Tile::default().is_null());
//! assert_eq!(Tile::new(' '), NULL_TILE);
//! ```

/// Glyph used when a tile has nothing to show.
pub const NULL_CHAR: char = ' ';

/// Empty tile: a space with no colors.
pub const NULL_TILE: Tile = Tile::new(NULL_CHAR);

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Multiply every channel by `factor` (clamped to `0.0..=1.0`).
    pub fn scaled(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let ch = |c: u8| (c as f32 * f).round() as u8;
        Self::new(ch(self.r), ch(self.g), ch(self.b))
    }
}

/// A single character cell: glyph + optional foreground/background colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    glyph: char,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

impl Default for Tile {
    fn default() -> Self {
        NULL_TILE
    }
}

impl Tile {
    /// Uncolored tile.
    pub const fn new(glyph: char) -> Self {
        Self {
            glyph,
            fg: None,
            bg: None,
        }
    }

    /// Tile with a foreground color.
    pub const fn coloured(glyph: char, r: u8, g: u8, b: u8) -> Self {
        Self {
            glyph,
            fg: Some(Rgb::new(r, g, b)),
            bg: None,
        }
    }

    pub const fn with_color(mut self, fg: Rgb) -> Self {
        self.fg = Some(fg);
        self
    }

    pub const fn with_background(mut self, bg: Rgb) -> Self {
        self.bg = Some(bg);
        self
    }

    #[inline]
    pub const fn glyph(&self) -> char {
        self.glyph
    }

    #[inline]
    pub const fn fg(&self) -> Option<Rgb> {
        self.fg
    }

    #[inline]
    pub const fn bg(&self) -> Option<Rgb> {
        self.bg
    }

    /// True for the empty sentinel (space, no colors).
    #[inline]
    pub fn is_null(&self) -> bool {
        *self == NULL_TILE
    }

    pub fn set_glyph(&mut self, glyph: char) {
        self.glyph = glyph;
    }

    pub fn set_color(&mut self, r: u8, g: u8, b: u8) {
        self.fg = Some(Rgb::new(r, g, b));
    }

    pub fn set_grey(&mut self, grey: u8) {
        self.fg = Some(Rgb::grey(grey));
    }

    pub fn set_background(&mut self, r: u8, g: u8, b: u8) {
        self.bg = Some(Rgb::new(r, g, b));
    }

    pub fn reset_color(&mut self) {
        self.fg = None;
    }

    pub fn reset_background(&mut self) {
        self.bg = None;
    }
}
