//! TerminalSurface: a crossterm-backed [`Surface`].
//!
//! Draws are encoded into an internal byte buffer and written out in one go
//! on `present`, so a frame costs one write + flush. Two cheap elisions keep
//! the byte count down:
//!
//! - no `MoveTo` when the draw lands where the previous glyph left the cursor
//! - no color commands when the style matches the previous draw

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use tracing::trace;

use crate::core::{Surface, SurfaceKind};
use crate::types::{Rgb, Tile};

type Style = (Option<Rgb>, Option<Rgb>);

pub struct TerminalSurface<W: Write> {
    out: W,
    kind: SurfaceKind,
    origin: (u16, u16),
    buf: Vec<u8>,
    /// Where the terminal cursor sits after the last queued glyph, if known.
    cursor: Option<(u16, u16)>,
    style: Option<Style>,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout(kind: SurfaceKind) -> Self {
        Self::new(io::stdout(), kind)
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, kind: SurfaceKind) -> Self {
        Self {
            out,
            kind,
            origin: (0, 0),
            buf: Vec::with_capacity(64 * 1024),
            cursor: None,
            style: None,
        }
    }

    /// Place viewport cell (0, 0) at terminal column `x`, row `y`.
    pub fn with_origin(mut self, x: u16, y: u16) -> Self {
        self.origin = (x, y);
        self
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Bytes queued since the last present.
    pub fn pending_bytes(&self) -> usize {
        self.buf.len()
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn kind(&self) -> SurfaceKind {
        self.kind
    }

    fn draw(&mut self, x: u16, y: u16, tile: &Tile) -> Result<()> {
        let at = (
            self.origin.0.saturating_add(x),
            self.origin.1.saturating_add(y),
        );
        if self.cursor != Some(at) {
            self.buf.queue(cursor::MoveTo(at.0, at.1))?;
        }

        let style = (tile.fg(), tile.bg());
        if self.style != Some(style) {
            apply_style_into(&mut self.buf, style)?;
            self.style = Some(style);
        }

        let glyph = tile.glyph();
        self.buf.queue(Print(glyph))?;
        // Only ASCII has a width we can be sure of.
        self.cursor = glyph.is_ascii().then(|| (at.0.saturating_add(1), at.1));
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.buf.queue(ResetColor)?;
        self.style = None;
        self.cursor = None;

        let written = self.out.write_all(&self.buf).and_then(|()| self.out.flush());
        let bytes = self.buf.len();
        // A failed frame is dropped, not resent with the next one.
        self.buf.clear();
        written?;
        trace!(target: "term", bytes, "present");
        Ok(())
    }
}

fn apply_style_into(out: &mut Vec<u8>, (fg, bg): Style) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(bg)))?;
    Ok(())
}

/// Unset colors fall back to the terminal default.
pub fn rgb_to_color(rgb: Option<Rgb>) -> Color {
    match rgb {
        Some(c) => Color::Rgb {
            r: c.r,
            g: c.g,
            b: c.b,
        },
        None => Color::Reset,
    }
}
