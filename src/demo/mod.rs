//! Dungeon demo: the pieces the `unitiles` binary wires together.
//!
//! [`DungeonDemo`] owns an [`Engine`] over any surface, so the same game
//! runs in a terminal or headless in tests.

pub mod dungeon;
pub mod fov;
pub mod lighting;
pub mod rng;

use std::cell::Cell;
use std::rc::Rc;

use anyhow::Result;

use crate::config::EngineConfig;
use crate::core::{Engine, FrameStats, Surface, Viewport, WorldBounds};
use crate::types::{Rgb, Tile};

pub use dungeon::{Dungeon, START};
pub use rng::SimpleRng;

pub const PLAYER: Tile = Tile::coloured('@', 255, 255, 255);

const STATUS_FG: Rgb = Rgb::grey(150);

pub struct DungeonDemo<S: Surface> {
    engine: Engine<S>,
    map: Rc<Dungeon>,
    player: Rc<Cell<(i32, i32)>>,
}

impl<S: Surface> DungeonDemo<S> {
    pub fn new(surface: S, width: u16, height: u16, opts: &EngineConfig) -> Self {
        let map = Rc::new(Dungeon::default());
        let player = Rc::new(Cell::new(START));

        let viewport = Viewport::new(surface, width, height);
        let tiles = Rc::clone(&map);
        let mut engine = Engine::new(viewport, move |x, y| tiles.tile_at(x, y));
        engine.set_world_bounds(Some(WorldBounds::new(map.width(), map.height())));
        engine.set_cache_enabled(opts.cache);

        if opts.fov {
            let sight = Rc::clone(&map);
            let viewer = Rc::clone(&player);
            engine.set_mask_func(move |x, y| fov::is_visible(&sight, viewer.get(), x, y));
        }
        if opts.lighting {
            let light = Rc::clone(&player);
            engine.set_shader_func(move |tile, x, y, t| {
                lighting::torch(tile, x, y, t, light.get())
            });
        }

        Self {
            engine,
            map,
            player,
        }
    }

    pub fn player(&self) -> (i32, i32) {
        self.player.get()
    }

    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<S> {
        &mut self.engine
    }

    /// Move the player by `(dx, dy)` unless that walks into something solid.
    /// Returns whether the player moved.
    pub fn step(&mut self, dx: i32, dy: i32) -> bool {
        let (x, y) = self.player.get();
        let (nx, ny) = (x + dx.signum(), y + dy.signum());
        if (nx, ny) == (x, y) || self.map.blocks(nx, ny) {
            return false;
        }
        self.player.set((nx, ny));
        true
    }

    /// Resolve the frame around the player and overlay the player glyph and
    /// status line. Does not render.
    pub fn frame(&mut self) -> Result<FrameStats> {
        let (px, py) = self.player.get();
        let stats = self.engine.update(px, py)?;

        let vp = self.engine.viewport_mut();
        vp.put(PLAYER, vp.cx() as i32, vp.cy() as i32);
        let status = format!("{px},{py}");
        let bottom = vp.height() as i32 - 1;
        vp.put_str(&status, 0, bottom, Some(STATUS_FG));
        Ok(stats)
    }

    pub fn render(&mut self) -> Result<usize> {
        self.engine.viewport_mut().render()
    }
}
