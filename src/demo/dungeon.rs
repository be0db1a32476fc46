//! A small hand-drawn dungeon: `#` walls, `.` floor.

use crate::types::{Tile, NULL_TILE};

pub const WALL: char = '#';
pub const FLOOR: char = '.';

/// Player start position.
pub const START: (i32, i32) = (3, 2);

pub const MAP: [&str; 30] = [
    "##############################",
    "##...###############...#######",
    "##..........########......####",
    "##...######.########..###.####",
    "###########.#############.####",
    "###########.############.....#",
    "###########.############.....#",
    "###########.############.....#",
    "###########..................#",
    "##############.###############",
    "##############.#######....####",
    "#........#####.#######.#..####",
    "#..####...####.#######.#######",
    "#.........####.#######.#######",
    "#.........####.#######......##",
    "##.###########.#######......##",
    "##.###########.###########.###",
    "##.###########.###########.###",
    "##.###########.###########.###",
    "##.#####.......###########.###",
    "##.#####.....#.###########.###",
    "##.#####.....#.###########.###",
    "##.#####.....#.###########.###",
    "##.#####.....#.###########.###",
    "##.###########.###########.###",
    "##.###########.###########.###",
    "##.###########.............###",
    "##.#############.#############",
    "##...............#############",
    "##############################",
];

const WALL_TILE: Tile = Tile::coloured(WALL, 100, 100, 100);
const FLOOR_TILE: Tile = Tile::coloured(FLOOR, 160, 140, 110);

#[derive(Debug, Clone)]
pub struct Dungeon {
    width: u32,
    height: u32,
    cells: Vec<char>,
}

impl Default for Dungeon {
    fn default() -> Self {
        Self::from_rows(&MAP)
    }
}

impl Dungeon {
    /// Build from text rows. Short rows are padded with wall.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut cells = Vec::with_capacity(width * rows.len());
        for row in rows {
            let n = row.chars().count();
            cells.extend(row.chars());
            cells.extend(std::iter::repeat(WALL).take(width - n));
        }
        Self {
            width: width as u32,
            height: rows.len() as u32,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn glyph_at(&self, x: i32, y: i32) -> Option<char> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize])
    }

    /// Tile lookup for the engine. Off-map cells are empty.
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        match self.glyph_at(x, y) {
            Some(WALL) => WALL_TILE,
            Some(FLOOR) => FLOOR_TILE,
            Some(other) => Tile::new(other),
            None => NULL_TILE,
        }
    }

    /// Anything that is not floor blocks movement and sight.
    pub fn blocks(&self, x: i32, y: i32) -> bool {
        self.glyph_at(x, y) != Some(FLOOR)
    }
}
