//! Torch-light shader: tiles dim with distance from the light and flicker
//! over time. The flicker phase depends only on the frame timestamp, so the
//! whole frame brightens and dims together.

use crate::types::{Rgb, Tile};

/// Distance (in cells) at which light reaches its floor.
pub const RADIUS: f32 = 9.0;
/// Darkest a visible tile gets.
pub const AMBIENT: f32 = 0.25;

const DEFAULT_FG: Rgb = Rgb::grey(200);

pub fn brightness(light: (i32, i32), x: i32, y: i32, timestamp_ms: u64) -> f32 {
    let dx = (x - light.0) as f32;
    let dy = (y - light.1) as f32;
    let falloff = 1.0 - (dx * dx + dy * dy).sqrt() / RADIUS;
    let flicker = 0.92 + 0.08 * ((timestamp_ms as f32) / 130.0).sin();
    (falloff * flicker).clamp(AMBIENT, 1.0)
}

/// Shade `tile` as seen by a torch at `light`.
pub fn torch(tile: Tile, x: i32, y: i32, timestamp_ms: u64, light: (i32, i32)) -> Tile {
    let k = brightness(light, x, y, timestamp_ms);
    let fg = tile.fg().unwrap_or(DEFAULT_FG).scaled(k);
    let shaded = tile.with_color(fg);
    match tile.bg() {
        Some(bg) => shaded.with_background(bg.scaled(k)),
        None => shaded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn far_tiles_bottom_out_at_ambient() {
        assert_eq!(brightness((0, 0), 50, 50, 0), AMBIENT);
    }

    #[test]
    fn light_source_is_brightest() {
        let near = brightness((5, 5), 5, 5, 0);
        let far = brightness((5, 5), 9, 5, 0);
        assert!(near > far);
        assert!(near <= 1.0);
    }

    #[test]
    fn same_timestamp_same_result() {
        let t = Tile::coloured('#', 100, 100, 100);
        assert_eq!(torch(t, 3, 4, 777, (0, 0)), torch(t, 3, 4, 777, (0, 0)));
    }

    #[test]
    fn uncolored_tiles_get_a_default_color() {
        let t = torch(Tile::new('.'), 0, 0, 0, (0, 0));
        assert!(t.fg().is_some());
        assert_eq!(t.glyph(), '.');
        assert_eq!(t.bg(), None);
    }
}
