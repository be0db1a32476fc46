//! Field of view by beam casting.
//!
//! A cell is visible when any of four beams, one from each inset corner of
//! the viewer's cell to the matching corner of the target cell, reaches it
//! without passing through a blocking cell. The target itself may block (so
//! walls are visible).

use super::dungeon::Dungeon;

/// Corner inset, in cells.
const CORNER: f32 = 0.3;

/// True if the straight line from `(sx, sy)` to `(tx, ty)` crosses only open cells.
pub fn has_los(map: &Dungeon, sx: f32, sy: f32, tx: f32, ty: f32) -> bool {
    let dist_x = tx - sx;
    let dist_y = ty - sy;
    let steps = dist_x.abs().max(dist_y.abs()).round() as i32;
    if steps == 0 {
        return true;
    }
    let dx = dist_x / steps as f32;
    let dy = dist_y / steps as f32;

    let (mut x, mut y) = (sx, sy);
    for _ in 0..steps {
        if map.blocks(x.round() as i32, y.round() as i32) {
            return false;
        }
        x += dx;
        y += dy;
    }
    true
}

/// Visibility of `(x, y)` for a viewer standing at `viewer`.
pub fn is_visible(map: &Dungeon, viewer: (i32, i32), x: i32, y: i32) -> bool {
    let (px, py) = (viewer.0 as f32, viewer.1 as f32);
    let (tx, ty) = (x as f32, y as f32);
    [(-CORNER, -CORNER), (CORNER, -CORNER), (CORNER, CORNER), (-CORNER, CORNER)]
        .iter()
        .any(|&(ox, oy)| has_los(map, px + ox, py + oy, tx + ox, ty + oy))
}
