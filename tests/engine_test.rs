//! Engine frame resolution: centering, masking, bounds, cache and shader stages.

use std::cell::RefCell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use unitiles::core::{
    CacheState, Engine, EngineError, HeadlessSurface, SurfaceKind, Viewport, WorldBounds,
};
use unitiles::types::{Rgb, Tile};

type Calls = Rc<RefCell<Vec<(i32, i32)>>>;

/// Distinct glyph per world coordinate in [-256, 256).
fn marker(x: i32, y: i32) -> Tile {
    let code = 0x10000 + ((x + 256) as u32) * 512 + (y + 256) as u32;
    Tile::new(char::from_u32(code).unwrap())
}

fn viewport(w: u16, h: u16) -> Viewport<HeadlessSurface> {
    Viewport::new(HeadlessSurface::new(w, h, SurfaceKind::Retained), w, h)
}

/// Engine whose tile function returns `marker` and logs every call.
fn counting_engine(w: u16, h: u16) -> (Engine<HeadlessSurface>, Calls) {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&calls);
    let engine = Engine::new(viewport(w, h), move |x, y| {
        log.borrow_mut().push((x, y));
        marker(x, y)
    });
    (engine, calls)
}

#[test]
fn focus_lands_on_center_cell() {
    let (mut engine, _) = counting_engine(41, 25);
    assert_eq!(engine.viewport().cx(), 20);
    assert_eq!(engine.viewport().cy(), 12);

    engine.update(7, -3).unwrap();
    assert_eq!(engine.viewport().get(20, 12), marker(7, -3));
    assert_eq!(engine.viewport().get(0, 0), marker(7 - 20, -3 - 12));
    assert_eq!(engine.viewport().get(40, 24), marker(7 + 20, -3 + 12));
}

#[test]
fn end_to_end_three_by_three() {
    let vp = viewport(3, 3);
    let mut engine = Engine::new(vp, |x, y| {
        let d = (x + y).rem_euclid(10) as u32;
        Tile::new(char::from_digit(d, 10).unwrap())
    });
    engine.update(5, 5).unwrap();

    let vp = engine.viewport();
    for j in 0..3 {
        for i in 0..3 {
            let expected = char::from_digit(((4 + i + 4 + j) % 10) as u32, 10).unwrap();
            assert_eq!(vp.get(i, j).glyph(), expected, "cell ({i},{j})");
        }
    }
    assert_eq!(vp.get(1, 1).glyph(), '0');
}

#[test]
fn uncached_update_fetches_each_cell_exactly_once() {
    let (mut engine, calls) = counting_engine(6, 4);
    for _ in 0..3 {
        calls.borrow_mut().clear();
        let stats = engine.update(0, 0).unwrap();
        assert_eq!(stats.fetched, 24);
        let mut seen = calls.borrow().clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 24);
    }
}

#[test]
fn masked_cell_is_null_and_never_fetched() {
    let (mut engine, calls) = counting_engine(5, 5);
    engine.set_mask_func(|x, y| (x, y) != (2, 2));

    let stats = engine.update(2, 2).unwrap();
    assert!(engine.viewport().get(2, 2).is_null());
    assert!(!calls.borrow().contains(&(2, 2)));
    assert_eq!(stats.masked, 1);
    assert_eq!(stats.fetched, 24);
    assert_eq!(engine.viewport().get(1, 2), marker(1, 2));
}

#[test]
fn cleared_mask_takes_effect_next_frame() {
    let (mut engine, _) = counting_engine(3, 3);
    engine.set_mask_func(|_, _| false);
    engine.update(0, 0).unwrap();
    assert!(engine.viewport().tiles().iter().all(Tile::is_null));

    engine.clear_mask_func();
    engine.update(0, 0).unwrap();
    assert_eq!(engine.viewport().get(1, 1), marker(0, 0));
}

#[test]
fn world_bounds_null_out_cells_without_callbacks() {
    let (mut engine, calls) = counting_engine(5, 5);
    let mask_calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let mask_log = Rc::clone(&mask_calls);
    engine.set_mask_func(move |x, y| {
        mask_log.borrow_mut().push((x, y));
        true
    });
    engine.set_world_bounds(Some(WorldBounds::new(5, 5)));

    // Origin (-2, -2): two rows and two columns fall off the world.
    let stats = engine.update(0, 0).unwrap();
    assert_eq!(stats.out_of_bounds, 16);
    assert_eq!(stats.fetched, 9);
    for j in 0..5 {
        for i in 0..5 {
            let (wx, wy) = (i - 2, j - 2);
            let tile = engine.viewport().get(i, j);
            if wx < 0 || wy < 0 {
                assert!(tile.is_null(), "({wx},{wy}) should be empty");
            } else {
                assert_eq!(tile, marker(wx, wy));
            }
        }
    }
    let outside = |&(x, y): &(i32, i32)| !(0..5).contains(&x) || !(0..5).contains(&y);
    assert!(!calls.borrow().iter().any(outside));
    assert!(!mask_calls.borrow().iter().any(outside));

    // Focus on the far corner: coordinates >= 5 are empty too.
    engine.update(4, 4).unwrap();
    assert_eq!(engine.viewport().get(2, 2), marker(4, 4));
    assert!(engine.viewport().get(3, 2).is_null());
    assert!(engine.viewport().get(2, 3).is_null());
}

#[test]
fn world_bounds_check_rows_against_height() {
    let (mut engine, _) = counting_engine(3, 3);
    engine.set_world_bounds(Some(WorldBounds::new(10, 3)));

    // Rows 2..=4 of a 10x3 world: only row 2 exists.
    engine.update(5, 3).unwrap();
    assert_eq!(engine.viewport().get(1, 0), marker(5, 2));
    assert!(engine.viewport().get(1, 1).is_null());
    assert!(engine.viewport().get(1, 2).is_null());
}

#[test]
fn panning_reuses_cached_tiles() {
    let (mut engine, calls) = counting_engine(9, 7);
    engine.set_cache_enabled(true);
    assert_eq!(engine.cache_state(), CacheState::Stale);

    let first = engine.update(10, 10).unwrap();
    assert_eq!(first.fetched, 63);
    assert_eq!(engine.cache_state(), CacheState::Warm);

    calls.borrow_mut().clear();
    let second = engine.update(11, 10).unwrap();

    // New origin (7, 7); the old footprint started at x = 6, so only x = 15 is new.
    assert_eq!(second.cache_hits, 56);
    assert_eq!(second.fetched, 7);
    let fetched = calls.borrow().clone();
    assert!(fetched.iter().all(|&(x, _)| x == 15));
    assert_eq!(fetched.len(), 7);

    for j in 0..7 {
        for i in 0..9 {
            assert_eq!(engine.viewport().get(i, j), marker(7 + i, 7 + j));
        }
    }
}

#[test]
fn panning_out_of_view_refetches_everything() {
    let (mut engine, _) = counting_engine(4, 4);
    engine.set_cache_enabled(true);
    engine.update(0, 0).unwrap();
    let stats = engine.update(100, 100).unwrap();
    assert_eq!(stats.cache_hits, 0);
    assert_eq!(stats.fetched, 16);
}

#[test]
fn enabling_cache_always_forces_full_refresh() {
    let (mut engine, _) = counting_engine(4, 3);
    engine.set_cache_enabled(true);
    engine.update(0, 0).unwrap();
    assert_eq!(engine.update(0, 0).unwrap().fetched, 0);

    engine.set_cache_enabled(true);
    assert_eq!(engine.cache_state(), CacheState::Stale);
    assert_eq!(engine.update(0, 0).unwrap().fetched, 12);

    engine.set_cache_enabled(false);
    assert_eq!(engine.cache_state(), CacheState::Disabled);
    assert_eq!(engine.update(0, 0).unwrap().fetched, 12);
}

#[test]
fn cached_null_tile_is_refetched() {
    let (mut engine, calls) = counting_engine(5, 5);
    engine.set_cache_enabled(true);
    engine.set_mask_func(|x, y| (x, y) != (2, 2));
    engine.update(2, 2).unwrap();
    assert!(engine.viewport().get(2, 2).is_null());

    engine.clear_mask_func();
    calls.borrow_mut().clear();
    let stats = engine.update(2, 2).unwrap();

    assert_eq!(stats.cache_hits, 24);
    assert_eq!(*calls.borrow(), vec![(2, 2)]);
    assert_eq!(engine.viewport().get(2, 2), marker(2, 2));
}

#[test]
fn mask_overrides_warm_cache() {
    let (mut engine, _) = counting_engine(3, 3);
    engine.set_cache_enabled(true);
    engine.update(0, 0).unwrap();

    engine.set_mask_func(|x, _| x != 0);
    let stats = engine.update(0, 0).unwrap();
    assert_eq!(stats.masked, 3);
    assert!(engine.viewport().get(1, 0).is_null());
    assert_eq!(engine.viewport().get(2, 0), marker(1, -1));
}

#[test]
fn missing_tile_source_fails_only_without_cache() {
    let (mut engine, _) = counting_engine(2, 2);
    engine.clear_tile_func();
    assert!(!engine.has_tile_func());
    let err = engine.update(0, 0).unwrap_err();
    assert!(matches!(err, EngineError::MissingTileSource));
    assert!(err.to_string().contains("nothing to render"));

    engine.set_cache_enabled(true);
    assert!(engine.update(0, 0).is_ok());

    engine.set_tile_func(marker);
    engine.set_cache_enabled(false);
    engine.update(0, 0).unwrap();
    assert_eq!(engine.viewport().get(1, 1), marker(0, 0));
}

#[test]
fn shader_skips_null_tiles_and_sees_one_timestamp() {
    let (mut engine, _) = counting_engine(4, 4);
    engine.set_mask_func(|x, y| (x + y) % 2 == 0);

    let stamps: Rc<RefCell<Vec<u64>>> = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&stamps);
    engine.set_shader_func(move |tile, _, _, t| {
        assert!(!tile.is_null());
        seen.borrow_mut().push(t);
        tile.with_background(Rgb::new(255, 0, 0))
    });

    let stats = engine.update_at(0, 0, 1234).unwrap();
    assert_eq!(stats.shaded, 8);
    assert_eq!(stamps.borrow().len(), 8);
    assert!(stamps.borrow().iter().all(|&t| t == 1234));

    // Masked cells stay empty, visible cells are shaded.
    assert!(engine.viewport().get(1, 0).is_null());
    assert_eq!(engine.viewport().get(0, 0).bg(), Some(Rgb::new(255, 0, 0)));
}

#[test]
fn cache_stores_unshaded_tiles() {
    let (mut engine, _) = counting_engine(3, 3);
    engine.set_cache_enabled(true);
    engine.set_shader_func(|tile, _, _, _| {
        assert_eq!(tile.bg(), None, "shader fed an already shaded tile");
        tile.with_background(Rgb::grey(40))
    });

    engine.update_at(0, 0, 0).unwrap();
    let stats = engine.update_at(1, 0, 16).unwrap();
    assert_eq!(stats.cache_hits, 6);
    assert_eq!(
        engine.viewport().get(0, 0),
        marker(-1 + 1, -1).with_background(Rgb::grey(40))
    );
}

#[test]
fn update_without_focus_centers_origin() {
    let (mut engine, _) = counting_engine(3, 3);
    engine.update_origin().unwrap();
    assert_eq!(engine.viewport().get(1, 1), marker(0, 0));
}

#[test]
fn panicking_tile_func_leaves_partial_frame() {
    let mut engine = Engine::new(viewport(3, 3), |_, _| Tile::new('a'));
    engine.update(1, 1).unwrap();

    engine.set_tile_func(|x, y| {
        if (x, y) == (1, 1) {
            panic!("tile lookup failed");
        }
        Tile::new('b')
    });
    let result = catch_unwind(AssertUnwindSafe(|| engine.update(1, 1)));
    assert!(result.is_err());

    let glyphs: String = engine.viewport().tiles().iter().map(|t| t.glyph()).collect();
    assert_eq!(glyphs, "bbbbaaaaa");
}

#[test]
fn focus_at_integer_extremes_wraps_instead_of_overflowing() {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&calls);
    let mut engine = Engine::new(viewport(3, 3), move |x, y| {
        log.borrow_mut().push((x, y));
        Tile::new('.')
    });

    engine.update(i32::MIN, 0).unwrap();
    assert!(calls.borrow().contains(&(i32::MIN, 0)));
    assert!(calls.borrow().contains(&(i32::MAX, -1)));

    calls.borrow_mut().clear();
    engine.update(i32::MAX, i32::MAX).unwrap();
    assert!(calls.borrow().contains(&(i32::MAX, i32::MAX)));
    assert!(calls.borrow().contains(&(i32::MIN, i32::MIN)));
    assert_eq!(calls.borrow().len(), 9);
}

#[test]
fn cached_pan_across_the_whole_range_refetches() {
    let (mut engine, _) = counting_engine(3, 3);
    engine.set_tile_func(|_, _| Tile::new('.'));
    engine.set_cache_enabled(true);
    engine.update(-2_000_000_000, 0).unwrap();
    let stats = engine.update(2_000_000_000, 0).unwrap();
    assert_eq!(stats.cache_hits, 0);
    assert_eq!(stats.fetched, 9);
}

#[test]
fn engine_hands_back_its_viewport() {
    let (mut engine, _) = counting_engine(3, 3);
    engine.update(0, 0).unwrap();
    let mut vp = engine.into_viewport();
    assert_eq!(vp.get(1, 1), marker(0, 0));
    assert_eq!(vp.render().unwrap(), 9);
}

#[test]
fn callbacks_can_be_replaced_between_frames() {
    let (mut engine, _) = counting_engine(1, 1);
    engine.update(0, 0).unwrap();
    assert_eq!(engine.viewport().get(0, 0), marker(0, 0));

    engine.set_tile_func(|_, _| Tile::new('z'));
    engine.set_shader_func(|tile, _, _, _| tile.with_color(Rgb::grey(1)));
    engine.update(0, 0).unwrap();
    assert_eq!(engine.viewport().get(0, 0), Tile::new('z').with_color(Rgb::grey(1)));

    engine.clear_shader_func();
    engine.update(0, 0).unwrap();
    assert_eq!(engine.viewport().get(0, 0), Tile::new('z'));
}
