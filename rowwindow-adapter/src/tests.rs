use crate::*;

use alloc::vec::Vec;
use rowwindow::{EngineOptions, NoCells, RowEngine, RowRange};
use std::collections::HashMap;

fn controller(n: u32) -> ScrollController<Vec<u32>, NoCells> {
    let engine = RowEngine::new(
        (0..n).collect(),
        NoCells,
        EngineOptions::new_with_key(20, |e: &u32| *e as u64),
    );
    ScrollController::new(engine)
}

#[test]
fn rows_for_height_counts_partial_rows() {
    assert_eq!(rows_for_height(100, 24), 5);
    assert_eq!(rows_for_height(96, 24), 4);
    assert_eq!(rows_for_height(0, 24), 0);
    assert_eq!(rows_for_height(100, 0), 0);
}

#[test]
fn viewable_range_covers_partially_visible_rows() {
    assert_eq!(viewable_range_for(250, 100, 24), RowRange::new(10, 15));
    assert_eq!(viewable_range_for(0, 100, 20), RowRange::new(0, 5));
    assert_eq!(viewable_range_for(0, 100, 0), RowRange::EMPTY);
}

#[test]
fn controller_drives_engine_from_pixels() {
    let mut c = controller(1000);
    assert!(c.on_frame(200, 0));
    assert_eq!(c.engine().min_viewport_rows(), 10);
    assert_eq!(c.engine().rendered_range(), RowRange::new(0, 18));

    assert!(c.on_scroll(1000));
    assert_eq!(c.engine().viewable_range(), Some(RowRange::new(50, 60)));
    assert_eq!(c.engine().rendered_range(), RowRange::new(42, 68));

    // A sub-row scroll changes the viewable range but not the rendered one.
    assert!(!c.on_scroll(1005));
    assert_eq!(c.engine().viewable_range(), Some(RowRange::new(50, 61)));
    assert_eq!(c.engine().rendered_range(), RowRange::new(42, 68));
}

#[test]
fn controller_resize_updates_min_rows() {
    let mut c = controller(1000);
    c.on_frame(200, 0);
    assert!(c.on_viewport_height(400));
    assert_eq!(c.engine().min_viewport_rows(), 20);
    assert_eq!(c.engine().rendered_range(), RowRange::new(0, 28));
}

#[test]
fn scroll_to_row_clamps_to_max_offset() {
    let mut c = controller(1000);
    c.on_frame(200, 0);
    assert_eq!(c.total_height(), 20_000);
    assert_eq!(c.max_scroll_offset(), 19_800);

    assert_eq!(c.scroll_to_row(995), 19_800);
    assert_eq!(c.engine().rendered_range(), RowRange::new(982, 1000));
    assert_eq!(c.scroll_to_row(10), 200);
}

#[test]
fn anchor_preserves_first_visible_entity_across_resort() {
    let mut c = controller(1000);
    c.on_frame(200, 1005);

    let anchor = c.capture_first_visible_anchor().unwrap();
    assert_eq!(anchor.key, 50);
    assert_eq!(anchor.offset_in_row, 5);

    let reversed: Vec<u32> = (0..1000).rev().collect();
    let mut map = HashMap::<u64, usize>::new();
    for (i, e) in reversed.iter().enumerate() {
        map.insert(*e as u64, i);
    }

    assert!(c.replace_data_source_anchored(reversed, |k| map.get(k).copied()));
    assert_eq!(c.scroll_offset(), 949 * 20 + 5);
    assert_eq!(c.engine().rendered_range(), RowRange::new(941, 967));
    assert_eq!(*c.engine().rows()[0].entity(), 58);
    assert_eq!(c.engine().row_index_for_key(&50), Some(949));
}

#[test]
fn anchor_requires_entity_key_mapping() {
    let engine = RowEngine::new((0..100u32).collect::<Vec<_>>(), NoCells, EngineOptions::new(20));
    let mut c = ScrollController::new(engine);
    c.on_frame(200, 100);
    assert!(c.capture_first_visible_anchor().is_none());
}

#[test]
fn apply_anchor_ignores_unknown_keys() {
    let mut c = controller(100);
    c.on_frame(200, 0);
    let anchor = ScrollAnchor {
        key: 7_000,
        offset_in_row: 0,
    };
    assert!(!c.apply_anchor(&anchor, |_| None));
    assert_eq!(c.scroll_offset(), 0);
}
