//! Property tests for span math, resize geometry and reordering.

use egui::{pos2, vec2, Rect, Vec2};
use ma_blocks_grid::constants::{FULL_WIDTH_THRESHOLD, MIN_RESIZE_HEIGHT, MIN_RESIZE_WIDTH};
use ma_blocks_grid::drag::move_block;
use ma_blocks_grid::masonry::{column_span, row_span};
use ma_blocks_grid::resize::resize_box;
use ma_blocks_grid::{Block, GridConfig, LayoutCommand, LayoutEngine, ResizeDirection};
use ma_blocks_grid::ScriptedMeasurements;
use proptest::prelude::*;

fn direction() -> impl Strategy<Value = ResizeDirection> {
    prop::sample::select(ResizeDirection::ALL.to_vec())
}

fn start_rect() -> impl Strategy<Value = Rect> {
    (0.0f32..400.0, 0.0f32..400.0, 150.0f32..600.0, 100.0f32..600.0)
        .prop_map(|(x, y, w, h)| Rect::from_min_size(pos2(x, y), vec2(w, h)))
}

fn blocks(len: usize) -> Vec<Block> {
    (0..len).map(|i| Block::new(format!("card {i}"))).collect()
}

proptest! {
    #[test]
    fn row_span_grows_with_height(
        a in 0.0f32..5000.0,
        b in 0.0f32..5000.0,
        row_height in 1.0f32..40.0,
        gap in 0.0f32..32.0,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let low_span = row_span(low, row_height, gap);
        let high_span = row_span(high, row_height, gap);
        prop_assert!(low_span >= 1);
        prop_assert!(low_span <= high_span);
        // Tracks plus gaps always cover the card.
        let covered = high_span as f32 * row_height + (high_span as f32 - 1.0) * gap;
        prop_assert!(covered + 0.01 >= high);
    }

    #[test]
    fn column_span_matches_explicit_width(
        columns in 1usize..8,
        column_width in 150.0f32..400.0,
        gap in 0.0f32..32.0,
    ) {
        let width = columns as f32 * column_width + (columns as f32 - 1.0) * gap;
        let mut block = Block::new("wide");
        block.apply_box(width, 200.0, false);
        prop_assert_eq!(column_span(&block, column_width, gap), columns);

        block.reset_to_auto_size();
        prop_assert_eq!(column_span(&block, column_width, gap), 1);
    }

    #[test]
    fn resize_never_goes_below_minimums(
        dir in direction(),
        start in start_rect(),
        dx in -2000.0f32..2000.0,
        dy in -2000.0f32..2000.0,
        container in 0.0f32..2000.0,
    ) {
        let outcome = resize_box(dir, start, vec2(dx, dy), container);
        prop_assert!(outcome.width >= MIN_RESIZE_WIDTH);
        prop_assert!(outcome.height >= MIN_RESIZE_HEIGHT);
        if outcome.is_full_width {
            prop_assert_eq!(outcome.width, container.max(MIN_RESIZE_WIDTH));
        }
    }

    #[test]
    fn wide_drags_snap_and_narrow_drags_unsnap(
        start in start_rect(),
        container in 800.0f32..2000.0,
        back in 0.0f32..0.5,
    ) {
        let snap_delta = container - start.width();
        let snapped = resize_box(ResizeDirection::E, start, vec2(snap_delta, 0.0), container);
        prop_assert!(snapped.is_full_width);
        prop_assert_eq!(snapped.width, container);

        let narrow = (container * FULL_WIDTH_THRESHOLD * back).max(MIN_RESIZE_WIDTH);
        let shrunk = resize_box(
            ResizeDirection::E,
            start,
            vec2(narrow - start.width(), 0.0),
            container,
        );
        prop_assert!(!shrunk.is_full_width);
    }

    #[test]
    fn reorder_keeps_every_block_once(
        len in 2usize..12,
        source in 0usize..12,
        target in 0usize..12,
    ) {
        let mut seq = blocks(len);
        let (source, target) = (source % len, target % len);
        let source_id = seq[source].id;
        let target_id = seq[target].id;
        let before: Vec<_> = seq.iter().map(|b| b.id).collect();

        let moved = move_block(&mut seq, source_id, target_id);
        let after: Vec<_> = seq.iter().map(|b| b.id).collect();

        prop_assert_eq!(moved, source != target);
        prop_assert_eq!(after.len(), before.len());
        prop_assert_eq!(after[target], source_id);

        let rest_before: Vec<_> = before.iter().filter(|id| **id != source_id).collect();
        let rest_after: Vec<_> = after.iter().filter(|id| **id != source_id).collect();
        prop_assert_eq!(rest_before, rest_after);
    }

    #[test]
    fn reset_always_returns_to_auto(
        dir in direction(),
        start in start_rect(),
        delta in (-500.0f32..1500.0, -500.0f32..1500.0),
        locked in any::<bool>(),
    ) {
        let mut block = Block::new("card");
        let id = block.id;
        if locked {
            block.toggle_resize_lock();
        }
        let mut engine = LayoutEngine::new(GridConfig::default(), vec![block]);
        let mut m = ScriptedMeasurements::new(1100.0);
        m.set_card_rect(id, start);

        let pointer = start.center();
        engine.apply(LayoutCommand::ResizeStart { block_id: id, direction: dir, pointer }, &m);
        engine.apply(
            LayoutCommand::ResizeMove { pointer: pointer + Vec2::new(delta.0, delta.1) },
            &m,
        );
        engine.apply(LayoutCommand::ResizeEnd, &m);
        prop_assert!(engine.block(id).unwrap().is_manually_resized);

        engine.apply(LayoutCommand::Reset(id), &m);
        let block = engine.block(id).unwrap();
        prop_assert_eq!(block.width, None);
        prop_assert_eq!(block.height, None);
        prop_assert!(!block.is_manually_resized);
        prop_assert!(!block.is_full_width);
        prop_assert_eq!(block.is_resize_locked, locked);
    }

    #[test]
    fn lock_toggle_touches_only_the_lock(
        len in 1usize..6,
        which in 0usize..6,
        sizes in prop::collection::vec((150.0f32..900.0, 100.0f32..600.0, any::<bool>()), 6),
    ) {
        let mut seq = blocks(len);
        for (block, (w, h, full)) in seq.iter_mut().zip(&sizes) {
            block.apply_box(*w, *h, *full);
        }
        let id = seq[which % len].id;
        let mut engine = LayoutEngine::new(GridConfig::default(), seq);
        let m = ScriptedMeasurements::new(1100.0);
        let before = engine.blocks().to_vec();

        engine.apply(LayoutCommand::ToggleLock(id), &m);
        let after = engine.blocks();
        prop_assert_eq!(after.len(), before.len());
        for (old, new) in before.iter().zip(after) {
            prop_assert_eq!(old.id, new.id);
            prop_assert_eq!(old.width, new.width);
            prop_assert_eq!(old.height, new.height);
            prop_assert_eq!(old.is_manually_resized, new.is_manually_resized);
            prop_assert_eq!(old.is_full_width, new.is_full_width);
            prop_assert_eq!(old.is_resize_locked != new.is_resize_locked, old.id == id);
        }
    }
}
