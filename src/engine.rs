//! The layout engine context owned by the host.
//!
//! [`LayoutState`] folds [`LayoutCommand`]s into the block sequence and gesture state.
//! [`LayoutEngine`] wraps it with the size observer, the coalescing scheduler and the
//! last packing result, and produces [`CardView`]s for whatever draws the grid.

use crate::block::{find, find_mut, first_duplicate_id, index_of, Block, StyleSettings};
use crate::config::GridConfig;
use crate::constants::MIN_RESIZE_WIDTH;
use crate::dimensions::{edit_dimension, toggle_aspect_lock, Axis, DimensionEdit};
use crate::drag::DragController;
use crate::grid::{self, GridTemplate, Placement};
use crate::masonry::{compute_spans, Span};
use crate::measure::{MeasurementProvider, SizeObserver};
use crate::resize::{start_rect_fallback, ResizeDirection, ResizeMachine};
use crate::scheduler::CoalescingScheduler;
use crate::selection::Selection;
use egui::{Pos2, Vec2};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq)]
pub enum LayoutCommand {
    ResizeStart {
        block_id: Uuid,
        direction: ResizeDirection,
        pointer: Pos2,
    },
    ResizeMove {
        pointer: Pos2,
    },
    ResizeEnd,
    DragStart(Uuid),
    DragEnter(Uuid),
    DragLeave(Uuid),
    Drop(Uuid),
    DragEnd,
    ToggleLock(Uuid),
    Reset(Uuid),
    Select(Uuid),
    EditDimension {
        block_id: Uuid,
        axis: Axis,
        edit: DimensionEdit,
    },
    ToggleAspectLock(Uuid),
}

/// What a command touched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Changes {
    pub blocks: bool,
    pub order: bool,
    pub gesture: bool,
    pub selection: bool,
}

impl Changes {
    pub const NONE: Changes = Changes {
        blocks: false,
        order: false,
        gesture: false,
        selection: false,
    };

    pub fn any(&self) -> bool {
        self.blocks || self.order || self.gesture || self.selection
    }

    fn blocks() -> Self {
        Changes {
            blocks: true,
            ..Changes::NONE
        }
    }

    fn gesture() -> Self {
        Changes {
            gesture: true,
            ..Changes::NONE
        }
    }
}

/// Block sequence plus the ephemeral gesture and selection state.
#[derive(Debug, Default)]
pub struct LayoutState {
    blocks: Vec<Block>,
    resize: ResizeMachine,
    drag: DragController,
    selection: Selection,
}

impl LayoutState {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks: dedup_blocks(blocks),
            ..Self::default()
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn resize(&self) -> &ResizeMachine {
        &self.resize
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Presentation settings of one block. Never affects layout.
    pub fn style_mut(&mut self, id: Uuid) -> Option<&mut StyleSettings> {
        find_mut(&mut self.blocks, id).map(|block| &mut block.style)
    }

    /// Re-snaps every full-width block to a new container width. Returns how many changed.
    pub fn resync_full_width(&mut self, container_width: f32) -> usize {
        if !container_width.is_finite() || container_width <= 0.0 {
            return 0;
        }
        let width = container_width.max(MIN_RESIZE_WIDTH);
        let mut changed = 0;
        for block in self.blocks.iter_mut().filter(|b| b.is_full_width) {
            if block.width != Some(width) {
                block.width = Some(width);
                block.aspect.observe_box(block.width, block.height);
                changed += 1;
            }
        }
        changed
    }

    /// Replaces the sequence. Gestures on removed blocks are left to end on their own.
    pub fn replace_blocks(&mut self, blocks: Vec<Block>) {
        self.blocks = dedup_blocks(blocks);
        let blocks = &self.blocks;
        self.selection.retain(|id| index_of(blocks, id).is_some());
    }

    pub fn apply(
        &mut self,
        command: LayoutCommand,
        measurements: &dyn MeasurementProvider,
    ) -> Changes {
        match command {
            LayoutCommand::ResizeStart {
                block_id,
                direction,
                pointer,
            } => {
                let measured = measurements.card_rect(block_id);
                let Some(block) = find_mut(&mut self.blocks, block_id) else {
                    log::debug!("Resize start on unknown block {block_id}");
                    return Changes::NONE;
                };
                if block.is_resize_locked {
                    log::warn!("Resize started on locked block {block_id}; lock only hides handles");
                }
                let start_rect = match measured {
                    Some(rect) => rect,
                    None => start_rect_fallback(block),
                };
                if self.resize.begin(block, direction, pointer, start_rect) {
                    Changes {
                        blocks: true,
                        gesture: true,
                        ..Changes::NONE
                    }
                } else {
                    Changes::NONE
                }
            }
            LayoutCommand::ResizeMove { pointer } => {
                match self
                    .resize
                    .update(&mut self.blocks, pointer, measurements.container_width())
                {
                    Some(_) => Changes::blocks(),
                    None => Changes::NONE,
                }
            }
            LayoutCommand::ResizeEnd => match self.resize.end() {
                Some(_) => Changes::gesture(),
                None => Changes::NONE,
            },
            LayoutCommand::DragStart(id) => {
                if index_of(&self.blocks, id).is_none() {
                    log::debug!("Drag start on unknown block {id}");
                    return Changes::NONE;
                }
                self.drag.start(id);
                Changes::gesture()
            }
            LayoutCommand::DragEnter(id) => {
                if self.drag.enter(id) {
                    Changes::gesture()
                } else {
                    Changes::NONE
                }
            }
            LayoutCommand::DragLeave(id) => {
                let before = self.drag.drag_over();
                self.drag.leave(id);
                if before != self.drag.drag_over() {
                    Changes::gesture()
                } else {
                    Changes::NONE
                }
            }
            LayoutCommand::Drop(target) => {
                let was_dragging = self.drag.is_dragging();
                let moved = self.drag.drop_on(&mut self.blocks, target);
                Changes {
                    blocks: moved,
                    order: moved,
                    gesture: was_dragging,
                    ..Changes::NONE
                }
            }
            LayoutCommand::DragEnd => {
                let was_dragging = self.drag.is_dragging();
                self.drag.end();
                Changes {
                    gesture: was_dragging,
                    ..Changes::NONE
                }
            }
            LayoutCommand::ToggleLock(id) => match find_mut(&mut self.blocks, id) {
                Some(block) => {
                    block.toggle_resize_lock();
                    log::debug!("Block {id} resize lock: {}", block.is_resize_locked);
                    Changes::blocks()
                }
                None => Changes::NONE,
            },
            LayoutCommand::Reset(id) => match find_mut(&mut self.blocks, id) {
                Some(block) => {
                    block.reset_to_auto_size();
                    log::debug!("Block {id} reset to auto size");
                    Changes::blocks()
                }
                None => Changes::NONE,
            },
            LayoutCommand::Select(id) => {
                if index_of(&self.blocks, id).is_none() {
                    return Changes::NONE;
                }
                self.selection.toggle(id);
                Changes {
                    selection: true,
                    ..Changes::NONE
                }
            }
            LayoutCommand::EditDimension {
                block_id,
                axis,
                edit,
            } => {
                let Some(block) = find_mut(&mut self.blocks, block_id) else {
                    return Changes::NONE;
                };
                match edit_dimension(block, axis, edit) {
                    Ok(()) => Changes::blocks(),
                    Err(err) => {
                        log::debug!("Ignoring {axis:?} edit on {block_id}: {err}");
                        Changes::NONE
                    }
                }
            }
            LayoutCommand::ToggleAspectLock(id) => match find_mut(&mut self.blocks, id) {
                Some(block) => {
                    toggle_aspect_lock(block);
                    Changes::blocks()
                }
                None => Changes::NONE,
            },
        }
    }
}

fn dedup_blocks(mut blocks: Vec<Block>) -> Vec<Block> {
    if first_duplicate_id(&blocks).is_some() {
        let mut seen = HashSet::with_capacity(blocks.len());
        blocks.retain(|block| {
            let fresh = seen.insert(block.id);
            if !fresh {
                log::warn!("Dropping duplicate block {}", block.id);
            }
            fresh
        });
    }
    blocks
}

/// Visual state markers for one card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CardClasses {
    pub dragging: bool,
    pub drag_over: bool,
    pub selected: bool,
    pub manually_resized: bool,
    pub full_width: bool,
    pub resize_locked: bool,
}

impl CardClasses {
    pub fn names(&self) -> Vec<&'static str> {
        [
            (self.dragging, "dragging"),
            (self.drag_over, "drag-over"),
            (self.selected, "selected"),
            (self.manually_resized, "manually-resized"),
            (self.full_width, "full-width"),
            (self.resize_locked, "resize-locked"),
        ]
        .into_iter()
        .filter_map(|(on, name)| on.then_some(name))
        .collect()
    }
}

/// Everything the presentation layer needs to draw one card.
#[derive(Clone, Debug, PartialEq)]
pub struct CardView {
    pub id: Uuid,
    pub span: Span,
    pub placement: Option<Placement>,
    /// Explicit width/height, present only for manually resized cards.
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub classes: CardClasses,
    pub show_resize_handles: bool,
    pub show_drag_grip: bool,
    /// Shift of the card's top-left corner while a north or west handle is dragged.
    pub resize_offset: Vec2,
}

pub struct LayoutEngine {
    config: GridConfig,
    state: LayoutState,
    observer: SizeObserver,
    scheduler: CoalescingScheduler,
    template: GridTemplate,
    spans: HashMap<Uuid, Span>,
    placements: Vec<Placement>,
}

impl LayoutEngine {
    pub fn new(config: GridConfig, blocks: Vec<Block>) -> Self {
        let state = LayoutState::new(blocks);
        let mut observer = SizeObserver::new();
        observer.resubscribe(state.blocks().iter().map(|b| b.id));
        let mut scheduler = CoalescingScheduler::new();
        scheduler.request();
        let template = GridTemplate::from_container(0.0, &config);

        Self {
            config,
            state,
            observer,
            scheduler,
            template,
            spans: HashMap::new(),
            placements: Vec::new(),
        }
    }

    /// Hooks the scheduler up to the host's "run again soon" primitive.
    pub fn set_wake(&mut self, wake: impl Fn() + 'static) {
        self.scheduler.set_wake(wake);
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GridConfig) {
        if config != self.config {
            self.config = config;
            self.scheduler.request();
        }
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn blocks(&self) -> &[Block] {
        self.state.blocks()
    }

    pub fn block(&self, id: Uuid) -> Option<&Block> {
        find(self.state.blocks(), id)
    }

    pub fn style_mut(&mut self, id: Uuid) -> Option<&mut StyleSettings> {
        self.state.style_mut(id)
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.state.selection().selected()
    }

    pub fn template(&self) -> &GridTemplate {
        &self.template
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn span(&self, id: Uuid) -> Span {
        self.spans.get(&id).copied().unwrap_or(Span::UNIT)
    }

    pub fn is_relayout_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn observer(&self) -> &SizeObserver {
        &self.observer
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Membership (owned by the host)
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn set_blocks(&mut self, blocks: Vec<Block>) {
        self.state.replace_blocks(blocks);
        self.membership_changed();
    }

    pub fn insert_block(&mut self, index: usize, block: Block) -> bool {
        if index_of(self.state.blocks(), block.id).is_some() {
            log::warn!("Block {} is already on the grid", block.id);
            return false;
        }
        let mut blocks = self.state.blocks().to_vec();
        blocks.insert(index.min(blocks.len()), block);
        self.set_blocks(blocks);
        true
    }

    pub fn push_block(&mut self, block: Block) -> bool {
        let index = self.state.blocks().len();
        self.insert_block(index, block)
    }

    pub fn remove_block(&mut self, id: Uuid) -> Option<Block> {
        let mut blocks = self.state.blocks().to_vec();
        let index = index_of(&blocks, id)?;
        let removed = blocks.remove(index);
        self.set_blocks(blocks);
        Some(removed)
    }

    fn membership_changed(&mut self) {
        self.observer
            .resubscribe(self.state.blocks().iter().map(|b| b.id));
        self.spans
            .retain(|id, _| index_of(self.state.blocks(), *id).is_some());
        self.scheduler.request();
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Commands and notifications
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn apply(
        &mut self,
        command: LayoutCommand,
        measurements: &dyn MeasurementProvider,
    ) -> Changes {
        match &command {
            LayoutCommand::ResizeStart { block_id, .. } if !self.config.show_handles => {
                log::debug!("Resize handles are hidden; ignoring resize start on {block_id}");
                return Changes::NONE;
            }
            LayoutCommand::DragStart(id) if !self.config.enable_drag => {
                log::debug!("Dragging is disabled; ignoring drag start on {id}");
                return Changes::NONE;
            }
            _ => {}
        }

        let changes = self.state.apply(command, measurements);
        if changes.blocks {
            self.scheduler.request();
        }
        changes
    }

    /// Size-change notification for one card.
    pub fn notify_size(&mut self, id: Uuid, size: Vec2) -> bool {
        if self.observer.notify(id, size) {
            self.scheduler.request();
            true
        } else {
            false
        }
    }

    /// Width of the grid container changed (viewport resize, breakpoint).
    pub fn set_container_width(&mut self, width: f32) -> bool {
        if (width - self.template.container_width).abs() > 0.5 {
            self.scheduler.request();
            true
        } else {
            false
        }
    }

    /// Runs the pending relayout, if any. Call once per tick.
    pub fn tick(&mut self, measurements: &dyn MeasurementProvider) -> bool {
        if self.scheduler.take() {
            self.relayout(measurements);
            true
        } else {
            false
        }
    }

    /// Recomputes the column template, every span and the placements.
    pub fn relayout(&mut self, measurements: &dyn MeasurementProvider) {
        let template = GridTemplate::from_container(measurements.container_width(), &self.config);
        if template.container_width != self.template.container_width {
            let resynced = self.state.resync_full_width(template.container_width);
            if resynced > 0 {
                log::debug!(
                    "Resized {resynced} full-width card(s) to {:.0}px",
                    template.container_width
                );
            }
        }
        let spans = compute_spans(self.state.blocks(), measurements, &template);
        self.placements = grid::place(&spans, template.columns);
        self.spans = spans.into_iter().collect();
        if template.columns != self.template.columns {
            log::info!(
                "Grid now has {} column(s) of {:.0}px",
                template.columns,
                template.column_width
            );
        }
        self.template = template;
        log::debug!("Relayout packed {} card(s)", self.placements.len());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Presentation
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn cards(&self) -> Vec<CardView> {
        let placements: HashMap<Uuid, Placement> =
            self.placements.iter().map(|p| (p.id, *p)).collect();
        let drag = self.state.drag();
        let selection = self.state.selection();
        let resizing = self.state.resize().active().map(|g| g.block_id);
        let offset = self.state.resize().offset();

        self.state
            .blocks()
            .iter()
            .map(|block| {
                let manual = block.is_manually_resized;
                CardView {
                    id: block.id,
                    span: self.span(block.id),
                    placement: placements.get(&block.id).copied(),
                    width: block.width.filter(|_| manual),
                    height: block.height.filter(|_| manual),
                    classes: CardClasses {
                        dragging: drag.dragged() == Some(block.id),
                        drag_over: drag.drag_over() == Some(block.id),
                        selected: selection.is_selected(block.id),
                        manually_resized: manual,
                        full_width: block.is_full_width,
                        resize_locked: block.is_resize_locked,
                    },
                    show_resize_handles: self.config.show_handles
                        && !block.is_resize_locked
                        && resizing.map_or(true, |id| id == block.id),
                    show_drag_grip: self.config.enable_drag,
                    resize_offset: if resizing == Some(block.id) {
                        offset
                    } else {
                        Vec2::ZERO
                    },
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::ScriptedMeasurements;
    use egui::{pos2, vec2, Rect};

    fn engine_with(names: &[&str]) -> (LayoutEngine, Vec<Uuid>) {
        let blocks: Vec<Block> = names.iter().map(|n| Block::new(*n)).collect();
        let ids = blocks.iter().map(|b| b.id).collect();
        (LayoutEngine::new(GridConfig::default(), blocks), ids)
    }

    #[test]
    fn test_new_engine_schedules_first_layout() {
        let (mut engine, ids) = engine_with(&["a", "b"]);
        assert!(engine.is_relayout_pending());
        assert_eq!(engine.observer().observed_count(), 2);

        let mut m = ScriptedMeasurements::new(1100.0);
        m.set_card_size(ids[0], vec2(263.0, 236.0));
        assert!(engine.tick(&m));
        assert!(!engine.tick(&m));
        assert_eq!(engine.span(ids[0]), Span { rows: 10, columns: 1 });
        assert_eq!(engine.span(ids[1]), Span::UNIT);
        assert_eq!(engine.template().columns, 4);
    }

    #[test]
    fn test_size_notifications_coalesce() {
        let (mut engine, ids) = engine_with(&["a", "b", "c"]);
        let mut m = ScriptedMeasurements::new(1100.0);
        engine.tick(&m);

        for (i, id) in ids.iter().enumerate() {
            let size = vec2(263.0, 100.0 + i as f32 * 50.0);
            m.set_card_size(*id, size);
            assert!(engine.notify_size(*id, size));
        }
        assert!(engine.tick(&m));
        assert!(!engine.tick(&m));
        assert_eq!(engine.span(ids[2]).rows, row_span_of(200.0));
    }

    fn row_span_of(height: f32) -> usize {
        crate::masonry::row_span(height, 10.0, 16.0)
    }

    #[test]
    fn test_membership_change_resubscribes() {
        let (mut engine, ids) = engine_with(&["a", "b"]);
        let m = ScriptedMeasurements::new(1100.0);
        engine.tick(&m);

        let extra = Block::new("c");
        let extra_id = extra.id;
        assert!(engine.push_block(extra));
        assert!(engine.observer().is_observing(extra_id));
        assert!(engine.is_relayout_pending());

        engine.tick(&m);
        assert!(engine.remove_block(ids[0]).is_some());
        assert!(!engine.observer().is_observing(ids[0]));
        assert!(!engine.notify_size(ids[0], vec2(10.0, 10.0)));
        assert!(engine.is_relayout_pending());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let (mut engine, _) = engine_with(&["a"]);
        let copy = engine.blocks()[0].clone();
        assert!(!engine.insert_block(0, copy.clone()));
        engine.set_blocks(vec![copy.clone(), copy]);
        assert_eq!(engine.blocks().len(), 1);
    }

    #[test]
    fn test_container_width_change_schedules() {
        let (mut engine, _) = engine_with(&["a"]);
        let mut m = ScriptedMeasurements::new(1100.0);
        engine.tick(&m);
        assert!(!engine.set_container_width(1100.2));
        assert!(engine.set_container_width(600.0));
        m.set_container_width(600.0);
        engine.tick(&m);
        assert_eq!(engine.template().columns, 2);
    }

    #[test]
    fn test_resize_gesture_through_engine() {
        let (mut engine, ids) = engine_with(&["a", "b"]);
        let mut m = ScriptedMeasurements::new(1100.0);
        m.set_card_rect(ids[0], Rect::from_min_size(pos2(0.0, 0.0), vec2(220.0, 180.0)));
        engine.tick(&m);

        let changes = engine.apply(
            LayoutCommand::ResizeStart {
                block_id: ids[0],
                direction: ResizeDirection::SE,
                pointer: pos2(220.0, 180.0),
            },
            &m,
        );
        assert!(changes.blocks && changes.gesture);

        let cards = engine.cards();
        assert!(cards[0].show_resize_handles);
        assert!(!cards[1].show_resize_handles);

        engine.apply(LayoutCommand::ResizeMove { pointer: pos2(620.0, 230.0) }, &m);
        engine.apply(LayoutCommand::ResizeEnd, &m);
        let block = engine.block(ids[0]).unwrap();
        assert_eq!(block.explicit_size(), Some(vec2(620.0, 230.0)));
        assert!(!block.is_full_width);

        m.set_card_size(ids[0], vec2(620.0, 230.0));
        engine.tick(&m);
        assert_eq!(engine.span(ids[0]).columns, 2);
    }

    #[test]
    fn test_hidden_handles_and_disabled_drag_gate_starts() {
        let blocks = vec![Block::new("a"), Block::new("b")];
        let ids: Vec<Uuid> = blocks.iter().map(|b| b.id).collect();
        let config = GridConfig {
            show_handles: false,
            enable_drag: false,
            ..GridConfig::default()
        };
        let mut engine = LayoutEngine::new(config, blocks);
        let m = ScriptedMeasurements::new(1100.0);

        let changes = engine.apply(
            LayoutCommand::ResizeStart {
                block_id: ids[0],
                direction: ResizeDirection::E,
                pointer: pos2(0.0, 0.0),
            },
            &m,
        );
        assert_eq!(changes, Changes::NONE);
        assert_eq!(engine.apply(LayoutCommand::DragStart(ids[0]), &m), Changes::NONE);
        assert!(engine.cards().iter().all(|c| !c.show_resize_handles && !c.show_drag_grip));
    }

    #[test]
    fn test_card_classes() {
        let (mut engine, ids) = engine_with(&["a", "b", "c"]);
        let m = ScriptedMeasurements::new(1100.0);
        engine.apply(LayoutCommand::Select(ids[2]), &m);
        engine.apply(LayoutCommand::ToggleLock(ids[2]), &m);
        engine.apply(LayoutCommand::DragStart(ids[0]), &m);
        engine.apply(LayoutCommand::DragEnter(ids[1]), &m);

        let cards = engine.cards();
        assert_eq!(cards[0].classes.names(), ["dragging"]);
        assert_eq!(cards[1].classes.names(), ["drag-over"]);
        assert_eq!(cards[2].classes.names(), ["selected", "resize-locked"]);
        assert!(!cards[2].show_resize_handles);

        engine.apply(LayoutCommand::DragLeave(ids[1]), &m);
        assert!(!engine.cards()[1].classes.drag_over);
        engine.apply(LayoutCommand::DragEnd, &m);
        assert!(!engine.cards()[0].classes.dragging);
    }

    #[test]
    fn test_rejected_dimension_edit_changes_nothing() {
        let (mut engine, ids) = engine_with(&["a"]);
        let m = ScriptedMeasurements::new(1100.0);
        engine.tick(&m);
        let before = engine.blocks().to_vec();
        let changes = engine.apply(
            LayoutCommand::EditDimension {
                block_id: ids[0],
                axis: Axis::Width,
                edit: DimensionEdit::Set(-10.0),
            },
            &m,
        );
        assert_eq!(changes, Changes::NONE);
        assert_eq!(engine.blocks(), before.as_slice());
        assert!(!engine.is_relayout_pending());
    }

    #[test]
    fn test_full_width_follows_container() {
        let (mut engine, ids) = engine_with(&["a", "b"]);
        let mut m = ScriptedMeasurements::new(1100.0);
        m.set_card_rect(ids[0], Rect::from_min_size(pos2(0.0, 0.0), vec2(300.0, 180.0)));
        engine.tick(&m);
        engine.apply(
            LayoutCommand::ResizeStart {
                block_id: ids[0],
                direction: ResizeDirection::E,
                pointer: pos2(300.0, 90.0),
            },
            &m,
        );
        engine.apply(LayoutCommand::ResizeMove { pointer: pos2(1200.0, 90.0) }, &m);
        engine.apply(LayoutCommand::ResizeEnd, &m);
        engine.tick(&m);
        assert_eq!(engine.block(ids[0]).unwrap().width, Some(1100.0));

        m.set_container_width(600.0);
        assert!(engine.set_container_width(600.0));
        engine.tick(&m);
        let block = engine.block(ids[0]).unwrap();
        assert!(block.is_full_width);
        assert_eq!(block.width, Some(600.0));
        assert_eq!(engine.block(ids[1]).unwrap().width, None);

        m.set_container_width(90.0);
        engine.set_container_width(90.0);
        engine.tick(&m);
        assert_eq!(engine.block(ids[0]).unwrap().width, Some(MIN_RESIZE_WIDTH));
    }

    #[test]
    fn test_north_west_resize_reports_offset() {
        let (mut engine, ids) = engine_with(&["a", "b"]);
        let mut m = ScriptedMeasurements::new(1100.0);
        m.set_card_rect(ids[1], Rect::from_min_size(pos2(279.0, 0.0), vec2(263.0, 200.0)));
        engine.tick(&m);
        engine.apply(
            LayoutCommand::ResizeStart {
                block_id: ids[1],
                direction: ResizeDirection::W,
                pointer: pos2(279.0, 100.0),
            },
            &m,
        );
        engine.apply(LayoutCommand::ResizeMove { pointer: pos2(229.0, 100.0) }, &m);

        let cards = engine.cards();
        assert_eq!(cards[1].resize_offset, vec2(-50.0, 0.0));
        assert_eq!(cards[0].resize_offset, Vec2::ZERO);

        engine.apply(LayoutCommand::ResizeEnd, &m);
        assert_eq!(engine.cards()[1].resize_offset, Vec2::ZERO);
    }

    #[test]
    fn test_removed_selection_is_cleared() {
        let (mut engine, ids) = engine_with(&["a", "b"]);
        let m = ScriptedMeasurements::new(1100.0);
        engine.apply(LayoutCommand::Select(ids[1]), &m);
        engine.remove_block(ids[1]);
        assert_eq!(engine.selected(), None);
    }
}
