//! Pointer-driven resize of a single card.
//!
//! Every move is recomputed from the gesture's fixed baseline, so moves only need to
//! arrive in order; none are coalesced.

use crate::block::{find_mut, Block};
use crate::constants::{FULL_WIDTH_THRESHOLD, MIN_RESIZE_HEIGHT, MIN_RESIZE_WIDTH};
use egui::{vec2, Align2, CursorIcon, Pos2, Rect, Vec2};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeDirection {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl ResizeDirection {
    pub const ALL: [ResizeDirection; 8] = [
        ResizeDirection::N,
        ResizeDirection::S,
        ResizeDirection::E,
        ResizeDirection::W,
        ResizeDirection::NE,
        ResizeDirection::NW,
        ResizeDirection::SE,
        ResizeDirection::SW,
    ];

    /// +1 when the east edge moves, -1 for the west edge, 0 when width is untouched.
    fn x_sign(self) -> f32 {
        match self {
            ResizeDirection::E | ResizeDirection::NE | ResizeDirection::SE => 1.0,
            ResizeDirection::W | ResizeDirection::NW | ResizeDirection::SW => -1.0,
            ResizeDirection::N | ResizeDirection::S => 0.0,
        }
    }

    /// +1 when the south edge moves, -1 for the north edge, 0 when height is untouched.
    fn y_sign(self) -> f32 {
        match self {
            ResizeDirection::S | ResizeDirection::SE | ResizeDirection::SW => 1.0,
            ResizeDirection::N | ResizeDirection::NE | ResizeDirection::NW => -1.0,
            ResizeDirection::E | ResizeDirection::W => 0.0,
        }
    }

    /// Point on the card's outline where this direction's handle sits.
    pub fn anchor(self) -> Align2 {
        match self {
            ResizeDirection::N => Align2::CENTER_TOP,
            ResizeDirection::S => Align2::CENTER_BOTTOM,
            ResizeDirection::E => Align2::RIGHT_CENTER,
            ResizeDirection::W => Align2::LEFT_CENTER,
            ResizeDirection::NE => Align2::RIGHT_TOP,
            ResizeDirection::NW => Align2::LEFT_TOP,
            ResizeDirection::SE => Align2::RIGHT_BOTTOM,
            ResizeDirection::SW => Align2::LEFT_BOTTOM,
        }
    }

    pub fn cursor(self) -> CursorIcon {
        match self {
            ResizeDirection::N => CursorIcon::ResizeNorth,
            ResizeDirection::S => CursorIcon::ResizeSouth,
            ResizeDirection::E => CursorIcon::ResizeEast,
            ResizeDirection::W => CursorIcon::ResizeWest,
            ResizeDirection::NE => CursorIcon::ResizeNorthEast,
            ResizeDirection::NW => CursorIcon::ResizeNorthWest,
            ResizeDirection::SE => CursorIcon::ResizeSouthEast,
            ResizeDirection::SW => CursorIcon::ResizeSouthWest,
        }
    }

    pub fn handle_rect(self, card: Rect, handle_size: f32) -> Rect {
        let anchor = self.anchor();
        let x = match anchor.x() {
            egui::Align::Min => card.left(),
            egui::Align::Center => card.center().x,
            egui::Align::Max => card.right(),
        };
        let y = match anchor.y() {
            egui::Align::Min => card.top(),
            egui::Align::Center => card.center().y,
            egui::Align::Max => card.bottom(),
        };
        Rect::from_center_size(egui::pos2(x, y), Vec2::splat(handle_size))
    }
}

/// An in-progress resize. Created on handle press, dropped on release.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeGesture {
    pub block_id: Uuid,
    pub direction: ResizeDirection,
    pub start_pointer: Pos2,
    /// Card box at gesture start; `min` is kept so north/west drags can hold the
    /// opposite edge in place.
    pub start_rect: Rect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeOutcome {
    pub width: f32,
    pub height: f32,
    pub is_full_width: bool,
    /// Top-left corner that keeps the edge opposite the dragged one fixed.
    pub position: Pos2,
}

/// Computes the box for a pointer delta, applying minimums and the full-width snap.
pub fn resize_box(
    direction: ResizeDirection,
    start_rect: Rect,
    delta: Vec2,
    container_width: f32,
) -> ResizeOutcome {
    let start = start_rect.size();
    let mut width = (start.x + direction.x_sign() * delta.x).max(MIN_RESIZE_WIDTH);
    let height = (start.y + direction.y_sign() * delta.y).max(MIN_RESIZE_HEIGHT);
    if !width.is_finite() {
        width = MIN_RESIZE_WIDTH;
    }

    let mut is_full_width = false;
    if container_width.is_finite()
        && container_width > 0.0
        && width >= FULL_WIDTH_THRESHOLD * container_width
    {
        width = container_width.max(MIN_RESIZE_WIDTH);
        is_full_width = true;
    }
    let height = if height.is_finite() {
        height
    } else {
        MIN_RESIZE_HEIGHT
    };

    let mut position = start_rect.min;
    if direction.x_sign() < 0.0 {
        position.x += start.x - width;
    }
    if direction.y_sign() < 0.0 {
        position.y += start.y - height;
    }

    ResizeOutcome {
        width,
        height,
        is_full_width,
        position,
    }
}

/// Idle while `gesture` is `None`, Resizing otherwise. One gesture at a time.
#[derive(Debug, Default)]
pub struct ResizeMachine {
    gesture: Option<ResizeGesture>,
    last: Option<ResizeOutcome>,
}

impl ResizeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_resizing(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn active(&self) -> Option<&ResizeGesture> {
        self.gesture.as_ref()
    }

    /// How far the card's top-left corner has moved during the active gesture. Non-zero
    /// only for north and west handles, which keep the opposite edges in place.
    pub fn offset(&self) -> Vec2 {
        match (&self.gesture, &self.last) {
            (Some(gesture), Some(outcome)) => outcome.position - gesture.start_rect.min,
            _ => Vec2::ZERO,
        }
    }

    /// Starts a gesture and commits the block to manual sizing with its current box.
    /// Ignored while another gesture is active.
    pub fn begin(
        &mut self,
        block: &mut Block,
        direction: ResizeDirection,
        pointer: Pos2,
        start_rect: Rect,
    ) -> bool {
        if let Some(active) = &self.gesture {
            log::debug!(
                "Ignoring resize start on {} while {} is resizing",
                block.id,
                active.block_id
            );
            return false;
        }

        let size = start_rect.size();
        block.apply_box(size.x, size.y, block.is_full_width);
        self.last = None;
        self.gesture = Some(ResizeGesture {
            block_id: block.id,
            direction,
            start_pointer: pointer,
            start_rect,
        });
        log::debug!("Resize {:?} started on {}", direction, block.id);
        true
    }

    /// Applies a pointer move to the gesture's block. A block that has since been
    /// removed makes this a no-op.
    pub fn update(
        &mut self,
        blocks: &mut [Block],
        pointer: Pos2,
        container_width: f32,
    ) -> Option<ResizeOutcome> {
        let gesture = self.gesture.as_ref()?;
        let Some(block) = find_mut(blocks, gesture.block_id) else {
            log::debug!("Resize target {} no longer exists", gesture.block_id);
            return None;
        };

        let delta = pointer - gesture.start_pointer;
        let outcome = resize_box(gesture.direction, gesture.start_rect, delta, container_width);
        block.apply_box(outcome.width, outcome.height, outcome.is_full_width);
        self.last = Some(outcome);
        Some(outcome)
    }

    /// Ends the gesture, keeping the last applied box.
    pub fn end(&mut self) -> Option<ResizeGesture> {
        self.last = None;
        let ended = self.gesture.take();
        if let Some(gesture) = &ended {
            log::debug!("Resize finished on {}", gesture.block_id);
        }
        ended
    }
}

pub fn start_rect_fallback(block: &Block) -> Rect {
    let size = block
        .explicit_size()
        .unwrap_or(vec2(MIN_RESIZE_WIDTH, MIN_RESIZE_HEIGHT));
    Rect::from_min_size(Pos2::ZERO, size)
}
