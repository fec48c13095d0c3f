//! Drag-and-drop reordering of the block sequence.

use crate::block::{index_of, Block};
use uuid::Uuid;

/// Moves `source` to the index where `target` currently sits. Every other block keeps
/// its relative order. Returns false when nothing moved.
pub fn move_block(blocks: &mut Vec<Block>, source: Uuid, target: Uuid) -> bool {
    if source == target {
        return false;
    }
    let (Some(from), Some(to)) = (index_of(blocks, source), index_of(blocks, target)) else {
        return false;
    };
    let block = blocks.remove(from);
    blocks.insert(to, block);
    true
}

/// Idle while nothing is dragged, Dragging otherwise.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DragController {
    dragged: Option<Uuid>,
    drag_over: Option<Uuid>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragged(&self) -> Option<Uuid> {
        self.dragged
    }

    pub fn drag_over(&self) -> Option<Uuid> {
        self.drag_over
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged.is_some()
    }

    pub fn start(&mut self, id: Uuid) {
        self.dragged = Some(id);
        self.drag_over = None;
    }

    /// Records the card under the pointer as the drop target. Entering the dragged
    /// card itself leaves the previous target in place.
    pub fn enter(&mut self, id: Uuid) -> bool {
        match self.dragged {
            Some(dragged) if dragged != id => {
                self.drag_over = Some(id);
                true
            }
            _ => false,
        }
    }

    pub fn leave(&mut self, id: Uuid) {
        if self.drag_over == Some(id) {
            self.drag_over = None;
        }
    }

    /// Reorders on a drop over `target`. No-op without an active drag or when
    /// dropping a card onto itself.
    pub fn drop_on(&mut self, blocks: &mut Vec<Block>, target: Uuid) -> bool {
        let Some(source) = self.dragged else {
            log::debug!("Drop on {target} without an active drag");
            return false;
        };
        self.drag_over = None;
        let moved = move_block(blocks, source, target);
        if moved {
            log::debug!("Moved {source} to the position of {target}");
        }
        moved
    }

    /// Clears the gesture whether or not a drop happened.
    pub fn end(&mut self) {
        self.dragged = None;
        self.drag_over = None;
    }
}
