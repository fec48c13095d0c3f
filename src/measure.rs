//! Measurement seam between the layout engine and whatever renders the cards.
//!
//! The engine never inspects rendered output directly. It asks a
//! [`MeasurementProvider`] for boxes and receives size-change notifications through
//! [`SizeObserver`], which keeps its watch list in lockstep with the block sequence.

use egui::{Pos2, Rect, Vec2};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub trait MeasurementProvider {
    /// Current rendered box of a card, or `None` while it is not mounted.
    fn card_rect(&self, id: Uuid) -> Option<Rect>;

    fn card_size(&self, id: Uuid) -> Option<Vec2> {
        self.card_rect(id).map(|rect| rect.size())
    }

    /// Measured content width of the grid container.
    fn container_width(&self) -> f32;
}

/// Watches the mounted cards and filters their size-change notifications.
#[derive(Debug, Default)]
pub struct SizeObserver {
    observed: HashSet<Uuid>,
    last_sizes: HashMap<Uuid, Vec2>,
}

impl SizeObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole watch list. Called on every membership change instead of
    /// patching subscriptions one by one.
    pub fn resubscribe(&mut self, ids: impl IntoIterator<Item = Uuid>) {
        self.observed = ids.into_iter().collect();
        let observed = &self.observed;
        self.last_sizes.retain(|id, _| observed.contains(id));
        log::debug!("Size observer watching {} card(s)", self.observed.len());
    }

    pub fn is_observing(&self, id: Uuid) -> bool {
        self.observed.contains(&id)
    }

    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    pub fn last_size(&self, id: Uuid) -> Option<Vec2> {
        self.last_sizes.get(&id).copied()
    }

    /// Records a card's new box. Returns true when a relayout is warranted: the card is
    /// watched and its box differs from the last one seen.
    pub fn notify(&mut self, id: Uuid, size: Vec2) -> bool {
        if !self.observed.contains(&id) {
            log::trace!("Ignoring size notification for unobserved card {id}");
            return false;
        }
        match self.last_sizes.insert(id, size) {
            Some(previous) => previous != size,
            None => true,
        }
    }
}

/// Measurement provider fed with scripted sizes, for tests and headless hosts.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMeasurements {
    container_width: f32,
    rects: HashMap<Uuid, Rect>,
}

impl ScriptedMeasurements {
    pub fn new(container_width: f32) -> Self {
        Self {
            container_width,
            rects: HashMap::new(),
        }
    }

    /// Sets a card's size, keeping its position if it already had one.
    pub fn set_card_size(&mut self, id: Uuid, size: Vec2) {
        let min = self.rects.get(&id).map_or(Pos2::ZERO, |rect| rect.min);
        self.rects.insert(id, Rect::from_min_size(min, size));
    }

    pub fn set_card_rect(&mut self, id: Uuid, rect: Rect) {
        self.rects.insert(id, rect);
    }

    pub fn unmount(&mut self, id: Uuid) {
        self.rects.remove(&id);
    }

    pub fn set_container_width(&mut self, width: f32) {
        self.container_width = width;
    }
}

impl MeasurementProvider for ScriptedMeasurements {
    fn card_rect(&self, id: Uuid) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    fn container_width(&self) -> f32 {
        self.container_width
    }
}
