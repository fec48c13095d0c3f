use crate::dimensions::AspectLock;
use egui::{Color32, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Presentation-only settings. The layout engine carries them but never reads them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleSettings {
    pub opacity: f32,
    pub border_width: f32,
    pub border_color: [u8; 4],
    pub corner_radius: f32,
    pub elevation: f32,
    pub background: [u8; 4],
}

impl StyleSettings {
    pub fn for_id(id: Uuid) -> Self {
        Self {
            opacity: 1.0,
            border_width: 1.0,
            border_color: [70, 70, 80, 255],
            corner_radius: 6.0,
            elevation: 0.0,
            background: color_from_uuid(id).to_array(),
        }
    }

    pub fn background_color(&self) -> Color32 {
        let [r, g, b, a] = self.background;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }

    pub fn border_color(&self) -> Color32 {
        let [r, g, b, a] = self.border_color;
        Color32::from_rgba_unmultiplied(r, g, b, a)
    }
}

/// A card on the page grid. Its position in the block sequence is its layout order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: Uuid,
    pub content: String,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub is_manually_resized: bool,
    pub is_full_width: bool,
    pub is_resize_locked: bool,
    #[serde(default)]
    pub aspect: AspectLock,
    pub style: StyleSettings,
}

impl Block {
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), content)
    }

    pub fn with_id(id: Uuid, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            width: None,
            height: None,
            is_manually_resized: false,
            is_full_width: false,
            is_resize_locked: false,
            aspect: AspectLock::default(),
            style: StyleSettings::for_id(id),
        }
    }

    /// Both explicit dimensions, when the block carries a full manual box.
    pub fn explicit_size(&self) -> Option<Vec2> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(egui::vec2(w, h)),
            _ => None,
        }
    }

    pub fn is_auto_sized(&self) -> bool {
        !self.is_manually_resized
    }

    /// Commits the block to manual sizing with the given box.
    pub fn apply_box(&mut self, width: f32, height: f32, full_width: bool) {
        self.width = Some(width);
        self.height = Some(height);
        self.is_manually_resized = true;
        self.is_full_width = full_width;
        self.aspect.observe_box(self.width, self.height);
    }

    /// Returns the block to content-driven sizing. Allowed even when resize-locked.
    pub fn reset_to_auto_size(&mut self) {
        self.width = None;
        self.height = None;
        self.is_manually_resized = false;
        self.is_full_width = false;
    }

    pub fn toggle_resize_lock(&mut self) {
        self.is_resize_locked = !self.is_resize_locked;
    }
}

pub fn index_of(blocks: &[Block], id: Uuid) -> Option<usize> {
    blocks.iter().position(|b| b.id == id)
}

pub fn find(blocks: &[Block], id: Uuid) -> Option<&Block> {
    blocks.iter().find(|b| b.id == id)
}

pub fn find_mut(blocks: &mut [Block], id: Uuid) -> Option<&mut Block> {
    blocks.iter_mut().find(|b| b.id == id)
}

/// Returns the first id that occurs more than once in the sequence.
pub fn first_duplicate_id(blocks: &[Block]) -> Option<Uuid> {
    let mut seen = HashSet::with_capacity(blocks.len());
    blocks.iter().map(|b| b.id).find(|id| !seen.insert(*id))
}

fn color_from_uuid(id: Uuid) -> Color32 {
    let b = id.as_bytes();
    // Muted tone so card text stays readable on top of it
    let h = (b[0] as f32 + b[1] as f32 * 256.0) / 65535.0;
    let s = 0.25 + (b[2] as f32 / 255.0) * 0.2;
    let v = 0.3 + (b[3] as f32 / 255.0) * 0.15;
    Color32::from(egui::epaint::Hsva::new(h, s, v, 1.0))
}
