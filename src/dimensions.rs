//! Numeric width/height editing for the admin panel, with an optional aspect-ratio lock.
//!
//! Rejected input never touches the block: the caller logs the error and keeps the
//! previous value.

use crate::block::Block;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Width,
    Height,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DimensionError {
    #[error("dimension input is empty")]
    Empty,
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("dimension must be finite")]
    NonFinite,
    #[error("dimension must be positive, got {0}")]
    NonPositive(f32),
}

/// A single edit coming from a dimension field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DimensionEdit {
    Set(f32),
    Clear,
}

impl DimensionEdit {
    /// Parses text typed into a dimension field. A trailing `px` is accepted.
    pub fn parse(input: &str) -> Result<Self, DimensionError> {
        let trimmed = input.trim();
        let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
        if number.is_empty() {
            return Err(DimensionError::Empty);
        }
        let value: f32 = number
            .parse()
            .map_err(|_| DimensionError::NotANumber(trimmed.to_string()))?;
        validate(value)?;
        Ok(DimensionEdit::Set(value))
    }
}

fn validate(value: f32) -> Result<f32, DimensionError> {
    if !value.is_finite() {
        return Err(DimensionError::NonFinite);
    }
    if value <= 0.0 {
        return Err(DimensionError::NonPositive(value));
    }
    Ok(value)
}

/// Aspect-ratio lock state for one block. `ratio` is height divided by width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AspectLock {
    locked: bool,
    ratio: Option<f32>,
}

impl AspectLock {
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn ratio(&self) -> Option<f32> {
        self.ratio
    }

    /// Records the ratio of the latest complete box. A box missing either dimension keeps
    /// the previous ratio, so a locked clear followed by a set still has one to follow.
    pub fn observe_box(&mut self, width: Option<f32>, height: Option<f32>) {
        self.capture(width, height);
    }

    /// Flips the lock. Turning it on re-reads the ratio from the current box.
    pub fn toggle(&mut self, width: Option<f32>, height: Option<f32>) {
        self.locked = !self.locked;
        if self.locked {
            self.capture(width, height);
        }
    }

    fn capture(&mut self, width: Option<f32>, height: Option<f32>) {
        if let (Some(w), Some(h)) = (width, height) {
            if w > 0.0 && h > 0.0 {
                self.ratio = Some(h / w);
            }
        }
    }
}

/// Applies a numeric edit to one axis of the block, following the aspect lock.
pub fn edit_dimension(
    block: &mut Block,
    axis: Axis,
    edit: DimensionEdit,
) -> Result<(), DimensionError> {
    let locked = block.aspect.is_locked();
    let ratio = block.aspect.ratio().filter(|_| locked);

    match edit {
        DimensionEdit::Clear => {
            if locked {
                block.width = None;
                block.height = None;
            } else {
                match axis {
                    Axis::Width => block.width = None,
                    Axis::Height => block.height = None,
                }
            }
        }
        DimensionEdit::Set(value) => {
            let value = validate(value)?;
            match axis {
                Axis::Width => {
                    block.width = Some(value);
                    if let Some(r) = ratio {
                        block.height = Some(value * r);
                    }
                }
                Axis::Height => {
                    block.height = Some(value);
                    if let Some(r) = ratio {
                        block.width = Some(value / r);
                    }
                }
            }
        }
    }

    block.is_full_width = false;
    block.is_manually_resized = block.width.is_some() || block.height.is_some();
    block.aspect.observe_box(block.width, block.height);
    Ok(())
}

/// Flips the block's aspect lock without touching its box.
pub fn toggle_aspect_lock(block: &mut Block) {
    let (width, height) = (block.width, block.height);
    block.aspect.toggle(width, height);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized_block(width: f32, height: f32) -> Block {
        let mut block = Block::new("sized");
        block.apply_box(width, height, false);
        block
    }

    #[test]
    fn test_parse_accepts_plain_and_px() {
        assert_eq!(DimensionEdit::parse("320"), Ok(DimensionEdit::Set(320.0)));
        assert_eq!(DimensionEdit::parse(" 12.5px "), Ok(DimensionEdit::Set(12.5)));
    }

    #[test]
    fn test_parse_rejects_invalid_input() {
        assert_eq!(DimensionEdit::parse(""), Err(DimensionError::Empty));
        assert_eq!(DimensionEdit::parse("   "), Err(DimensionError::Empty));
        assert_eq!(
            DimensionEdit::parse("wide"),
            Err(DimensionError::NotANumber("wide".to_string()))
        );
        assert_eq!(DimensionEdit::parse("inf"), Err(DimensionError::NonFinite));
        assert_eq!(DimensionEdit::parse("NaN"), Err(DimensionError::NonFinite));
        assert_eq!(
            DimensionEdit::parse("-4"),
            Err(DimensionError::NonPositive(-4.0))
        );
        assert_eq!(DimensionEdit::parse("0"), Err(DimensionError::NonPositive(0.0)));
    }

    #[test]
    fn test_rejected_edit_keeps_previous_value() {
        let mut block = sized_block(300.0, 200.0);
        let before = block.clone();
        let result = edit_dimension(&mut block, Axis::Width, DimensionEdit::Set(f32::NAN));
        assert_eq!(result, Err(DimensionError::NonFinite));
        assert_eq!(block, before);
    }

    #[test]
    fn test_unlocked_edit_changes_one_axis() {
        let mut block = sized_block(300.0, 200.0);
        edit_dimension(&mut block, Axis::Width, DimensionEdit::Set(600.0)).unwrap();
        assert_eq!(block.width, Some(600.0));
        assert_eq!(block.height, Some(200.0));
    }

    #[test]
    fn test_locked_width_edit_follows_ratio() {
        let mut block = sized_block(300.0, 150.0);
        toggle_aspect_lock(&mut block);
        assert!(block.aspect.is_locked());
        assert_eq!(block.aspect.ratio(), Some(0.5));

        edit_dimension(&mut block, Axis::Width, DimensionEdit::Set(500.0)).unwrap();
        assert_eq!(block.width, Some(500.0));
        assert_eq!(block.height, Some(250.0));

        edit_dimension(&mut block, Axis::Height, DimensionEdit::Set(100.0)).unwrap();
        assert_eq!(block.height, Some(100.0));
        assert_eq!(block.width, Some(200.0));
    }

    #[test]
    fn test_locked_ratio_follows_pointer_resize() {
        let mut block = sized_block(300.0, 150.0);
        toggle_aspect_lock(&mut block);
        block.apply_box(600.0, 150.0, false);
        assert_eq!(block.aspect.ratio(), Some(0.25));

        edit_dimension(&mut block, Axis::Width, DimensionEdit::Set(400.0)).unwrap();
        assert_eq!(block.height, Some(100.0));
    }

    #[test]
    fn test_locked_clear_then_set_keeps_ratio() {
        let mut block = sized_block(300.0, 150.0);
        toggle_aspect_lock(&mut block);
        edit_dimension(&mut block, Axis::Width, DimensionEdit::Clear).unwrap();
        assert_eq!(block.aspect.ratio(), Some(0.5));

        edit_dimension(&mut block, Axis::Width, DimensionEdit::Set(200.0)).unwrap();
        assert_eq!(block.height, Some(100.0));
    }

    #[test]
    fn test_locked_clear_clears_both() {
        let mut block = sized_block(300.0, 150.0);
        toggle_aspect_lock(&mut block);
        edit_dimension(&mut block, Axis::Height, DimensionEdit::Clear).unwrap();
        assert_eq!(block.width, None);
        assert_eq!(block.height, None);
        assert!(!block.is_manually_resized);
    }

    #[test]
    fn test_unlocked_clear_keeps_other_axis() {
        let mut block = sized_block(300.0, 150.0);
        edit_dimension(&mut block, Axis::Height, DimensionEdit::Clear).unwrap();
        assert_eq!(block.width, Some(300.0));
        assert_eq!(block.height, None);
        assert!(block.is_manually_resized);
    }

    #[test]
    fn test_toggle_lock_does_not_change_box() {
        let mut block = sized_block(320.0, 240.0);
        toggle_aspect_lock(&mut block);
        assert_eq!(block.explicit_size(), Some(egui::vec2(320.0, 240.0)));
        toggle_aspect_lock(&mut block);
        assert!(!block.aspect.is_locked());
        assert_eq!(block.explicit_size(), Some(egui::vec2(320.0, 240.0)));
    }

    #[test]
    fn test_numeric_edit_clears_full_width() {
        let mut block = Block::new("wide");
        block.apply_box(1100.0, 300.0, true);
        edit_dimension(&mut block, Axis::Width, DimensionEdit::Set(700.0)).unwrap();
        assert!(!block.is_full_width);
    }
}
