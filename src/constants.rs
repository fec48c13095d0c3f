//! Centralized constants for grid sizing, resize limits, and editor colors.
//!
//! Engine limits are fixed here rather than in `GridConfig`; only the grid metrics
//! (row height, gap, column width) are user configurable.

use egui::Color32;

// =============================================================================
// GRID DEFAULTS
// =============================================================================

/// Height of one implicit grid row track, in pixels.
pub const DEFAULT_ROW_HEIGHT: f32 = 10.0;

/// Gap between grid tracks in both axes, in pixels.
pub const DEFAULT_GAP: f32 = 16.0;

/// Smallest width a column track may shrink to before the template drops a column.
pub const DEFAULT_MIN_COLUMN_WIDTH: f32 = 250.0;

// =============================================================================
// RESIZE LIMITS
// =============================================================================

/// Minimum width a block can be resized to.
pub const MIN_RESIZE_WIDTH: f32 = 150.0;

/// Minimum height a block can be resized to.
pub const MIN_RESIZE_HEIGHT: f32 = 100.0;

/// Fraction of the container width at which a resized block snaps to full width.
pub const FULL_WIDTH_THRESHOLD: f32 = 0.85;

// =============================================================================
// WINDOW CONSTANTS
// =============================================================================

pub const INITIAL_WINDOW_WIDTH: f32 = 1200.0;

pub const INITIAL_WINDOW_HEIGHT: f32 = 800.0;

/// Width of the admin side panel.
pub const ADMIN_PANEL_WIDTH: f32 = 260.0;

/// Spacing between the canvas edges and the grid.
pub const CANVAS_PADDING: f32 = 24.0;

// =============================================================================
// CARD RENDERING CONSTANTS
// =============================================================================

/// Inner padding between a card's edge and its text.
pub const CARD_PADDING: f32 = 12.0;

/// Font size for card body text.
pub const CARD_FONT_SIZE: f32 = 14.0;

/// Side length of a resize handle square.
pub const HANDLE_SIZE: f32 = 10.0;

/// Side length of the drag grip in the top-left corner.
pub const GRIP_SIZE: f32 = 18.0;

/// Outline width for state markers (selected, drag-over).
pub const MARKER_STROKE_WIDTH: f32 = 2.0;

/// Opacity applied to the card being dragged.
pub const DRAGGING_OPACITY: f32 = 0.5;

// =============================================================================
// TOOLBAR CONSTANTS
// =============================================================================

pub const TOOLBAR_START_SPACING: f32 = 8.0;

pub const TOOLBAR_ICON_SIZE: f32 = 20.0;

pub const TOOLBAR_BUTTON_SIZE: f32 = 32.0;

// =============================================================================
// COLORS
// =============================================================================

pub const COLOR_TOOLBAR_BG: Color32 = Color32::from_rgb(30, 30, 30);

pub const COLOR_CANVAS_BG: Color32 = Color32::from_rgb(22, 22, 26);

/// Outline of the currently selected card.
pub const COLOR_SELECTED: Color32 = Color32::from_rgb(90, 160, 255);

/// Outline of the card under a dragged card.
pub const COLOR_DRAG_OVER: Color32 = Color32::from_rgb(120, 220, 120);

/// Outline of a full-width card.
pub const COLOR_FULL_WIDTH: Color32 = Color32::from_rgb(230, 180, 60);

/// Fill of the resize handles.
pub const COLOR_HANDLE: Color32 = Color32::from_rgb(240, 240, 240);

/// Fill of the lock badge on resize-locked cards.
pub const COLOR_LOCK_BADGE: Color32 = Color32::from_rgb(200, 80, 80);

/// Fill of the marker dot on manually resized cards.
pub const COLOR_MANUAL_BADGE: Color32 = Color32::from_rgb(160, 120, 255);

pub const COLOR_GRIP: Color32 = Color32::from_rgb(140, 140, 140);
