//! Interactive block layout engine for a page-builder grid.
//!
//! Cards are packed into a responsive column grid by turning their measured sizes
//! into row/column spans, resized through eight directional handles, and reordered
//! by drag-and-drop. [`LayoutEngine`] is the single context object a host owns.

pub mod block;
pub mod config;
pub mod constants;
pub mod dimensions;
pub mod drag;
pub mod engine;
pub mod grid;
pub mod masonry;
pub mod measure;
pub mod paths;
pub mod resize;
pub mod scheduler;
pub mod selection;

pub use block::{Block, StyleSettings};
pub use config::{ConfigError, GridConfig};
pub use dimensions::{Axis, DimensionEdit, DimensionError};
pub use engine::{CardClasses, CardView, Changes, LayoutCommand, LayoutEngine, LayoutState};
pub use grid::{GridTemplate, Placement};
pub use masonry::Span;
pub use measure::{MeasurementProvider, ScriptedMeasurements, SizeObserver};
pub use resize::{ResizeDirection, ResizeGesture, ResizeOutcome};
pub use scheduler::CoalescingScheduler;
