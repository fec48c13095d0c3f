//! Masonry packing: measured card sizes become grid spans.
//!
//! Only spans are computed here. Start lines are left to auto-placement
//! (`grid::place`), which lets short cards flow into gaps beside tall ones while
//! keeping source order.

use crate::block::Block;
use crate::grid::GridTemplate;
use crate::measure::MeasurementProvider;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub rows: usize,
    pub columns: usize,
}

impl Span {
    /// Span of a card that cannot be measured yet.
    pub const UNIT: Span = Span {
        rows: 1,
        columns: 1,
    };
}

/// Number of row tracks needed so that the tracks plus their gaps cover `height`.
pub fn row_span(height: f32, row_height: f32, gap: f32) -> usize {
    let track = row_height + gap;
    if !height.is_finite() || !track.is_finite() || track <= 0.0 {
        return 1;
    }
    let rows = ((height.max(0.0) + gap) / track).ceil();
    (rows as usize).max(1)
}

/// Number of column tracks a card spans. Auto-sized cards always take one column.
pub fn column_span(block: &Block, column_width: f32, gap: f32) -> usize {
    let width = match (block.is_manually_resized, block.width) {
        (true, Some(width)) => width,
        _ => return 1,
    };
    let track = column_width + gap;
    if !width.is_finite() || !track.is_finite() || track <= 0.0 {
        return 1;
    }
    let columns = ((width + gap) / track).round().max(1.0);
    columns as usize
}

pub fn span_for(block: &Block, provider: &dyn MeasurementProvider, template: &GridTemplate) -> Span {
    match provider.card_size(block.id) {
        Some(size) => Span {
            rows: row_span(size.y, template.row_height, template.gap),
            columns: column_span(block, template.column_width, template.gap),
        },
        None => Span::UNIT,
    }
}

/// Spans for every card, in sequence order.
pub fn compute_spans(
    blocks: &[Block],
    provider: &dyn MeasurementProvider,
    template: &GridTemplate,
) -> Vec<(Uuid, Span)> {
    blocks
        .iter()
        .map(|block| (block.id, span_for(block, provider, template)))
        .collect()
}
