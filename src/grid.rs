//! Column template and auto-placement for the card grid.
//!
//! The template follows `repeat(auto-fill, minmax(min_column_width, 1fr))`: as many
//! equal columns as fit the container, stretched to fill it. Placement is the sparse
//! row-major auto-flow of a CSS grid, so cards keep source order and only the spans
//! decide where gaps get filled.

use crate::config::GridConfig;
use crate::masonry::Span;
use egui::{pos2, vec2, Pos2, Rect};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridTemplate {
    pub columns: usize,
    pub column_width: f32,
    pub row_height: f32,
    pub gap: f32,
    pub container_width: f32,
}

impl GridTemplate {
    pub fn from_container(container_width: f32, config: &GridConfig) -> Self {
        let width = if container_width.is_finite() {
            container_width.max(0.0)
        } else {
            0.0
        };
        let gap = config.gap;
        let fit = ((width + gap) / (config.min_column_width + gap)).floor();
        let columns = if fit.is_finite() && fit >= 1.0 {
            fit as usize
        } else {
            1
        };
        let column_width = ((width - gap * (columns - 1) as f32) / columns as f32).max(0.0);

        Self {
            columns,
            column_width,
            row_height: config.row_height,
            gap,
            container_width: width,
        }
    }

    pub fn span_width(&self, columns: usize) -> f32 {
        let columns = columns.max(1) as f32;
        columns * self.column_width + (columns - 1.0) * self.gap
    }

    pub fn span_height(&self, rows: usize) -> f32 {
        let rows = rows.max(1) as f32;
        rows * self.row_height + (rows - 1.0) * self.gap
    }

    pub fn cell_origin(&self, column: usize, row: usize) -> Pos2 {
        pos2(
            column as f32 * (self.column_width + self.gap),
            row as f32 * (self.row_height + self.gap),
        )
    }
}

/// Where one card landed in the grid, in track units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub id: Uuid,
    pub column: usize,
    pub row: usize,
    pub column_span: usize,
    pub row_span: usize,
}

impl Placement {
    /// Cell rectangle relative to the grid origin.
    pub fn rect(&self, template: &GridTemplate) -> Rect {
        Rect::from_min_size(
            template.cell_origin(self.column, self.row),
            vec2(
                template.span_width(self.column_span),
                template.span_height(self.row_span),
            ),
        )
    }
}

/// First free row of every column track.
///
/// Sparse auto-flow never moves its cursor backwards, so any hole left above the last
/// card in a column is behind the cursor for good and only the bottom edge matters.
struct Occupancy {
    free_from: Vec<usize>,
}

impl Occupancy {
    fn new(columns: usize) -> Self {
        Self {
            free_from: vec![0; columns],
        }
    }

    fn is_free(&self, column: usize, row: usize, column_span: usize) -> bool {
        self.free_from
            .get(column..column + column_span)
            .is_some_and(|tracks| tracks.iter().all(|&free| free <= row))
    }

    fn fill(&mut self, column: usize, row: usize, column_span: usize, row_span: usize) {
        for free in &mut self.free_from[column..column + column_span] {
            *free = row + row_span;
        }
    }

    /// Lowest row at which some run of `column_span` tracks is free.
    fn earliest_row(&self, column_span: usize) -> usize {
        self.free_from
            .windows(column_span)
            .map(|tracks| tracks.iter().copied().max().unwrap_or(0))
            .min()
            .unwrap_or(0)
    }
}

/// Places cards in source order with sparse row-major auto-flow.
pub fn place(spans: &[(Uuid, Span)], columns: usize) -> Vec<Placement> {
    let columns = columns.max(1);
    let mut occupancy = Occupancy::new(columns);
    let mut cursor_row = 0;
    let mut cursor_column = 0;
    let mut placements = Vec::with_capacity(spans.len());

    for &(id, span) in spans {
        let column_span = span.columns.clamp(1, columns);
        let row_span = span.rows.max(1);

        loop {
            if cursor_column + column_span > columns {
                // Skip rows where no run of tracks is free yet
                cursor_row = (cursor_row + 1).max(occupancy.earliest_row(column_span));
                cursor_column = 0;
                continue;
            }
            if occupancy.is_free(cursor_column, cursor_row, column_span) {
                break;
            }
            cursor_column += 1;
        }

        occupancy.fill(cursor_column, cursor_row, column_span, row_span);
        placements.push(Placement {
            id,
            column: cursor_column,
            row: cursor_row,
            column_span,
            row_span,
        });
        cursor_column += column_span;
    }

    placements
}

/// Total pixel height of the placed grid.
pub fn content_height(placements: &[Placement], template: &GridTemplate) -> f32 {
    placements
        .iter()
        .map(|p| p.rect(template).max.y)
        .fold(0.0, f32::max)
}
