//! Match scanner - finds runs of three or more equal gems
//!
//! A full scan walks every row top-to-bottom, then every column
//! left-to-right, run-length encoding each line. The scan order is part of
//! the engine's determinism contract: match queues are populated in
//! exactly this order.

use std::ops::RangeInclusive;

use crate::core::Board;
use crate::types::{Axis, Cell, Position, MATCH_LEN};

/// A maximal run of >= 3 equal gems along one row or column, as an
/// inclusive (start, end) span. Runs never contain empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: Position,
    pub end: Position,
    pub axis: Axis,
}

impl MatchSpan {
    pub fn row(y: u8, x_start: u8, x_end: u8) -> Self {
        Self {
            start: Position::new(x_start, y),
            end: Position::new(x_end, y),
            axis: Axis::Row,
        }
    }

    pub fn column(x: u8, y_start: u8, y_end: u8) -> Self {
        Self {
            start: Position::new(x, y_start),
            end: Position::new(x, y_end),
            axis: Axis::Column,
        }
    }

    /// Number of cells covered by the span.
    pub fn len(&self) -> usize {
        match self.axis {
            Axis::Row => (self.end.x - self.start.x) as usize + 1,
            Axis::Column => (self.end.y - self.start.y) as usize + 1,
        }
    }

    /// Every position covered by the span, in start-to-end order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let (start, end, axis) = (self.start, self.end, self.axis);
        let range = match axis {
            Axis::Row => start.x..=end.x,
            Axis::Column => start.y..=end.y,
        };
        range.map(move |i| match axis {
            Axis::Row => Position::new(i, start.y),
            Axis::Column => Position::new(start.x, i),
        })
    }

    /// The x coordinates the span touches. Refill gravity acts per column,
    /// so this is the unit of work for a refill job.
    pub fn columns(&self) -> RangeInclusive<u8> {
        self.start.x..=self.end.x
    }
}

/// Run-length encode one line of cells. A run is flushed on color change
/// and once more at the line end, so a uniform run reaching the last cell
/// is still reported. Empty cells never join a run.
fn scan_line<C, S>(len: u8, cell_at: C, make_span: S, out: &mut Vec<MatchSpan>)
where
    C: Fn(u8) -> Cell,
    S: Fn(u8, u8) -> MatchSpan,
{
    if len == 0 {
        return;
    }

    let mut run_start = 0u8;
    let mut current = cell_at(0);

    for i in 1..len {
        let cell = cell_at(i);
        let continues = cell.is_some() && cell == current;
        if !continues {
            if current.is_some() && (i - run_start) as usize >= MATCH_LEN {
                out.push(make_span(run_start, i - 1));
            }
            run_start = i;
            current = cell;
        }
    }

    // Boundary flush: no color-change event fires at the end of the line.
    if current.is_some() && (len - run_start) as usize >= MATCH_LEN {
        out.push(make_span(run_start, len - 1));
    }
}

/// Scan every row, top to bottom.
pub fn find_row_matches(board: &Board) -> Vec<MatchSpan> {
    let mut spans = Vec::new();
    for y in 0..board.height() {
        scan_line(
            board.width(),
            |x| board.get(x, y).unwrap_or(None),
            |x_start, x_end| MatchSpan::row(y, x_start, x_end),
            &mut spans,
        );
    }
    spans
}

/// Scan every column, left to right.
pub fn find_column_matches(board: &Board) -> Vec<MatchSpan> {
    let mut spans = Vec::new();
    for x in 0..board.width() {
        scan_line(
            board.height(),
            |y| board.get(x, y).unwrap_or(None),
            |y_start, y_end| MatchSpan::column(x, y_start, y_end),
            &mut spans,
        );
    }
    spans
}

/// Stability invariant check: no run of >= 3 along any row or column.
pub fn board_is_stable(board: &Board) -> bool {
    find_row_matches(board).is_empty() && find_column_matches(board).is_empty()
}
