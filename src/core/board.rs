//! Board module - manages the gem grid
//!
//! The board is a W x H grid of cells, each either empty or holding a gem
//! color index. Dimensions are fixed at construction; storage is a flat
//! Vec in row-major order for cache locality.
//! Coordinates: (x, y) with x in 0..width (left to right) and y in
//! 0..height (top to bottom). Gravity pulls gems toward larger y.

use crate::types::{Cell, Gem, Position};

/// The gem grid. Owned and mutated exclusively by the board engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat cell storage, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board of the given dimensions.
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: u8, y: u8) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// True when the position lies on the board.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Get cell at (x, y). Returns None if out of bounds.
    pub fn get(&self, x: u8, y: u8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: u8, y: u8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Gem at (x, y), if the cell is on the board and occupied.
    pub fn gem(&self, pos: Position) -> Option<Gem> {
        self.get(pos.x, pos.y).flatten()
    }

    /// Check if position is on the board and empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        matches!(self.get(pos.x, pos.y), Some(None))
    }

    /// Exchange the contents of two cells. Returns false (board untouched)
    /// if either position is out of bounds.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        let (Some(ia), Some(ib)) = (self.index(a.x, a.y), self.index(b.x, b.y)) else {
            return false;
        };
        self.cells.swap(ia, ib);
        true
    }

    /// Number of empty cells on the whole board.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Get a reference to the internal cells slice (row-major).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Build a board from row vectors. Panics on ragged input; intended
    /// for tests and tools that craft exact layouts.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        let height = rows.len() as u8;
        let width = rows.first().map_or(0, |row| row.len()) as u8;
        assert!(
            rows.iter().all(|row| row.len() == width as usize),
            "all rows must have equal width"
        );

        let cells = rows.into_iter().flatten().collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Convert to row vectors for assertions and display.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        let width = self.width as usize;
        (0..self.height as usize)
            .map(|y| self.cells[y * width..(y + 1) * width].to_vec())
            .collect()
    }
}
