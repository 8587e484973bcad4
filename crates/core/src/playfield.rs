//! Playfield module - manages the game grid
//!
//! A `width x height` grid of color ids stored as a flat row-major vector.
//! Coordinates are `(x, y)`: x grows to the right, y grows downward, and row 0
//! is the top row. Probing ([`Playfield::is_valid_position`]) and mutation
//! ([`Playfield::place`], the clear operations) are separate so the engine can
//! test hypothetical positions without side effects.

use crate::pieces::Mask;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY_CELL, MAX_COLOR};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    width: usize,
    height: usize,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl Playfield {
    /// Create an empty playfield
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY_CELL; width * height],
        }
    }

    /// Build a playfield from rows of color ids (row 0 first)
    ///
    /// Returns `None` if rows are ragged or a value exceeds the color range.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != width) {
            return None;
        }
        if rows.iter().flatten().any(|&c| c > MAX_COLOR) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.concat(),
        })
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds or `cell` is not a valid color id
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        if cell > MAX_COLOR {
            return false;
        }
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether `mask` anchored at `(x, y)` is fully in bounds and collision-free
    pub fn is_valid_position(&self, mask: &Mask, x: i32, y: i32) -> bool {
        mask.cells()
            .iter()
            .all(|&(dx, dy)| self.get(x + dx, y + dy) == Some(EMPTY_CELL))
    }

    /// Write `color` into every occupied cell of `mask` anchored at `(x, y)`.
    ///
    /// Cells outside the grid are skipped.
    pub fn place(&mut self, mask: &Mask, x: i32, y: i32, color: Cell) {
        for &(dx, dy) in mask.cells().iter() {
            self.set(x + dx, y + dy, color);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|&c| c != EMPTY_CELL))
    }

    /// Clear all full rows, collapsing the rows above them. Returns the count.
    ///
    /// Rows are compacted bottom to top in one pass, so adjacent and
    /// non-adjacent full rows are handled alike.
    pub fn clear_full_lines(&mut self) -> usize {
        let width = self.width;
        let mut write_y = self.height;
        let mut cleared = 0;

        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(EMPTY_CELL);
        cleared
    }

    /// Remove row `y`, shifting every row above it down by one.
    ///
    /// Returns false (and does nothing) if `y` is out of range.
    pub fn clear_row(&mut self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        let width = self.width;
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * width, width);
        self.cells[..width].fill(EMPTY_CELL);
        true
    }

    /// Empty a single cell; out-of-bounds coordinates are ignored
    pub fn clear_cell(&mut self, x: i32, y: i32) {
        self.set(x, y, EMPTY_CELL);
    }

    /// True iff row 0 has any filled cell
    pub fn is_top_row_occupied(&self) -> bool {
        self.row(0).is_some_and(|row| row.iter().any(|&c| c != EMPTY_CELL))
    }

    /// Clear the entire playfield
    pub fn reset(&mut self) {
        self.cells.fill(EMPTY_CELL);
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY_CELL).count()
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}
