use super::{Cell, Snapshot};
use crate::error::{Error, Result};

/// Grid owns the fixed-size, non-wrapping cell array.
/// Cells are stored row-major (y outer, x inner), the same order as the
/// persisted byte layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
        }
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of cells, and of bytes in the persisted form
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    const fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Convert 2D coordinates to 1D index
    const fn get_index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Read a cell, failing for coordinates outside the grid.
    pub fn read(&self, x: usize, y: usize) -> Result<Cell> {
        self.get(x, y).ok_or(Error::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.in_bounds(x, y)
            .then(|| self.cells[self.get_index(x, y)])
    }

    /// Set cell at position. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if self.in_bounds(x, y) {
            let idx = self.get_index(x, y);
            self.cells[idx] = cell;
        }
    }

    pub fn set_alive(&mut self, x: usize, y: usize) {
        self.set(x, y, Cell::Alive);
    }

    pub fn set_dead(&mut self, x: usize, y: usize) {
        self.set(x, y, Cell::Dead);
    }

    /// Clear all cells to dead state
    pub fn clear_all(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::Dead);
    }

    /// Fill the grid at random with the given probability of a live cell.
    pub fn randomize(&mut self, density: f64) {
        use rand::Rng;
        let mut rng = rand::rng();
        let density = density.clamp(0.0, 1.0);

        self.cells.iter_mut().for_each(|cell| {
            *cell = if rng.random_bool(density) {
                Cell::Alive
            } else {
                Cell::Dead
            };
        });
    }

    /// Count live neighbors among the up-to-8 in-bounds surrounding cells.
    /// Positions past an edge count as dead; there is no wraparound.
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let x_lo = x.saturating_sub(1);
        let y_lo = y.saturating_sub(1);
        let x_hi = (x + 1).min(self.width.saturating_sub(1));
        let y_hi = (y + 1).min(self.height.saturating_sub(1));

        (y_lo..=y_hi)
            .flat_map(|ny| (x_lo..=x_hi).map(move |nx| (nx, ny)))
            .filter(|&(nx, ny)| (nx, ny) != (x, y))
            .filter(|&(nx, ny)| self.cells[self.get_index(nx, ny)].is_alive())
            .count() as u8
    }

    pub fn count_alive(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Iterate over all cells with their positions, row-major
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &cell)| (idx % width, idx / width, cell))
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// One byte per cell, row-major, 1 = alive and 0 = dead.
    pub fn export_bytes(&self) -> Vec<u8> {
        self.cells.iter().map(|cell| cell.to_byte()).collect()
    }

    /// Overwrite cells from a row-major byte sequence.
    ///
    /// Bytes past `len()` are ignored. A short sequence is still applied
    /// up to its length; cells beyond it keep their previous value and
    /// `TruncatedInput` is returned.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.cells
            .iter_mut()
            .zip(bytes)
            .for_each(|(cell, &byte)| *cell = Cell::from_byte(byte));

        if bytes.len() < self.len() {
            return Err(Error::TruncatedInput {
                expected: self.len(),
                actual: bytes.len(),
            });
        }
        Ok(())
    }

    /// Freeze the current alive/dead state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
