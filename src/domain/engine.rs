//! Transition engine: advances a grid by one generation.
//!
//! A step runs in two phases. Classification reads the frozen grid and
//! records a mark for every cell that changes; commit then applies the
//! whole mark list. No neighbor count ever sees a half-applied generation,
//! so the visiting order of classification does not matter and rows can be
//! classified in parallel.

use rayon::prelude::*;

use super::{Algorithm, Cell, Grid};

/// Pending change for one cell, keyed by its row-major index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    Birth(usize),
    Death(usize),
}

/// Births and deaths applied by one generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub births: usize,
    pub deaths: usize,
}

impl GenerationStats {
    pub const fn changed(&self) -> bool {
        self.births + self.deaths > 0
    }
}

/// Mark for the cell at (x, y), if it changes
fn classify_cell(grid: &Grid, x: usize, y: usize, current: Cell) -> Option<Mark> {
    let idx = y * grid.dimensions().0 + x;
    match (current, current.evolve(grid.live_neighbors(x, y))) {
        (Cell::Alive, Cell::Dead) => Some(Mark::Death(idx)),
        (Cell::Dead, Cell::Alive) => Some(Mark::Birth(idx)),
        _ => None,
    }
}

fn classify_row(grid: &Grid, y: usize, row: &[Cell]) -> Vec<Mark> {
    row.iter()
        .enumerate()
        .filter_map(|(x, &cell)| classify_cell(grid, x, y, cell))
        .collect()
}

/// Classify every cell, one row after another.
pub fn classify(grid: &Grid) -> Vec<Mark> {
    grid.rows()
        .enumerate()
        .flat_map(|(y, row)| classify_row(grid, y, row))
        .collect()
}

/// Classify rows in parallel with rayon. Produces the same marks, in the
/// same order, as [`classify`].
pub fn classify_parallel(grid: &Grid) -> Vec<Mark> {
    let rows: Vec<&[Cell]> = grid.rows().collect();
    rows.into_par_iter()
        .enumerate()
        .flat_map_iter(|(y, row)| classify_row(grid, y, row))
        .collect()
}

/// Apply a full mark list to the grid.
pub fn commit(grid: &mut Grid, marks: &[Mark]) -> GenerationStats {
    let cells = grid.cells_mut();
    marks.iter().fold(GenerationStats::default(), |mut stats, mark| {
        match *mark {
            Mark::Birth(idx) => {
                cells[idx] = Cell::Alive;
                stats.births += 1;
            }
            Mark::Death(idx) => {
                cells[idx] = Cell::Dead;
                stats.deaths += 1;
            }
        }
        stats
    })
}

/// Advance the grid by one generation using the chosen classifier.
pub fn step_generation(grid: &mut Grid, algorithm: Algorithm) -> GenerationStats {
    let marks = match algorithm {
        Algorithm::Serial => classify(grid),
        Algorithm::Parallel => classify_parallel(grid),
    };
    commit(grid, &marks)
}
