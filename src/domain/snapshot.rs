use super::Grid;

/// Immutable copy of a grid taken when a run starts from editing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    grid: Grid,
}

impl Snapshot {
    pub fn capture(grid: &Grid) -> Self {
        Self { grid: grid.clone() }
    }

    pub fn export_bytes(&self) -> Vec<u8> {
        self.grid.export_bytes()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}
