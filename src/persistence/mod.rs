//! Persistence codec: raw grid files.
//!
//! A file is exactly `width * height` bytes, row-major, one byte per cell
//! with bit 0 as the alive flag. There is no header, so reader and writer
//! must agree on the grid dimensions.

mod dialogs;

pub use dialogs::{Dialogs, RfdDialogs};

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::domain::Grid;
use crate::error::{Error, Result};

/// File extension offered by the save and open dialogs.
pub const FILE_EXTENSION: &str = "gol";

/// Which grid state a save writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveSource {
    /// State captured when the last run started
    Previous,
    /// Live grid
    Current,
}

/// How much of a file a load applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadReport {
    Complete,
    /// The file was short; cells past `applied` kept their prior value.
    Partial { applied: usize, expected: usize },
}

/// Write raw cell bytes to `path`, replacing any existing file.
pub fn save_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)?;
    info!("Saved {} cells to {}", bytes.len(), path.display());
    Ok(())
}

/// Read `path` into `grid`.
///
/// A short file is applied as far as it goes and reported as
/// [`LoadReport::Partial`]; only IO failures are errors.
pub fn load_into(path: &Path, grid: &mut Grid) -> Result<LoadReport> {
    let bytes = fs::read(path)?;
    match grid.import_bytes(&bytes) {
        Ok(()) => {
            info!("Loaded {} cells from {}", grid.len(), path.display());
            Ok(LoadReport::Complete)
        }
        Err(Error::TruncatedInput { expected, actual }) => {
            warn!(
                "{} holds {actual} of {expected} cells; remaining cells unchanged",
                path.display()
            );
            Ok(LoadReport::Partial {
                applied: actual,
                expected,
            })
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cell, presets};
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

    fn temp_path(tag: &str) -> PathBuf {
        let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "life_editor_{tag}_{}_{n}.{FILE_EXTENSION}",
            std::process::id()
        ))
    }

    #[test_log::test]
    fn test_save_then_load_restores_grid() {
        let path = temp_path("roundtrip");
        let mut grid = Grid::new(16, 9);
        presets::glider().place_on(&mut grid, 3, 2);
        presets::block().place_on(&mut grid, 14, 7);

        save_bytes(&path, &grid.export_bytes()).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 16 * 9);

        let mut loaded = Grid::new(16, 9);
        let report = load_into(&path, &mut loaded).unwrap();

        assert_eq!(report, LoadReport::Complete);
        assert_eq!(loaded, grid);
        fs::remove_file(&path).unwrap();
    }

    #[test_log::test]
    fn test_short_file_is_partial_load() {
        let path = temp_path("short");
        fs::write(&path, [1u8, 1, 0, 1]).unwrap();

        let mut grid = Grid::new(4, 2);
        grid.set_alive(3, 1);
        grid.set_alive(2, 0);

        let report = load_into(&path, &mut grid).unwrap();

        assert_eq!(report, LoadReport::Partial { applied: 4, expected: 8 });
        assert_eq!(grid.export_bytes(), vec![1, 1, 0, 1, 0, 0, 0, 1]);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let path = temp_path("missing");
        let mut grid = Grid::new(2, 2);
        grid.set_alive(0, 0);

        let err = load_into(&path, &mut grid).unwrap_err();

        assert!(matches!(err, Error::Io(_)));
        assert_eq!(grid.get(0, 0), Some(Cell::Alive));
    }

    #[test]
    fn test_save_to_directory_fails() {
        let err = save_bytes(&std::env::temp_dir(), &[0, 1]).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
