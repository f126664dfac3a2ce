//! Runtime configuration, read from a TOML file.
//!
//! Every field has a default, so a missing file or a partial file both
//! produce a usable configuration. The defaults reproduce the classic
//! 256x144 grid drawn with 5 pixel cells in a 1280x720 window.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::Algorithm;
use crate::error::{Error, Result};

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "LIFE_EDITOR_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "life_editor.toml";

pub const DEFAULT_GRID_WIDTH: usize = 256;
pub const DEFAULT_GRID_HEIGHT: usize = 144;
pub const DEFAULT_CELL_SIZE: u32 = 5;

/// Largest grid accepted from a config file (4096x4096 cells).
pub const MAX_CELLS: usize = 1 << 24;

/// Largest window edge macroquad can be asked for.
const MAX_WINDOW_EDGE: u32 = i32::MAX as u32;

/// Pixel length of `cells` cells at `cell_size`, if it fits a window edge.
fn window_edge(cells: usize, cell_size: u32) -> Option<u32> {
    u32::try_from(cells)
        .ok()?
        .checked_mul(cell_size)
        .filter(|&px| px <= MAX_WINDOW_EDGE)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub grid: GridConfig,
    pub display: DisplayConfig,
    pub simulation: SimulationConfig,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Edge length of one cell in pixels
    pub cell_size: u32,
    pub window_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Frames per generation at startup, floored at 1
    pub initial_speed: u32,
    pub algorithm: Algorithm,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            window_title: "Game of Life".to_owned(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_speed: 1,
            algorithm: Algorithm::default(),
        }
    }
}

impl Config {
    /// Path from `LIFE_EDITOR_CONFIG`, or `life_editor.toml` in the
    /// working directory.
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(Error::Config(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }
        if self.display.cell_size == 0 {
            return Err(Error::Config("display.cell_size must be positive".to_owned()));
        }
        let cells = self.grid.width.checked_mul(self.grid.height);
        if cells.is_none_or(|n| n > MAX_CELLS) {
            return Err(Error::Config(format!(
                "grid {}x{} exceeds {MAX_CELLS} cells",
                self.grid.width, self.grid.height
            )));
        }
        let cell = self.display.cell_size;
        if window_edge(self.grid.width, cell).is_none() || window_edge(self.grid.height, cell).is_none() {
            return Err(Error::Config(format!(
                "grid {}x{} at {cell} px per cell does not fit a window",
                self.grid.width, self.grid.height
            )));
        }
        Ok(())
    }

    /// Window size in pixels: the grid drawn at `cell_size`. Saturates for
    /// configs that did not pass [`validate`](Self::validate).
    pub fn window_size(&self) -> (u32, u32) {
        let cell = self.display.cell_size;
        (
            window_edge(self.grid.width, cell).unwrap_or(MAX_WINDOW_EDGE),
            window_edge(self.grid.height, cell).unwrap_or(MAX_WINDOW_EDGE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_window() {
        let config = Config::default();
        assert_eq!((config.grid.width, config.grid.height), (256, 144));
        assert_eq!(config.window_size(), (1280, 720));
        assert_eq!(config.simulation.initial_speed, 1);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            log_filter = "debug"

            [grid]
            width = 64

            [simulation]
            algorithm = "serial"
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.width, 64);
        assert_eq!(config.grid.height, DEFAULT_GRID_HEIGHT);
        assert_eq!(config.display.cell_size, DEFAULT_CELL_SIZE);
        assert_eq!(config.simulation.algorithm, Algorithm::Serial);
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn test_zero_sized_grid_rejected() {
        let err = Config::from_toml("[grid]\nheight = 0\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let err = Config::from_toml("[grid]\nwidth = 1000000\n[display]\ncell_size = 5000\n")
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let err = Config::from_toml("[grid]\nwidth = 5000\nheight = 5000\n[display]\ncell_size = 1\n")
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        // Pixel overflow on one edge alone
        let err = Config::from_toml("[grid]\nwidth = 2\nheight = 1000\n[display]\ncell_size = 4000000\n")
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let big = Config::from_toml("[grid]\nwidth = 4096\nheight = 4096\n[display]\ncell_size = 1\n")
            .unwrap();
        assert_eq!(big.window_size(), (4096, 4096));
    }

    #[test]
    fn test_window_size_saturates_without_validation() {
        let mut config = Config::default();
        config.grid.width = 1_000_000;
        config.display.cell_size = 5000;
        assert_eq!(config.window_size().0, i32::MAX as u32);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = Config::from_toml("[grid\nwidth = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("life_editor_no_such_config.toml");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }
}
