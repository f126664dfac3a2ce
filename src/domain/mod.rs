mod cell;
mod grid;
mod snapshot;
mod algorithm;
mod patterns;
pub mod engine;

pub use cell::{Cell, ALIVE_BIT};
pub use grid::Grid;
pub use snapshot::Snapshot;
pub use algorithm::Algorithm;
pub use patterns::{Pattern, presets};
pub use engine::{GenerationStats, step_generation};
