// Domain layer - Grid, transition engine, patterns
pub mod domain;

// Application layer - Interaction controller and request dispatch
pub mod application;

// Persistence codec and dialog collaborators
pub mod persistence;

// Infrastructure layer - rendering, input
pub mod rendering;
pub mod input;

pub mod config;
pub mod error;

// Re-exports for convenience
pub use domain::{Cell, Grid, Snapshot, Algorithm, GenerationStats, step_generation};
pub use application::{Controller, SimulationMode, Speed, InputEvent, Action};
pub use config::Config;
pub use error::{Error, Result};
