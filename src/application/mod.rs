mod controller;
mod events;
mod requests;

pub use controller::{Controller, SimulationMode, Speed, RANDOM_DENSITY};
pub use events::{Action, InputEvent, PointerButton};
pub use requests::{Flow, HELP_TEXT, perform};
