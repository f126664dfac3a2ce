use std::path::Path;

use log::{debug, info, trace, warn};

use super::{Action, InputEvent, PointerButton};
use crate::config::Config;
use crate::domain::{Algorithm, GenerationStats, Grid, Snapshot, step_generation};
use crate::error::Result;
use crate::persistence::{self, LoadReport, SaveSource};

/// Fraction of cells set alive by the randomize command
pub const RANDOM_DENSITY: f64 = 0.3;

/// Whether the user is editing cells or the simulation is advancing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimulationMode {
    #[default]
    Editing,
    Running,
}

/// Frames per generation; larger is slower. Never below 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Speed(u32);

impl Speed {
    pub const MIN: Speed = Speed(1);

    pub fn new(frames: u32) -> Self {
        Self(frames.max(1))
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub fn slower(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn faster(self) -> Self {
        Self::new(self.0 - 1)
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::MIN
    }
}

/// Controller owns the simulation state and applies input to it.
///
/// Each frame the loop feeds every drained [`InputEvent`] to
/// [`handle_event`](Self::handle_event) and then calls
/// [`frame`](Self::frame) once. Editing writes the grid directly; running
/// hands it to the transition engine when the tick counter passes the speed.
pub struct Controller {
    grid: Grid,
    snapshot: Option<Snapshot>,
    mode: SimulationMode,
    speed: Speed,
    tick: u32,
    generation: u64,
    algorithm: Algorithm,
    cell_size: u32,
    pointer: (f32, f32),
    primary_down: bool,
    secondary_down: bool,
    last_stats: GenerationStats,
}

impl Controller {
    /// Create a controller over an all-dead grid
    pub fn new(width: usize, height: usize, cell_size: u32) -> Self {
        Self {
            grid: Grid::new(width, height),
            snapshot: None,
            mode: SimulationMode::Editing,
            speed: Speed::default(),
            tick: 0,
            generation: 0,
            algorithm: Algorithm::default(),
            cell_size: cell_size.max(1),
            pointer: (-1.0, -1.0),
            primary_down: false,
            secondary_down: false,
            last_stats: GenerationStats::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.grid.width, config.grid.height, config.display.cell_size)
            .with_speed(Speed::new(config.simulation.initial_speed))
            .with_algorithm(config.simulation.algorithm)
    }

    pub fn with_speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn mode(&self) -> SimulationMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.mode == SimulationMode::Running
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Births and deaths of the latest generation since the grid was last
    /// replaced by clear, randomize or load.
    pub fn last_stats(&self) -> GenerationStats {
        self.last_stats
    }

    /// Apply one input event. Returns an [`Action`] when the event needs a
    /// collaborator the controller does not own.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<Action> {
        match event {
            InputEvent::Quit => return Some(Action::Quit),
            InputEvent::ToggleRun => self.toggle_running(),
            InputEvent::PointerDown(button) => self.set_button(button, true),
            InputEvent::PointerUp(button) => self.set_button(button, false),
            InputEvent::PointerMoved { x, y } => self.pointer = (x, y),
            InputEvent::Wheel(delta) => self.scroll(delta),
            // The rest only apply while editing
            _ if self.is_running() => {
                trace!("Ignoring {event:?} while running");
            }
            InputEvent::Clear => self.clear(),
            InputEvent::Randomize => self.randomize(),
            InputEvent::SaveRequest => return Some(Action::Save),
            InputEvent::LoadRequest => return Some(Action::Load),
            InputEvent::HelpRequest => return Some(Action::ShowHelp),
        }
        None
    }

    /// Advance one frame: paint under the pointer while editing, or count a
    /// tick and possibly step a generation while running.
    ///
    /// A generation fires when the counter exceeds the speed, so at speed
    /// `n` the simulation steps once every `n + 1` frames. The counter only
    /// moves while running, so a resumed run waits out a full period before
    /// its first step instead of stepping on the first running frame.
    pub fn frame(&mut self) -> Option<GenerationStats> {
        match self.mode {
            SimulationMode::Editing => {
                self.paint();
                None
            }
            SimulationMode::Running => {
                let stepped = (self.tick > self.speed.get()).then(|| {
                    self.tick = 0;
                    self.step()
                });
                self.tick += 1;
                stepped
            }
        }
    }

    /// Enter or leave running mode; entering takes a fresh snapshot.
    pub fn toggle_running(&mut self) {
        self.mode = match self.mode {
            SimulationMode::Editing => {
                self.snapshot = Some(self.grid.snapshot());
                info!(
                    "Simulation started at generation {} ({} live cells)",
                    self.generation,
                    self.grid.count_alive()
                );
                SimulationMode::Running
            }
            SimulationMode::Running => {
                info!("Simulation paused at generation {}", self.generation);
                SimulationMode::Editing
            }
        };
    }

    /// Run one generation regardless of the tick counter
    pub fn step(&mut self) -> GenerationStats {
        let stats = step_generation(&mut self.grid, self.algorithm);
        self.generation += 1;
        self.last_stats = stats;
        trace!(
            "Generation {}: {} births, {} deaths",
            self.generation, stats.births, stats.deaths
        );
        stats
    }

    fn clear(&mut self) {
        self.grid.clear_all();
        self.generation = 0;
        self.last_stats = GenerationStats::default();
        debug!("Grid cleared");
    }

    fn randomize(&mut self) {
        self.grid.randomize(RANDOM_DENSITY);
        self.generation = 0;
        self.last_stats = GenerationStats::default();
        debug!("Grid randomized ({} live cells)", self.grid.count_alive());
    }

    fn set_button(&mut self, button: PointerButton, down: bool) {
        match button {
            PointerButton::Primary => self.primary_down = down,
            PointerButton::Secondary => self.secondary_down = down,
        }
    }

    /// Scrolling down slows the simulation, scrolling up speeds it up.
    fn scroll(&mut self, delta: f32) {
        let speed = if delta < 0.0 {
            self.speed.slower()
        } else if delta > 0.0 {
            self.speed.faster()
        } else {
            return;
        };
        if speed != self.speed {
            debug!("Speed: {} frames per generation", speed.get());
        }
        self.speed = speed;
    }

    /// Grid cell under the pointer, if the pointer is over the grid.
    pub fn pointer_cell(&self) -> Option<(usize, usize)> {
        let (px, py) = self.pointer;
        if !(px >= 0.0 && py >= 0.0) {
            return None;
        }
        let x = px as usize / self.cell_size as usize;
        let y = py as usize / self.cell_size as usize;
        let (width, height) = self.grid.dimensions();
        (x < width && y < height).then_some((x, y))
    }

    /// Primary paints, secondary erases; primary wins when both are held.
    fn paint(&mut self) {
        let Some((x, y)) = self.pointer_cell() else {
            return;
        };
        if self.primary_down {
            self.grid.set_alive(x, y);
        } else if self.secondary_down {
            self.grid.set_dead(x, y);
        }
    }

    /// Bytes for a save of the chosen state.
    ///
    /// Before the first run there is no snapshot; the previous state is
    /// then an all-dead grid.
    pub fn state_bytes(&self, source: SaveSource) -> Vec<u8> {
        match (source, &self.snapshot) {
            (SaveSource::Current, _) => self.grid.export_bytes(),
            (SaveSource::Previous, Some(snapshot)) => snapshot.export_bytes(),
            (SaveSource::Previous, None) => {
                warn!("No previous run to save; writing an empty grid");
                vec![0; self.grid.len()]
            }
        }
    }

    pub fn save_file(&self, source: SaveSource, path: &Path) -> Result<()> {
        persistence::save_bytes(path, &self.state_bytes(source))
    }

    /// Load a grid file over the current grid. Ignored while running.
    pub fn load_file(&mut self, path: &Path) -> Result<Option<LoadReport>> {
        if self.is_running() {
            warn!("Load requested while running; ignored");
            return Ok(None);
        }
        let report = persistence::load_into(path, &mut self.grid)?;
        self.generation = 0;
        self.last_stats = GenerationStats::default();
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cell, presets};

    fn editor() -> Controller {
        Controller::new(10, 8, 5).with_algorithm(Algorithm::Serial)
    }

    fn point_at(controller: &mut Controller, x: f32, y: f32) {
        controller.handle_event(InputEvent::PointerMoved { x, y });
    }

    #[test]
    fn test_starts_editing_with_minimum_speed() {
        let c = editor();
        assert_eq!(c.mode(), SimulationMode::Editing);
        assert_eq!(c.speed(), Speed::MIN);
        assert!(c.snapshot().is_none());
        assert_eq!(c.grid().count_alive(), 0);
    }

    #[test]
    fn test_speed_floor() {
        assert_eq!(Speed::new(0).get(), 1);
        assert_eq!(Speed::MIN.faster(), Speed::MIN);
        assert_eq!(Speed::new(3).faster().get(), 2);
        assert_eq!(Speed::new(3).slower().get(), 4);
    }

    #[test]
    fn test_wheel_adjusts_speed_and_clamps() {
        let mut c = editor();
        c.handle_event(InputEvent::Wheel(-1.0));
        c.handle_event(InputEvent::Wheel(-1.0));
        assert_eq!(c.speed().get(), 3);

        for _ in 0..10 {
            c.handle_event(InputEvent::Wheel(1.0));
        }
        assert_eq!(c.speed().get(), 1);

        c.handle_event(InputEvent::Wheel(0.0));
        assert_eq!(c.speed().get(), 1);
    }

    #[test]
    fn test_toggle_takes_snapshot_on_start_only() {
        let mut c = editor();
        point_at(&mut c, 7.0, 7.0);
        c.handle_event(InputEvent::PointerDown(PointerButton::Primary));
        c.frame();

        c.handle_event(InputEvent::ToggleRun);
        assert!(c.is_running());
        let first = c.snapshot().cloned().unwrap();
        assert_eq!(first.grid().get(1, 1), Some(Cell::Alive));

        c.handle_event(InputEvent::ToggleRun);
        assert_eq!(c.mode(), SimulationMode::Editing);
        // Pausing keeps the snapshot
        assert_eq!(c.snapshot(), Some(&first));

        c.handle_event(InputEvent::PointerUp(PointerButton::Primary));
        point_at(&mut c, 0.0, 0.0);
        c.handle_event(InputEvent::PointerDown(PointerButton::Primary));
        c.frame();
        c.handle_event(InputEvent::ToggleRun);

        let second = c.snapshot().unwrap();
        assert_ne!(second, &first);
        assert_eq!(second.grid().get(0, 0), Some(Cell::Alive));
    }

    #[test]
    fn test_paint_and_erase_follow_pointer() {
        let mut c = editor();
        c.handle_event(InputEvent::PointerDown(PointerButton::Primary));
        for x in [0.0, 5.0, 10.0, 14.9] {
            point_at(&mut c, x, 12.0);
            c.frame();
        }
        assert_eq!(c.grid().count_alive(), 3);
        assert_eq!(c.grid().get(2, 2), Some(Cell::Alive));

        c.handle_event(InputEvent::PointerUp(PointerButton::Primary));
        c.handle_event(InputEvent::PointerDown(PointerButton::Secondary));
        point_at(&mut c, 6.0, 11.0);
        c.frame();

        assert_eq!(c.grid().get(1, 2), Some(Cell::Dead));
        assert_eq!(c.grid().count_alive(), 2);
    }

    #[test]
    fn test_primary_wins_when_both_held() {
        let mut c = editor();
        point_at(&mut c, 3.0, 3.0);
        c.handle_event(InputEvent::PointerDown(PointerButton::Secondary));
        c.handle_event(InputEvent::PointerDown(PointerButton::Primary));
        c.frame();
        assert_eq!(c.grid().get(0, 0), Some(Cell::Alive));
    }

    #[test]
    fn test_pointer_outside_grid_is_ignored() {
        let mut c = editor();
        c.handle_event(InputEvent::PointerDown(PointerButton::Primary));
        for (x, y) in [(50.0, 0.0), (0.0, 40.0), (-3.0, 2.0), (2.0, -0.5), (500.0, 500.0)] {
            point_at(&mut c, x, y);
            assert_eq!(c.pointer_cell(), None, "({x}, {y})");
            c.frame();
        }
        assert_eq!(c.grid().count_alive(), 0);
        point_at(&mut c, 49.9, 39.9);
        assert_eq!(c.pointer_cell(), Some((9, 7)));
    }

    #[test]
    fn test_no_painting_while_running() {
        let mut c = editor();
        c.handle_event(InputEvent::ToggleRun);
        point_at(&mut c, 12.0, 12.0);
        c.handle_event(InputEvent::PointerDown(PointerButton::Primary));
        c.frame();
        assert_eq!(c.grid().count_alive(), 0);
    }

    #[test]
    fn test_step_gating_is_speed_plus_one_frames() {
        let mut c = editor();
        presets::blinker().place_on(&mut c.grid, 3, 3);
        c.handle_event(InputEvent::ToggleRun);

        // Speed 1: the counter must exceed 1, so frames 3, 5, 7 step
        let stepped: Vec<bool> = (1..=7).map(|_| c.frame().is_some()).collect();
        assert_eq!(stepped, vec![false, false, true, false, true, false, true]);
        assert_eq!(c.generation(), 3);

        c.handle_event(InputEvent::Wheel(-1.0));
        c.handle_event(InputEvent::Wheel(-1.0));
        assert_eq!(c.speed().get(), 3);
        let steps = (0..40).filter(|_| c.frame().is_some()).count();
        assert_eq!(steps, 10);
    }

    #[test]
    fn test_tick_frozen_while_editing() {
        let mut c = editor();
        for _ in 0..5 {
            c.frame();
        }
        assert_eq!(c.tick(), 0);
        assert_eq!(c.generation(), 0);
    }

    #[test]
    fn test_editing_commands_blocked_while_running() {
        let mut c = editor();
        c.grid.set_alive(4, 4);
        c.handle_event(InputEvent::ToggleRun);

        assert_eq!(c.handle_event(InputEvent::Clear), None);
        assert_eq!(c.handle_event(InputEvent::SaveRequest), None);
        assert_eq!(c.handle_event(InputEvent::LoadRequest), None);
        assert_eq!(c.handle_event(InputEvent::HelpRequest), None);
        assert_eq!(c.grid().count_alive(), 1);

        // Quit and speed still work
        assert_eq!(c.handle_event(InputEvent::Quit), Some(Action::Quit));
        c.handle_event(InputEvent::Wheel(-1.0));
        assert_eq!(c.speed().get(), 2);
    }

    #[test]
    fn test_editing_commands_while_editing() {
        let mut c = editor();
        c.grid.set_alive(4, 4);
        assert_eq!(c.handle_event(InputEvent::SaveRequest), Some(Action::Save));
        assert_eq!(c.handle_event(InputEvent::LoadRequest), Some(Action::Load));
        assert_eq!(c.handle_event(InputEvent::HelpRequest), Some(Action::ShowHelp));
        assert_eq!(c.handle_event(InputEvent::Clear), None);
        assert_eq!(c.grid().count_alive(), 0);
    }

    #[test]
    fn test_state_bytes_sources() {
        let mut c = editor();
        c.grid.set_alive(0, 0);
        assert_eq!(c.state_bytes(SaveSource::Previous), vec![0; 80]);

        c.toggle_running();
        c.step();
        c.toggle_running();

        let previous = c.state_bytes(SaveSource::Previous);
        assert_eq!(previous[0], 1);
        // The lone cell died in the step
        assert_eq!(c.state_bytes(SaveSource::Current), vec![0; 80]);
    }

    #[test]
    fn test_randomize_resets_generation_only_while_editing() {
        let mut c = editor();
        c.step();
        c.step();
        assert_eq!(c.generation(), 2);

        assert_eq!(c.handle_event(InputEvent::Randomize), None);
        assert_eq!(c.generation(), 0);
        assert_eq!(c.last_stats(), GenerationStats::default());

        c.handle_event(InputEvent::ToggleRun);
        let before = c.grid().clone();
        c.step();
        let after_step = c.grid().clone();

        assert_eq!(c.handle_event(InputEvent::Randomize), None);

        assert_eq!(c.grid(), &after_step);
        assert_eq!(c.generation(), 1);
        assert_eq!(c.snapshot().map(|s| s.grid()), Some(&before));
    }

    #[test]
    fn test_last_stats_track_latest_generation() {
        let mut c = editor();
        presets::blinker().place_on(&mut c.grid, 3, 3);
        assert_eq!(c.last_stats(), GenerationStats::default());

        let stats = c.step();
        assert_eq!(stats, GenerationStats { births: 2, deaths: 2 });
        assert_eq!(c.last_stats(), stats);

        c.handle_event(InputEvent::Clear);
        assert_eq!(c.last_stats(), GenerationStats::default());
    }

    #[test]
    fn test_clear_resets_generation() {
        let mut c = editor();
        c.step();
        c.step();
        assert_eq!(c.generation(), 2);
        c.handle_event(InputEvent::Clear);
        assert_eq!(c.generation(), 0);
    }
}
