use macroquad::prelude::*;

use crate::application::Controller;
use crate::domain::Grid;

const ALIVE_COLOR: Color = WHITE;
const STATUS_COLOR: Color = Color::new(0.0, 1.0, 0.6, 1.0);

/// Draw every live cell as a `cell_size` square on a black background
pub fn draw_grid(grid: &Grid, cell_size: f32) {
    clear_background(BLACK);

    grid.iter_cells()
        .filter(|(_, _, cell)| cell.is_alive())
        .for_each(|(x, y, _)| {
            draw_rectangle(
                x as f32 * cell_size,
                y as f32 * cell_size,
                cell_size,
                cell_size,
                ALIVE_COLOR,
            );
        });
}

/// One-line status in the top-left corner
pub fn draw_status(controller: &Controller) {
    let mode = if controller.is_running() { "Running" } else { "Editing" };
    let stats = controller.last_stats();
    let status = format!(
        "{} | Gen {} | Cells {} (+{} -{}) | {} frames/gen | {}",
        mode,
        controller.generation(),
        controller.grid().count_alive(),
        stats.births,
        stats.deaths,
        controller.speed().get(),
        controller.algorithm().name(),
    );
    draw_text(&status, 8.0, 18.0, 18.0, STATUS_COLOR);
}
