use log::{error, info};
use macroquad::prelude::*;
use life_editor::{
    Config, Controller,
    application::{Flow, perform},
    persistence::RfdDialogs,
    rendering, input,
};

fn window_conf(config: &Config) -> Conf {
    let (width, height) = config.window_size();
    Conf {
        window_title: config.display.window_title.clone(),
        window_width: width as i32,
        window_height: height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

fn init_logging(config: &Config) {
    let filter = config.log_filter.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}

async fn run(config: Config) {
    // Window close arrives as a Quit event instead of ending the process
    prevent_quit();

    let mut controller = Controller::from_config(&config);
    let mut dialogs = RfdDialogs;
    let cell_size = config.display.cell_size as f32;

    'frames: loop {
        for event in input::poll_events() {
            let Some(action) = controller.handle_event(event) else {
                continue;
            };
            if perform(action, &mut controller, &mut dialogs) == Flow::Quit {
                break 'frames;
            }
        }

        controller.frame();

        rendering::draw_grid(controller.grid(), cell_size);
        rendering::draw_status(&controller);

        next_frame().await;
    }

    info!("Exiting at generation {}", controller.generation());
}

fn main() {
    let path = Config::default_path();
    let loaded = Config::load(&path);
    let config = loaded.as_ref().cloned().unwrap_or_default();

    init_logging(&config);
    match &loaded {
        Ok(_) => info!(
            "Grid {}x{}, {} px cells, {} classifier",
            config.grid.width,
            config.grid.height,
            config.display.cell_size,
            config.simulation.algorithm.name()
        ),
        Err(e) => error!("Ignoring {}: {e}; using defaults", path.display()),
    }

    macroquad::Window::from_config(window_conf(&config), run(config));
}
