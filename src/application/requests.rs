use log::{debug, error, info};

use super::{Action, Controller};
use crate::persistence::{Dialogs, LoadReport};

pub const HELP_TEXT: &str = "F1 - Pause/start the simulation\n\
F2 - Clear the entire screen\n\
F3 - Save simulation to a file\n\
F4 - Load simulation from a file\n\
F5 - Show this help\n\
R - Fill the grid at random\n\
\n\
Left Mouse - Draw cell\n\
Right Mouse - Remove cell\n\
\n\
Scroll Wheel Up - Increase simulation speed\n\
Scroll Wheel Down - Decrease simulation speed";

/// Whether the frame loop keeps going after an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Carry out an action that needs dialogs or the file system.
///
/// Cancelled prompts drop the action silently. Save and load failures are
/// logged and shown to the user; the simulation state is left as it was.
pub fn perform(action: Action, controller: &mut Controller, dialogs: &mut dyn Dialogs) -> Flow {
    match action {
        Action::Quit => {
            info!("Quit requested");
            return Flow::Quit;
        }
        Action::Save => save(controller, dialogs),
        Action::Load => load(controller, dialogs),
        Action::ShowHelp => dialogs.show_message("Help", HELP_TEXT),
    }
    Flow::Continue
}

fn save(controller: &Controller, dialogs: &mut dyn Dialogs) {
    let Some(source) = dialogs.choose_save_source() else {
        debug!("Save cancelled");
        return;
    };
    let Some(path) = dialogs.save_path() else {
        debug!("Save cancelled");
        return;
    };
    if let Err(e) = controller.save_file(source, &path) {
        error!("Failed to save {}: {e}", path.display());
        dialogs.show_message("Save failed", &format!("Could not save {}:\n{e}", path.display()));
    }
}

fn load(controller: &mut Controller, dialogs: &mut dyn Dialogs) {
    let Some(path) = dialogs.open_path() else {
        debug!("Load cancelled");
        return;
    };
    match controller.load_file(&path) {
        Ok(Some(LoadReport::Partial { applied, expected })) => {
            debug!("Partial load: {applied}/{expected} cells from {}", path.display());
        }
        Ok(_) => {}
        Err(e) => {
            error!("Failed to load {}: {e}", path.display());
            dialogs.show_message("Load failed", &format!("Could not load {}:\n{e}", path.display()));
        }
    }
}
