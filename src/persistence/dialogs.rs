use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

use super::{FILE_EXTENSION, SaveSource};

const FILTER_NAME: &str = "Game of Life Simulation";
const DEFAULT_FILE_NAME: &str = "Simulation.gol";

/// User-facing prompts needed by save, load and help.
///
/// Every prompt may be cancelled; `None` means the user backed out and the
/// pending operation is dropped without an error.
pub trait Dialogs {
    /// Ask whether to save the previous or the current state.
    fn choose_save_source(&mut self) -> Option<SaveSource>;

    fn save_path(&mut self) -> Option<PathBuf>;

    fn open_path(&mut self) -> Option<PathBuf>;

    /// Informational message. Display failures are not reported.
    fn show_message(&mut self, title: &str, body: &str);
}

/// Native dialogs through `rfd`. Calls block the frame loop until closed.
#[derive(Debug, Default)]
pub struct RfdDialogs;

impl Dialogs for RfdDialogs {
    fn choose_save_source(&mut self) -> Option<SaveSource> {
        let result = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title("Saving")
            .set_description("Would you like to save the current or previous state?")
            .set_buttons(MessageButtons::OkCancelCustom(
                "Current".to_owned(),
                "Previous".to_owned(),
            ))
            .show();

        match result {
            MessageDialogResult::Custom(label) if label == "Current" => Some(SaveSource::Current),
            MessageDialogResult::Custom(label) if label == "Previous" => Some(SaveSource::Previous),
            MessageDialogResult::Ok => Some(SaveSource::Current),
            _ => None,
        }
    }

    fn save_path(&mut self) -> Option<PathBuf> {
        FileDialog::new()
            .add_filter(FILTER_NAME, &[FILE_EXTENSION])
            .set_file_name(DEFAULT_FILE_NAME)
            .save_file()
    }

    fn open_path(&mut self) -> Option<PathBuf> {
        FileDialog::new()
            .add_filter(FILTER_NAME, &[FILE_EXTENSION])
            .pick_file()
    }

    fn show_message(&mut self, title: &str, body: &str) {
        MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(body)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}
