/// Pointer buttons the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Paints cells alive
    Primary,
    /// Erases cells
    Secondary,
}

/// Discrete input drained from the platform once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Quit,
    ToggleRun,
    Clear,
    Randomize,
    SaveRequest,
    LoadRequest,
    HelpRequest,
    PointerDown(PointerButton),
    PointerUp(PointerButton),
    /// Pointer position in window pixels
    PointerMoved { x: f32, y: f32 },
    /// Vertical wheel delta; negative scrolls down
    Wheel(f32),
}

/// Work the controller hands back to the frame loop because it needs a
/// collaborator (dialogs, the file system, or the loop itself).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    Save,
    Load,
    ShowHelp,
}
