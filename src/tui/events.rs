/// Events flowing through the Elm-architecture event loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Periodic tick for notification TTLs and save polling.
    Tick,
    /// Raw terminal input (keyboard/mouse).
    Input(crossterm::event::Event),
    /// A resolved action to execute.
    Action(Action),
    /// Notification to display to the user.
    Notification(Notification),
    /// Request to quit the application.
    Quit,
}

/// High-level actions dispatched by the input mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Wizard navigation
    NextStep,
    PreviousStep,
    JumpToStep(usize),

    // Draft
    SaveProgress,
    Submit,

    // Layout
    ToggleFocus,
    ToggleSidebar,

    // Modals
    ShowHelp,
    CloseHelp,

    // Application
    Quit,
}

/// Which screen area receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AreaFocus {
    Sidebar,
    #[default]
    Main,
}

impl AreaFocus {
    pub fn toggle(self) -> Self {
        match self {
            AreaFocus::Sidebar => AreaFocus::Main,
            AreaFocus::Main => AreaFocus::Sidebar,
        }
    }
}

/// Notification level for the overlay system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A timed notification shown in the overlay.
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub level: NotificationLevel,
    /// Ticks remaining before auto-dismiss.
    pub ttl_ticks: u32,
}
