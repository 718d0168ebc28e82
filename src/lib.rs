/// SecOnboard - Corporate Securities Onboarding (TUI Edition)
///
/// Core library holding the onboarding draft model, the step state machine,
/// local draft persistence and the review summary, plus the terminal UI.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
