//! Centralized Blue & Indigo color theme for the onboarding TUI.
//!
//! All color constants are RGB truecolor. Views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Primary palette ─────────────────────────────────────────────────────────

/// Blue: focused borders, current step, progress fill.
pub const PRIMARY: Color = Color::Rgb(0x25, 0x63, 0xEB);
/// Light blue: edit cursor, secondary focus.
pub const PRIMARY_LIGHT: Color = Color::Rgb(0x60, 0xA5, 0xFA);

// ── Accent ──────────────────────────────────────────────────────────────────

/// Indigo: titles, selected rows, calls to action.
pub const ACCENT: Color = Color::Rgb(0x81, 0x8C, 0xF8);

// ── Backgrounds ─────────────────────────────────────────────────────────────

/// Slate: base background.
pub const BG_BASE: Color = Color::Rgb(0x0F, 0x17, 0x2A);
/// Surface: elevated panels, sidebar.
pub const BG_SURFACE: Color = Color::Rgb(0x1E, 0x29, 0x3B);

// ── Text ────────────────────────────────────────────────────────────────────

/// Primary text.
pub const TEXT: Color = Color::Rgb(0xE2, 0xE8, 0xF0);
/// Muted text: secondary labels, descriptions.
pub const TEXT_MUTED: Color = Color::Rgb(0x94, 0xA3, 0xB8);
/// Dim text: locked steps, empty values.
pub const TEXT_DIM: Color = Color::Rgb(0x47, 0x55, 0x69);

// ── Semantic ────────────────────────────────────────────────────────────────

/// Error: failures.
pub const ERROR: Color = Color::Rgb(0xEF, 0x44, 0x44);
/// Success: completed steps, confirmations, set flags.
pub const SUCCESS: Color = Color::Rgb(0x22, 0xC5, 0x5E);
/// Warning: manual processing notices, partial compliance.
pub const WARNING: Color = Color::Rgb(0xF5, 0x9E, 0x0B);
/// Info: informational highlights.
pub const INFO: Color = Color::Rgb(0x38, 0xBD, 0xF8);

// ── Style helpers ───────────────────────────────────────────────────────────

/// Accent-colored bold text (titles, active items).
pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Section header style.
pub fn heading() -> Style {
    Style::default().fg(PRIMARY_LIGHT).add_modifier(Modifier::BOLD)
}

/// Focused border style.
pub fn border_focused() -> Style {
    Style::default().fg(PRIMARY)
}

/// Unfocused border style.
pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Highlighted/selected item.
pub fn highlight() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Muted label text.
pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

/// Dim text for locked/empty items.
pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Key hint style (e.g., "[q]:quit").
pub fn key_hint() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Flag badge on the review screen.
pub fn badge() -> Style {
    Style::default().fg(BG_BASE).bg(PRIMARY_LIGHT)
}

/// Status bar brand badge.
pub fn brand_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Edit mode badge.
pub fn edit_badge() -> Style {
    Style::default()
        .fg(BG_BASE)
        .bg(PRIMARY_LIGHT)
        .add_modifier(Modifier::BOLD)
}

// ── Block builders ──────────────────────────────────────────────────────────

/// A bordered block with focused styling.
pub fn block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_focused())
}

/// A bordered block with default (unfocused) styling.
pub fn block_default(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border_default())
}

/// Pick the focused or default block.
pub fn block(title: &str, focused: bool) -> Block<'_> {
    if focused {
        block_focused(title)
    } else {
        block_default(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_is_blue() {
        assert_eq!(PRIMARY, Color::Rgb(0x25, 0x63, 0xEB));
    }

    #[test]
    fn test_style_helpers_return_non_default() {
        assert_ne!(title(), Style::default());
        assert_ne!(heading(), Style::default());
        assert_ne!(highlight(), Style::default());
        assert_ne!(muted(), Style::default());
        assert_ne!(badge(), Style::default());
    }

    #[test]
    fn test_focused_and_default_borders_differ() {
        assert_ne!(border_focused(), border_default());
    }
}
