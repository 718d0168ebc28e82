//! Root layout computation for sidebar + step header + main content + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Width of the expanded sidebar (step titles and descriptions).
pub const SIDEBAR_EXPANDED_WIDTH: u16 = 28;
/// Width of the collapsed sidebar (status glyph and step icon).
pub const SIDEBAR_COLLAPSED_WIDTH: u16 = 5;
/// Auto-collapse sidebar below this terminal width.
pub const AUTO_COLLAPSE_THRESHOLD: u16 = 80;
/// Hide sidebar entirely below this terminal width.
pub const HIDE_SIDEBAR_THRESHOLD: u16 = 30;
/// Rows used by the step header (title line + progress gauge).
pub const HEADER_HEIGHT: u16 = 2;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Sidebar area (None if hidden).
    pub sidebar: Option<Rect>,
    /// Step title and progress bar, above the main area.
    pub header: Rect,
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

/// Sidebar visibility state derived from terminal width and user preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarVisibility {
    Expanded,
    Collapsed,
    Hidden,
}

impl AppLayout {
    /// Compute layout regions from the terminal area and sidebar state.
    ///
    /// `user_collapsed`: user has toggled collapse with Ctrl+B.
    /// Returns the layout and effective sidebar visibility.
    pub fn compute(area: Rect, user_collapsed: bool) -> (Self, SidebarVisibility) {
        let visibility = if area.width < HIDE_SIDEBAR_THRESHOLD {
            SidebarVisibility::Hidden
        } else if user_collapsed || area.width < AUTO_COLLAPSE_THRESHOLD {
            SidebarVisibility::Collapsed
        } else {
            SidebarVisibility::Expanded
        };

        let rows = Layout::vertical([
            Constraint::Min(1),    // Content (sidebar + step column)
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let content_area = rows[0];
        let status = rows[1];

        let sidebar_width = match visibility {
            SidebarVisibility::Hidden => 0,
            SidebarVisibility::Collapsed => SIDEBAR_COLLAPSED_WIDTH,
            SidebarVisibility::Expanded => SIDEBAR_EXPANDED_WIDTH,
        };

        let (sidebar, column) = if sidebar_width == 0 {
            (None, content_area)
        } else {
            let cols = Layout::horizontal([
                Constraint::Length(sidebar_width),
                Constraint::Min(1),
            ])
            .split(content_area);
            (Some(cols[0]), cols[1])
        };

        let column_rows = Layout::vertical([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(1),
        ])
        .split(column);

        (
            AppLayout {
                sidebar,
                header: column_rows[0],
                main: column_rows[1],
                status,
            },
            visibility,
        )
    }
}
