//! Collapsible left sidebar listing the wizard steps with their status.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::events::AreaFocus;
use super::layout::SidebarVisibility;
use super::theme;
use crate::core::wizard::{format_last_saved, is_accessible, step_status, StepStatus, WizardStep};

/// What the sidebar footer shows about saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveIndicator {
    pub last_saved: Option<DateTime<Utc>>,
    pub saving: bool,
}

/// Sidebar navigation state.
pub struct SidebarState {
    /// Whether the user has toggled collapse (Ctrl+B).
    pub user_collapsed: bool,
    /// Currently highlighted item index (into WizardStep::ALL).
    pub selected: usize,
}

impl SidebarState {
    pub fn new() -> Self {
        Self {
            user_collapsed: false,
            selected: 0,
        }
    }

    /// Toggle user collapse preference.
    pub fn toggle_collapse(&mut self) {
        self.user_collapsed = !self.user_collapsed;
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % WizardStep::COUNT;
    }

    /// Move selection up.
    pub fn select_prev(&mut self) {
        if self.selected == 0 {
            self.selected = WizardStep::COUNT - 1;
        } else {
            self.selected -= 1;
        }
    }

    pub fn selected_step(&self) -> WizardStep {
        WizardStep::from_index(self.selected).unwrap_or_default()
    }

    /// Sync selection to the wizard's current step.
    pub fn sync_to_step(&mut self, current: usize) {
        if current < WizardStep::COUNT {
            self.selected = current;
        }
    }

    /// The step to jump to when the highlighted entry is activated, if it is
    /// reachable from `current`.
    pub fn activate(&self, current: usize) -> Option<usize> {
        is_accessible(self.selected, current).then_some(self.selected)
    }

    /// Render the sidebar.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        visibility: SidebarVisibility,
        current: usize,
        save: SaveIndicator,
        area_focus: AreaFocus,
    ) {
        match visibility {
            SidebarVisibility::Hidden => {}
            SidebarVisibility::Collapsed => {
                self.render_collapsed(frame, area, current, area_focus);
            }
            SidebarVisibility::Expanded => {
                self.render_expanded(frame, area, current, save, area_focus);
            }
        }
    }

    fn render_collapsed(&self, frame: &mut Frame, area: Rect, current: usize, area_focus: AreaFocus) {
        let sidebar_focused = area_focus == AreaFocus::Sidebar;
        let mut lines: Vec<Line> = Vec::new();

        for step in WizardStep::ALL {
            if lines.len() >= area.height as usize {
                break;
            }
            let status = step_status(step.index(), current);
            let mut style = status_style(status);
            if sidebar_focused && step.index() == self.selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            lines.push(Line::from(Span::styled(
                format!(" {} {}", status_glyph(status), step.icon()),
                style,
            )));
        }

        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme::BG_SURFACE)),
            area,
        );
    }

    fn render_expanded(
        &self,
        frame: &mut Frame,
        area: Rect,
        current: usize,
        save: SaveIndicator,
        area_focus: AreaFocus,
    ) {
        let sidebar_focused = area_focus == AreaFocus::Sidebar;
        let width = area.width as usize;
        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(" Onboarding", theme::title())),
            Line::from(Span::styled(" Securities setup", theme::muted())),
            Line::raw(""),
        ];

        for step in WizardStep::ALL {
            let status = step_status(step.index(), current);
            let is_selected = sidebar_focused && step.index() == self.selected;

            let prefix = if is_selected { "▸" } else { " " };
            let mut style = status_style(status);
            if is_selected {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }

            let label = format!("{prefix}{} {}", status_glyph(status), step.title());
            lines.push(Line::from(Span::styled(
                format!("{:<width$}", label, width = width),
                style,
            )));
            lines.push(Line::from(Span::styled(
                format!("   {}", step.description()),
                if status == StepStatus::Locked {
                    theme::dim()
                } else {
                    theme::muted()
                },
            )));
        }

        // Footer pinned to the bottom when there is room.
        let footer = save_footer(save, Utc::now());
        let used = lines.len() + footer.len();
        if used < area.height as usize {
            lines.extend((used..area.height as usize).map(|_| Line::raw("")));
        }
        lines.extend(footer);

        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme::BG_SURFACE)),
            area,
        );
    }
}

fn status_glyph(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Completed => "✓",
        StepStatus::Current => "●",
        StepStatus::Locked => "○",
    }
}

fn status_style(status: StepStatus) -> Style {
    match status {
        StepStatus::Completed => Style::default().fg(theme::SUCCESS),
        StepStatus::Current => Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        StepStatus::Locked => theme::dim(),
    }
}

fn save_footer(save: SaveIndicator, now: DateTime<Utc>) -> Vec<Line<'static>> {
    let status = if save.saving {
        Span::styled(" Saving...", Style::default().fg(theme::INFO))
    } else {
        match save.last_saved {
            Some(ts) => Span::styled(format!(" {}", format_last_saved(ts, now)), theme::muted()),
            None => Span::styled(" Not saved yet", theme::dim()),
        }
    };
    vec![Line::from(Span::styled(" Last saved", theme::dim())), Line::from(status)]
}
