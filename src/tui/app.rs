use std::io;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, LineGauge, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use super::events::{Action, AppEvent, AreaFocus, Notification, NotificationLevel};
use super::layout::AppLayout;
use super::sidebar::{SaveIndicator, SidebarState};
use super::theme;
use super::views::review::{ReviewOutcome, ReviewState};
use super::views::step_editor::{EditorOutcome, StepEditorState};
use crate::core::persistence::{DraftSaver, SaveOutcome};
use crate::core::wizard::{WizardState, WizardStep};

const NOTIFICATION_TTL_TICKS: u32 = 100;
const MAX_NOTIFICATIONS: usize = 3;

/// Central application state (Elm architecture).
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    /// Whether sidebar or main content has input focus.
    pub area_focus: AreaFocus,
    /// Sidebar navigation state.
    pub sidebar: SidebarState,
    /// Current step, draft and save status.
    pub wizard: WizardState,
    /// Field selection and text editing for the six section steps.
    pub editor: StepEditorState,
    /// Card selection on the review step.
    pub review: ReviewState,
    /// Background writer for draft snapshots.
    saver: DraftSaver,
    /// Active notifications (max 3 visible).
    pub notifications: Vec<Notification>,
    /// Monotonic counter for notification IDs.
    notification_counter: u64,
    /// Whether the help modal is open.
    pub show_help: bool,
    /// Receiver for events pushed from outside the input stream.
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl AppState {
    pub fn new(
        wizard: WizardState,
        saver: DraftSaver,
        event_rx: mpsc::UnboundedReceiver<AppEvent>,
    ) -> Self {
        let mut sidebar = SidebarState::new();
        sidebar.sync_to_step(wizard.current_index());
        Self {
            running: true,
            area_focus: AreaFocus::Main,
            sidebar,
            wizard,
            editor: StepEditorState::new(),
            review: ReviewState::new(),
            saver,
            notifications: Vec::new(),
            notification_counter: 0,
            show_help: false,
            event_rx,
        }
    }

    // ── Elm event loop ──────────────────────────────────────────────────

    /// Main event loop: render → select → update → loop.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut tick_interval = tokio::time::interval(tick_rate);
        let mut event_stream = EventStream::new();

        while self.running {
            terminal.draw(|frame| self.render(frame))?;

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.on_tick();
                }
                Some(event) = self.event_rx.recv() => {
                    self.handle_event(event);
                }
                Some(Ok(crossterm_event)) = event_stream.next() => {
                    self.handle_event(AppEvent::Input(crossterm_event));
                }
            }
        }

        self.finish_pending_saves().await;
        Ok(())
    }

    /// Let in-flight saves land before the runtime goes away.
    async fn finish_pending_saves(&mut self) {
        let outcomes = self.saver.flush().await;
        for outcome in outcomes {
            if let SaveOutcome::Failed { error } = &outcome {
                log::warn!("Save pending at exit failed: {error}");
            }
            self.apply_save_outcome(outcome);
        }
    }

    // ── Event handling ──────────────────────────────────────────────────

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(crossterm_event) => {
                // Priority 1: Help modal
                if self.show_help {
                    if let Some(action) = self.map_help_input(&crossterm_event) {
                        self.handle_action(action);
                    }
                    return;
                }

                // Priority 2: Sidebar or step view, whichever has focus
                let consumed = match self.area_focus {
                    AreaFocus::Sidebar => self.handle_sidebar_input(&crossterm_event),
                    AreaFocus::Main => self.dispatch_view_input(&crossterm_event),
                };
                if consumed {
                    return;
                }

                // Priority 3: Global keybindings
                if let Some(action) = self.map_input_to_action(crossterm_event) {
                    self.handle_action(action);
                }
            }
            AppEvent::Action(action) => self.handle_action(action),
            AppEvent::Tick => self.on_tick(),
            AppEvent::Notification(notification) => {
                self.push_notification(notification.message, notification.level);
            }
            AppEvent::Quit => {
                self.running = false;
            }
        }
    }

    /// Dispatch input to the current step's view. Returns true if consumed.
    fn dispatch_view_input(&mut self, event: &Event) -> bool {
        let draft = self.wizard.draft();
        let outcome = match self.wizard.current_step() {
            WizardStep::Issuer => self.editor.handle_input(event, &draft.issuer),
            WizardStep::Issue => self.editor.handle_input(event, &draft.issue),
            WizardStep::Conversion => self.editor.handle_input(event, &draft.conversion),
            WizardStep::Warrant => self.editor.handle_input(event, &draft.warrant),
            WizardStep::Listing => self.editor.handle_input(event, &draft.listing),
            WizardStep::IssuerAdmin => self.editor.handle_input(event, &draft.issuer_admin),
            WizardStep::Review => {
                return match self.review.handle_input(event, draft) {
                    ReviewOutcome::Ignored => false,
                    ReviewOutcome::Consumed => true,
                    ReviewOutcome::Edit(step) => {
                        self.handle_action(Action::JumpToStep(step.index()));
                        true
                    }
                };
            }
        };

        match outcome {
            EditorOutcome::Ignored => false,
            EditorOutcome::Consumed => true,
            EditorOutcome::Changed(data) => {
                self.wizard.update_section(data);
                true
            }
        }
    }

    /// Handle sidebar-specific input. Returns true if consumed.
    fn handle_sidebar_input(&mut self, event: &Event) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j')) | (KeyModifiers::NONE, KeyCode::Down) => {
                self.sidebar.select_next();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k')) | (KeyModifiers::NONE, KeyCode::Up) => {
                self.sidebar.select_prev();
                true
            }
            (KeyModifiers::NONE, KeyCode::Enter) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
                match self.sidebar.activate(self.wizard.current_index()) {
                    Some(index) => {
                        self.handle_action(Action::JumpToStep(index));
                        self.area_focus = AreaFocus::Main;
                    }
                    None => log::debug!(
                        "Step {} is locked; ignoring sidebar jump",
                        self.sidebar.selected_step()
                    ),
                }
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('h')) => {
                self.sidebar.user_collapsed = true;
                self.area_focus = AreaFocus::Main;
                true
            }
            (KeyModifiers::NONE, KeyCode::Esc) => {
                self.area_focus = AreaFocus::Main;
                true
            }
            _ => false,
        }
    }

    // ── Input mapping ───────────────────────────────────────────────────

    /// Map help modal input to action.
    fn map_help_input(&self, event: &Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Action::CloseHelp),
            _ => None,
        }
    }

    fn map_input_to_action(&self, event: Event) -> Option<Action> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return None;
        };

        match (modifiers, code) {
            (KeyModifiers::CONTROL, KeyCode::Char('n')) => Some(Action::NextStep),
            (KeyModifiers::CONTROL, KeyCode::Char('p')) => Some(Action::PreviousStep),
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => Some(Action::SaveProgress),
            (KeyModifiers::CONTROL, KeyCode::Char('x') | KeyCode::Enter) => Some(Action::Submit),
            (KeyModifiers::CONTROL, KeyCode::Char('b')) => Some(Action::ToggleSidebar),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Action::Quit),
            (_, KeyCode::PageDown) => Some(Action::NextStep),
            (_, KeyCode::PageUp) => Some(Action::PreviousStep),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, _) => match code {
                KeyCode::Char('q') => Some(Action::Quit),
                KeyCode::Char('?') => Some(Action::ShowHelp),
                KeyCode::Tab | KeyCode::BackTab => Some(Action::ToggleFocus),
                _ => None,
            },
            _ => None,
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::NextStep => {
                if let Some(request) = self.wizard.next() {
                    self.saver.spawn(request);
                    self.on_step_changed();
                }
            }
            Action::PreviousStep => {
                if self.wizard.previous() {
                    self.on_step_changed();
                }
            }
            Action::JumpToStep(index) => {
                if self.wizard.jump_to(index) {
                    self.on_step_changed();
                }
            }
            Action::SaveProgress => {
                if self.wizard.is_saving() {
                    log::debug!("Save already in flight; ignoring save request");
                    return;
                }
                let request = self.wizard.begin_save();
                self.saver.spawn(request);
            }
            Action::Submit => match self.wizard.submit() {
                Some(request) => {
                    self.saver.spawn(request);
                    self.push_notification(
                        "Form submitted successfully!".to_string(),
                        NotificationLevel::Success,
                    );
                }
                None => self.push_notification(
                    format!("Submit from the {} step", WizardStep::Review.title()),
                    NotificationLevel::Info,
                ),
            },
            Action::ToggleFocus => {
                self.editor.stop_editing();
                self.area_focus = self.area_focus.toggle();
                if self.area_focus == AreaFocus::Sidebar {
                    self.sidebar.sync_to_step(self.wizard.current_index());
                }
            }
            Action::ToggleSidebar => {
                self.sidebar.toggle_collapse();
            }
            Action::ShowHelp => {
                self.show_help = true;
            }
            Action::CloseHelp => {
                self.show_help = false;
            }
        }
    }

    /// Fresh view state for the new step.
    fn on_step_changed(&mut self) {
        self.editor.reset();
        self.review.reset();
        self.sidebar.sync_to_step(self.wizard.current_index());
        log::debug!("Now on step {}", self.wizard.current_step());
    }

    // ── Notifications ───────────────────────────────────────────────────

    /// Push a notification (dedup by message, max 3).
    pub fn push_notification(&mut self, message: String, level: NotificationLevel) {
        if self.notifications.iter().any(|n| n.message == message) {
            return;
        }

        self.notification_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_counter,
            message,
            level,
            ttl_ticks: NOTIFICATION_TTL_TICKS,
        });

        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.remove(0);
        }
    }

    /// Tick: decrement notification TTLs, dismiss expired, collect finished saves.
    fn on_tick(&mut self) {
        for n in &mut self.notifications {
            n.ttl_ticks = n.ttl_ticks.saturating_sub(1);
        }
        self.notifications.retain(|n| n.ttl_ticks > 0);

        for outcome in self.saver.poll() {
            self.apply_save_outcome(outcome);
        }
    }

    fn apply_save_outcome(&mut self, outcome: SaveOutcome) {
        match outcome {
            SaveOutcome::Saved { timestamp, .. } => {
                self.wizard.complete_save(timestamp);
                self.push_notification(
                    "Progress saved successfully".to_string(),
                    NotificationLevel::Success,
                );
            }
            SaveOutcome::Failed { error } => {
                self.wizard.fail_save();
                self.push_notification(
                    format!("Could not save progress: {error}"),
                    NotificationLevel::Warning,
                );
            }
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let (layout, visibility) = AppLayout::compute(area, self.sidebar.user_collapsed);

        if let Some(sidebar_area) = layout.sidebar {
            self.sidebar.render(
                frame,
                sidebar_area,
                visibility,
                self.wizard.current_index(),
                SaveIndicator {
                    last_saved: self.wizard.last_saved(),
                    saving: self.wizard.is_saving(),
                },
                self.area_focus,
            );
        }

        self.render_header(frame, layout.header);
        self.render_content(frame, layout.main);
        self.render_status_bar(frame, layout.status);

        // Overlays
        self.render_notifications(frame, area);

        if self.show_help {
            self.render_help_modal(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let [title_row, gauge_row] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

        let step = self.wizard.current_step();
        let save_label = if self.wizard.is_saving() {
            Span::styled("  Saving...", Style::default().fg(theme::INFO))
        } else {
            Span::raw("")
        };
        let title = Line::from(vec![
            Span::styled(" Corporate Securities Onboarding", theme::title()),
            Span::styled(
                format!(
                    "  Step {} of {} · {}",
                    step.index() + 1,
                    WizardStep::COUNT,
                    step.title()
                ),
                theme::muted(),
            ),
            save_label,
        ]);
        frame.render_widget(Paragraph::new(title), title_row);

        let percent = self.wizard.progress_percent();
        let gauge = LineGauge::default()
            .filled_style(Style::default().fg(theme::PRIMARY))
            .unfilled_style(theme::dim())
            .label(format!(" {percent:>3}%"))
            .ratio(f64::from(percent) / 100.0);
        frame.render_widget(gauge, gauge_row);
    }

    fn render_content(&self, frame: &mut Frame, area: Rect) {
        let focused = self.area_focus == AreaFocus::Main;
        let draft = self.wizard.draft();
        let step = self.wizard.current_step();
        match step {
            WizardStep::Issuer => self.editor.render(frame, area, &draft.issuer, step, focused),
            WizardStep::Issue => self.editor.render(frame, area, &draft.issue, step, focused),
            WizardStep::Conversion => {
                self.editor.render(frame, area, &draft.conversion, step, focused)
            }
            WizardStep::Warrant => self.editor.render(frame, area, &draft.warrant, step, focused),
            WizardStep::Listing => self.editor.render(frame, area, &draft.listing, step, focused),
            WizardStep::IssuerAdmin => {
                self.editor.render(frame, area, &draft.issuer_admin, step, focused)
            }
            WizardStep::Review => self.review.render(frame, area, draft, focused),
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mode_indicator = if self.editor.is_editing() {
            Span::styled(" EDIT ", theme::edit_badge())
        } else {
            Span::raw("")
        };

        let save_status = if self.wizard.is_saving() {
            Span::styled("saving", Style::default().fg(theme::INFO))
        } else if self.wizard.last_saved().is_some() {
            Span::styled("saved", Style::default().fg(theme::SUCCESS))
        } else {
            Span::styled("unsaved", theme::muted())
        };

        let (forward_key, forward_label) = if self.wizard.is_last_step() {
            ("Ctrl+X", ":submit ")
        } else {
            ("Ctrl+N", ":continue ")
        };

        let status = Line::from(vec![
            Span::styled(" SECONBOARD ", theme::brand_badge()),
            Span::raw(" "),
            mode_indicator,
            Span::raw(" "),
            Span::styled(
                self.wizard.current_step().title(),
                Style::default()
                    .fg(theme::PRIMARY_LIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" │ "),
            Span::styled("Draft:", theme::key_hint()),
            Span::raw(" "),
            save_status,
            Span::raw(" │ "),
            Span::styled(forward_key, theme::key_hint()),
            Span::raw(forward_label),
            Span::styled("Ctrl+P", theme::key_hint()),
            Span::raw(":back "),
            Span::styled("Ctrl+S", theme::key_hint()),
            Span::raw(":save "),
            Span::styled("Tab", theme::key_hint()),
            Span::raw(":steps "),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect) {
        if self.notifications.is_empty() {
            return;
        }

        let max_width = 56.min(area.width.saturating_sub(2));
        let height = (self.notifications.len() as u16).min(area.height);
        let x = area.width.saturating_sub(max_width + 1);
        let y = 1.min(area.height.saturating_sub(height));

        let notification_area = Rect::new(x, y, max_width, height);

        let lines: Vec<Line> = self
            .notifications
            .iter()
            .map(|n| {
                let (prefix, color) = match n.level {
                    NotificationLevel::Info => ("ℹ", theme::INFO),
                    NotificationLevel::Success => ("✓", theme::SUCCESS),
                    NotificationLevel::Warning => ("⚠", theme::WARNING),
                    NotificationLevel::Error => ("✗", theme::ERROR),
                };
                Line::from(vec![
                    Span::styled(
                        format!(" {prefix} "),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(n.message.as_str()),
                ])
            })
            .collect();

        frame.render_widget(Clear, notification_area);
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(theme::BG_SURFACE)),
            notification_area,
        );
    }

    fn render_help_modal(&self, frame: &mut Frame, area: Rect) {
        let modal = centered_rect(60, 80, area);

        let keybindings = [
            ("Global:", ""),
            ("Ctrl+N / PageDown", "Continue to the next step (saves)"),
            ("Ctrl+P / PageUp", "Back to the previous step"),
            ("Ctrl+S", "Save progress"),
            ("Ctrl+X / Ctrl+Enter", "Submit (Review & Submit step)"),
            ("Tab", "Switch between steps list and form"),
            ("Ctrl+B", "Toggle sidebar collapse/expand"),
            ("?", "Toggle this help"),
            ("q / Ctrl+C", "Quit"),
            ("", ""),
            ("Steps list (when focused):", ""),
            ("j/k", "Navigate up/down"),
            ("Enter / l", "Go to step (completed or current)"),
            ("h", "Collapse sidebar"),
            ("Esc", "Focus the form"),
            ("", ""),
            ("Form:", ""),
            ("j/k / arrows", "Move between fields"),
            ("Enter", "Edit text / toggle / next option"),
            ("←/→", "Previous / next option"),
            ("1-9", "Toggle a payment method"),
            ("Esc", "Finish editing"),
            ("", ""),
            ("Review:", ""),
            ("j/k", "Select section"),
            ("Enter / e", "Edit the selected section"),
        ];

        let mut lines = vec![
            Line::raw(""),
            Line::from(Span::styled(" Keybindings", theme::title())),
            Line::raw(""),
        ];

        for (key, desc) in &keybindings {
            if key.is_empty() {
                lines.push(Line::raw(""));
            } else if desc.is_empty() {
                lines.push(Line::from(Span::styled(format!("  {key}"), theme::title())));
            } else {
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(
                        format!("{:<24}", key),
                        Style::default()
                            .fg(theme::PRIMARY_LIGHT)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(*desc),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Press Esc or ? to close",
            theme::dim(),
        )));

        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(theme::border_focused());

        frame.render_widget(Clear, modal);
        frame.render_widget(Paragraph::new(lines).block(block), modal);
    }
}

/// Create a centered rect using percentage of the available area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
