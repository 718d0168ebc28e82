//! Section editor: one form per draft section, driven by the section's field
//! table.
//!
//! The editor never owns section data. Each key is handled against the
//! section borrowed from the draft, and any change comes back as a whole
//! replacement section ([`EditorOutcome::Changed`]) for the caller to apply.
//! Hidden fields are skipped entirely: the field list is re-derived from the
//! section on every call.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::draft::fields::{has_token, split_tokens, toggle_token};
use crate::core::draft::{Choice, FieldKind, FieldSpec, FieldValue, SectionData, SectionRecord};
use crate::core::wizard::WizardStep;
use crate::tui::theme;
use crate::tui::widgets::{BufferEdit, InputBuffer};

const LABEL_WIDTH: usize = 34;

/// Result of handing a key to the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorOutcome {
    /// Not an editor key; the caller may treat it as a global key.
    Ignored,
    /// Handled without changing the section.
    Consumed,
    /// The section was replaced.
    Changed(SectionData),
}

#[derive(Debug, Default)]
pub struct StepEditorState {
    /// Index into the section's visible fields.
    selected: usize,
    /// Text buffer while a textual field is being edited.
    editing: Option<InputBuffer>,
}

impl StepEditorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the first field, not editing. Called on every step change.
    pub fn reset(&mut self) {
        self.selected = 0;
        self.editing = None;
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn stop_editing(&mut self) {
        self.editing = None;
    }

    /// Key of the highlighted field.
    pub fn selected_key<S: SectionRecord>(&self, section: &S) -> Option<&'static str> {
        let fields = section.visible_fields();
        fields
            .get(self.selected.min(fields.len().saturating_sub(1)))
            .map(|f| f.key)
    }

    // ── Input ────────────────────────────────────────────────────────────

    pub fn handle_input<S: SectionRecord>(&mut self, event: &Event, section: &S) -> EditorOutcome {
        let Event::Key(key) = event else {
            return EditorOutcome::Ignored;
        };
        if key.kind != KeyEventKind::Press {
            return EditorOutcome::Ignored;
        }

        let fields = section.visible_fields();
        if fields.is_empty() {
            return EditorOutcome::Ignored;
        }
        self.selected = self.selected.min(fields.len() - 1);
        let field_spec = fields[self.selected];

        if self.editing.is_some() {
            return self.handle_editing_key(key, section, field_spec);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Down | KeyCode::Char('j')) => {
                self.selected = (self.selected + 1).min(fields.len() - 1);
                EditorOutcome::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Up | KeyCode::Char('k')) => {
                self.selected = self.selected.saturating_sub(1);
                EditorOutcome::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Home | KeyCode::Char('g')) => {
                self.selected = 0;
                EditorOutcome::Consumed
            }
            (_, KeyCode::End | KeyCode::Char('G')) => {
                self.selected = fields.len() - 1;
                EditorOutcome::Consumed
            }
            (KeyModifiers::NONE, KeyCode::Enter | KeyCode::Char(' ')) => self.activate(section, field_spec),
            (KeyModifiers::NONE, KeyCode::Right | KeyCode::Char('l')) => match field_spec.kind {
                FieldKind::Choice(options) => {
                    let next = cycle(options, &text_of(section, field_spec.key), true);
                    self.apply(section, field_spec, FieldValue::Text(next))
                }
                _ => EditorOutcome::Ignored,
            },
            (KeyModifiers::NONE, KeyCode::Left | KeyCode::Char('h')) => match field_spec.kind {
                FieldKind::Choice(options) => {
                    let prev = cycle(options, &text_of(section, field_spec.key), false);
                    self.apply(section, field_spec, FieldValue::Text(prev))
                }
                _ => EditorOutcome::Ignored,
            },
            (KeyModifiers::NONE, KeyCode::Char(c)) if c.is_ascii_digit() => match field_spec.kind {
                FieldKind::MultiChoice(options) => {
                    let n = c.to_digit(10).unwrap_or(0) as usize;
                    match n.checked_sub(1).and_then(|i| options.get(i)) {
                        Some(option) => {
                            let joined = toggle_token(&text_of(section, field_spec.key), option.value);
                            self.apply(section, field_spec, FieldValue::Text(joined))
                        }
                        None => EditorOutcome::Consumed,
                    }
                }
                _ => EditorOutcome::Ignored,
            },
            _ => EditorOutcome::Ignored,
        }
    }

    fn handle_editing_key<S: SectionRecord>(
        &mut self,
        key: &KeyEvent,
        section: &S,
        field_spec: &'static FieldSpec,
    ) -> EditorOutcome {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.editing = None;
                return EditorOutcome::Consumed;
            }
            KeyCode::Up | KeyCode::Down => {
                self.editing = None;
                return self.handle_input(&Event::Key(*key), section);
            }
            _ => {}
        }

        let Some(buffer) = self.editing.as_mut() else {
            return EditorOutcome::Ignored;
        };
        match buffer.handle_key(key, field_spec.kind == FieldKind::Upper) {
            BufferEdit::Changed => {
                let text = buffer.text().to_string();
                self.apply(section, field_spec, FieldValue::Text(text))
            }
            BufferEdit::Moved => EditorOutcome::Consumed,
            BufferEdit::Ignored => EditorOutcome::Ignored,
        }
    }

    fn activate<S: SectionRecord>(&mut self, section: &S, field_spec: &'static FieldSpec) -> EditorOutcome {
        match field_spec.kind {
            FieldKind::Text | FieldKind::Upper | FieldKind::Date => {
                self.editing = Some(InputBuffer::from_text(&text_of(section, field_spec.key)));
                EditorOutcome::Consumed
            }
            FieldKind::Toggle => {
                let flag = flag_of(section, field_spec.key);
                self.apply(section, field_spec, FieldValue::Flag(!flag))
            }
            FieldKind::Choice(options) => {
                let next = cycle(options, &text_of(section, field_spec.key), true);
                self.apply(section, field_spec, FieldValue::Text(next))
            }
            FieldKind::MultiChoice(_) => EditorOutcome::Consumed,
        }
    }

    fn apply<S: SectionRecord>(
        &mut self,
        section: &S,
        field_spec: &'static FieldSpec,
        value: FieldValue,
    ) -> EditorOutcome {
        match section.with_field(field_spec.key, value) {
            Ok(updated) => {
                // Revealed or hidden fields shift positions; stay on this one.
                if let Some(i) = updated.visible_fields().iter().position(|f| f.key == field_spec.key) {
                    self.selected = i;
                }
                EditorOutcome::Changed(updated.into_data())
            }
            Err(e) => {
                log::error!("Failed to update {} field {}: {}", S::SECTION, field_spec.key, e);
                EditorOutcome::Consumed
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────────────

    pub fn render<S: SectionRecord>(
        &self,
        frame: &mut Frame,
        area: Rect,
        section: &S,
        step: WizardStep,
        focused: bool,
    ) {
        let title = format!("{} {}", step.icon(), step.title());
        let block = theme::block(&title, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [body, hint] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let (lines, selected_line) = self.build_lines(section, step);
        let height = body.height as usize;
        let scroll = if height > 0 && selected_line >= height {
            selected_line + 1 - height
        } else {
            0
        };
        frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), body);

        let kind = self
            .selected_key(section)
            .and_then(|key| S::fields().iter().find(|f| f.key == key))
            .map(|f| f.kind);
        frame.render_widget(Paragraph::new(self.hint_line(kind)), hint);
    }

    /// Form lines plus the index of the highlighted field's line.
    pub fn build_lines<S: SectionRecord>(&self, section: &S, step: WizardStep) -> (Vec<Line<'static>>, usize) {
        let fields = section.visible_fields();
        let selected = self.selected.min(fields.len().saturating_sub(1));
        let mut lines = vec![Line::from(Span::styled(
            format!("  {}", step.description()),
            theme::muted(),
        ))];
        let mut selected_line = 0;
        let mut group = "";

        for (i, field_spec) in fields.iter().enumerate() {
            if field_spec.group != group {
                group = field_spec.group;
                lines.extend(group_header(group));
            }
            let is_selected = i == selected;
            if is_selected {
                selected_line = lines.len();
            }
            lines.push(self.field_row(section, field_spec, is_selected));

            if let FieldKind::MultiChoice(options) = field_spec.kind {
                let joined = text_of(section, field_spec.key);
                for (n, option) in options.iter().enumerate() {
                    let checked = has_token(&joined, option.value);
                    lines.push(Line::from(vec![
                        Span::raw("      "),
                        Span::styled(format!("{} ", n + 1), theme::key_hint()),
                        checkbox(checked),
                        Span::raw(format!(" {}", option.label)),
                    ]));
                }
            }
        }

        let summary = section.summary();
        if !summary.is_empty() {
            lines.extend(group_header("Summary"));
            for line in summary {
                lines.push(Line::from(Span::styled(
                    format!("  • {line}"),
                    Style::default().fg(theme::INFO),
                )));
            }
        }

        (lines, selected_line)
    }

    fn field_row<S: SectionRecord>(&self, section: &S, field_spec: &FieldSpec, selected: bool) -> Line<'static> {
        let (marker, label_style) = if selected {
            ("▸ ", theme::highlight())
        } else {
            ("  ", Style::default().fg(theme::TEXT))
        };
        let mut spans = vec![
            Span::styled(marker, theme::highlight()),
            Span::styled(format!("{:<LABEL_WIDTH$}", field_spec.label), label_style),
        ];

        match field_spec.kind {
            FieldKind::Text | FieldKind::Upper | FieldKind::Date => match &self.editing {
                Some(buffer) if selected => {
                    let (before, after) = buffer.split_at_cursor();
                    let mut rest = after.chars();
                    let caret = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
                    spans.push(Span::raw(before.to_string()));
                    spans.push(Span::styled(
                        caret,
                        Style::default()
                            .fg(theme::BG_BASE)
                            .bg(theme::PRIMARY_LIGHT),
                    ));
                    spans.push(Span::raw(rest.as_str().to_string()));
                }
                _ => {
                    let text = text_of(section, field_spec.key);
                    if text.is_empty() {
                        let placeholder = if field_spec.kind == FieldKind::Date {
                            "YYYY-MM-DD"
                        } else {
                            "(empty)"
                        };
                        spans.push(Span::styled(placeholder, theme::dim()));
                    } else {
                        spans.push(Span::raw(text));
                    }
                }
            },
            FieldKind::Toggle => {
                let flag = flag_of(section, field_spec.key);
                spans.push(checkbox(flag));
                spans.push(Span::styled(
                    if flag { " Yes" } else { " No" },
                    theme::muted(),
                ));
            }
            FieldKind::Choice(_) => {
                let token = text_of(section, field_spec.key);
                match field_spec.choice_label(&token) {
                    Some(label) => spans.push(Span::raw(label)),
                    None if token.is_empty() => spans.push(Span::styled("(not chosen)", theme::dim())),
                    None => spans.push(Span::raw(token)),
                }
                if selected {
                    spans.push(Span::styled("  ◂ ▸", theme::key_hint()));
                }
            }
            FieldKind::MultiChoice(_) => {
                let count = split_tokens(&text_of(section, field_spec.key)).len();
                spans.push(Span::styled(format!("{count} selected"), theme::muted()));
            }
        }

        Line::from(spans)
    }

    fn hint_line(&self, kind: Option<FieldKind>) -> Line<'static> {
        let hints: &[(&str, &str)] = if self.editing.is_some() {
            &[("Esc/Enter", "done"), ("←→", "cursor")]
        } else {
            match kind {
                Some(FieldKind::Toggle) => &[("j/k", "move"), ("Enter", "toggle")],
                Some(FieldKind::Choice(_)) => &[("j/k", "move"), ("Enter/←→", "choose")],
                Some(FieldKind::MultiChoice(_)) => &[("j/k", "move"), ("1-9", "toggle option")],
                _ => &[("j/k", "move"), ("Enter", "edit")],
            }
        };
        let mut spans = vec![Span::raw("  ")];
        for (key, label) in hints {
            spans.push(Span::styled(format!("[{key}]"), theme::key_hint()));
            spans.push(Span::styled(format!(" {label}  "), theme::dim()));
        }
        Line::from(spans)
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn text_of<S: SectionRecord>(section: &S, key: &str) -> String {
    section
        .field(key)
        .ok()
        .and_then(|v| v.as_text().map(str::to_string))
        .unwrap_or_default()
}

fn flag_of<S: SectionRecord>(section: &S, key: &str) -> bool {
    section
        .field(key)
        .ok()
        .and_then(|v| v.as_flag())
        .unwrap_or(false)
}

/// Step through "not chosen" followed by each option, wrapping.
fn cycle(options: &[Choice], current: &str, forward: bool) -> String {
    let len = options.len() + 1;
    let pos = options
        .iter()
        .position(|c| c.value == current)
        .map(|i| i + 1)
        .unwrap_or(0);
    let next = if forward { (pos + 1) % len } else { (pos + len - 1) % len };
    match next {
        0 => String::new(),
        n => options[n - 1].value.to_string(),
    }
}

fn checkbox(checked: bool) -> Span<'static> {
    if checked {
        Span::styled("[x]", Style::default().fg(theme::SUCCESS).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("[ ]", theme::dim())
    }
}

fn group_header(title: &str) -> Vec<Line<'static>> {
    vec![
        Line::raw(""),
        Line::from(Span::styled(format!("  {title}"), theme::heading())),
        Line::from(Span::styled(format!("  {}", "─".repeat(40)), theme::dim())),
    ]
}
