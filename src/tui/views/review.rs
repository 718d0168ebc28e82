//! Review & Submit view: a read-only, scrollable rendering of every section.
//!
//! Cards come from [`build_review`]. `j`/`k` move between cards and `Enter`
//! (or `e`) jumps back to the step that edits the highlighted card.

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::core::draft::Draft;
use crate::core::review::{build_review, ReviewBlock, ReviewCard, ReviewRow};
use crate::core::wizard::WizardStep;
use crate::tui::theme;

/// Result of handing a key to the review view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewOutcome {
    Ignored,
    Consumed,
    /// Go back and edit this step.
    Edit(WizardStep),
}

#[derive(Debug, Default)]
pub struct ReviewState {
    /// Highlighted card index.
    selected: usize,
}

impl ReviewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn handle_input(&mut self, event: &Event, draft: &Draft) -> ReviewOutcome {
        let Event::Key(key) = event else {
            return ReviewOutcome::Ignored;
        };
        if key.kind != KeyEventKind::Press || key.modifiers != KeyModifiers::NONE {
            return ReviewOutcome::Ignored;
        }

        let cards = build_review(draft);
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(cards.len().saturating_sub(1));
                ReviewOutcome::Consumed
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                ReviewOutcome::Consumed
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.selected = 0;
                ReviewOutcome::Consumed
            }
            KeyCode::Enter | KeyCode::Char('e') => match cards.get(self.selected) {
                Some(card) => ReviewOutcome::Edit(card.step),
                None => ReviewOutcome::Consumed,
            },
            _ => ReviewOutcome::Ignored,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, draft: &Draft, focused: bool) {
        let step = WizardStep::Review;
        let title = format!("{} {}", step.icon(), step.title());
        let block = theme::block(&title, focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cards = build_review(draft);
        let (lines, card_starts) = build_lines(&cards, self.selected);
        let scroll = card_starts.get(self.selected).copied().unwrap_or(0);
        // Keep the intro visible while the first card is selected.
        let scroll = if self.selected == 0 { 0 } else { scroll };

        let content = Paragraph::new(lines).scroll((scroll as u16, 0));
        frame.render_widget(content, inner);
    }
}

// ── Line builders ────────────────────────────────────────────────────────────

/// All review lines plus the first line index of each card.
pub fn build_lines(cards: &[ReviewCard], selected: usize) -> (Vec<Line<'static>>, Vec<usize>) {
    let mut lines = vec![
        Line::from(Span::styled("  Review Before Submitting", theme::title())),
        Line::from(Span::styled(
            "  Please carefully review all information below.",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  Select any section to go back and make changes before submitting.",
            theme::muted(),
        )),
    ];
    let mut starts = Vec::with_capacity(cards.len());

    for (i, card) in cards.iter().enumerate() {
        starts.push(lines.len());
        lines.extend(card_header(card, i == selected));
        for row in &card.rows {
            lines.push(kv_row(row));
        }
        for block in &card.blocks {
            match block {
                ReviewBlock::Badges { heading, badges } => {
                    lines.push(Line::raw(""));
                    lines.push(Line::from(Span::styled(format!("  {heading}"), theme::muted())));
                    let mut spans = vec![Span::raw("  ")];
                    if badges.is_empty() {
                        spans.push(Span::styled("none", theme::dim()));
                    }
                    for badge in badges {
                        spans.push(Span::styled(format!(" {badge} "), theme::badge()));
                        spans.push(Span::raw(" "));
                    }
                    lines.push(Line::from(spans));
                }
                ReviewBlock::Rows { heading, rows } => {
                    lines.push(Line::raw(""));
                    lines.push(Line::from(Span::styled(format!("  {heading}"), theme::muted())));
                    for row in rows {
                        lines.push(kv_row(row));
                    }
                }
            }
        }
    }

    lines.extend(confirmation());
    (lines, starts)
}

fn card_header(card: &ReviewCard, selected: bool) -> Vec<Line<'static>> {
    let (marker, style) = if selected {
        ("▸ ", theme::highlight())
    } else {
        ("  ", theme::heading())
    };
    let mut title = vec![
        Span::styled(marker, theme::highlight()),
        Span::styled(format!("{} {}", card.step.icon(), card.title), style),
    ];
    if selected {
        title.push(Span::styled("   [Enter] edit", theme::key_hint()));
    }
    vec![
        Line::raw(""),
        Line::from(title),
        Line::from(Span::styled(format!("  {}", "─".repeat(50)), theme::dim())),
    ]
}

fn kv_row(row: &ReviewRow) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<28}", row.label), theme::muted()),
        Span::styled(row.value.clone(), Style::default().fg(theme::TEXT)),
    ])
}

fn confirmation() -> Vec<Line<'static>> {
    let ok = Style::default().fg(theme::SUCCESS);
    vec![
        Line::raw(""),
        Line::from(Span::styled(
            "  Ready to Submit Your Application",
            ok.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("  ✓ All required information has been collected", ok)),
        Line::from(Span::styled("  ✓ Your draft is kept on this machine until you submit", ok)),
        Line::raw(""),
        Line::from(Span::styled(
            "  By submitting, I certify that the information provided is accurate",
            theme::muted(),
        )),
        Line::from(Span::styled(
            "  and complete to the best of my knowledge.",
            theme::muted(),
        )),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("[Ctrl+X]", theme::key_hint()),
            Span::styled(" submit application", theme::dim()),
        ]),
    ]
}
