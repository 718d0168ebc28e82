//! Wizard controller.
//!
//! Owns the current step, the draft, the last-saved timestamp and the
//! number of saves in flight. Saving itself happens elsewhere: operations that
//! persist return a [`SaveRequest`] snapshot for the caller to hand to the
//! saver, and the outcome comes back through [`WizardState::complete_save`]
//! or [`WizardState::fail_save`].

use chrono::{DateTime, Utc};

use super::types::WizardStep;
use crate::core::draft::{Draft, SectionData};

/// Snapshot of what should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub draft: Draft,
    pub step: usize,
}

#[derive(Debug, Clone, Default)]
pub struct WizardState {
    current: usize,
    draft: Draft,
    last_saved: Option<DateTime<Utc>>,
    /// Saves handed out by `begin_save` and not yet settled.
    saves_in_flight: usize,
}

impl WizardState {
    /// Fresh wizard on the first step with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a restored draft. Out-of-range steps land on the last step.
    pub fn restored(draft: Draft, step: usize, last_saved: Option<DateTime<Utc>>) -> Self {
        Self {
            current: step.min(WizardStep::COUNT - 1),
            draft,
            last_saved,
            saves_in_flight: 0,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> WizardStep {
        WizardStep::from_index(self.current).unwrap_or_default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn last_saved(&self) -> Option<DateTime<Utc>> {
        self.last_saved
    }

    /// True while any requested save has not reported back.
    pub fn is_saving(&self) -> bool {
        self.saves_in_flight > 0
    }

    pub fn is_first_step(&self) -> bool {
        self.current == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current == WizardStep::COUNT - 1
    }

    /// Percentage of the flow reached, counting the current step.
    pub fn progress_percent(&self) -> u16 {
        (((self.current + 1) * 100) / WizardStep::COUNT) as u16
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Advance one step and request a save of the new position.
    /// Returns `None` on the last step.
    pub fn next(&mut self) -> Option<SaveRequest> {
        if self.is_last_step() {
            return None;
        }
        self.current += 1;
        tracing::debug!(step = self.current, "Advanced wizard step");
        Some(self.begin_save())
    }

    /// Go back one step. Returns whether the step changed.
    pub fn previous(&mut self) -> bool {
        if self.is_first_step() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Move to any step. Accessibility is the caller's concern; indices past
    /// the last step are ignored.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= WizardStep::COUNT {
            tracing::warn!(index, "Ignoring jump to nonexistent step");
            return false;
        }
        self.current = index;
        true
    }

    // ── Draft ───────────────────────────────────────────────────────────

    /// Replace one section of the draft.
    pub fn update_section(&mut self, data: SectionData) {
        self.draft.update_section(data);
    }

    // ── Saving ──────────────────────────────────────────────────────────

    /// Snapshot the draft and step and mark a save as in flight.
    pub fn begin_save(&mut self) -> SaveRequest {
        self.saves_in_flight += 1;
        SaveRequest {
            draft: self.draft.clone(),
            step: self.current,
        }
    }

    pub fn complete_save(&mut self, timestamp: DateTime<Utc>) {
        self.saves_in_flight = self.saves_in_flight.saturating_sub(1);
        // Overlapping saves may report out of order.
        self.last_saved = Some(self.last_saved.map_or(timestamp, |prev| prev.max(timestamp)));
    }

    pub fn fail_save(&mut self) {
        self.saves_in_flight = self.saves_in_flight.saturating_sub(1);
    }

    /// Submit from the review step. Saves the draft and leaves it in place.
    pub fn submit(&mut self) -> Option<SaveRequest> {
        if !self.is_last_step() {
            return None;
        }
        tracing::info!("Onboarding form submitted");
        Some(self.begin_save())
    }
}
