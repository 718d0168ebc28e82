//! Wizard Step Types
//!
//! The seven steps of the onboarding flow, their sidebar status, and the
//! relative "last saved" wording shown next to them.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::core::draft::Section;

/// One step of the onboarding flow, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Issuer,
    Issue,
    Conversion,
    Warrant,
    Listing,
    IssuerAdmin,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 7] = [
        WizardStep::Issuer,
        WizardStep::Issue,
        WizardStep::Conversion,
        WizardStep::Warrant,
        WizardStep::Listing,
        WizardStep::IssuerAdmin,
        WizardStep::Review,
    ];

    /// Number of steps.
    pub const COUNT: usize = 7;

    pub fn index(self) -> usize {
        match self {
            WizardStep::Issuer => 0,
            WizardStep::Issue => 1,
            WizardStep::Conversion => 2,
            WizardStep::Warrant => 3,
            WizardStep::Listing => 4,
            WizardStep::IssuerAdmin => 5,
            WizardStep::Review => 6,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Issuer => "Issuer Information",
            WizardStep::Issue => "Issue",
            WizardStep::Conversion => "Preferred",
            WizardStep::Warrant => "Warrant",
            WizardStep::Listing => "Listing",
            WizardStep::IssuerAdmin => "Issuer Admin",
            WizardStep::Review => "Review & Submit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WizardStep::Issuer => "Company details",
            WizardStep::Issue => "Security class details",
            WizardStep::Conversion => "Conversion & redemption",
            WizardStep::Warrant => "Exercise terms & payment",
            WizardStep::Listing => "Exchange listing details",
            WizardStep::IssuerAdmin => "Admin contact details",
            WizardStep::Review => "Final review",
        }
    }

    /// Single-glyph marker for the sidebar.
    pub fn icon(self) -> &'static str {
        match self {
            WizardStep::Issuer => "⌂",
            WizardStep::Issue => "§",
            WizardStep::Conversion => "⇄",
            WizardStep::Warrant => "✎",
            WizardStep::Listing => "≡",
            WizardStep::IssuerAdmin => "☺",
            WizardStep::Review => "✓",
        }
    }

    /// Draft section edited on this step; `None` for the review step.
    pub fn section(self) -> Option<Section> {
        match self {
            WizardStep::Issuer => Some(Section::Issuer),
            WizardStep::Issue => Some(Section::Issue),
            WizardStep::Conversion => Some(Section::Conversion),
            WizardStep::Warrant => Some(Section::Warrant),
            WizardStep::Listing => Some(Section::Listing),
            WizardStep::IssuerAdmin => Some(Section::IssuerAdmin),
            WizardStep::Review => None,
        }
    }

    /// Step that edits `section`.
    pub fn for_section(section: Section) -> Self {
        match section {
            Section::Issuer => WizardStep::Issuer,
            Section::Issue => WizardStep::Issue,
            Section::Conversion => WizardStep::Conversion,
            Section::Warrant => WizardStep::Warrant,
            Section::Listing => WizardStep::Listing,
            Section::IssuerAdmin => WizardStep::IssuerAdmin,
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

// ============================================================================
// Sidebar Status
// ============================================================================

/// Display state of a step relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Locked,
}

/// Status of step `index` while the wizard is on `current`.
pub fn step_status(index: usize, current: usize) -> StepStatus {
    match index.cmp(&current) {
        std::cmp::Ordering::Less => StepStatus::Completed,
        std::cmp::Ordering::Equal => StepStatus::Current,
        std::cmp::Ordering::Greater => StepStatus::Locked,
    }
}

/// A step may be activated from the sidebar once it has been reached.
pub fn is_accessible(index: usize, current: usize) -> bool {
    index <= current
}

/// Relative wording for the last successful save.
pub fn format_last_saved(saved: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - saved).num_minutes();
    match minutes {
        m if m < 1 => "Just now".to_string(),
        1 => "1 minute ago".to_string(),
        m if m < 60 => format!("{m} minutes ago"),
        _ => saved.with_timezone(&Local).format("%H:%M").to_string(),
    }
}
