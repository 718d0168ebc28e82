//! Property-based tests for wizard navigation
//!
//! Tests invariants:
//! - jump_to lands on any in-range index and ignores the rest
//! - Any sequence of next/previous keeps the step in range
//! - A section update only touches its own section

use proptest::prelude::*;

use crate::core::draft::{IssuerInfo, ListingInfo, SectionData};
use crate::core::wizard::{WizardState, WizardStep};

#[derive(Debug, Clone, Copy)]
enum Nav {
    Next,
    Previous,
    Jump(usize),
}

fn arb_nav() -> impl Strategy<Value = Nav> {
    prop_oneof![
        Just(Nav::Next),
        Just(Nav::Previous),
        (0usize..12).prop_map(Nav::Jump),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,&-]{0,40}"
}

proptest! {
    #[test]
    fn prop_jump_lands_on_valid_index(start in 0usize..WizardStep::COUNT, target in 0usize..20) {
        let mut wizard = WizardState::new();
        wizard.jump_to(start);

        let moved = wizard.jump_to(target);
        if target < WizardStep::COUNT {
            prop_assert!(moved);
            prop_assert_eq!(wizard.current_index(), target);
        } else {
            prop_assert!(!moved);
            prop_assert_eq!(wizard.current_index(), start);
        }
    }

    #[test]
    fn prop_navigation_stays_in_range(moves in prop::collection::vec(arb_nav(), 0..40)) {
        let mut wizard = WizardState::new();
        for nav in moves {
            let before = wizard.current_index();
            match nav {
                Nav::Next => {
                    let request = wizard.next();
                    if before + 1 < WizardStep::COUNT {
                        let request = request.unwrap();
                        prop_assert_eq!(request.step, before + 1);
                    } else {
                        prop_assert!(request.is_none());
                    }
                    // Settle the save so the next move starts clean.
                    wizard.fail_save();
                }
                Nav::Previous => {
                    wizard.previous();
                    prop_assert_eq!(wizard.current_index(), before.saturating_sub(1));
                }
                Nav::Jump(target) => {
                    wizard.jump_to(target);
                }
            }
            prop_assert!(wizard.current_index() < WizardStep::COUNT);
            prop_assert!(wizard.progress_percent() <= 100);
        }
    }

    #[test]
    fn prop_section_update_is_isolated(name in arb_text(), ticker in "[A-Z]{0,5}") {
        let mut wizard = WizardState::new();
        let before = wizard.draft().clone();

        wizard.update_section(SectionData::Issuer(IssuerInfo {
            legal_name: name.clone(),
            ..IssuerInfo::default()
        }));
        wizard.update_section(SectionData::Listing(ListingInfo {
            ticker: ticker.clone(),
            ..ListingInfo::default()
        }));

        let after = wizard.draft();
        prop_assert_eq!(&after.issuer.legal_name, &name);
        prop_assert_eq!(&after.listing.ticker, &ticker);
        prop_assert_eq!(&after.issue, &before.issue);
        prop_assert_eq!(&after.conversion, &before.conversion);
        prop_assert_eq!(&after.warrant, &before.warrant);
        prop_assert_eq!(&after.issuer_admin, &before.issuer_admin);
    }
}
