//! Property-based tests for draft records
//!
//! Tests invariants:
//! - encode then decode returns the same draft, step and timestamp
//! - Sections absent from the stored data restore as defaults
//! - Oversized steps restore as the last step

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::Value;

use crate::core::draft::{Draft, Section};
use crate::core::persistence::{decode, encode, restore, MemoryDraftStore};
use crate::core::wizard::WizardStep;

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 @.,'-]{0,30}"
}

/// Millisecond precision, matching what records store.
fn arb_timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_102_444_800_000).prop_map(|ms| Utc.timestamp_millis_opt(ms).unwrap())
}

fn arb_draft() -> impl Strategy<Value = Draft> {
    (
        arb_text(),
        arb_text(),
        any::<bool>(),
        arb_text(),
        "[A-Z]{0,5}",
        any::<bool>(),
        prop::sample::subsequence(vec!["ACH", "WIRE_TRANSFER", "CHECK"], 0..=3),
    )
        .prop_map(|(legal, city, sec, issue_name, ticker, kyc, methods)| {
            let mut draft = Draft::default();
            draft.issuer.legal_name = legal;
            draft.issuer.legal_address.city = city;
            draft.issuer.is_sec_reporting = sec;
            draft.issue.name = issue_name;
            draft.listing.ticker = ticker;
            draft.issuer_admin.kyc_complete = kyc;
            draft.warrant.allowed_payment_methods = methods.join(",");
            draft
        })
}

proptest! {
    #[test]
    fn prop_record_round_trips(
        draft in arb_draft(),
        step in 0usize..WizardStep::COUNT,
        timestamp in arb_timestamp(),
    ) {
        let raw = encode(&draft, step, timestamp).unwrap();
        let store = MemoryDraftStore::with_record(raw);

        let restored = restore(&store).unwrap();
        prop_assert_eq!(restored.draft, draft);
        prop_assert_eq!(restored.step, step);
        prop_assert_eq!(restored.timestamp, Some(timestamp));
    }

    #[test]
    fn prop_missing_section_restores_default(
        draft in arb_draft(),
        index in 0usize..Section::ALL.len(),
    ) {
        let section = Section::ALL[index];
        let raw = encode(&draft, 2, Utc::now()).unwrap();
        let mut value: Value = serde_json::from_str(&raw).unwrap();
        value["data"].as_object_mut().unwrap().remove(section.key());

        let restored = decode(&value.to_string()).unwrap();
        let defaults = Draft::default();
        let expected = match section {
            Section::Issuer => Draft { issuer: defaults.issuer, ..draft },
            Section::Issue => Draft { issue: defaults.issue, ..draft },
            Section::Conversion => Draft { conversion: defaults.conversion, ..draft },
            Section::Warrant => Draft { warrant: defaults.warrant, ..draft },
            Section::Listing => Draft { listing: defaults.listing, ..draft },
            Section::IssuerAdmin => Draft { issuer_admin: defaults.issuer_admin, ..draft },
        };
        prop_assert_eq!(restored.draft, expected);
    }

    #[test]
    fn prop_oversized_step_is_clamped(step in WizardStep::COUNT..10_000usize) {
        let raw = encode(&Draft::default(), step, Utc::now()).unwrap();
        let restored = decode(&raw).unwrap();
        prop_assert_eq!(restored.step, WizardStep::COUNT - 1);
    }
}
