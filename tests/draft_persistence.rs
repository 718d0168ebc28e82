//! End-to-end tests for draft persistence against the file store.
//!
//! Each test writes into its own temporary directory, drives saves through
//! the wizard state and the background saver, then restores the record the
//! way startup does.

use std::fs;
use std::sync::Arc;
use std::time::Duration;

use rstest::rstest;
use serde_json::json;
use tempfile::TempDir;

use seconboard::core::draft::{Address, SectionData};
use seconboard::core::persistence::{
    restore, DraftSaver, DraftStore, FileDraftStore, SaveOutcome, DEFAULT_STORAGE_KEY,
};
use seconboard::core::wizard::{WizardState, WizardStep};

fn file_store(dir: &TempDir) -> FileDraftStore {
    FileDraftStore::new(dir.path(), DEFAULT_STORAGE_KEY)
}

#[tokio::test]
async fn continue_then_restore_resumes_on_new_step() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn DraftStore> = Arc::new(file_store(&dir));
    let mut saver = DraftSaver::new(Arc::clone(&store), Duration::ZERO);

    let mut wizard = WizardState::new();
    let mut issuer = wizard.draft().issuer.clone();
    issuer.legal_name = "Acme Holdings, Inc.".to_string();
    issuer.legal_address = Address {
        street1: "1 Main St".to_string(),
        city: "Springfield".to_string(),
        ..Address::default()
    };
    wizard.update_section(SectionData::Issuer(issuer));

    let request = wizard.next().unwrap();
    saver.spawn(request);
    let timestamp = match saver.next_outcome().await.unwrap() {
        SaveOutcome::Saved { step, timestamp } => {
            assert_eq!(step, 1);
            timestamp
        }
        other => panic!("unexpected outcome: {other:?}"),
    };
    wizard.complete_save(timestamp);

    let restored = restore(store.as_ref()).unwrap();
    let resumed = WizardState::restored(restored.draft, restored.step, restored.timestamp);
    assert_eq!(resumed.current_step(), WizardStep::Issue);
    assert_eq!(resumed.draft(), wizard.draft());
    assert_eq!(
        resumed.last_saved().map(|ts| ts.timestamp_millis()),
        wizard.last_saved().map(|ts| ts.timestamp_millis())
    );
}

#[test]
fn missing_file_starts_fresh() {
    let dir = TempDir::new().unwrap();
    assert!(restore(&file_store(&dir)).is_none());
}

#[rstest]
#[case::not_json("{not json")]
#[case::missing_data(r#"{"step": 2, "timestamp": "2024-03-01T10:00:00.000Z"}"#)]
#[case::negative_step(r#"{"data": {}, "step": -1, "timestamp": "2024-03-01T10:00:00.000Z"}"#)]
fn unusable_record_starts_fresh(#[case] raw: &str) {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    fs::write(store.path(), raw).unwrap();
    assert!(restore(&store).is_none());
}

#[rstest]
#[case::unreadable(json!("yesterday"))]
#[case::wrong_type(json!(1709287200))]
#[case::null(serde_json::Value::Null)]
fn record_without_usable_timestamp_keeps_draft(#[case] timestamp: serde_json::Value) {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    let record = json!({
        "data": { "issuer": { "legal_name": "Acme" }, "listing": { "ticker": "ACME" } },
        "step": 3,
        "timestamp": timestamp,
    });
    fs::write(store.path(), record.to_string()).unwrap();

    let restored = restore(&store).unwrap();
    assert_eq!(restored.timestamp, None);

    let resumed = WizardState::restored(restored.draft, restored.step, restored.timestamp);
    assert_eq!(resumed.current_step(), WizardStep::Warrant);
    assert_eq!(resumed.draft().issuer.legal_name, "Acme");
    assert_eq!(resumed.draft().listing.ticker, "ACME");
    assert_eq!(resumed.last_saved(), None);
}

#[test]
fn older_record_is_filled_with_defaults() {
    let dir = TempDir::new().unwrap();
    let store = file_store(&dir);
    let record = json!({
        "data": {
            "issuer": {
                "legal_name": "Acme",
                "legal_address": { "street1": "1 Main St", "city": "Springfield" }
            },
            "listing": { "ticker": "ACME" }
        },
        "step": 4,
        "timestamp": "2024-03-01T10:00:00.000Z"
    });
    fs::write(store.path(), record.to_string()).unwrap();

    let restored = restore(&store).unwrap();
    assert_eq!(restored.step, 4);
    assert_eq!(restored.draft.issuer.legal_name, "Acme");
    assert_eq!(restored.draft.issuer.legal_address.street2, "");
    assert_eq!(restored.draft.issuer.legal_address.country, "US");
    assert_eq!(restored.draft.listing.ticker, "ACME");
    assert_eq!(restored.draft.warrant.allowed_payment_methods, "");
    assert_eq!(restored.draft.issue.par_value.currency, "USD");
}

#[tokio::test]
async fn overlapping_saves_leave_a_readable_record() {
    let dir = TempDir::new().unwrap();
    let store: Arc<dyn DraftStore> = Arc::new(file_store(&dir));
    let mut saver = DraftSaver::new(Arc::clone(&store), Duration::ZERO);

    let mut wizard = WizardState::new();
    for _ in 0..3 {
        let request = wizard.next().unwrap();
        saver.spawn(request);
    }
    for _ in 0..3 {
        assert!(matches!(
            saver.next_outcome().await,
            Some(SaveOutcome::Saved { .. })
        ));
    }

    let restored = restore(store.as_ref()).unwrap();
    assert!((1..=3).contains(&restored.step));
}
