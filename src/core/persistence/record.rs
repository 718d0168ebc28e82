//! The persisted draft record.
//!
//! ```json
//! { "data": { ...draft... }, "step": 3, "timestamp": "2025-01-01T12:00:00.000Z" }
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

use super::PersistenceError;
use crate::core::draft::{merge_draft, Draft};
use crate::core::wizard::WizardStep;

/// Default key the record is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "financial-onboarding-form";

#[derive(Serialize)]
struct RecordRef<'a> {
    data: &'a Draft,
    step: usize,
    timestamp: String,
}

/// A successfully decoded record.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredDraft {
    pub draft: Draft,
    /// Clamped into the valid step range.
    pub step: usize,
    /// When the record was written. `None` when the stored value is missing
    /// or unreadable; the draft itself is still restored.
    pub timestamp: Option<DateTime<Utc>>,
}

/// Serialize a snapshot with an ISO-8601 timestamp in UTC.
pub fn encode(draft: &Draft, step: usize, timestamp: DateTime<Utc>) -> Result<String, PersistenceError> {
    let record = RecordRef {
        data: draft,
        step,
        timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    Ok(serde_json::to_string(&record)?)
}

/// Parse a stored record, filling fields missing from `data` with defaults.
pub fn decode(raw: &str) -> Result<RestoredDraft, PersistenceError> {
    let root: Value = serde_json::from_str(raw)?;

    let data = root
        .get("data")
        .filter(|d| d.is_object())
        .ok_or(PersistenceError::Malformed("data is missing or not an object"))?;

    let step = root
        .get("step")
        .and_then(Value::as_u64)
        .ok_or(PersistenceError::Malformed("step is missing or not a non-negative integer"))?;

    let timestamp = parse_timestamp(root.get("timestamp"));

    let step = usize::try_from(step)
        .unwrap_or(usize::MAX)
        .min(WizardStep::COUNT - 1);

    Ok(RestoredDraft {
        draft: merge_draft(data)?,
        step,
        timestamp,
    })
}

fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let Some(raw) = value.and_then(Value::as_str) else {
        tracing::warn!("Saved draft has no timestamp");
        return None;
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(timestamp = raw, error = %e, "Ignoring unreadable save timestamp");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_layout() {
        let mut draft = Draft::new();
        draft.listing.ticker = "ACME".to_string();
        let ts = DateTime::parse_from_rfc3339("2025-03-01T09:30:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let raw = encode(&draft, 2, ts).unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["step"], json!(2));
        assert_eq!(value["timestamp"], json!("2025-03-01T09:30:00.000Z"));
        assert_eq!(value["data"]["listing"]["ticker"], json!("ACME"));
        assert_eq!(value["data"]["issuer"]["legal_address"]["postalCode"], json!(""));
    }

    #[test]
    fn test_decode_roundtrip() {
        let mut draft = Draft::new();
        draft.issuer.legal_name = "Acme Holdings Inc.".to_string();
        draft.warrant.allowed_payment_methods = "ACH,CHECK".to_string();
        let ts = Utc::now();

        let restored = decode(&encode(&draft, 4, ts).unwrap()).unwrap();
        assert_eq!(restored.draft, draft);
        assert_eq!(restored.step, 4);
        assert_eq!(restored.timestamp.unwrap().timestamp_millis(), ts.timestamp_millis());
    }

    #[test]
    fn test_decode_clamps_step() {
        let raw = r#"{"data": {}, "step": 99, "timestamp": "2025-03-01T09:30:00Z"}"#;
        assert_eq!(decode(raw).unwrap().step, WizardStep::COUNT - 1);
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(decode("not json"), Err(PersistenceError::Json(_))));
        assert!(matches!(
            decode(r#"{"step": 1, "timestamp": "2025-03-01T09:30:00Z"}"#),
            Err(PersistenceError::Malformed(_))
        ));
        assert!(matches!(
            decode(r#"{"data": {}, "step": -1, "timestamp": "2025-03-01T09:30:00Z"}"#),
            Err(PersistenceError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_keeps_draft_without_usable_timestamp() {
        let unreadable = decode(
            r#"{"data": {"listing": {"ticker": "ACME"}}, "step": 3, "timestamp": "yesterday"}"#,
        )
        .unwrap();
        assert_eq!(unreadable.draft.listing.ticker, "ACME");
        assert_eq!(unreadable.step, 3);
        assert_eq!(unreadable.timestamp, None);

        let missing = decode(r#"{"data": {"issue": {"name": "Common"}}, "step": 1}"#).unwrap();
        assert_eq!(missing.draft.issue.name, "Common");
        assert_eq!(missing.step, 1);
        assert_eq!(missing.timestamp, None);

        let not_a_string = decode(r#"{"data": {}, "step": 0, "timestamp": 1700000000}"#).unwrap();
        assert_eq!(not_a_string.timestamp, None);
    }
}
