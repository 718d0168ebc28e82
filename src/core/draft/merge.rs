//! Defaults-with-override merge for restoring saved drafts.
//!
//! A record written by an older build may lack sections or fields that the
//! current schema has. Restoring merges the saved JSON over the all-empty
//! defaults so every field exists after the merge, while every value the
//! user actually saved wins.

use serde_json::{Map, Value};

use super::types::Draft;

/// Merge `saved` over `defaults`, one object level at a time.
///
/// - Objects are merged key by key, recursively.
/// - A saved scalar replaces the default only when both are the same JSON kind.
/// - `null` and kind-mismatched saved values keep the default.
/// - Keys present only in `saved` are carried through.
pub fn merge_defaults(defaults: &Value, saved: &Value) -> Value {
    match (defaults, saved) {
        (Value::Object(base), Value::Object(over)) => {
            let mut out: Map<String, Value> = base.clone();
            for (key, value) in over {
                let merged = match base.get(key) {
                    Some(default) => merge_defaults(default, value),
                    None => value.clone(),
                };
                out.insert(key.clone(), merged);
            }
            Value::Object(out)
        }
        (default, Value::Null) => default.clone(),
        (default, value) if same_kind(default, value) => value.clone(),
        (default, _) => default.clone(),
    }
}

fn same_kind(a: &Value, b: &Value) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

/// Rebuild a draft from saved JSON, filling anything missing from defaults.
pub fn merge_draft(saved: &Value) -> Result<Draft, serde_json::Error> {
    let defaults = serde_json::to_value(Draft::new())?;
    let merged = merge_defaults(&defaults, saved);
    serde_json::from_value(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_saved_scalars_override() {
        let defaults = json!({"a": "", "b": false});
        let saved = json!({"a": "x", "b": true});
        assert_eq!(merge_defaults(&defaults, &saved), json!({"a": "x", "b": true}));
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let defaults = json!({"a": "", "addr": {"street1": "", "street2": "", "country": "US"}});
        let saved = json!({"addr": {"street1": "1 Main St"}});
        assert_eq!(
            merge_defaults(&defaults, &saved),
            json!({"a": "", "addr": {"street1": "1 Main St", "street2": "", "country": "US"}})
        );
    }

    #[test]
    fn test_null_and_mismatch_keep_default() {
        let defaults = json!({"flag": false, "name": "", "addr": {"city": ""}});
        let saved = json!({"flag": "yes", "name": null, "addr": "somewhere"});
        assert_eq!(merge_defaults(&defaults, &saved), defaults);
    }

    #[test]
    fn test_unknown_keys_are_carried() {
        let defaults = json!({"a": ""});
        let saved = json!({"a": "x", "legacy": 3});
        assert_eq!(merge_defaults(&defaults, &saved), json!({"a": "x", "legacy": 3}));
    }

    #[test]
    fn test_merge_draft_missing_section() {
        let saved = json!({
            "issuer": {"legal_name": "Acme Holdings Inc."},
            "listing": {"ticker": "ACME", "exchange": "NYSE", "retired_field": true}
        });
        let draft = merge_draft(&saved).unwrap();
        assert_eq!(draft.issuer.legal_name, "Acme Holdings Inc.");
        assert_eq!(draft.issuer.legal_address.country, "US");
        assert_eq!(draft.listing.ticker, "ACME");
        assert_eq!(draft.warrant, Default::default());
    }

    #[test]
    fn test_merge_draft_non_object_falls_back() {
        let draft = merge_draft(&json!("garbage")).unwrap();
        assert_eq!(draft, Draft::new());
    }
}
