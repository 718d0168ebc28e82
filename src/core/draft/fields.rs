//! Field-level access to draft sections.
//!
//! Editors address fields by their serialized path (`"legal_name"`,
//! `"legal_address.city"`). A change never mutates a section in place:
//! [`SectionRecord::with_field`] returns a new section with exactly one key
//! replaced (a shallow merge by key, one level deeper for nested records).

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::types::{Draft, Section, SectionData};

// ============================================================================
// Field Metadata
// ============================================================================

/// One selectable token of an option set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

impl Choice {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text.
    Text,
    /// Free text forced to upper case as typed (country/state codes, tickers).
    Upper,
    /// Calendar date entered as `YYYY-MM-DD` text.
    Date,
    /// Boolean checkbox.
    Toggle,
    /// Exactly one token from the set, or empty.
    Choice(&'static [Choice]),
    /// Any subset of the set, stored comma-joined.
    MultiChoice(&'static [Choice]),
}

impl FieldKind {
    pub fn is_textual(self) -> bool {
        matches!(self, FieldKind::Text | FieldKind::Upper | FieldKind::Date)
    }
}

/// Static description of one editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Serialized path, at most one level deep.
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Heading the field is grouped under in the editor.
    pub group: &'static str,
}

impl FieldSpec {
    pub const fn new(
        key: &'static str,
        label: &'static str,
        kind: FieldKind,
        group: &'static str,
    ) -> Self {
        Self {
            key,
            label,
            kind,
            group,
        }
    }

    /// Label of an option token, falling back to the token itself.
    pub fn choice_label(&self, token: &str) -> Option<&'static str> {
        match self.kind {
            FieldKind::Choice(options) | FieldKind::MultiChoice(options) => options
                .iter()
                .find(|c| c.value == token)
                .map(|c| c.label),
            _ => None,
        }
    }
}

/// A primitive field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }

    fn into_json(self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s),
            FieldValue::Flag(b) => Value::Bool(b),
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            Value::Bool(b) => Some(FieldValue::Flag(*b)),
            _ => None,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors raised when addressing a field that the schema does not have.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {field} expects a {expected} value")]
    KindMismatch { field: String, expected: &'static str },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// Generic Access
// ============================================================================

fn split_path(path: &str) -> (Option<&str>, &str) {
    match path.split_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, path),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "boolean",
        Value::String(_) => "text",
        _ => "structured",
    }
}

/// Read one primitive field by path.
pub fn get_field<T: Serialize>(record: &T, path: &str) -> Result<FieldValue, FieldError> {
    let root = serde_json::to_value(record)?;
    let (parent, leaf) = split_path(path);
    let container = match parent {
        Some(p) => root.get(p),
        None => Some(&root),
    };
    container
        .and_then(|c| c.get(leaf))
        .and_then(FieldValue::from_json)
        .ok_or_else(|| FieldError::UnknownField(path.to_string()))
}

/// Return a copy of `record` with one primitive field replaced.
pub fn set_field<T>(record: &T, path: &str, value: FieldValue) -> Result<T, FieldError>
where
    T: Serialize + DeserializeOwned,
{
    let mut root = serde_json::to_value(record)?;
    let (parent, leaf) = split_path(path);
    let container = match parent {
        Some(p) => root.get_mut(p).and_then(Value::as_object_mut),
        None => root.as_object_mut(),
    }
    .ok_or_else(|| FieldError::UnknownField(path.to_string()))?;

    let slot = container
        .get_mut(leaf)
        .ok_or_else(|| FieldError::UnknownField(path.to_string()))?;

    let replacement = value.into_json();
    if std::mem::discriminant(slot) != std::mem::discriminant(&replacement) {
        return Err(FieldError::KindMismatch {
            field: path.to_string(),
            expected: kind_name(slot),
        });
    }
    *slot = replacement;

    Ok(serde_json::from_value(root)?)
}

// ============================================================================
// Comma-Joined Token Sets
// ============================================================================

/// Split a comma-joined token string, trimming and dropping empty tokens.
pub fn split_tokens(joined: &str) -> Vec<&str> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Whether `token` is present in the comma-joined string.
pub fn has_token(joined: &str, token: &str) -> bool {
    split_tokens(joined).contains(&token)
}

/// Add `token` if absent, remove it if present; other tokens keep their order.
pub fn toggle_token(joined: &str, token: &str) -> String {
    let mut tokens = split_tokens(joined);
    if let Some(pos) = tokens.iter().position(|t| *t == token) {
        tokens.remove(pos);
    } else {
        tokens.push(token);
    }
    tokens.join(",")
}

// ============================================================================
// SectionRecord
// ============================================================================

/// Common behavior of the six draft sections.
pub trait SectionRecord: Clone + Default + Serialize + DeserializeOwned {
    /// Which top-level section this record is.
    const SECTION: Section;

    /// Editable fields in display order.
    fn fields() -> &'static [FieldSpec];

    /// Borrow this section from the draft.
    fn of(draft: &Draft) -> &Self;

    /// Wrap into a replacement message.
    fn into_data(self) -> SectionData;

    /// Whether a field is shown given the current values. Derived on every
    /// call; nothing about visibility is stored.
    fn is_visible(&self, _key: &str) -> bool {
        true
    }

    /// Derived summary lines shown under the editor.
    fn summary(&self) -> Vec<String> {
        Vec::new()
    }

    fn visible_fields(&self) -> Vec<&'static FieldSpec> {
        Self::fields()
            .iter()
            .filter(|f| self.is_visible(f.key))
            .collect()
    }

    fn field(&self, key: &str) -> Result<FieldValue, FieldError> {
        get_field(self, key)
    }

    fn with_field(&self, key: &str, value: FieldValue) -> Result<Self, FieldError> {
        set_field(self, key, value)
    }
}
