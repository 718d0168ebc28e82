//! Onboarding draft model.
//!
//! The draft is one owned aggregate of six sections. Views read it by
//! reference and change it only through whole-section replacement messages.

pub mod fields;
pub mod merge;
pub mod schema;
pub mod types;

pub use fields::{
    Choice, FieldError, FieldKind, FieldSpec, FieldValue, SectionRecord,
};
pub use merge::{merge_defaults, merge_draft};
pub use schema::{payment_method_label, ComplianceStatus, PAYMENT_METHODS};
pub use types::{
    Address, Amount, ConversionTerms, Draft, IssueInfo, IssuerAdmin, IssuerInfo, ListingInfo,
    Section, SectionData, TaxIds, WarrantTerms,
};
