//! Draft Domain Types
//!
//! Defines the fixed-shape onboarding draft and its six sections:
//! - [`IssuerInfo`]: company identity, addresses, tax ids, reporting flags
//! - [`IssueInfo`]: security class/issue details
//! - [`ConversionTerms`]: conversion and redemption terms
//! - [`WarrantTerms`]: warrant exercise terms and payment routing
//! - [`ListingInfo`]: exchange listing
//! - [`IssuerAdmin`]: issuer administrator contact and compliance flags
//!
//! # Serialization
//!
//! Field names are the external contract of the persisted record. Every
//! text field is a `String` where empty means "not provided"; flags are
//! `bool`. Addresses keep the camelCase `postalCode` key so records written
//! by earlier releases restore unchanged.

use serde::{Deserialize, Serialize};

// ============================================================================
// Shared Sub-Records
// ============================================================================

/// Structured mailing address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street1: String,
    pub street2: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub country: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            street1: String::new(),
            street2: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            country: "US".to_string(),
        }
    }
}

impl Address {
    /// Single-line rendering used by the review screen.
    ///
    /// Returns `None` when no street is set, which the review renders as "-".
    pub fn one_line(&self) -> Option<String> {
        if self.street1.is_empty() {
            return None;
        }
        let mut out = self.street1.clone();
        if !self.street2.is_empty() {
            out.push_str(", ");
            out.push_str(&self.street2);
        }
        if !self.city.is_empty() {
            out.push_str(", ");
            out.push_str(&self.city);
        }
        if !self.state.is_empty() {
            out.push_str(", ");
            out.push_str(&self.state);
        }
        if !self.postal_code.is_empty() {
            out.push(' ');
            out.push_str(&self.postal_code);
        }
        if !self.country.is_empty() {
            out.push_str(", ");
            out.push_str(&self.country);
        }
        Some(out)
    }
}

/// Currency amount kept as entered text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub amount: String,
    pub currency: String,
}

impl Default for Amount {
    fn default() -> Self {
        Self {
            amount: String::new(),
            currency: "USD".to_string(),
        }
    }
}

/// Tax identifier with its issuing country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxIds {
    pub tax_id: String,
    pub country: String,
}

impl Default for TaxIds {
    fn default() -> Self {
        Self {
            tax_id: String::new(),
            country: "US".to_string(),
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

/// Issuer identity and corporate details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerInfo {
    pub legal_name: String,
    pub dba: String,
    pub legal_address: Address,
    pub contact_address: Address,
    pub organization_type: String,
    pub country_of_formation: String,
    pub country_subdivision_of_formation: String,
    pub formation_date: String,
    pub tax_ids: TaxIds,
    pub email: String,
    pub phone: String,
    pub company_website: String,
    pub central_index_key: String,
    pub is_sec_reporting: bool,
    pub is_shell_issuer: bool,
    pub quorum_requirement: String,
    pub year_end: String,
    pub active_date: String,
    pub original_medallion_waiver: bool,
    pub drs_payment_fee: String,
    pub requires_issuer_approval_for_legal_counsel: bool,
}

/// Security class / issue details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueInfo {
    pub internal_id: String,
    pub name: String,
    pub class_type: String,
    pub class_state: String,
    pub cusip: String,
    pub isin: String,
    pub dtc_eligible: bool,
    pub fast_eligible: bool,
    pub dtc_eligibility_change_date: String,
    pub fast_eligibility_change_date: String,
    pub board_approval_date: String,
    pub votes_per_share: String,
    pub dividend: bool,
    pub par_value: Amount,
    pub price_per_share: Amount,
    pub accept_sales: bool,
    pub fractional_shares: bool,
    pub allowable_decimals: String,
    pub allow_certificates: bool,
    pub authorization_date: String,
    pub initial_shares_authorized: String,
}

/// Conversion and redemption terms (the "Preferred" step).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionTerms {
    pub internal_id: String,
    pub participating: bool,
    pub start_date: String,
    pub maturity_date: String,
    pub redeemable: bool,
    pub redemption_date: String,
    pub conversion_mechanism_type: String,
    /// Internal id of the issue this converts into. Not checked.
    pub converts_to: String,
    pub conversion_calculation: String,
    pub online_conversions: bool,
}

/// Warrant exercise terms and payment routing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarrantTerms {
    pub internal_id: String,
    pub warrant_exercise_terms_price: String,
    pub warrant_exercise_terms_start_date: String,
    pub warrant_exercise_terms_end_date: String,
    pub expiry_date: String,
    /// Internal id of the issue received on exercise. Not checked.
    pub exercise_to: String,
    pub exercise_ratio: String,
    pub number_of_exercise_terms: String,
    pub is_exercisable: bool,
    /// Comma-joined payment method tokens, e.g. `"WIRE_TRANSFER,CHECK"`.
    pub allowed_payment_methods: String,
    pub cheque_payment_delivery_address: Address,
    pub wire_transfer_financial_institution_name: String,
    pub wire_transfer_financial_institution_swift_bic_code: String,
    pub wire_transfer_branch_address: Address,
    pub wire_transfer_aba_number: String,
    pub wire_transfer_chips_number: String,
}

/// Exchange listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingInfo {
    pub internal_id: String,
    pub ticker: String,
    pub exchange: String,
    pub listing_date: String,
}

/// Issuer administrator contact, roles and compliance flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerAdmin {
    pub legal_name: String,
    pub email_address: String,
    pub job_title: String,
    pub admin: bool,
    pub director: bool,
    pub authorized_officer: bool,
    pub on_certificate_of_incumbency: bool,
    pub kyc_complete: bool,
    pub authenticated_email: bool,
}

// ============================================================================
// Draft Aggregate
// ============================================================================

/// The single in-progress onboarding record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub issuer: IssuerInfo,
    pub issue: IssueInfo,
    pub conversion: ConversionTerms,
    pub warrant: WarrantTerms,
    pub listing: ListingInfo,
    pub issuer_admin: IssuerAdmin,
}

/// Names of the six top-level draft sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Issuer,
    Issue,
    Conversion,
    Warrant,
    Listing,
    IssuerAdmin,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Issuer,
        Section::Issue,
        Section::Conversion,
        Section::Warrant,
        Section::Listing,
        Section::IssuerAdmin,
    ];

    /// JSON key of the section inside the persisted draft.
    pub fn key(self) -> &'static str {
        match self {
            Section::Issuer => "issuer",
            Section::Issue => "issue",
            Section::Conversion => "conversion",
            Section::Warrant => "warrant",
            Section::Listing => "listing",
            Section::IssuerAdmin => "issuer_admin",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A whole-section replacement message.
///
/// Editors never mutate the draft directly; they build a new section value
/// and hand it to [`Draft::update_section`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionData {
    Issuer(IssuerInfo),
    Issue(IssueInfo),
    Conversion(ConversionTerms),
    Warrant(WarrantTerms),
    Listing(ListingInfo),
    IssuerAdmin(IssuerAdmin),
}

impl SectionData {
    /// Section this replacement targets.
    pub fn section(&self) -> Section {
        match self {
            SectionData::Issuer(_) => Section::Issuer,
            SectionData::Issue(_) => Section::Issue,
            SectionData::Conversion(_) => Section::Conversion,
            SectionData::Warrant(_) => Section::Warrant,
            SectionData::Listing(_) => Section::Listing,
            SectionData::IssuerAdmin(_) => Section::IssuerAdmin,
        }
    }
}

impl Draft {
    /// Create the all-empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one section wholesale; the other five are untouched.
    pub fn update_section(&mut self, data: SectionData) {
        match data {
            SectionData::Issuer(v) => self.issuer = v,
            SectionData::Issue(v) => self.issue = v,
            SectionData::Conversion(v) => self.conversion = v,
            SectionData::Warrant(v) => self.warrant = v,
            SectionData::Listing(v) => self.listing = v,
            SectionData::IssuerAdmin(v) => self.issuer_admin = v,
        }
    }

    /// Current value of a section as a replacement message.
    pub fn section(&self, section: Section) -> SectionData {
        match section {
            Section::Issuer => SectionData::Issuer(self.issuer.clone()),
            Section::Issue => SectionData::Issue(self.issue.clone()),
            Section::Conversion => SectionData::Conversion(self.conversion.clone()),
            Section::Warrant => SectionData::Warrant(self.warrant.clone()),
            Section::Listing => SectionData::Listing(self.listing.clone()),
            Section::IssuerAdmin => SectionData::IssuerAdmin(self.issuer_admin.clone()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
