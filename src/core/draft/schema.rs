//! Field tables, option sets and derived visibility for each section.

use super::fields::{has_token, split_tokens, toggle_token, Choice, FieldKind, FieldSpec, SectionRecord};
use super::types::{
    ConversionTerms, Draft, IssueInfo, IssuerAdmin, IssuerInfo, ListingInfo, Section, SectionData,
    WarrantTerms,
};

use FieldKind::{Date, Text, Toggle, Upper};

// ── Option sets ─────────────────────────────────────────────────────────────

pub const ORGANIZATION_TYPES: &[Choice] = &[
    Choice::new("CORPORATION", "Corporation"),
    Choice::new("LIMITED_PARTNERSHIP", "Limited Partnership"),
    Choice::new("LIMITED_LIABILITY_CORPORATION", "Limited Liability Corporation (LLC)"),
    Choice::new("NON_US_ENTITY", "Non-US Entity"),
];

pub const CLASS_TYPES: &[Choice] = &[
    Choice::new("COMMON", "Common Stock"),
    Choice::new("PREFERRED", "Preferred Stock"),
    Choice::new("WARRANTS", "Warrants"),
    Choice::new("RIGHTS", "Rights"),
    Choice::new("NOTES", "Notes"),
    Choice::new("DEBENTURES", "Debentures"),
    Choice::new("BONDS", "Bonds"),
    Choice::new("SAFES", "SAFEs"),
    Choice::new("SUBSCRIPTION_RECEIPT", "Subscription Receipt"),
    Choice::new("UNITS", "Units"),
];

pub const CLASS_STATES: &[Choice] = &[
    Choice::new("CURRENT", "Current"),
    Choice::new("PREDECESSOR", "Predecessor"),
];

pub const CURRENCIES: &[Choice] = &[
    Choice::new("USD", "USD"),
    Choice::new("EUR", "EUR"),
    Choice::new("GBP", "GBP"),
    Choice::new("CAD", "CAD"),
];

pub const CONVERSION_MECHANISMS: &[Choice] = &[Choice::new("RATIO_CONVERSION", "Ratio Conversion")];

pub const PAYMENT_ACH: &str = "ACH";
pub const PAYMENT_WIRE_TRANSFER: &str = "WIRE_TRANSFER";
pub const PAYMENT_CARD_OR_WALLET: &str = "CREDIT_CARD_OR_DIGITAL_WALLET";
pub const PAYMENT_CHECK: &str = "CHECK";

pub const PAYMENT_METHODS: &[Choice] = &[
    Choice::new(PAYMENT_ACH, "ACH Transfer"),
    Choice::new(PAYMENT_WIRE_TRANSFER, "Wire Transfer"),
    Choice::new(PAYMENT_CARD_OR_WALLET, "Credit Card / Digital Wallet"),
    Choice::new(PAYMENT_CHECK, "Check"),
];

/// Human label of a payment method token.
pub fn payment_method_label(token: &str) -> &str {
    PAYMENT_METHODS
        .iter()
        .find(|c| c.value == token)
        .map(|c| c.label)
        .unwrap_or(token)
}

// ── Issuer ──────────────────────────────────────────────────────────────────

static ISSUER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("legal_name", "Legal Name", Text, "Company Identity"),
    FieldSpec::new("dba", "Doing Business As (DBA)", Text, "Company Identity"),
    FieldSpec::new("organization_type", "Organization Type", FieldKind::Choice(ORGANIZATION_TYPES), "Company Identity"),
    FieldSpec::new("central_index_key", "Central Index Key (CIK)", Text, "Company Identity"),
    FieldSpec::new("country_of_formation", "Country of Formation", Upper, "Formation"),
    FieldSpec::new("country_subdivision_of_formation", "State / Province of Formation", Upper, "Formation"),
    FieldSpec::new("formation_date", "Formation Date", Date, "Formation"),
    FieldSpec::new("active_date", "Active Date", Date, "Formation"),
    FieldSpec::new("year_end", "Fiscal Year End", Text, "Formation"),
    FieldSpec::new("tax_ids.tax_id", "Tax ID", Text, "Tax Identification"),
    FieldSpec::new("tax_ids.country", "Tax ID Country", Upper, "Tax Identification"),
    FieldSpec::new("legal_address.street1", "Street Address 1", Text, "Legal Address"),
    FieldSpec::new("legal_address.street2", "Street Address 2 (Optional)", Text, "Legal Address"),
    FieldSpec::new("legal_address.city", "City", Text, "Legal Address"),
    FieldSpec::new("legal_address.state", "State / Province", Upper, "Legal Address"),
    FieldSpec::new("legal_address.postalCode", "Postal Code", Text, "Legal Address"),
    FieldSpec::new("legal_address.country", "Country", Upper, "Legal Address"),
    FieldSpec::new("contact_address.street1", "Street Address 1", Text, "Contact Address"),
    FieldSpec::new("contact_address.street2", "Street Address 2 (Optional)", Text, "Contact Address"),
    FieldSpec::new("contact_address.city", "City", Text, "Contact Address"),
    FieldSpec::new("contact_address.state", "State / Province", Upper, "Contact Address"),
    FieldSpec::new("contact_address.postalCode", "Postal Code", Text, "Contact Address"),
    FieldSpec::new("contact_address.country", "Country", Upper, "Contact Address"),
    FieldSpec::new("email", "Email", Text, "Contact"),
    FieldSpec::new("phone", "Phone", Text, "Contact"),
    FieldSpec::new("company_website", "Company Website", Text, "Contact"),
    FieldSpec::new("is_sec_reporting", "SEC Reporting Company", Toggle, "Compliance"),
    FieldSpec::new("is_shell_issuer", "Shell Issuer", Toggle, "Compliance"),
    FieldSpec::new("original_medallion_waiver", "Original Medallion Waiver", Toggle, "Compliance"),
    FieldSpec::new("requires_issuer_approval_for_legal_counsel", "Issuer Approval for Legal Counsel", Toggle, "Compliance"),
    FieldSpec::new("quorum_requirement", "Quorum Requirement", Text, "Governance"),
    FieldSpec::new("drs_payment_fee", "DRS Payment Fee", Text, "Governance"),
];

impl SectionRecord for IssuerInfo {
    const SECTION: Section = Section::Issuer;

    fn fields() -> &'static [FieldSpec] {
        ISSUER_FIELDS
    }

    fn of(draft: &Draft) -> &Self {
        &draft.issuer
    }

    fn into_data(self) -> SectionData {
        SectionData::Issuer(self)
    }
}

// ── Issue ───────────────────────────────────────────────────────────────────

static ISSUE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("internal_id", "Internal ID", Text, "Security Class"),
    FieldSpec::new("name", "Issue Name", Text, "Security Class"),
    FieldSpec::new("class_type", "Class Type", FieldKind::Choice(CLASS_TYPES), "Security Class"),
    FieldSpec::new("class_state", "Class State", FieldKind::Choice(CLASS_STATES), "Security Class"),
    FieldSpec::new("cusip", "CUSIP", Upper, "Identifiers"),
    FieldSpec::new("isin", "ISIN", Upper, "Identifiers"),
    FieldSpec::new("dtc_eligible", "DTC Eligible", Toggle, "Eligibility"),
    FieldSpec::new("dtc_eligibility_change_date", "DTC Eligibility Change Date", Date, "Eligibility"),
    FieldSpec::new("fast_eligible", "FAST Eligible", Toggle, "Eligibility"),
    FieldSpec::new("fast_eligibility_change_date", "FAST Eligibility Change Date", Date, "Eligibility"),
    FieldSpec::new("board_approval_date", "Board Approval Date", Date, "Approvals"),
    FieldSpec::new("authorization_date", "Authorization Date", Date, "Approvals"),
    FieldSpec::new("votes_per_share", "Votes per Share", Text, "Share Terms"),
    FieldSpec::new("dividend", "Pays Dividend", Toggle, "Share Terms"),
    FieldSpec::new("par_value.amount", "Par Value", Text, "Share Terms"),
    FieldSpec::new("par_value.currency", "Par Value Currency", FieldKind::Choice(CURRENCIES), "Share Terms"),
    FieldSpec::new("price_per_share.amount", "Price per Share", Text, "Share Terms"),
    FieldSpec::new("price_per_share.currency", "Price Currency", FieldKind::Choice(CURRENCIES), "Share Terms"),
    FieldSpec::new("initial_shares_authorized", "Initial Shares Authorized", Text, "Share Terms"),
    FieldSpec::new("allowable_decimals", "Allowable Decimals", Text, "Share Terms"),
    FieldSpec::new("accept_sales", "Accept Sales", Toggle, "Trading"),
    FieldSpec::new("fractional_shares", "Fractional Shares", Toggle, "Trading"),
    FieldSpec::new("allow_certificates", "Allow Certificates", Toggle, "Trading"),
];

impl SectionRecord for IssueInfo {
    const SECTION: Section = Section::Issue;

    fn fields() -> &'static [FieldSpec] {
        ISSUE_FIELDS
    }

    fn of(draft: &Draft) -> &Self {
        &draft.issue
    }

    fn into_data(self) -> SectionData {
        SectionData::Issue(self)
    }

    fn is_visible(&self, key: &str) -> bool {
        match key {
            "dtc_eligibility_change_date" => self.dtc_eligible,
            "fast_eligibility_change_date" => self.fast_eligible,
            _ => true,
        }
    }
}

// ── Conversion ──────────────────────────────────────────────────────────────

static CONVERSION_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("internal_id", "Internal ID", Text, "Preferred Security"),
    FieldSpec::new("participating", "Participating", Toggle, "Preferred Security"),
    FieldSpec::new("start_date", "Start Date", Date, "Term"),
    FieldSpec::new("maturity_date", "Maturity Date", Date, "Term"),
    FieldSpec::new("redeemable", "Redeemable", Toggle, "Redemption"),
    FieldSpec::new("redemption_date", "Redemption Date", Date, "Redemption"),
    FieldSpec::new("conversion_mechanism_type", "Conversion Mechanism Type", FieldKind::Choice(CONVERSION_MECHANISMS), "Conversion"),
    FieldSpec::new("converts_to", "Converts To (Issue Internal ID)", Text, "Conversion"),
    FieldSpec::new("conversion_calculation", "Conversion Calculation", Text, "Conversion"),
    FieldSpec::new("online_conversions", "Enable Online Conversions", Toggle, "Conversion"),
];

impl ConversionTerms {
    /// Conversions must be processed by hand: a mechanism is set but online
    /// conversions are off.
    pub fn requires_manual_processing(&self) -> bool {
        !self.online_conversions && !self.conversion_mechanism_type.is_empty()
    }
}

impl SectionRecord for ConversionTerms {
    const SECTION: Section = Section::Conversion;

    fn fields() -> &'static [FieldSpec] {
        CONVERSION_FIELDS
    }

    fn of(draft: &Draft) -> &Self {
        &draft.conversion
    }

    fn into_data(self) -> SectionData {
        SectionData::Conversion(self)
    }

    fn is_visible(&self, key: &str) -> bool {
        match key {
            "redemption_date" => self.redeemable,
            "converts_to" | "conversion_calculation" => !self.conversion_mechanism_type.is_empty(),
            _ => true,
        }
    }

    fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.requires_manual_processing() {
            lines.push("Conversions will be processed manually by the transfer agent.".to_string());
        }
        if !self.conversion_mechanism_type.is_empty() && !self.converts_to.is_empty() {
            let mut line = format!(
                "{} into {}",
                self.conversion_mechanism_type.replace('_', " "),
                self.converts_to
            );
            if !self.conversion_calculation.is_empty() {
                line.push_str(&format!(" at {}", self.conversion_calculation));
            }
            lines.push(line);
        }
        lines
    }
}

// ── Warrant ─────────────────────────────────────────────────────────────────

static WARRANT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("internal_id", "Internal ID", Text, "Basic Information"),
    FieldSpec::new("exercise_to", "Exercise To (Issue Internal ID)", Text, "Basic Information"),
    FieldSpec::new("expiry_date", "Expiry Date", Date, "Basic Information"),
    FieldSpec::new("is_exercisable", "Currently Exercisable", Toggle, "Basic Information"),
    FieldSpec::new("warrant_exercise_terms_price", "Exercise Price", Text, "Exercise Terms"),
    FieldSpec::new("exercise_ratio", "Exercise Ratio", Text, "Exercise Terms"),
    FieldSpec::new("warrant_exercise_terms_start_date", "Exercise Start Date", Date, "Exercise Terms"),
    FieldSpec::new("warrant_exercise_terms_end_date", "Exercise End Date", Date, "Exercise Terms"),
    FieldSpec::new("number_of_exercise_terms", "Number of Exercise Terms", Text, "Exercise Terms"),
    FieldSpec::new("allowed_payment_methods", "Allowed Payment Methods", FieldKind::MultiChoice(PAYMENT_METHODS), "Payment Methods"),
    FieldSpec::new("cheque_payment_delivery_address.street1", "Street Address 1", Text, "Check Payment Delivery Address"),
    FieldSpec::new("cheque_payment_delivery_address.street2", "Street Address 2 (Optional)", Text, "Check Payment Delivery Address"),
    FieldSpec::new("cheque_payment_delivery_address.city", "City", Text, "Check Payment Delivery Address"),
    FieldSpec::new("cheque_payment_delivery_address.state", "State / Province", Upper, "Check Payment Delivery Address"),
    FieldSpec::new("cheque_payment_delivery_address.postalCode", "Postal Code", Text, "Check Payment Delivery Address"),
    FieldSpec::new("cheque_payment_delivery_address.country", "Country", Upper, "Check Payment Delivery Address"),
    FieldSpec::new("wire_transfer_financial_institution_name", "Financial Institution Name", Text, "Wire Transfer"),
    FieldSpec::new("wire_transfer_financial_institution_swift_bic_code", "SWIFT / BIC Code", Upper, "Wire Transfer"),
    FieldSpec::new("wire_transfer_aba_number", "ABA Routing Number", Text, "Wire Transfer"),
    FieldSpec::new("wire_transfer_chips_number", "CHIPS Number (Optional)", Text, "Wire Transfer"),
    FieldSpec::new("wire_transfer_branch_address.street1", "Street Address 1", Text, "Wire Transfer Branch Address"),
    FieldSpec::new("wire_transfer_branch_address.street2", "Street Address 2 (Optional)", Text, "Wire Transfer Branch Address"),
    FieldSpec::new("wire_transfer_branch_address.city", "City", Text, "Wire Transfer Branch Address"),
    FieldSpec::new("wire_transfer_branch_address.state", "State / Province", Upper, "Wire Transfer Branch Address"),
    FieldSpec::new("wire_transfer_branch_address.postalCode", "Postal Code", Text, "Wire Transfer Branch Address"),
    FieldSpec::new("wire_transfer_branch_address.country", "Country", Upper, "Wire Transfer Branch Address"),
];

impl WarrantTerms {
    /// Selected payment method tokens in stored order.
    pub fn payment_methods(&self) -> Vec<&str> {
        split_tokens(&self.allowed_payment_methods)
    }

    pub fn has_payment_method(&self, token: &str) -> bool {
        has_token(&self.allowed_payment_methods, token)
    }

    /// Copy with `token` added to or removed from the payment methods.
    pub fn toggle_payment_method(&self, token: &str) -> Self {
        Self {
            allowed_payment_methods: toggle_token(&self.allowed_payment_methods, token),
            ..self.clone()
        }
    }

    pub fn shows_cheque_address(&self) -> bool {
        self.has_payment_method(PAYMENT_CHECK)
    }

    pub fn shows_wire_transfer(&self) -> bool {
        self.has_payment_method(PAYMENT_WIRE_TRANSFER)
    }
}

impl SectionRecord for WarrantTerms {
    const SECTION: Section = Section::Warrant;

    fn fields() -> &'static [FieldSpec] {
        WARRANT_FIELDS
    }

    fn of(draft: &Draft) -> &Self {
        &draft.warrant
    }

    fn into_data(self) -> SectionData {
        SectionData::Warrant(self)
    }

    fn is_visible(&self, key: &str) -> bool {
        if key.starts_with("cheque_payment_delivery_address.") {
            self.shows_cheque_address()
        } else if key.starts_with("wire_transfer_") {
            self.shows_wire_transfer()
        } else {
            true
        }
    }

    fn summary(&self) -> Vec<String> {
        let methods = self.payment_methods();
        if methods.is_empty() {
            return vec!["No payment methods selected.".to_string()];
        }
        let labels: Vec<&str> = methods.iter().map(|m| payment_method_label(m)).collect();
        vec![format!("Payment methods: {}", labels.join(", "))]
    }
}

// ── Listing ─────────────────────────────────────────────────────────────────

static LISTING_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("internal_id", "Internal ID", Text, "Listing"),
    FieldSpec::new("ticker", "Ticker Symbol", Upper, "Listing"),
    FieldSpec::new("exchange", "Exchange", Text, "Listing"),
    FieldSpec::new("listing_date", "Listing Date", Date, "Listing"),
];

impl SectionRecord for ListingInfo {
    const SECTION: Section = Section::Listing;

    fn fields() -> &'static [FieldSpec] {
        LISTING_FIELDS
    }

    fn of(draft: &Draft) -> &Self {
        &draft.listing
    }

    fn into_data(self) -> SectionData {
        SectionData::Listing(self)
    }

    fn summary(&self) -> Vec<String> {
        if self.ticker.is_empty() || self.exchange.is_empty() {
            return Vec::new();
        }
        let mut line = format!("{} listed on {}", self.ticker, self.exchange);
        if !self.listing_date.is_empty() {
            line.push_str(&format!(" since {}", self.listing_date));
        }
        vec![line]
    }
}

// ── Issuer admin ────────────────────────────────────────────────────────────

static ISSUER_ADMIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("legal_name", "Legal Name", Text, "Administrator"),
    FieldSpec::new("email_address", "Email Address", Text, "Administrator"),
    FieldSpec::new("job_title", "Job Title", Text, "Administrator"),
    FieldSpec::new("admin", "Administrator", Toggle, "Roles"),
    FieldSpec::new("director", "Director", Toggle, "Roles"),
    FieldSpec::new("authorized_officer", "Authorized Officer", Toggle, "Roles"),
    FieldSpec::new("on_certificate_of_incumbency", "On Certificate of Incumbency", Toggle, "Compliance"),
    FieldSpec::new("kyc_complete", "KYC Complete", Toggle, "Compliance"),
    FieldSpec::new("authenticated_email", "Authenticated Email", Toggle, "Compliance"),
];

/// Compliance progress over the three administrator checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplianceStatus {
    None,
    Partial(u8),
    Full,
}

impl IssuerAdmin {
    /// Number of assigned roles (admin, director, authorized officer).
    pub fn role_count(&self) -> u8 {
        [self.admin, self.director, self.authorized_officer]
            .iter()
            .filter(|b| **b)
            .count() as u8
    }

    pub fn compliance_status(&self) -> ComplianceStatus {
        let done = [
            self.on_certificate_of_incumbency,
            self.kyc_complete,
            self.authenticated_email,
        ]
        .iter()
        .filter(|b| **b)
        .count() as u8;
        match done {
            0 => ComplianceStatus::None,
            3 => ComplianceStatus::Full,
            n => ComplianceStatus::Partial(n),
        }
    }
}

impl SectionRecord for IssuerAdmin {
    const SECTION: Section = Section::IssuerAdmin;

    fn fields() -> &'static [FieldSpec] {
        ISSUER_ADMIN_FIELDS
    }

    fn of(draft: &Draft) -> &Self {
        &draft.issuer_admin
    }

    fn into_data(self) -> SectionData {
        SectionData::IssuerAdmin(self)
    }

    fn summary(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match self.role_count() {
            0 => {}
            1 => lines.push("1 role assigned".to_string()),
            n => lines.push(format!("{n} roles assigned")),
        }
        match self.compliance_status() {
            ComplianceStatus::None => {}
            ComplianceStatus::Partial(n) => lines.push(format!(
                "Partial Compliance: {n} of 3 compliance requirements completed."
            )),
            ComplianceStatus::Full => lines
                .push("Fully Compliant: All compliance requirements have been met.".to_string()),
        }
        if !self.legal_name.is_empty() && !self.email_address.is_empty() {
            let mut contact = format!("{} <{}>", self.legal_name, self.email_address);
            if !self.job_title.is_empty() {
                contact.push_str(&format!(", {}", self.job_title));
            }
            lines.push(contact);
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::draft::fields::FieldValue;

    fn visible_keys<S: SectionRecord>(section: &S) -> Vec<&'static str> {
        section.visible_fields().iter().map(|f| f.key).collect()
    }

    #[test]
    fn test_every_field_path_resolves() {
        fn check<S: SectionRecord>() {
            let record = S::default();
            for field_spec in S::fields() {
                let value = record.field(field_spec.key);
                assert!(value.is_ok(), "{} does not resolve", field_spec.key);
                let is_flag = value.unwrap().as_flag().is_some();
                assert_eq!(is_flag, field_spec.kind == FieldKind::Toggle, "{}", field_spec.key);
            }
        }
        check::<IssuerInfo>();
        check::<IssueInfo>();
        check::<ConversionTerms>();
        check::<WarrantTerms>();
        check::<ListingInfo>();
        check::<IssuerAdmin>();
    }

    #[test]
    fn test_wire_and_cheque_visible_together() {
        let warrant = WarrantTerms {
            allowed_payment_methods: "WIRE_TRANSFER,CHECK".to_string(),
            ..Default::default()
        };
        let keys = visible_keys(&warrant);
        assert!(keys.contains(&"wire_transfer_financial_institution_name"));
        assert!(keys.contains(&"wire_transfer_branch_address.city"));
        assert!(keys.contains(&"cheque_payment_delivery_address.street1"));
    }

    #[test]
    fn test_ach_hides_wire_and_cheque() {
        let warrant = WarrantTerms {
            allowed_payment_methods: "ACH".to_string(),
            ..Default::default()
        };
        let keys = visible_keys(&warrant);
        assert!(!keys.iter().any(|k| k.starts_with("wire_transfer_")));
        assert!(!keys.iter().any(|k| k.starts_with("cheque_payment_delivery_address.")));
        assert!(keys.contains(&"allowed_payment_methods"));
    }

    #[test]
    fn test_redeemable_reveals_redemption_date() {
        let conversion = ConversionTerms {
            internal_id: "PREF-A".to_string(),
            maturity_date: "2030-01-01".to_string(),
            ..Default::default()
        };
        assert!(!visible_keys(&conversion).contains(&"redemption_date"));

        let updated = conversion
            .with_field("redeemable", FieldValue::Flag(true))
            .unwrap();
        assert!(visible_keys(&updated).contains(&"redemption_date"));
        assert_eq!(updated.internal_id, conversion.internal_id);
        assert_eq!(updated.maturity_date, conversion.maturity_date);
        assert_eq!(updated.redemption_date, conversion.redemption_date);
    }

    #[test]
    fn test_conversion_target_fields_follow_mechanism() {
        let mut conversion = ConversionTerms::default();
        assert!(!conversion.is_visible("converts_to"));
        conversion.conversion_mechanism_type = "RATIO_CONVERSION".to_string();
        assert!(conversion.is_visible("converts_to"));
        assert!(conversion.is_visible("conversion_calculation"));
        assert!(conversion.requires_manual_processing());
    }

    #[test]
    fn test_issue_eligibility_dates() {
        let mut issue = IssueInfo::default();
        assert!(!issue.is_visible("dtc_eligibility_change_date"));
        assert!(!issue.is_visible("fast_eligibility_change_date"));
        issue.fast_eligible = true;
        assert!(issue.is_visible("fast_eligibility_change_date"));
        assert!(!issue.is_visible("dtc_eligibility_change_date"));
    }

    #[test]
    fn test_toggle_payment_method() {
        let warrant = WarrantTerms::default()
            .toggle_payment_method(PAYMENT_ACH)
            .toggle_payment_method(PAYMENT_CHECK);
        assert_eq!(warrant.allowed_payment_methods, "ACH,CHECK");
        assert!(warrant.shows_cheque_address());
        let warrant = warrant.toggle_payment_method(PAYMENT_ACH);
        assert_eq!(warrant.allowed_payment_methods, "CHECK");
    }

    #[test]
    fn test_admin_roles_and_compliance() {
        let mut admin = IssuerAdmin::default();
        assert_eq!(admin.role_count(), 0);
        assert_eq!(admin.compliance_status(), ComplianceStatus::None);
        assert!(admin.summary().is_empty());

        admin.director = true;
        admin.kyc_complete = true;
        assert_eq!(admin.role_count(), 1);
        assert_eq!(admin.compliance_status(), ComplianceStatus::Partial(1));

        admin.on_certificate_of_incumbency = true;
        admin.authenticated_email = true;
        assert_eq!(admin.compliance_status(), ComplianceStatus::Full);
        assert!(admin.summary().iter().any(|l| l.starts_with("Fully Compliant")));
    }

    #[test]
    fn test_listing_summary() {
        let mut listing = ListingInfo {
            ticker: "ACME".to_string(),
            ..Default::default()
        };
        assert!(listing.summary().is_empty());
        listing.exchange = "NASDAQ".to_string();
        listing.listing_date = "2024-05-01".to_string();
        assert_eq!(listing.summary(), vec!["ACME listed on NASDAQ since 2024-05-01"]);
    }

    #[test]
    fn test_payment_method_label_fallback() {
        assert_eq!(payment_method_label("CHECK"), "Check");
        assert_eq!(payment_method_label("BARTER"), "BARTER");
    }
}
