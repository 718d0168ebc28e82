//! Read-only review of the whole draft.
//!
//! [`build_review`] turns the draft into one card per section. Identity
//! fields always appear (rendered `-` when blank); optional fields are left
//! out until they have a value. Flags become badges.

use crate::core::draft::{Address, Amount, Draft, WarrantTerms};
use crate::core::wizard::WizardStep;

/// Placeholder for a blank always-shown field.
pub const BLANK: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    pub label: &'static str,
    pub value: String,
}

/// A titled group under the main rows of a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewBlock {
    /// Short labels for flags that are set. Kept even when empty.
    Badges {
        heading: &'static str,
        badges: Vec<String>,
    },
    /// Labelled values shown as their own group.
    Rows {
        heading: &'static str,
        rows: Vec<ReviewRow>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCard {
    pub title: &'static str,
    /// Step that edits this card's section.
    pub step: WizardStep,
    pub rows: Vec<ReviewRow>,
    pub blocks: Vec<ReviewBlock>,
}

impl ReviewCard {
    fn new(title: &'static str, step: WizardStep) -> Self {
        Self {
            title,
            step,
            rows: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// Always shown; blank renders as `-`.
    fn required(&mut self, label: &'static str, value: &str) {
        self.rows.push(row(label, or_blank(value)));
    }

    /// Shown only when set.
    fn optional(&mut self, label: &'static str, value: &str) {
        if !value.is_empty() {
            self.rows.push(row(label, value.to_string()));
        }
    }

    fn badges(&mut self, heading: &'static str, flags: &[(bool, &str)]) {
        let badges = flags
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, label)| label.to_string())
            .collect();
        self.blocks.push(ReviewBlock::Badges { heading, badges });
    }
}

fn row(label: &'static str, value: String) -> ReviewRow {
    ReviewRow { label, value }
}

fn or_blank(value: &str) -> String {
    if value.is_empty() {
        BLANK.to_string()
    } else {
        value.to_string()
    }
}

/// Enumerated token for display: `LIMITED_PARTNERSHIP` → `LIMITED PARTNERSHIP`.
pub fn humanize_token(token: &str) -> String {
    token.replace('_', " ")
}

/// Address on one line, `-` without a first street line.
pub fn format_address(address: &Address) -> String {
    address.one_line().unwrap_or_else(|| BLANK.to_string())
}

fn format_amount(amount: &Amount) -> String {
    format!("{} {}", amount.amount, amount.currency)
}

/// Group the integer part of a numeric string with commas, keeping at most
/// three fraction digits. Non-numeric input is returned unchanged.
pub fn format_thousands(raw: &str) -> String {
    let trimmed = raw.trim();
    let Ok(value) = trimmed.parse::<f64>() else {
        return raw.to_string();
    };
    if !value.is_finite() {
        return raw.to_string();
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// Cards for every section, in step order.
pub fn build_review(draft: &Draft) -> Vec<ReviewCard> {
    vec![
        issuer_card(draft),
        issue_card(draft),
        conversion_card(draft),
        warrant_card(&draft.warrant),
        listing_card(draft),
        issuer_admin_card(draft),
    ]
}

fn issuer_card(draft: &Draft) -> ReviewCard {
    let issuer = &draft.issuer;
    let mut card = ReviewCard::new("Issuer Information", WizardStep::Issuer);

    card.required("Legal Name", &issuer.legal_name);
    card.optional("DBA", &issuer.dba);
    card.required("Organization Type", &humanize_token(&issuer.organization_type));
    card.required("Central Index Key", &issuer.central_index_key);
    card.required("Country of Formation", &issuer.country_of_formation);
    card.optional("State of Formation", &issuer.country_subdivision_of_formation);
    card.required("Formation Date", &issuer.formation_date);
    card.required("Fiscal Year End", &issuer.year_end);
    if !issuer.tax_ids.tax_id.is_empty() {
        card.rows.push(row(
            "Tax ID / EIN",
            format!("{} ({})", issuer.tax_ids.tax_id, issuer.tax_ids.country),
        ));
    }
    card.optional("Email", &issuer.email);
    card.optional("Phone", &issuer.phone);
    card.optional("Website", &issuer.company_website);
    card.rows.push(row("Legal Address", format_address(&issuer.legal_address)));
    if !issuer.contact_address.street1.is_empty() {
        card.rows
            .push(row("Contact Address", format_address(&issuer.contact_address)));
    }

    card.badges(
        "Compliance Status",
        &[
            (issuer.is_sec_reporting, "SEC Reporting"),
            (issuer.is_shell_issuer, "Shell Issuer"),
            (issuer.original_medallion_waiver, "Medallion Waiver"),
            (
                issuer.requires_issuer_approval_for_legal_counsel,
                "Requires Counsel Approval",
            ),
        ],
    );
    card
}

fn issue_card(draft: &Draft) -> ReviewCard {
    let issue = &draft.issue;
    let mut card = ReviewCard::new("Issue Information", WizardStep::Issue);

    card.required("Internal ID", &issue.internal_id);
    card.required("Class Name", &issue.name);
    card.required("Class Type", &humanize_token(&issue.class_type));
    card.required("Class State", &issue.class_state);
    card.optional("CUSIP", &issue.cusip);
    card.optional("ISIN", &issue.isin);
    let votes = if issue.votes_per_share.is_empty() {
        "0".to_string()
    } else {
        issue.votes_per_share.clone()
    };
    card.rows.push(row("Votes Per Share", votes));
    card.required(
        "Initial Shares Authorized",
        &if issue.initial_shares_authorized.is_empty() {
            String::new()
        } else {
            format_thousands(&issue.initial_shares_authorized)
        },
    );
    if !issue.par_value.amount.is_empty() {
        card.rows.push(row("Par Value", format_amount(&issue.par_value)));
    }
    if !issue.price_per_share.amount.is_empty() {
        card.rows
            .push(row("Price Per Share", format_amount(&issue.price_per_share)));
    }
    card.optional("Authorization Date", &issue.authorization_date);
    card.optional("Board Approval Date", &issue.board_approval_date);

    card.badges(
        "Security Features",
        &[
            (issue.dtc_eligible, "DTC Eligible"),
            (issue.fast_eligible, "FAST Eligible"),
            (issue.dividend, "Dividend Paying"),
            (issue.fractional_shares, "Fractional Shares"),
            (issue.allow_certificates, "Certificates Allowed"),
            (issue.accept_sales, "Sales Accepted"),
        ],
    );
    card
}

fn conversion_card(draft: &Draft) -> ReviewCard {
    let conversion = &draft.conversion;
    let mut card = ReviewCard::new("Preferred Information", WizardStep::Conversion);

    card.optional("Internal ID", &conversion.internal_id);
    card.optional("Start Date", &conversion.start_date);
    card.optional("Maturity Date", &conversion.maturity_date);
    card.optional("Redemption Date", &conversion.redemption_date);
    card.optional(
        "Conversion Mechanism Type",
        &humanize_token(&conversion.conversion_mechanism_type),
    );
    card.optional("Converts To", &conversion.converts_to);
    card.optional("Conversion Calculation", &conversion.conversion_calculation);

    card.badges(
        "Features",
        &[
            (conversion.participating, "Participating"),
            (conversion.redeemable, "Redeemable"),
            (conversion.online_conversions, "Online Conversions"),
        ],
    );
    card
}

fn warrant_card(warrant: &WarrantTerms) -> ReviewCard {
    let mut card = ReviewCard::new("Warrant Information", WizardStep::Warrant);

    card.optional("Internal ID", &warrant.internal_id);
    if !warrant.warrant_exercise_terms_price.is_empty() {
        card.rows.push(row(
            "Exercise Price",
            format!("${}", warrant.warrant_exercise_terms_price),
        ));
    }
    card.optional("Exercise Ratio", &warrant.exercise_ratio);
    card.optional("Number of Exercise Terms", &warrant.number_of_exercise_terms);
    card.optional("Exercise Start Date", &warrant.warrant_exercise_terms_start_date);
    card.optional("Exercise End Date", &warrant.warrant_exercise_terms_end_date);
    card.optional("Expiry Date", &warrant.expiry_date);
    card.optional("Exercise To", &warrant.exercise_to);

    let methods = warrant.payment_methods();
    if !methods.is_empty() {
        card.blocks.push(ReviewBlock::Badges {
            heading: "Allowed Payment Methods",
            badges: methods.iter().map(|m| humanize_token(m)).collect(),
        });
    }

    if warrant.is_exercisable {
        card.badges("Status", &[(true, "Exercisable")]);
    }

    if !warrant.cheque_payment_delivery_address.street1.is_empty() {
        card.blocks.push(ReviewBlock::Rows {
            heading: "Check Payment Delivery Address",
            rows: vec![row(
                "Address",
                format_address(&warrant.cheque_payment_delivery_address),
            )],
        });
    }

    if !warrant.wire_transfer_financial_institution_name.is_empty() {
        let mut rows = vec![row(
            "Financial Institution",
            warrant.wire_transfer_financial_institution_name.clone(),
        )];
        let optional = [
            (
                "SWIFT/BIC Code",
                &warrant.wire_transfer_financial_institution_swift_bic_code,
            ),
            ("ABA Routing Number", &warrant.wire_transfer_aba_number),
            ("CHIPS Number", &warrant.wire_transfer_chips_number),
        ];
        for (label, value) in optional {
            if !value.is_empty() {
                rows.push(row(label, value.clone()));
            }
        }
        if !warrant.wire_transfer_branch_address.street1.is_empty() {
            rows.push(row(
                "Branch Address",
                format_address(&warrant.wire_transfer_branch_address),
            ));
        }
        card.blocks.push(ReviewBlock::Rows {
            heading: "Wire Transfer Details",
            rows,
        });
    }
    card
}

fn listing_card(draft: &Draft) -> ReviewCard {
    let listing = &draft.listing;
    let mut card = ReviewCard::new("Listing Information", WizardStep::Listing);
    card.optional("Internal ID", &listing.internal_id);
    card.optional("Ticker Symbol", &listing.ticker);
    card.optional("Exchange", &listing.exchange);
    card.optional("Listing Date", &listing.listing_date);
    card
}

fn issuer_admin_card(draft: &Draft) -> ReviewCard {
    let admin = &draft.issuer_admin;
    let mut card = ReviewCard::new("Issuer Administrator", WizardStep::IssuerAdmin);

    card.optional("Legal Name", &admin.legal_name);
    card.optional("Email Address", &admin.email_address);
    card.optional("Job Title", &admin.job_title);

    card.badges(
        "Roles & Permissions",
        &[
            (admin.admin, "Administrator"),
            (admin.director, "Director"),
            (admin.authorized_officer, "Authorized Officer"),
        ],
    );
    card.badges(
        "Compliance Status",
        &[
            (admin.on_certificate_of_incumbency, "On Certificate of Incumbency"),
            (admin.kyc_complete, "KYC Complete"),
            (admin.authenticated_email, "Email Authenticated"),
        ],
    );
    card
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn find<'a>(card: &'a ReviewCard, label: &str) -> Option<&'a str> {
        card.rows
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    }

    #[rstest]
    #[case("1000000", "1,000,000")]
    #[case("1234.5", "1,234.5")]
    #[case("999", "999")]
    #[case("0.12345", "0.123")]
    #[case("-2500", "-2,500")]
    #[case(" 42 ", "42")]
    #[case("lots", "lots")]
    fn test_format_thousands(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(format_thousands(raw), expected);
    }

    #[test]
    fn test_empty_draft_placeholders() {
        let cards = build_review(&Draft::new());
        assert_eq!(cards.len(), 6);

        let issuer = &cards[0];
        assert_eq!(find(issuer, "Legal Name"), Some(BLANK));
        assert_eq!(find(issuer, "Organization Type"), Some(BLANK));
        assert_eq!(find(issuer, "Legal Address"), Some(BLANK));
        assert_eq!(find(issuer, "DBA"), None);
        assert_eq!(find(issuer, "Contact Address"), None);

        let issue = &cards[1];
        assert_eq!(find(issue, "Votes Per Share"), Some("0"));
        assert_eq!(find(issue, "Initial Shares Authorized"), Some(BLANK));
        assert_eq!(find(issue, "Par Value"), None);

        assert!(cards[4].rows.is_empty());
    }

    #[test]
    fn test_cards_follow_step_order() {
        let steps: Vec<WizardStep> = build_review(&Draft::new()).iter().map(|c| c.step).collect();
        assert_eq!(steps, WizardStep::ALL[..6].to_vec());
    }

    #[test]
    fn test_issuer_formatting() {
        let mut draft = Draft::new();
        draft.issuer.organization_type = "LIMITED_LIABILITY_CORPORATION".to_string();
        draft.issuer.tax_ids.tax_id = "12-3456789".to_string();
        draft.issuer.legal_address.street1 = "1 Main St".to_string();
        draft.issuer.legal_address.city = "Dover".to_string();
        draft.issuer.legal_address.state = "DE".to_string();
        draft.issuer.is_sec_reporting = true;

        let card = &build_review(&draft)[0];
        assert_eq!(find(card, "Organization Type"), Some("LIMITED LIABILITY CORPORATION"));
        assert_eq!(find(card, "Tax ID / EIN"), Some("12-3456789 (US)"));
        assert_eq!(find(card, "Legal Address"), Some("1 Main St, Dover, DE, US"));
        assert_eq!(
            card.blocks[0],
            ReviewBlock::Badges {
                heading: "Compliance Status",
                badges: vec!["SEC Reporting".to_string()],
            }
        );
    }

    #[test]
    fn test_issue_amounts_and_shares() {
        let mut draft = Draft::new();
        draft.issue.par_value.amount = "0.001".to_string();
        draft.issue.price_per_share.amount = "12.50".to_string();
        draft.issue.price_per_share.currency = "EUR".to_string();
        draft.issue.initial_shares_authorized = "10000000".to_string();

        let card = &build_review(&draft)[1];
        assert_eq!(find(card, "Par Value"), Some("0.001 USD"));
        assert_eq!(find(card, "Price Per Share"), Some("12.50 EUR"));
        assert_eq!(find(card, "Initial Shares Authorized"), Some("10,000,000"));
    }

    #[test]
    fn test_warrant_payment_blocks() {
        let mut draft = Draft::new();
        draft.warrant.warrant_exercise_terms_price = "1.25".to_string();
        draft.warrant.allowed_payment_methods = "WIRE_TRANSFER,CHECK".to_string();
        draft.warrant.wire_transfer_financial_institution_name = "First Bank".to_string();
        draft.warrant.wire_transfer_aba_number = "021000021".to_string();
        draft.warrant.cheque_payment_delivery_address.street1 = "PO Box 9".to_string();

        let card = &build_review(&draft)[3];
        assert_eq!(find(card, "Exercise Price"), Some("$1.25"));
        assert!(card.blocks.contains(&ReviewBlock::Badges {
            heading: "Allowed Payment Methods",
            badges: vec!["WIRE TRANSFER".to_string(), "CHECK".to_string()],
        }));

        let wire = card.blocks.iter().find_map(|b| match b {
            ReviewBlock::Rows { heading: "Wire Transfer Details", rows } => Some(rows),
            _ => None,
        });
        let wire = wire.unwrap();
        assert_eq!(wire.len(), 2);
        assert_eq!(wire[1].value, "021000021");

        assert!(card.blocks.iter().any(|b| matches!(
            b,
            ReviewBlock::Rows { heading: "Check Payment Delivery Address", .. }
        )));
    }

    #[test]
    fn test_warrant_without_payment_has_no_blocks() {
        let card = &build_review(&Draft::new())[3];
        assert!(card.blocks.is_empty());
    }
}
