//! Scheme eligibility evaluation
//!
//! Applies the scheme's criteria to a single claim. Checks run in a fixed
//! order (date, product, commission, limitation) and each records its
//! evidence; the order determines the order of `reasons`, not the verdict.
//!
//! # Verdict
//!
//! ```text
//! critical = date_ok && product_ok && limitation_ok
//!
//! critical &&  commission_ok  -> Eligible
//! critical && !commission_ok  -> RequiresReview
//! otherwise                   -> Ineligible
//! ```

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use core_kernel::{days_between, parse_claim_date, years_between, DateParseError};
use crate::claim::ClaimRecord;
use crate::rules::SchemeRules;

/// Agreements younger than this draw a documentation warning
const RECENT_AGREEMENT_DAYS: i64 = 365;

/// Outcome of an eligibility evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    Ineligible,
    /// Passes the critical checks but not the commission threshold
    RequiresReview,
}

impl EligibilityStatus {
    /// Fixed recommendation text for this verdict
    pub fn recommendation(&self) -> &'static str {
        match self {
            EligibilityStatus::Eligible => "APPROVE - Claim meets redress scheme eligibility criteria",
            EligibilityStatus::RequiresReview => {
                "REVIEW - Commission below Plevin threshold but may have other grounds"
            }
            EligibilityStatus::Ineligible => "REJECT - Claim does not meet redress scheme eligibility criteria",
        }
    }
}

/// Result of evaluating one claim against the scheme rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub status: EligibilityStatus,
    /// Evidence for the decision, in check order
    pub reasons: Vec<String>,
    /// Non-blocking concerns
    pub warnings: Vec<String>,
    pub date_ok: bool,
    pub product_ok: bool,
    pub commission_ok: bool,
    /// Advisory only; always true under this scheme
    pub limitation_ok: bool,
    /// Commission percentage used by the threshold check
    pub commission_pct: Option<Decimal>,
    pub recommendation: String,
}

impl EligibilityResult {
    pub fn eligible(&self) -> bool {
        self.status == EligibilityStatus::Eligible
    }

    /// Whether the date, product and limitation checks all passed
    pub fn critical_checks_passed(&self) -> bool {
        self.date_ok && self.product_ok && self.limitation_ok
    }
}

#[derive(Default)]
struct Findings {
    reasons: Vec<String>,
    warnings: Vec<String>,
}

impl Findings {
    fn reason(&mut self, text: impl Into<String>) {
        self.reasons.push(text.into());
    }

    fn warn(&mut self, text: impl Into<String>) {
        self.warnings.push(text.into());
    }
}

/// Evaluates a claim as of today's UTC date
pub fn evaluate(claim: &ClaimRecord, rules: &SchemeRules) -> EligibilityResult {
    evaluate_as_of(claim, rules, Utc::now().date_naive())
}

/// Evaluates a claim as of the given calendar date
///
/// `as_of` stands in for "now" in the recent-agreement warning and, when
/// the claim has no submission date, in the limitation period.
pub fn evaluate_as_of(claim: &ClaimRecord, rules: &SchemeRules, as_of: NaiveDate) -> EligibilityResult {
    let mut findings = Findings::default();
    let agreement = claim.agreement_date.as_deref().map(parse_claim_date);

    let date_ok = check_agreement_date(agreement.as_ref(), rules, as_of, &mut findings);
    let product_ok = check_product_type(claim, rules, &mut findings);
    let commission_pct = claim.commission_pct();
    let commission_ok = check_commission_threshold(claim, commission_pct, rules, &mut findings);
    let limitation_ok = check_limitation_period(claim, agreement.as_ref(), rules, as_of, &mut findings);

    if claim.loan_amount > Decimal::ZERO && claim.loan_amount < rules.low_value_loan_floor {
        findings.warn(format!(
            "Low loan amount ({}) - verify claim is worthwhile",
            claim.loan_amount.round_dp(2)
        ));
    }

    if claim.disclosure_adequate == Some(true) {
        findings.warn("Claimant indicated disclosure was adequate - review evidence");
    }

    let critical = date_ok && product_ok && limitation_ok;
    let status = match (critical, commission_ok) {
        (true, true) => EligibilityStatus::Eligible,
        (true, false) => {
            findings.warn(format!(
                "Commission below {}% threshold - review for other unfairness grounds",
                rules.plevin_threshold_pct.normalize()
            ));
            EligibilityStatus::RequiresReview
        }
        (false, _) => EligibilityStatus::Ineligible,
    };

    info!(
        reference = %claim.reference,
        status = ?status,
        date_ok,
        product_ok,
        commission_ok,
        limitation_ok,
        "Eligibility evaluated"
    );

    EligibilityResult {
        status,
        reasons: findings.reasons,
        warnings: findings.warnings,
        date_ok,
        product_ok,
        commission_ok,
        limitation_ok,
        commission_pct,
        recommendation: status.recommendation().to_string(),
    }
}

fn check_agreement_date(
    agreement: Option<&Result<NaiveDate, DateParseError>>,
    rules: &SchemeRules,
    as_of: NaiveDate,
    findings: &mut Findings,
) -> bool {
    let date = match agreement {
        None | Some(Err(DateParseError::Missing)) => {
            findings.reason("Agreement date not provided");
            return false;
        }
        Some(Err(DateParseError::InvalidFormat(raw))) => {
            findings.reason(format!("Invalid agreement date format: {}", raw));
            return false;
        }
        Some(Ok(date)) => *date,
    };

    if date < rules.min_date {
        findings.reason(format!(
            "Agreement date {} is before eligible period (min: {})",
            date, rules.min_date
        ));
        return false;
    }
    if date > rules.max_date {
        findings.reason(format!(
            "Agreement date {} is after eligible period (max: {})",
            date, rules.max_date
        ));
        return false;
    }

    if days_between(date, as_of) < RECENT_AGREEMENT_DAYS {
        findings.warn("Recent agreement - verify all documentation");
    }

    debug!(%date, "Agreement date within eligible window");
    findings.reason(format!("Agreement date {} within eligible period", date));
    true
}

fn check_product_type(claim: &ClaimRecord, rules: &SchemeRules, findings: &mut Findings) -> bool {
    let Some(product) = claim.product() else {
        findings.warn("Product type not specified - assuming eligible");
        return true;
    };

    if rules.eligible_product_types.contains(&product) {
        findings.reason(format!("Product type '{}' is eligible under the scheme", product));
        true
    } else {
        findings.reason(format!("Product type '{}' not covered by the scheme", product));
        findings.warn(format!("Eligible types: {}", rules.eligible_product_list()));
        false
    }
}

fn check_commission_threshold(
    claim: &ClaimRecord,
    commission_pct: Option<Decimal>,
    rules: &SchemeRules,
    findings: &mut Findings,
) -> bool {
    if claim.commission_pct_undefined() {
        findings.warn("Total cost of credit is zero - commission percentage unknown");
    }

    let pct = match commission_pct {
        Some(pct) if !pct.is_zero() => pct,
        _ => {
            findings.warn("Commission percentage not available - cannot verify Plevin threshold");
            return false;
        }
    };

    let threshold = rules.plevin_threshold_pct.normalize();
    debug!(%pct, %threshold, "Checking commission against Plevin threshold");
    if pct >= rules.plevin_threshold_pct {
        findings.reason(format!(
            "Commission {:.1}% meets Plevin threshold ({}%)",
            pct.round_dp(1),
            threshold
        ));
        if claim.disclosure_adequate != Some(true) {
            findings.reason("Commission not adequately disclosed");
        }
        true
    } else {
        findings.reason(format!(
            "Commission {:.1}% below Plevin threshold ({}%)",
            pct.round_dp(1),
            threshold
        ));
        findings.warn("May still be eligible under other unfairness grounds");
        false
    }
}

/// Advisory only: exceeding the period is recorded but never blocks
fn check_limitation_period(
    claim: &ClaimRecord,
    agreement: Option<&Result<NaiveDate, DateParseError>>,
    rules: &SchemeRules,
    as_of: NaiveDate,
    findings: &mut Findings,
) -> bool {
    let agreement_date = match agreement {
        None | Some(Err(DateParseError::Missing)) => {
            findings.warn("Cannot verify limitation period without agreement date");
            return true;
        }
        Some(Err(err)) => {
            findings.warn(format!("Could not verify limitation period: {}", err));
            return true;
        }
        Some(Ok(date)) => *date,
    };

    let end = match claim.submission_date.as_deref().map(parse_claim_date) {
        None | Some(Err(DateParseError::Missing)) => as_of,
        Some(Ok(date)) => date,
        Some(Err(err)) => {
            findings.warn(format!("Could not verify limitation period: submission {}", err));
            return true;
        }
    };

    let years = years_between(agreement_date, end);
    debug!(%years, "Years since agreement");
    if years > Decimal::from(rules.limitation_period_years) {
        findings.warn(format!(
            "Agreement over {} years old - verify date of knowledge ({} year knowledge period)",
            rules.limitation_period_years, rules.knowledge_period_years
        ));
        findings.reason(format!(
            "Limitation: {:.1} years since agreement (standard: {} years)",
            years.round_dp(1),
            rules.limitation_period_years
        ));
    } else {
        findings.reason(format!("Within limitation period ({:.1} years)", years.round_dp(1)));
    }
    true
}
