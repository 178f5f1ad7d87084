//! Funding agreement compliance
//!
//! Checks a funded claim against the litigation funding agreement (LFA):
//! funding cap, jurisdiction, required documentation and after-the-event
//! (ATE) insurance. Each check carries its own status; the report's status
//! is the most severe of them.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{Currency, Money};
use crate::error::DistributionError;

pub const DEFAULT_JURISDICTION: &str = "UK";
/// Per-claim funding above this needs investment committee sign-off
pub const DEFAULT_FUNDING_CAP: Decimal = dec!(50000);
/// Document that evidences ATE cover
pub const ATE_POLICY_DOCUMENT: &str = "insurance_policy";
pub const DEFAULT_REQUIRED_DOCUMENTS: [&str; 3] = ["claim_form", "lfa_signed", ATE_POLICY_DOCUMENT];

/// Terms of the funding agreement that bear on individual claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LfaTerms {
    pub agreement_id: String,
    /// Maximum funding per claim
    pub funding_cap: Decimal,
    pub jurisdiction: String,
    pub required_documents: BTreeSet<String>,
    pub adverse_costs_insurance_required: bool,
    pub currency: Currency,
}

impl Default for LfaTerms {
    fn default() -> Self {
        Self {
            agreement_id: "LFA-DEFAULT".to_string(),
            funding_cap: DEFAULT_FUNDING_CAP,
            jurisdiction: DEFAULT_JURISDICTION.to_string(),
            required_documents: DEFAULT_REQUIRED_DOCUMENTS.iter().map(|d| d.to_string()).collect(),
            adverse_costs_insurance_required: true,
            currency: Currency::GBP,
        }
    }
}

impl LfaTerms {
    pub fn with_funding_cap(mut self, cap: Decimal) -> Self {
        self.funding_cap = cap;
        self
    }

    pub fn with_insurance_required(mut self, required: bool) -> Self {
        self.adverse_costs_insurance_required = required;
        self
    }

    pub fn validate(&self) -> Result<(), DistributionError> {
        if self.funding_cap < Decimal::ZERO {
            return Err(DistributionError::InvalidTerms(format!(
                "funding_cap must not be negative, got {}",
                self.funding_cap
            )));
        }
        if self.jurisdiction.trim().is_empty() {
            return Err(DistributionError::InvalidTerms("jurisdiction must be set".to_string()));
        }
        Ok(())
    }
}

/// A claim as seen by the funder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundedClaim {
    #[serde(alias = "claim_id")]
    pub reference: String,
    /// Amount advanced against this claim, in the agreement's currency
    #[serde(default)]
    pub funded_amount: Decimal,
    /// Where the claim is brought; `None` means the agreement's jurisdiction
    #[serde(default)]
    pub jurisdiction: Option<String>,
    #[serde(default)]
    pub documentation_received: BTreeSet<String>,
}

impl FundedClaim {
    pub fn new(reference: impl Into<String>, funded_amount: Decimal) -> Self {
        Self {
            reference: reference.into(),
            funded_amount,
            jurisdiction: None,
            documentation_received: BTreeSet::new(),
        }
    }

    pub fn with_documents<I, S>(mut self, documents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.documentation_received.extend(documents.into_iter().map(Into::into));
        self
    }

    pub fn with_jurisdiction(mut self, jurisdiction: impl Into<String>) -> Self {
        self.jurisdiction = Some(jurisdiction.into());
        self
    }
}

/// Ordered by severity, so the most severe status is the maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    RequiresReview,
    NonCompliant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub check_name: String,
    pub status: ComplianceStatus,
    pub details: String,
    pub recommendation: Option<String>,
}

impl ComplianceCheck {
    fn compliant(name: &str, details: impl Into<String>) -> Self {
        Self {
            check_name: name.to_string(),
            status: ComplianceStatus::Compliant,
            details: details.into(),
            recommendation: None,
        }
    }

    fn failed(
        name: &str,
        status: ComplianceStatus,
        details: impl Into<String>,
        recommendation: &str,
    ) -> Self {
        Self {
            check_name: name.to_string(),
            status,
            details: details.into(),
            recommendation: Some(recommendation.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub reference: String,
    pub agreement_id: String,
    pub status: ComplianceStatus,
    pub checks: Vec<ComplianceCheck>,
}

impl ComplianceReport {
    pub fn check(&self, name: &str) -> Option<&ComplianceCheck> {
        self.checks.iter().find(|c| c.check_name == name)
    }
}

/// Runs every agreement check against one funded claim
pub fn check_lfa_compliance(
    claim: &FundedClaim,
    terms: &LfaTerms,
) -> Result<ComplianceReport, DistributionError> {
    if claim.funded_amount < Decimal::ZERO {
        return Err(DistributionError::NegativeFunding(claim.funded_amount));
    }

    let mut checks = vec![
        check_funding_cap(claim, terms),
        check_jurisdiction(claim, terms),
        check_documentation(claim, terms),
    ];
    if terms.adverse_costs_insurance_required {
        checks.push(check_ate_insurance(claim));
    }

    let status = checks
        .iter()
        .map(|c| c.status)
        .max()
        .unwrap_or(ComplianceStatus::Compliant);

    info!(
        reference = %claim.reference,
        agreement = %terms.agreement_id,
        status = ?status,
        "LFA compliance checked"
    );

    Ok(ComplianceReport {
        reference: claim.reference.clone(),
        agreement_id: terms.agreement_id.clone(),
        status,
        checks,
    })
}

fn check_funding_cap(claim: &FundedClaim, terms: &LfaTerms) -> ComplianceCheck {
    let funded = Money::new(claim.funded_amount, terms.currency);
    let cap = Money::new(terms.funding_cap, terms.currency);

    if funded.amount() <= cap.amount() {
        ComplianceCheck::compliant(
            "Funding Cap",
            format!("Funded amount {} is within cap of {}", funded, cap),
        )
    } else {
        ComplianceCheck::failed(
            "Funding Cap",
            ComplianceStatus::NonCompliant,
            format!("Funded amount {} exceeds cap of {}", funded, cap),
            "Seek IC approval for excess funding or restructure funding arrangement",
        )
    }
}

fn check_jurisdiction(claim: &FundedClaim, terms: &LfaTerms) -> ComplianceCheck {
    let permitted = terms.jurisdiction.trim();
    let actual = claim.jurisdiction.as_deref().map(str::trim).unwrap_or(permitted);

    if actual.eq_ignore_ascii_case(permitted) {
        ComplianceCheck::compliant(
            "Jurisdiction",
            format!("Claim is within permitted {} jurisdiction", permitted),
        )
    } else {
        ComplianceCheck::failed(
            "Jurisdiction",
            ComplianceStatus::NonCompliant,
            format!("Claim jurisdiction {} is outside permitted {} jurisdiction", actual, permitted),
            "Obtain funder consent before funding outside the agreed jurisdiction",
        )
    }
}

fn check_documentation(claim: &FundedClaim, terms: &LfaTerms) -> ComplianceCheck {
    let missing: Vec<&str> = terms
        .required_documents
        .difference(&claim.documentation_received)
        .map(String::as_str)
        .collect();

    if missing.is_empty() {
        ComplianceCheck::compliant("Documentation", "All required documentation received")
    } else {
        ComplianceCheck::failed(
            "Documentation",
            ComplianceStatus::RequiresReview,
            format!("Missing documentation: {}", missing.join(", ")),
            "Request outstanding documentation from law firm",
        )
    }
}

fn check_ate_insurance(claim: &FundedClaim) -> ComplianceCheck {
    if claim.documentation_received.contains(ATE_POLICY_DOCUMENT) {
        ComplianceCheck::compliant("Adverse Costs Insurance", "Insurance policy documentation received")
    } else {
        ComplianceCheck::failed(
            "Adverse Costs Insurance",
            ComplianceStatus::NonCompliant,
            "Adverse costs insurance required but not documented",
            "Obtain ATE insurance policy immediately",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn documented(funded: Decimal) -> FundedClaim {
        FundedClaim::new("PCP-001", funded).with_documents(DEFAULT_REQUIRED_DOCUMENTS)
    }

    #[test]
    fn test_fully_compliant() {
        let report = check_lfa_compliance(&documented(dec!(25000)), &LfaTerms::default()).unwrap();

        assert_eq!(report.status, ComplianceStatus::Compliant);
        assert_eq!(report.checks.len(), 4);
        assert!(report.checks.iter().all(|c| c.recommendation.is_none()));
        assert_eq!(
            report.check("Funding Cap").unwrap().details,
            "Funded amount £25000.00 is within cap of £50000.00"
        );
    }

    #[test]
    fn test_funding_at_cap_is_compliant() {
        let report = check_lfa_compliance(&documented(DEFAULT_FUNDING_CAP), &LfaTerms::default()).unwrap();
        assert_eq!(report.check("Funding Cap").unwrap().status, ComplianceStatus::Compliant);
    }

    #[test]
    fn test_funding_over_cap() {
        let report = check_lfa_compliance(&documented(dec!(50000.01)), &LfaTerms::default()).unwrap();

        let cap = report.check("Funding Cap").unwrap();
        assert_eq!(cap.status, ComplianceStatus::NonCompliant);
        assert_eq!(cap.details, "Funded amount £50000.01 exceeds cap of £50000.00");
        assert!(cap.recommendation.as_deref().unwrap().starts_with("Seek IC approval"));
        assert_eq!(report.status, ComplianceStatus::NonCompliant);
    }

    #[test]
    fn test_missing_documents_require_review() {
        let claim = FundedClaim::new("PCP-002", dec!(1000)).with_documents(["lfa_signed", ATE_POLICY_DOCUMENT]);

        let report = check_lfa_compliance(&claim, &LfaTerms::default()).unwrap();

        assert_eq!(report.check("Documentation").unwrap().details, "Missing documentation: claim_form");
        assert_eq!(report.status, ComplianceStatus::RequiresReview);
    }

    #[test]
    fn test_missing_ate_policy_is_non_compliant() {
        let claim = FundedClaim::new("PCP-003", dec!(1000)).with_documents(["claim_form", "lfa_signed"]);

        let report = check_lfa_compliance(&claim, &LfaTerms::default()).unwrap();

        assert_eq!(report.check("Documentation").unwrap().status, ComplianceStatus::RequiresReview);
        assert_eq!(
            report.check("Adverse Costs Insurance").unwrap().status,
            ComplianceStatus::NonCompliant
        );
        assert_eq!(report.status, ComplianceStatus::NonCompliant);
    }

    #[test]
    fn test_insurance_check_skipped_when_not_required() {
        let terms = LfaTerms::default().with_insurance_required(false);
        let claim = FundedClaim::new("PCP-004", dec!(1000)).with_documents(["claim_form", "lfa_signed"]);

        let report = check_lfa_compliance(&claim, &terms).unwrap();

        assert_eq!(report.checks.len(), 3);
        assert!(report.check("Adverse Costs Insurance").is_none());
    }

    #[test]
    fn test_jurisdiction() {
        let terms = LfaTerms::default();

        let local = documented(dec!(1000)).with_jurisdiction("uk");
        let report = check_lfa_compliance(&local, &terms).unwrap();
        assert_eq!(report.check("Jurisdiction").unwrap().status, ComplianceStatus::Compliant);

        let abroad = documented(dec!(1000)).with_jurisdiction("IE");
        let report = check_lfa_compliance(&abroad, &terms).unwrap();
        assert_eq!(report.check("Jurisdiction").unwrap().status, ComplianceStatus::NonCompliant);
        assert_eq!(report.status, ComplianceStatus::NonCompliant);
    }

    #[test]
    fn test_negative_funding_rejected() {
        let result = check_lfa_compliance(&documented(dec!(-1)), &LfaTerms::default());
        assert!(matches!(result, Err(DistributionError::NegativeFunding(_))));
    }

    #[test]
    fn test_validate_terms() {
        assert!(LfaTerms::default().validate().is_ok());
        assert!(matches!(
            LfaTerms::default().with_funding_cap(dec!(-1)).validate(),
            Err(DistributionError::InvalidTerms(_))
        ));
    }

    #[test]
    fn test_status_severity_order() {
        assert!(ComplianceStatus::NonCompliant > ComplianceStatus::RequiresReview);
        assert!(ComplianceStatus::RequiresReview > ComplianceStatus::Compliant);
        assert_eq!(serde_json::to_value(ComplianceStatus::NonCompliant).unwrap(), json!("non_compliant"));
    }

    #[test]
    fn test_deserialize_partial_terms() {
        let terms: LfaTerms = serde_json::from_value(json!({ "funding_cap": "75000" })).unwrap();

        assert_eq!(terms.funding_cap, dec!(75000));
        assert_eq!(terms.jurisdiction, "UK");
        assert_eq!(terms.required_documents.len(), 3);
    }
}
