//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use chrono::NaiveDate;
use core_kernel::Currency;
use domain_redress::ClaimRecord;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builder for claim records
///
/// Defaults to an eligible PCP claim: agreement 2019-06-15, submitted
/// 2024-11-01, commission 3,000 on a 5,000 cost of credit, 25,000 loan,
/// disclosure inadequate, nothing claimed.
pub struct ClaimRecordBuilder {
    record: ClaimRecord,
}

impl Default for ClaimRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimRecordBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        let mut record = ClaimRecord::new("TEST-CLAIM");
        record.agreement_date = Some("2019-06-15".to_string());
        record.submission_date = Some("2024-11-01".to_string());
        record.product_type = Some("PCP".to_string());
        record.commission_amount = dec!(3000);
        record.total_cost_of_credit = dec!(5000);
        record.loan_amount = dec!(25000);
        record.disclosure_adequate = Some(false);
        Self { record }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.record.reference = reference.into();
        self
    }

    /// Sets the agreement date as raw text
    pub fn with_agreement_date(mut self, date: impl Into<String>) -> Self {
        self.record.agreement_date = Some(date.into());
        self
    }

    /// Sets the agreement date in ISO format
    pub fn with_agreement_on(self, date: NaiveDate) -> Self {
        self.with_agreement_date(date.format("%Y-%m-%d").to_string())
    }

    pub fn without_agreement_date(mut self) -> Self {
        self.record.agreement_date = None;
        self
    }

    pub fn with_submission_date(mut self, date: impl Into<String>) -> Self {
        self.record.submission_date = Some(date.into());
        self
    }

    pub fn without_submission_date(mut self) -> Self {
        self.record.submission_date = None;
        self
    }

    pub fn with_product_type(mut self, product: impl Into<String>) -> Self {
        self.record.product_type = Some(product.into());
        self
    }

    pub fn without_product_type(mut self) -> Self {
        self.record.product_type = None;
        self
    }

    /// Sets the commission and total cost of credit together
    pub fn with_commission(mut self, commission: Decimal, total_cost_of_credit: Decimal) -> Self {
        self.record.commission_amount = commission;
        self.record.total_cost_of_credit = total_cost_of_credit;
        self
    }

    /// Supplies the commission percentage directly
    pub fn with_commission_pct(mut self, pct: Decimal) -> Self {
        self.record.commission_pct_of_cost = Some(pct);
        self
    }

    pub fn with_loan_amount(mut self, amount: Decimal) -> Self {
        self.record.loan_amount = amount;
        self
    }

    pub fn with_disclosure_adequate(mut self, adequate: Option<bool>) -> Self {
        self.record.disclosure_adequate = adequate;
        self
    }

    pub fn with_claimed_amount(mut self, amount: Decimal) -> Self {
        self.record.claimed_amount = Some(amount);
        self
    }

    pub fn with_consequential_losses(mut self, amount: Decimal) -> Self {
        self.record.consequential_losses = amount;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.record.currency = currency;
        self
    }

    pub fn build(self) -> ClaimRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_claim_is_valid() {
        let claim = ClaimRecordBuilder::new().build();
        assert!(claim.validate().is_ok());
        assert_eq!(claim.commission_pct(), Some(dec!(60)));
    }

    #[test]
    fn test_builder_overrides() {
        let claim = ClaimRecordBuilder::new()
            .with_reference("C-42")
            .with_agreement_on(NaiveDate::from_ymd_opt(2012, 2, 29).unwrap())
            .without_product_type()
            .with_claimed_amount(dec!(900))
            .build();

        assert_eq!(claim.reference, "C-42");
        assert_eq!(claim.agreement_date.as_deref(), Some("2012-02-29"));
        assert_eq!(claim.product_type, None);
        assert_eq!(claim.claimed_amount, Some(dec!(900)));
    }
}
