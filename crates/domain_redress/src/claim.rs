//! Normalized claim record
//!
//! Ingestion layers (spreadsheets, documents) hand claims to this crate in
//! the shape of a [`ClaimRecord`]. Dates and product labels are kept as the
//! raw text supplied so that the eligibility rules can report exactly what
//! they were unable to read.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use core_kernel::{Currency, Money};
use crate::error::RedressError;

/// Upper bound on any amount or percentage on a claim record
pub const MAX_CLAIM_AMOUNT: Decimal = dec!(1_000_000_000_000);

/// Finance product categories recognised by the scheme
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductType {
    /// Personal Contract Purchase
    Pcp,
    /// Hire Purchase
    Hp,
    /// Conditional Sale
    Cs,
    /// Personal Contract Hire
    Pch,
    /// Any other product, held as its normalized label
    Other(String),
}

impl ProductType {
    /// Normalizes a free-text product label.
    ///
    /// Case and whitespace are normalized and known long-form names are
    /// mapped to their abbreviations. Returns `None` for a blank label.
    ///
    /// # Example
    ///
    /// ```rust
    /// use domain_redress::ProductType;
    ///
    /// assert_eq!(ProductType::from_label(" personal  contract purchase "), Some(ProductType::Pcp));
    /// assert_eq!(ProductType::from_label("hp"), Some(ProductType::Hp));
    /// assert_eq!(ProductType::from_label(""), None);
    /// ```
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();

        let product = match normalized.as_str() {
            "" => return None,
            "PCP" | "PERSONAL CONTRACT PURCHASE" => ProductType::Pcp,
            "HP" | "HIRE PURCHASE" => ProductType::Hp,
            "CS" | "CONDITIONAL SALE" => ProductType::Cs,
            "PCH" | "PERSONAL CONTRACT HIRE" => ProductType::Pch,
            _ => ProductType::Other(normalized),
        };
        Some(product)
    }

    /// Returns the short code for this product
    pub fn code(&self) -> &str {
        match self {
            ProductType::Pcp => "PCP",
            ProductType::Hp => "HP",
            ProductType::Cs => "CS",
            ProductType::Pch => "PCH",
            ProductType::Other(label) => label,
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<String> for ProductType {
    fn from(label: String) -> Self {
        ProductType::from_label(&label).unwrap_or(ProductType::Other(label))
    }
}

impl From<ProductType> for String {
    fn from(product: ProductType) -> Self {
        product.code().to_string()
    }
}

/// One claim's normalized facts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    /// External claim reference (e.g. a case number)
    #[serde(default = "default_reference", alias = "claim_id")]
    pub reference: String,
    /// Agreement start date as supplied
    #[serde(default)]
    pub agreement_date: Option<String>,
    /// Date the claim was submitted, as supplied
    #[serde(default)]
    pub submission_date: Option<String>,
    /// Product label as supplied
    #[serde(default)]
    pub product_type: Option<String>,
    /// Currency of every amount on the record
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub commission_amount: Decimal,
    #[serde(default)]
    pub total_cost_of_credit: Decimal,
    /// Commission as a percentage of the total cost of credit, if supplied
    #[serde(default)]
    pub commission_pct_of_cost: Option<Decimal>,
    #[serde(default)]
    pub loan_amount: Decimal,
    /// Whether the claimant says commission was adequately disclosed
    #[serde(default, deserialize_with = "deserialize_disclosure")]
    pub disclosure_adequate: Option<bool>,
    /// Amount the claimant is asking for
    #[serde(default, alias = "claim_amount")]
    pub claimed_amount: Option<Decimal>,
    #[serde(default)]
    pub consequential_losses: Decimal,
}

fn default_reference() -> String {
    "Unknown".to_string()
}

impl ClaimRecord {
    /// Creates an empty record with the given reference
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            agreement_date: None,
            submission_date: None,
            product_type: None,
            currency: Currency::default(),
            commission_amount: Decimal::ZERO,
            total_cost_of_credit: Decimal::ZERO,
            commission_pct_of_cost: None,
            loan_amount: Decimal::ZERO,
            disclosure_adequate: None,
            claimed_amount: None,
            consequential_losses: Decimal::ZERO,
        }
    }

    /// Commission as a percentage of the total cost of credit.
    ///
    /// A supplied non-zero percentage is used as-is. Otherwise the value is
    /// derived as `commission / total_cost_of_credit * 100`; it is unknown
    /// (`None`) when the cost of credit is zero.
    pub fn commission_pct(&self) -> Option<Decimal> {
        match self.commission_pct_of_cost {
            Some(pct) if !pct.is_zero() => Some(pct),
            _ => derive_commission_pct(self.commission_amount, self.total_cost_of_credit),
        }
    }

    /// True when a percentage could not be supplied or derived because the
    /// total cost of credit is zero
    pub fn commission_pct_undefined(&self) -> bool {
        self.commission_pct().is_none() && self.total_cost_of_credit.is_zero()
    }

    /// Parsed product type, `None` when no label was supplied
    pub fn product(&self) -> Option<ProductType> {
        self.product_type.as_deref().and_then(ProductType::from_label)
    }

    pub fn commission(&self) -> Money {
        Money::new(self.commission_amount, self.currency)
    }

    pub fn consequential(&self) -> Money {
        Money::new(self.consequential_losses, self.currency)
    }

    /// Claimed amount, if any, as money
    pub fn claimed(&self) -> Option<Money> {
        self.claimed_amount.map(|amount| Money::new(amount, self.currency))
    }

    /// Checks that every currency field lies in `0..=MAX_CLAIM_AMOUNT`
    pub fn validate(&self) -> Result<(), RedressError> {
        let fields = [
            ("commission_amount", Some(self.commission_amount)),
            ("total_cost_of_credit", Some(self.total_cost_of_credit)),
            ("loan_amount", Some(self.loan_amount)),
            ("consequential_losses", Some(self.consequential_losses)),
            ("claimed_amount", self.claimed_amount),
            ("commission_pct_of_cost", self.commission_pct_of_cost),
        ];

        for (field, value) in fields {
            if let Some(value) = value {
                if value < Decimal::ZERO {
                    return Err(RedressError::NegativeAmount {
                        field: field.to_string(),
                        value,
                    });
                }
                if value > MAX_CLAIM_AMOUNT {
                    return Err(RedressError::AmountOutOfRange {
                        field: field.to_string(),
                        value,
                        max: MAX_CLAIM_AMOUNT,
                    });
                }
            }
        }

        Ok(())
    }
}

/// Derives `commission / total_cost_of_credit * 100`, or `None` when the
/// cost of credit is zero or the ratio overflows
pub fn derive_commission_pct(commission_amount: Decimal, total_cost_of_credit: Decimal) -> Option<Decimal> {
    if total_cost_of_credit.is_zero() {
        return None;
    }
    commission_amount
        .checked_div(total_cost_of_credit)?
        .checked_mul(dec!(100))
}

/// Accepts booleans, `"Y"`/`"N"`, `"yes"`/`"no"` and `"true"`/`"false"`;
/// anything else is unknown
fn deserialize_disclosure<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    let flag = Option::<Flag>::deserialize(deserializer)?;
    Ok(match flag {
        Some(Flag::Bool(value)) => Some(value),
        Some(Flag::Text(text)) => match text.trim().to_uppercase().as_str() {
            "Y" | "YES" | "TRUE" => Some(true),
            "N" | "NO" | "FALSE" => Some(false),
            _ => None,
        },
        None => None,
    })
}
