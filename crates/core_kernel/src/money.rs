//! Money types with precise decimal arithmetic
//!
//! This module provides a type-safe representation of monetary values
//! using rust_decimal so that redress and distribution figures never pick
//! up floating-point drift.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    GBP,
    EUR,
    USD,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::GBP => "£",
            Currency::EUR => "€",
            Currency::USD => "$",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::GBP => "GBP",
            Currency::EUR => "EUR",
            Currency::USD => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Currency mismatch: cannot operate on {0} and {1}")]
    CurrencyMismatch(String, String),

    #[error("Arithmetic overflow")]
    Overflow,
}

/// A monetary amount with associated currency
///
/// Amounts are stored with 4 decimal places internally; rounding to the
/// currency's minor unit is left to the reporting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value, rounding `amount` to 4 decimal places
    /// (banker's rounding)
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(4),
            currency,
        }
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Checked addition that returns an error on currency mismatch or overflow
    pub fn checked_add(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let sum = self.amount.checked_add(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(sum, self.currency))
    }

    /// Checked subtraction that returns an error on currency mismatch or overflow
    pub fn checked_sub(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        let difference = self.amount.checked_sub(other.amount).ok_or(MoneyError::Overflow)?;
        Ok(Self::new(difference, self.currency))
    }

    /// Returns the smaller of two amounts in the same currency
    pub fn checked_min(&self, other: &Money) -> Result<Money, MoneyError> {
        self.ensure_same_currency(other)?;
        Ok(if other.amount < self.amount { *other } else { *self })
    }

    /// Floors negative amounts at zero
    pub fn non_negative(&self) -> Self {
        if self.is_negative() {
            Self::zero(self.currency)
        } else {
            *self
        }
    }

    /// Multiplies by a scalar (e.g., for rate calculations), saturating at
    /// the limits of `Decimal`
    pub fn multiply(&self, factor: Decimal) -> Self {
        Self::new(self.amount.saturating_mul(factor), self.currency)
    }

    /// Returns `self / other` as a plain ratio, or `None` when `other` is zero
    pub fn ratio_to(&self, other: &Money) -> Result<Option<Decimal>, MoneyError> {
        self.ensure_same_currency(other)?;
        if other.amount.is_zero() {
            return Ok(None);
        }
        self.amount
            .checked_div(other.amount)
            .map(Some)
            .ok_or(MoneyError::Overflow)
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), MoneyError> {
        if self.currency != other.currency {
            return Err(MoneyError::CurrencyMismatch(
                self.currency.to_string(),
                other.currency.to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{}{:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}

impl Add for Money {
    type Output = Self;

    /// # Panics
    ///
    /// Panics on currency mismatch; use [`Money::checked_add`] when the
    /// operands may come from different sources.
    fn add(self, other: Self) -> Self {
        self.checked_add(&other)
            .expect("Currency mismatch in Money::add")
    }
}

impl Sub for Money {
    type Output = Self;

    /// # Panics
    ///
    /// Panics on currency mismatch; use [`Money::checked_sub`] when the
    /// operands may come from different sources.
    fn sub(self, other: Self) -> Self {
        self.checked_sub(&other)
            .expect("Currency mismatch in Money::sub")
    }
}

/// Represents a percentage rate (e.g., interest rate, profit share)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    /// The rate as a decimal (e.g., 0.05 for 5%)
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal value (e.g., 0.05 for 5%)
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a percentage (e.g., 5.0 for 5%)
    pub fn from_percentage(percentage: Decimal) -> Self {
        Self {
            value: percentage / dec!(100),
        }
    }

    /// Interprets a loosely-specified rate.
    ///
    /// Values in `(0, 1]` are read as fractions (`0.3` is 30%), values in
    /// `(1, 100]` as percentages. Anything else, including a missing value,
    /// falls back to `default_percentage`.
    pub fn coerce_percentage(value: Option<Decimal>, default_percentage: Decimal) -> Self {
        match value {
            Some(v) if v > Decimal::ZERO && v <= Decimal::ONE => Self::new(v),
            Some(v) if v > Decimal::ONE && v <= dec!(100) => Self::from_percentage(v),
            _ => Self::from_percentage(default_percentage),
        }
    }

    /// Returns the rate as a decimal
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Applies this rate to a money amount
    pub fn apply(&self, money: &Money) -> Money {
        money.multiply(self.value)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().round_dp(4).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let m = Money::new(dec!(100.50), Currency::GBP);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::GBP);
    }

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100.00), Currency::GBP);
        let b = Money::new(dec!(50.00), Currency::GBP);

        assert_eq!((a + b).amount(), dec!(150.00));
        assert_eq!((a - b).amount(), dec!(50.00));
    }

    #[test]
    fn test_currency_mismatch() {
        let gbp = Money::new(dec!(100.00), Currency::GBP);
        let eur = Money::new(dec!(100.00), Currency::EUR);

        let result = gbp.checked_add(&eur);
        assert!(matches!(result, Err(MoneyError::CurrencyMismatch(_, _))));
        assert!(gbp.checked_min(&eur).is_err());
    }

    #[test]
    fn test_checked_min_and_non_negative() {
        let a = Money::new(dec!(20000), Currency::GBP);
        let b = Money::new(dec!(10000), Currency::GBP);
        assert_eq!(a.checked_min(&b).unwrap(), b);
        assert_eq!(b.checked_min(&a).unwrap(), b);

        let negative = Money::new(dec!(-5), Currency::GBP);
        assert!(negative.non_negative().is_zero());
        assert_eq!(a.non_negative(), a);
    }

    #[test]
    fn test_ratio_to_zero_is_unknown() {
        let commission = Money::new(dec!(3000), Currency::GBP);
        let zero = Money::zero(Currency::GBP);
        assert_eq!(commission.ratio_to(&zero).unwrap(), None);

        let cost = Money::new(dec!(5000), Currency::GBP);
        assert_eq!(commission.ratio_to(&cost).unwrap(), Some(dec!(0.6)));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let max = Money::new(Decimal::MAX, Currency::GBP);
        let one = Money::new(dec!(1), Currency::GBP);
        let tiny = Money::new(dec!(0.0001), Currency::GBP);

        assert_eq!(max.checked_add(&one), Err(MoneyError::Overflow));
        assert_eq!(max.ratio_to(&tiny), Err(MoneyError::Overflow));
        assert_eq!(Money::new(Decimal::MIN, Currency::GBP).checked_sub(&one), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_multiply_saturates() {
        let max = Money::new(Decimal::MAX, Currency::GBP);
        assert_eq!(max.multiply(dec!(2)).amount(), Decimal::MAX);
    }

    #[test]
    fn test_new_rounds_to_four_places() {
        assert_eq!(Money::new(dec!(100.00007), Currency::GBP).amount(), dec!(100.0001));
    }

    #[test]
    fn test_rate_application() {
        let rate = Rate::from_percentage(dec!(8.0));
        let amount = Money::new(dec!(1500.00), Currency::GBP);

        assert_eq!(rate.apply(&amount).amount(), dec!(120.00));
    }

    #[test]
    fn test_coerce_percentage() {
        assert_eq!(Rate::coerce_percentage(None, dec!(30)).as_percentage(), dec!(30));
        assert_eq!(Rate::coerce_percentage(Some(dec!(30)), dec!(30)).as_percentage(), dec!(30));
        assert_eq!(Rate::coerce_percentage(Some(dec!(0.3)), dec!(30)).as_percentage(), dec!(30.0));
        assert_eq!(Rate::coerce_percentage(Some(dec!(0.8)), dec!(30)).as_percentage(), dec!(80.0));
        assert_eq!(Rate::coerce_percentage(Some(dec!(-1)), dec!(30)).as_percentage(), dec!(30));
        assert_eq!(Rate::coerce_percentage(Some(dec!(150)), dec!(30)).as_percentage(), dec!(30));
    }

    #[test]
    fn test_display() {
        let m = Money::new(dec!(3000), Currency::GBP);
        assert_eq!(m.to_string(), "£3000.00");
        assert_eq!(Rate::from_percentage(dec!(8.0)).to_string(), "8%");
    }
}
