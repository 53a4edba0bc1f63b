//! Money
//!
//! Every amount is held as a [`rusty_money::Money`] and all arithmetic happens on integer minor
//! units. Decimal text is the only representation that crosses the crate boundary.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// An amount of money in one of the ISO currencies.
pub type Amount = Money<'static, Currency>;

/// Errors raised while parsing or combining amounts.
#[derive(Debug, Error)]
pub enum AmountError {
    /// The text was not a plain decimal number.
    #[error("\"{text}\" is not a decimal amount")]
    Unparseable {
        /// The rejected input.
        text: String,

        /// Underlying decimal parse error.
        #[source]
        source: rust_decimal::Error,
    },

    /// Prices and totals are never negative.
    #[error("amount cannot be negative")]
    Negative,

    /// The text carried more fractional digits than the currency has minor units.
    #[error("{currency} amounts allow at most {exponent} decimal places")]
    TooPrecise {
        /// ISO code of the currency.
        currency: &'static str,

        /// Number of minor-unit digits the currency allows.
        exponent: u32,
    },

    /// Minor-unit arithmetic left the `i64` range.
    #[error("amount overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A zero amount in the given currency.
pub fn zero(currency: &'static Currency) -> Amount {
    Money::from_minor(0, currency)
}

/// Parse decimal text such as `"7.50"` into an amount.
///
/// # Errors
///
/// - [`AmountError::Unparseable`]: the text is not a decimal number.
/// - [`AmountError::Negative`]: the amount is below zero.
/// - [`AmountError::TooPrecise`]: more decimal places than the currency allows.
/// - [`AmountError::Overflow`]: the amount does not fit in minor units.
pub fn parse_amount(text: &str, currency: &'static Currency) -> Result<Amount, AmountError> {
    let text = text.trim();

    let decimal = Decimal::from_str_exact(text).map_err(|source| AmountError::Unparseable {
        text: text.to_string(),
        source,
    })?;

    if decimal.is_sign_negative() && !decimal.is_zero() {
        return Err(AmountError::Negative);
    }

    if decimal.scale() > currency.exponent {
        return Err(AmountError::TooPrecise {
            currency: currency.iso_alpha_code,
            exponent: currency.exponent,
        });
    }

    let minor = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|factor| decimal.checked_mul(Decimal::from(factor)))
        .and_then(|minor| minor.to_i64())
        .ok_or(AmountError::Overflow)?;

    Ok(Money::from_minor(minor, currency))
}

/// Render an amount as plain decimal text with the currency's minor-unit precision.
///
/// `7.5 USD` renders as `"7.50"`, `500 JPY` as `"500"`.
pub fn format_amount(amount: &Amount) -> String {
    Decimal::new(amount.to_minor_units(), amount.currency().exponent).to_string()
}

/// The total for `quantity` units at `unit_price`.
///
/// # Errors
///
/// Returns [`AmountError::Overflow`] when the product leaves the minor-unit range.
pub fn line_total(unit_price: &Amount, quantity: u32) -> Result<Amount, AmountError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(AmountError::Overflow)?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Sum amounts, starting from zero in `currency`.
///
/// # Errors
///
/// - [`AmountError::Money`]: an amount is in a different currency.
/// - [`AmountError::Overflow`]: the running total leaves the minor-unit range.
pub fn sum<'a, I>(amounts: I, currency: &'static Currency) -> Result<Amount, AmountError>
where
    I: IntoIterator<Item = &'a Amount>,
{
    amounts.into_iter().try_fold(zero(currency), |acc, amount| {
        if amount.currency() != currency {
            return Err(AmountError::Money(MoneyError::CurrencyMismatch {
                expected: currency.iso_alpha_code,
                actual: amount.currency().iso_alpha_code,
            }));
        }

        let minor = acc
            .to_minor_units()
            .checked_add(amount.to_minor_units())
            .ok_or(AmountError::Overflow)?;

        Ok(Money::from_minor(minor, currency))
    })
}
