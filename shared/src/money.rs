//! Money calculation utilities using rust_decimal for precision
//!
//! Prices travel as `f64` on the wire and in stored records. All arithmetic is
//! done in `Decimal` and converted back rounded to 2 decimal places, so
//! `2.99 × 2` is exactly `5.98`.

use rust_decimal::prelude::*;
use thiserror::Error;

use crate::error::{AppError, ErrorCode};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per item
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed quantity per order line
pub const MAX_QUANTITY: u32 = 9999;

/// Arithmetic failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MoneyError {
    #[error("amount {0} cannot be represented as a decimal")]
    NotRepresentable(f64),

    #[error("amount overflowed")]
    Overflow,
}

impl From<MoneyError> for AppError {
    fn from(err: MoneyError) -> Self {
        AppError::with_message(ErrorCode::ValueOutOfRange, err.to_string())
    }
}

pub type MoneyResult<T> = Result<T, MoneyError>;

/// Convert f64 to Decimal for calculation
///
/// NaN, infinities and magnitudes beyond `Decimal::MAX` are rejected.
#[inline]
pub fn to_decimal(value: f64) -> MoneyResult<Decimal> {
    Decimal::from_f64(value).ok_or(MoneyError::NotRepresentable(value))
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// `acc + value` without overflow
#[inline]
pub fn checked_add(acc: Decimal, value: f64) -> MoneyResult<Decimal> {
    acc.checked_add(to_decimal(value)?).ok_or(MoneyError::Overflow)
}

/// Unit price × quantity
pub fn line_subtotal(price: f64, quantity: u32) -> MoneyResult<f64> {
    to_decimal(price)?
        .checked_mul(Decimal::from(quantity))
        .map(to_f64)
        .ok_or(MoneyError::Overflow)
}

/// Sum of monetary values without accumulating float error
pub fn sum<I>(values: I) -> MoneyResult<f64>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, checked_add)
        .map(to_f64)
}

/// Whether a price is usable: finite, non-negative and at most [`MAX_PRICE`]
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && (0.0..=MAX_PRICE).contains(&price)
}

/// Whether a line quantity is within `1..=MAX_QUANTITY`
pub fn is_valid_quantity(quantity: u32) -> bool {
    (1..=MAX_QUANTITY).contains(&quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_subtotal_is_exact() {
        assert_eq!(line_subtotal(2.99, 2), Ok(5.98));
        assert_eq!(line_subtotal(4.49, 3), Ok(13.47));
        assert_eq!(line_subtotal(0.1, 3), Ok(0.3));
        assert_eq!(line_subtotal(MAX_PRICE, MAX_QUANTITY), Ok(9_999_000_000.0));
    }

    #[test]
    fn test_sum_avoids_float_drift() {
        // 0.1 + 0.2 in plain f64 is 0.30000000000000004
        assert_eq!(sum([0.1, 0.2]), Ok(0.3));
        assert_eq!(sum([5.98, 4.49, 7.99]), Ok(18.46));
        assert_eq!(sum(Vec::<f64>::new()), Ok(0.0));
    }

    #[test]
    fn test_unrepresentable_amounts_are_errors() {
        // Beyond Decimal::MAX; must not collapse to zero
        assert_eq!(to_decimal(1e30), Err(MoneyError::NotRepresentable(1e30)));
        assert!(to_decimal(f64::NAN).is_err());
        assert!(line_subtotal(1e30, 1).is_err());
        assert!(sum([1.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert_eq!(line_subtotal(1e20, 1_000_000_000), Err(MoneyError::Overflow));
        assert_eq!(sum([5e28, 5e28]), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_money_error_maps_to_bad_request() {
        let err: AppError = MoneyError::Overflow.into();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_price_validation() {
        assert!(is_valid_price(0.0));
        assert!(is_valid_price(2.99));
        assert!(is_valid_price(MAX_PRICE));
        assert!(!is_valid_price(MAX_PRICE + 0.01));
        assert!(!is_valid_price(1e30));
        assert!(!is_valid_price(-0.01));
        assert!(!is_valid_price(f64::NAN));
        assert!(!is_valid_price(f64::INFINITY));
    }

    #[test]
    fn test_quantity_validation() {
        assert!(is_valid_quantity(1));
        assert!(is_valid_quantity(MAX_QUANTITY));
        assert!(!is_valid_quantity(0));
        assert!(!is_valid_quantity(MAX_QUANTITY + 1));
    }
}
