//! Rounding of reported salary values.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::EngineError;

/// Number of decimal places reported for money and hours.
pub const REPORTED_DECIMAL_PLACES: u32 = 2;

/// Rounds a value to two decimal places, midpoints away from zero.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1235, 2)); // 12.345 -> 12.35
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        REPORTED_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Builds the error for an arithmetic step on `field` that left the range of
/// `Decimal`.
pub(crate) fn out_of_range(field: &'static str) -> impl FnOnce() -> EngineError {
    move || EngineError::invalid_input(field, "value is too large to calculate with")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_midpoint_rounds_away_from_zero() {
        assert_eq!(round_money(dec("2.005")), dec("2.01"));
        assert_eq!(round_money(dec("-2.005")), dec("-2.01"));
    }

    #[test]
    fn test_repeating_fraction_is_truncated_to_cents() {
        let third = Decimal::from(1000) / Decimal::from(3);
        assert_eq!(round_money(third), dec("333.33"));
    }

    #[test]
    fn test_already_rounded_value_is_unchanged() {
        assert_eq!(round_money(dec("12.5")), dec("12.5"));
    }

    #[test]
    fn test_out_of_range_names_field() {
        match out_of_range("adjustments")() {
            EngineError::InvalidInput { field, .. } => assert_eq!(field, "adjustments"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }
}
