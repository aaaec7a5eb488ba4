//! Line pricing for multi-batch allocations
//!
//! A bill line shows one unit price even when its units come from batches
//! priced differently. The price shown is the highest contributing batch
//! price, applied to every unit of the line. This is the long-standing
//! billing behaviour and is kept as is pending product-owner confirmation;
//! it is neither a weighted average nor the first batch's price.

use rust_decimal::Decimal;

use crate::allocator::AllocationLine;
use crate::error::PharmacyError;

/// Returns the unit price to display and bill for an allocation
///
/// The maximum `unit_price` among `lines`, or zero for an empty allocation.
pub fn resolve_price(lines: &[AllocationLine]) -> Decimal {
    lines
        .iter()
        .map(|l| l.unit_price)
        .max()
        .unwrap_or(Decimal::ZERO)
}

/// Amount for a line: every unit billed at the resolved price
///
/// # Errors
///
/// Returns `InvalidInput` if the product does not fit in a `Decimal`
pub fn line_amount(quantity: i64, unit_price: Decimal) -> Result<Decimal, PharmacyError> {
    Decimal::from(quantity).checked_mul(unit_price).ok_or_else(|| {
        PharmacyError::InvalidInput(format!(
            "Line amount overflows: {} x {}",
            quantity, unit_price
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn line(batch: &str, quantity: i64, price: Decimal) -> AllocationLine {
        AllocationLine {
            batch_number: batch.to_string(),
            quantity,
            unit_price: price,
            expiry_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_empty_allocation_prices_at_zero() {
        assert_eq!(resolve_price(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_highest_price_wins_regardless_of_position() {
        let lines = vec![line("B1", 5, dec!(10)), line("B2", 1, dec!(14.5)), line("B3", 2, dec!(9))];
        assert_eq!(resolve_price(&lines), dec!(14.5));
    }

    #[test]
    fn test_highest_price_is_not_weighted() {
        // weighted average would be 10.25
        let lines = vec![line("B1", 7, dec!(10)), line("B2", 1, dec!(12))];
        let price = resolve_price(&lines);
        assert_eq!(line_amount(8, price).unwrap(), dec!(96));
    }

    #[test]
    fn test_line_amount_overflow_is_invalid_input() {
        let result = line_amount(i64::MAX, dec!(100000000000));
        assert!(matches!(result, Err(PharmacyError::InvalidInput(_))));
    }
}
