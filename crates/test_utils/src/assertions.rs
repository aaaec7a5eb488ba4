//! Custom Test Assertions
//!
//! Assertion helpers for allocations, bills, and money that report the
//! offending values instead of a bare `false`.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_billing::{recompute, Bill};
use domain_pharmacy::Allocation;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {}", money);
}

/// Asserts that allocation lines are in non-decreasing expiry order
pub fn assert_allocation_in_expiry_order(allocation: &Allocation) {
    for pair in allocation.lines().windows(2) {
        assert!(
            pair[0].expiry_date <= pair[1].expiry_date,
            "Allocation out of expiry order: {} ({}) before {} ({})",
            pair[0].batch_number,
            pair[0].expiry_date,
            pair[1].batch_number,
            pair[1].expiry_date
        );
    }
}

/// Asserts that a bill's stored totals are consistent with its lines
///
/// Checks line amounts against quantity and price, the net formula, and
/// that recomputing from scratch gives the stored totals.
pub fn assert_bill_consistent(bill: &Bill) {
    for line in bill.lines() {
        assert_eq!(
            line.amount,
            line.display_unit_price * Decimal::from(line.quantity),
            "Line {} amount is not quantity x unit price",
            line.id
        );
        assert_eq!(
            line.quantity,
            line.allocations.total_quantity(),
            "Line {} quantity does not match its allocation",
            line.id
        );
    }

    let totals = bill.totals();
    assert_eq!(
        totals.net,
        totals.subtotal - totals.discount + totals.tax,
        "net != subtotal - discount + tax"
    );
    assert_eq!(
        *totals,
        recompute(bill.lines(), bill.adjustments(), bill.currency()),
        "Stored totals differ from a fresh recompute"
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
