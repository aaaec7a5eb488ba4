//! Property-Based Test Generators
//!
//! Proptest strategies for stock snapshots and bill inputs.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::Currency;
use domain_billing::BillAdjustments;
use domain_pharmacy::StockBatch;

use crate::fixtures::DateFixtures;

/// Strategy for a supported currency
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::INR),
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::AED),
    ]
}

/// Strategy for a unit price between 0.00 and 999.99
pub fn unit_price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy for a unit price with up to 6 decimal places
pub fn precise_unit_price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64, 0u32..=6u32).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

/// Strategy for a percentage between 0.00 and 100.00
pub fn percentage_strategy() -> impl Strategy<Value = Decimal> {
    (0u32..=10_000u32).prop_map(|n| Decimal::new(n as i64, 2))
}

/// Strategy for an expiry date within three years of 2025-01-01
pub fn expiry_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..1_095i64).prop_map(|days| DateFixtures::early_expiry() + Duration::days(days))
}

/// Strategy for a valid batch, including empty ones
pub fn batch_strategy() -> impl Strategy<Value = StockBatch> {
    (0i64..50i64, unit_price_strategy(), expiry_strategy()).prop_map(|(qty, price, expiry)| {
        StockBatch::new("B", qty, price, expiry)
    })
}

/// Strategy for a stock snapshot with unique batch numbers
pub fn batches_strategy(max_batches: usize) -> impl Strategy<Value = Vec<StockBatch>> {
    prop::collection::vec(batch_strategy(), 0..=max_batches).prop_map(|batches| {
        batches
            .into_iter()
            .enumerate()
            .map(|(i, batch)| StockBatch {
                batch_number: format!("B{}", i + 1),
                ..batch
            })
            .collect()
    })
}

/// Strategy for valid discount and tax inputs
pub fn adjustments_strategy() -> impl Strategy<Value = BillAdjustments> {
    (
        prop_oneof![Just(Decimal::ZERO), percentage_strategy()],
        unit_price_strategy(),
        prop_oneof![Just(Decimal::ZERO), percentage_strategy()],
        unit_price_strategy(),
    )
        .prop_map(|(discount_percent, discount_amount, tax_percent, tax_amount)| BillAdjustments {
            discount_percent,
            discount_amount,
            tax_percent,
            tax_amount,
        })
}
