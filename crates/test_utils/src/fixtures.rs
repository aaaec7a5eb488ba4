//! Pre-built Test Fixtures
//!
//! Stock snapshots and dates used across the scenario tests. The numbers
//! match the worked examples for allocation and billing.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};
use domain_pharmacy::StockBatch;

/// Fixture for dates
pub struct DateFixtures;

impl DateFixtures {
    /// Builds a date, panicking on an invalid one
    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
    }

    /// Jan 1, 2025
    pub fn early_expiry() -> NaiveDate {
        Self::ymd(2025, 1, 1)
    }

    /// Jun 1, 2025
    pub fn late_expiry() -> NaiveDate {
        Self::ymd(2025, 6, 1)
    }
}

/// Fixture for stock snapshots
pub struct StockFixtures;

impl StockFixtures {
    /// Two batches listed late-expiry first:
    /// `B2` (10 @ 12, 2025-06-01) and `B1` (5 @ 10, 2025-01-01)
    pub fn two_batches() -> Vec<StockBatch> {
        vec![
            StockBatch::new("B2", 10, dec!(12), DateFixtures::late_expiry()),
            StockBatch::new("B1", 5, dec!(10), DateFixtures::early_expiry()),
        ]
    }

    /// A single batch of 5 units
    pub fn single_batch() -> Vec<StockBatch> {
        vec![StockBatch::new("B1", 5, dec!(10), DateFixtures::early_expiry())]
    }

    /// One expired batch (2024-12-31) ahead of a fresh one
    pub fn with_expired() -> Vec<StockBatch> {
        vec![
            StockBatch::new("OLD", 5, dec!(8), DateFixtures::ymd(2024, 12, 31)),
            StockBatch::new("NEW", 5, dec!(10), DateFixtures::late_expiry()),
        ]
    }
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn inr(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::INR)
    }

    /// Creates a USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100), Currency::USD)
    }
}
