//! Stock batches
//!
//! A batch is a physical lot of a medicine with its own quantity, unit price
//! and expiry date. Batches are owned by inventory; this crate only reads
//! them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PharmacyError;

/// A physical lot of a medicine as reported by the stock query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockBatch {
    /// Batch (lot) number printed on the pack
    pub batch_number: String,
    /// Units currently on hand
    pub quantity: i64,
    /// Selling price per unit
    pub unit_price: Decimal,
    /// Expiry date of the lot
    pub expiry_date: NaiveDate,
}

impl StockBatch {
    /// Creates a new batch
    pub fn new(
        batch_number: impl Into<String>,
        quantity: i64,
        unit_price: Decimal,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            batch_number: batch_number.into(),
            quantity,
            unit_price,
            expiry_date,
        }
    }

    /// Returns true if the batch has units to dispense
    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }

    /// Returns true if the batch expired before `date`
    ///
    /// A batch is still dispensable on its expiry date.
    pub fn is_expired_on(&self, date: NaiveDate) -> bool {
        self.expiry_date < date
    }

    /// Checks the batch against the data model
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an empty batch number, a negative quantity
    /// or a negative unit price
    pub fn validate(&self) -> Result<(), PharmacyError> {
        if self.batch_number.trim().is_empty() {
            return Err(PharmacyError::invalid_input("Batch number must not be empty"));
        }

        if self.quantity < 0 {
            return Err(PharmacyError::InvalidInput(format!(
                "Batch {} has negative quantity {}",
                self.batch_number, self.quantity
            )));
        }

        if self.unit_price < Decimal::ZERO {
            return Err(PharmacyError::InvalidInput(format!(
                "Batch {} has negative unit price {}",
                self.batch_number, self.unit_price
            )));
        }

        Ok(())
    }
}

/// Validates every batch in a catalog snapshot
///
/// Stops at the first invalid batch.
pub fn validate_batches(batches: &[StockBatch]) -> Result<(), PharmacyError> {
    batches.iter().try_for_each(StockBatch::validate)
}

/// Total units available across batches with positive quantity
///
/// Saturates at `i64::MAX`.
pub fn available_quantity(batches: &[StockBatch]) -> i64 {
    batches
        .iter()
        .filter(|b| b.is_available())
        .fold(0i64, |total, b| total.saturating_add(b.quantity))
}
