//! FIFO-by-expiry batch allocation
//!
//! Soonest-to-expire stock is dispensed first. Allocation is not
//! cost-optimal and does not try to be.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::batch::{available_quantity, StockBatch};
use crate::error::PharmacyError;

/// One slice of a fulfilled request, drawn from a single batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationLine {
    pub batch_number: String,
    /// Units taken from the batch (always positive)
    pub quantity: i64,
    pub unit_price: Decimal,
    pub expiry_date: NaiveDate,
}

/// Ordered batch slices for one dispensed quantity
///
/// # Invariants
///
/// - Lines are in non-decreasing expiry order
/// - Quantities sum to the requested quantity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Allocation {
    lines: Vec<AllocationLine>,
}

impl Allocation {
    /// An allocation that draws nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[AllocationLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<AllocationLine> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Units across all lines
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Human-readable batch breakdown, e.g. `B1(5) + B2(3)`
    pub fn batch_label(&self) -> String {
        self.lines
            .iter()
            .map(|l| format!("{}({})", l.batch_number, l.quantity))
            .collect::<Vec<_>>()
            .join(" + ")
    }

    /// Expiry dates of the contributing batches, e.g. `2025-01-01, 2025-06-01`
    pub fn expiry_label(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.expiry_date.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Allocates `required_quantity` units across `batches`, earliest expiry first
///
/// Batches with no stock are skipped. Batches sharing an expiry date are
/// consumed in the order the catalog returned them. The input is never
/// modified; decrementing stock happens later, on commit.
///
/// A non-positive `required_quantity` yields an empty allocation.
///
/// # Errors
///
/// Returns `InsufficientStock` when the batches cannot cover the request.
/// No partial allocation is ever returned.
pub fn allocate(batches: &[StockBatch], required_quantity: i64) -> Result<Allocation, PharmacyError> {
    if required_quantity <= 0 {
        return Ok(Allocation::empty());
    }

    let mut candidates: Vec<&StockBatch> = batches.iter().filter(|b| b.is_available()).collect();
    // stable: equal expiry dates keep catalog order
    candidates.sort_by_key(|b| b.expiry_date);

    let mut remaining = required_quantity;
    let mut lines = Vec::new();

    for batch in candidates {
        if remaining == 0 {
            break;
        }

        let take = batch.quantity.min(remaining);
        lines.push(AllocationLine {
            batch_number: batch.batch_number.clone(),
            quantity: take,
            unit_price: batch.unit_price,
            expiry_date: batch.expiry_date,
        });
        remaining -= take;
    }

    if remaining > 0 {
        let available = available_quantity(batches);
        warn!(requested = required_quantity, available, "Insufficient stock for allocation");
        return Err(PharmacyError::InsufficientStock {
            requested: required_quantity,
            available,
        });
    }

    debug!(requested = required_quantity, batches = lines.len(), "Allocated stock");
    Ok(Allocation { lines })
}

/// Like [`allocate`], but ignores batches that expired before `as_of`
pub fn allocate_unexpired(
    batches: &[StockBatch],
    required_quantity: i64,
    as_of: NaiveDate,
) -> Result<Allocation, PharmacyError> {
    let unexpired: Vec<StockBatch> = batches
        .iter()
        .filter(|b| !b.is_expired_on(as_of))
        .cloned()
        .collect();

    allocate(&unexpired, required_quantity)
}
