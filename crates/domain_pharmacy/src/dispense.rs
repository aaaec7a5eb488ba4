//! Dispense quoting
//!
//! Composes the catalog read with allocation and pricing to produce the
//! line payload handed to billing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::{MedicineId, MONEY_SCALE};

use crate::allocator::{allocate, allocate_unexpired, Allocation};
use crate::batch::validate_batches;
use crate::catalog::BatchCatalog;
use crate::error::PharmacyError;
use crate::pricing::{line_amount, resolve_price};

/// A request to dispense a quantity of one medicine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispenseRequest {
    pub medicine_id: MedicineId,
    pub required_quantity: i64,
}

impl DispenseRequest {
    pub fn new(medicine_id: MedicineId, required_quantity: i64) -> Self {
        Self {
            medicine_id,
            required_quantity,
        }
    }
}

/// A priced allocation, ready to become a bill line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispensedLine {
    pub medicine_id: MedicineId,
    /// Units dispensed; equals the request unless it was non-positive
    pub quantity: i64,
    pub allocations: Allocation,
    /// Resolved display price per unit
    pub unit_price: Decimal,
    /// `quantity * unit_price`
    pub amount: Decimal,
    /// e.g. `B1(5) + B2(3)`
    pub batch_label: String,
    /// e.g. `2025-01-01, 2025-06-01`
    pub expiry_label: String,
}

impl DispensedLine {
    /// Prices an allocation for a medicine
    ///
    /// The resolved price is rounded to money scale before it is multiplied
    /// out, so `amount == quantity * unit_price` holds exactly once both are
    /// carried as money.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the line amount overflows
    pub fn from_allocation(medicine_id: MedicineId, allocation: Allocation) -> Result<Self, PharmacyError> {
        let quantity = allocation.total_quantity();
        let unit_price = resolve_price(allocation.lines()).round_dp(MONEY_SCALE);
        let amount = line_amount(quantity, unit_price)?;

        Ok(Self {
            medicine_id,
            quantity,
            unit_price,
            amount,
            batch_label: allocation.batch_label(),
            expiry_label: allocation.expiry_label(),
            allocations: allocation,
        })
    }
}

/// Options for the dispense service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispenseOptions {
    /// When set, batches that expired before this date are not dispensed
    pub exclude_expired_as_of: Option<NaiveDate>,
}

/// Quotes dispensed lines against an injected batch catalog
#[derive(Debug, Clone)]
pub struct DispenseService<C> {
    catalog: C,
    options: DispenseOptions,
}

impl<C: BatchCatalog> DispenseService<C> {
    /// Creates a service with default options
    pub fn new(catalog: C) -> Self {
        Self::with_options(catalog, DispenseOptions::default())
    }

    pub fn with_options(catalog: C, options: DispenseOptions) -> Self {
        Self { catalog, options }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn options(&self) -> DispenseOptions {
        self.options
    }

    /// Quotes a line for the request from a fresh catalog snapshot
    ///
    /// The catalog is read once. Non-positive requests still read and
    /// validate the snapshot but produce an empty, zero-amount line.
    ///
    /// # Errors
    ///
    /// - `Catalog` if the snapshot cannot be fetched
    /// - `InvalidInput` if any batch in the snapshot is malformed
    /// - `InsufficientStock` if the snapshot cannot cover the request
    /// - `InvalidInput` if the line amount overflows
    #[instrument(skip(self), fields(medicine_id = %request.medicine_id, quantity = request.required_quantity))]
    pub fn quote(&self, request: DispenseRequest) -> Result<DispensedLine, PharmacyError> {
        let batches = self.catalog.batches(request.medicine_id)?;
        validate_batches(&batches)?;

        let allocation = match self.options.exclude_expired_as_of {
            Some(as_of) => allocate_unexpired(&batches, request.required_quantity, as_of)?,
            None => allocate(&batches, request.required_quantity)?,
        };

        let line = DispensedLine::from_allocation(request.medicine_id, allocation)?;
        debug!(
            unit_price = %line.unit_price,
            amount = %line.amount,
            batches = %line.batch_label,
            "Quoted dispense line"
        );
        Ok(line)
    }
}
