//! Batch catalog port
//!
//! The stock query is injected rather than reached for globally, so the
//! allocator and pricing code never perform I/O themselves.

use std::collections::HashMap;

use core_kernel::{DomainPort, MedicineId, PortError};

use crate::batch::StockBatch;

/// Read-only view of a medicine's stock batches
///
/// One call returns a point-in-time snapshot. Implementations make no
/// promise that the stock is still there when the allocation is committed;
/// that race is resolved by the inventory service at commit time.
pub trait BatchCatalog: DomainPort {
    /// Returns the current batches for a medicine
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` if the medicine is unknown, or an
    /// adapter-specific error if the underlying stock query fails
    fn batches(&self, medicine_id: MedicineId) -> Result<Vec<StockBatch>, PortError>;
}

/// Catalog backed by a map, for fixtures and local previews
#[derive(Debug, Clone, Default)]
pub struct InMemoryBatchCatalog {
    stock: HashMap<MedicineId, Vec<StockBatch>>,
}

impl InMemoryBatchCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the batches for a medicine
    pub fn with_batches(mut self, medicine_id: MedicineId, batches: Vec<StockBatch>) -> Self {
        self.insert(medicine_id, batches);
        self
    }

    /// Adds (or replaces) the batches for a medicine
    pub fn insert(&mut self, medicine_id: MedicineId, batches: Vec<StockBatch>) {
        self.stock.insert(medicine_id, batches);
    }

    /// Number of medicines known to the catalog
    pub fn len(&self) -> usize {
        self.stock.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }
}

impl DomainPort for InMemoryBatchCatalog {}

impl BatchCatalog for InMemoryBatchCatalog {
    fn batches(&self, medicine_id: MedicineId) -> Result<Vec<StockBatch>, PortError> {
        self.stock
            .get(&medicine_id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Medicine", medicine_id))
    }
}
