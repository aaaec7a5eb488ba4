//! Pharmacy Dispensing Domain
//!
//! This crate decides which physical stock batches a dispensed quantity of a
//! medicine is drawn from and what single unit price the resulting bill line
//! shows.
//!
//! # Pipeline
//!
//! ```text
//! BatchCatalog ──▶ allocate ──▶ resolve_price ──▶ DispensedLine
//!  (snapshot)     (FIFO by      (highest batch     (amount, batch
//!                  expiry)        price)             and expiry labels)
//! ```
//!
//! Everything after the catalog read is a pure function of the snapshot, so
//! a quote can be recomputed on every keystroke of an editing screen. Stock
//! is never decremented here; committing the allocation belongs to the
//! inventory service.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use domain_pharmacy::{allocate, resolve_price, StockBatch};
//! use rust_decimal_macros::dec;
//!
//! let batches = vec![
//!     StockBatch::new("B1", 5, dec!(10), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
//!     StockBatch::new("B2", 10, dec!(12), NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
//! ];
//!
//! let allocation = allocate(&batches, 8).unwrap();
//! assert_eq!(allocation.batch_label(), "B1(5) + B2(3)");
//! assert_eq!(resolve_price(allocation.lines()), dec!(12));
//! ```

pub mod batch;
pub mod catalog;
pub mod allocator;
pub mod pricing;
pub mod dispense;
pub mod error;

pub use batch::{StockBatch, validate_batches, available_quantity};
pub use catalog::{BatchCatalog, InMemoryBatchCatalog};
pub use allocator::{allocate, allocate_unexpired, Allocation, AllocationLine};
pub use pricing::{resolve_price, line_amount};
pub use dispense::{DispenseOptions, DispenseRequest, DispenseService, DispensedLine};
pub use error::PharmacyError;
