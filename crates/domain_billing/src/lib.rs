//! Billing Domain - Pharmacy Bills and Payment Reconciliation
//!
//! This crate turns dispensed lines into a bill and keeps its totals
//! consistent while the bill is being edited.
//!
//! # Recompute chain
//!
//! ```text
//! subtotal = Σ line.amount
//! discount = discount% > 0 ? subtotal × discount% : discount amount
//! tax      = tax% > 0      ? (subtotal − discount) × tax% : tax amount
//! net      = subtotal − discount + tax
//! ```
//!
//! A percentage always wins over a typed absolute amount. Totals are never
//! adjusted incrementally: every edit of a [`Bill`] produces a new value
//! whose totals were recomputed from all current lines and adjustments.
//!
//! # Payments
//!
//! Payments live in a separate append/soft-delete [`PaymentLedger`]. The due
//! amount is the bill's net minus all active payments.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{Bill, BillLineItem};
//!
//! let bill = Bill::new(Currency::INR)
//!     .with_line(BillLineItem::from_dispensed(line, Currency::INR))?
//!     .with_discount_percent(dec!(10))?
//!     .with_tax_percent(dec!(5))?;
//!
//! let mut payments = PaymentLedger::new(Currency::INR);
//! payments.record(bill.totals().net, Money::new(dec!(500), Currency::INR), PaymentMode::Cash)?;
//! ```

pub mod line_item;
pub mod bill;
pub mod payment;
pub mod error;

pub use line_item::BillLineItem;
pub use bill::{recompute, Bill, BillAdjustments, BillTotals};
pub use payment::{due, total_paid, Payment, PaymentLedger, PaymentMode, SettlementStatus};
pub use error::BillingError;
