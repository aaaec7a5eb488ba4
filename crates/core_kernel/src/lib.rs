//! Core Kernel - Foundational types for the pharmacy billing system
//!
//! This crate provides the building blocks shared by the dispensing and
//! billing domains:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - Port error type and marker trait for injected capabilities

pub mod money;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError, Rate, MONEY_SCALE};
pub use identifiers::{MedicineId, BillId, LineItemId, PaymentId};
pub use ports::{DomainPort, PortError};
