//! Billing domain errors

use core_kernel::{LineItemId, Money, MoneyError, PaymentId};
use domain_pharmacy::PharmacyError;
use thiserror::Error;

/// Errors raised at the bill and payment edit boundary
#[derive(Debug, Error)]
pub enum BillingError {
    /// Negative amounts, out-of-range percentages and similar input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Amounts in different currencies were combined
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// An allocation could not be priced into a line
    #[error("Pricing error: {0}")]
    Pricing(#[from] PharmacyError),

    /// Line item not found on the bill
    #[error("Line item not found: {0}")]
    LineItemNotFound(LineItemId),

    /// Payment not found in the ledger
    #[error("Payment not found: {0}")]
    PaymentNotFound(PaymentId),

    /// Payment was already deleted
    #[error("Payment already deleted: {0}")]
    PaymentAlreadyDeleted(PaymentId),

    /// Payment would take the due amount below zero
    #[error("Payment of {amount} exceeds amount due {due}")]
    Overpayment {
        amount: Money,
        due: Money,
    },
}

impl BillingError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        BillingError::InvalidInput(message.into())
    }
}
