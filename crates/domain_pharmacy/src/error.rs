//! Pharmacy domain errors

use core_kernel::PortError;
use thiserror::Error;

/// Errors that can occur while dispensing
#[derive(Debug, Error)]
pub enum PharmacyError {
    /// Requested quantity exceeds everything the snapshot has on hand
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        requested: i64,
        available: i64,
    },

    /// Malformed batch data or request
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The batch catalog could not be read
    #[error("Catalog error: {0}")]
    Catalog(#[from] PortError),
}

impl PharmacyError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        PharmacyError::InvalidInput(message.into())
    }

    /// Returns true if re-fetching a fresh snapshot may change the outcome
    ///
    /// Allocation is pure, so repeating it on the same snapshot always fails
    /// the same way.
    pub fn is_retryable_with_fresh_snapshot(&self) -> bool {
        match self {
            PharmacyError::InsufficientStock { .. } => true,
            PharmacyError::Catalog(err) => err.is_transient(),
            PharmacyError::InvalidInput(_) => false,
        }
    }
}
