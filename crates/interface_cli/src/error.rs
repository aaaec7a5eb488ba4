//! Preview error handling

use core_kernel::MedicineId;
use domain_billing::BillingError;
use domain_pharmacy::PharmacyError;
use thiserror::Error;

/// Errors from running a bill preview
#[derive(Debug, Error)]
pub enum PreviewError {
    /// The request body could not be parsed
    #[error("Malformed request: {0}")]
    Request(#[from] serde_json::Error),

    /// A requested line could not be dispensed
    #[error("Cannot dispense {medicine_id}: {source}")]
    Dispense {
        medicine_id: MedicineId,
        #[source]
        source: PharmacyError,
    },

    /// A bill or payment edit was rejected
    #[error("Billing error: {0}")]
    Billing(#[from] BillingError),
}
