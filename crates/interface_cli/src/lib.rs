//! Bill preview front end
//!
//! Runs a JSON description of a dispensing session through the pharmacy and
//! billing crates: every requested line is allocated FIFO-by-expiry against
//! the supplied stock snapshot, the bill is recomputed with the given
//! discount and tax, and payments are reconciled against the net.
//!
//! # Configuration
//!
//! See [`config::PreviewConfig`] for the `PHARMACY_*` environment variables.

pub mod config;
pub mod dto;
pub mod error;

use chrono::Utc;
use tracing::{info, instrument};

use core_kernel::Money;
use domain_billing::{Bill, BillLineItem, Payment, PaymentLedger};
use domain_pharmacy::{DispenseOptions, DispenseRequest, DispenseService, InMemoryBatchCatalog};

pub use config::{LogFormat, PreviewConfig};
pub use dto::{CatalogEntry, LineRequest, PaymentRequest, PreviewRequest, PreviewResponse};
pub use error::PreviewError;

/// Builds a bill from a preview request
///
/// Lines are added in request order. The first line that cannot be
/// dispensed aborts the preview, as does any rejected payment.
#[instrument(skip_all, fields(lines = request.lines.len(), payments = request.payments.len()))]
pub fn preview(request: PreviewRequest, config: &PreviewConfig) -> Result<PreviewResponse, PreviewError> {
    let currency = request.currency.unwrap_or(config.currency);

    let catalog = request
        .catalog
        .into_iter()
        .fold(InMemoryBatchCatalog::new(), |catalog, entry| {
            catalog.with_batches(entry.medicine_id, entry.batches)
        });

    let options = DispenseOptions {
        exclude_expired_as_of: config
            .exclude_expired
            .then(|| request.as_of.unwrap_or_else(|| Utc::now().date_naive())),
    };
    let service = DispenseService::with_options(catalog, options);

    let mut bill = Bill::new(currency);
    for line in &request.lines {
        let dispensed = service
            .quote(DispenseRequest::new(line.medicine_id, line.quantity))
            .map_err(|source| PreviewError::Dispense {
                medicine_id: line.medicine_id,
                source,
            })?;
        bill = bill.with_line(BillLineItem::from_dispensed(dispensed, currency))?;
    }
    let bill = bill.with_adjustments(request.adjustments)?;

    let net = bill.totals().net;
    let mut ledger = PaymentLedger::new(currency);
    for payment in request.payments {
        let mut entry = Payment::new(Money::new(payment.amount, currency), payment.mode);
        if let Some(reference) = payment.reference {
            entry = entry.with_reference(reference);
        }
        ledger.record_payment(net, entry)?;
    }

    let response = PreviewResponse {
        bill_id: bill.id(),
        currency,
        lines: bill.lines().to_vec(),
        adjustments: *bill.adjustments(),
        totals: *bill.totals(),
        payments: ledger.payments().to_vec(),
        total_paid: ledger.total_paid(),
        due: ledger.due(net),
        status: ledger.status(net),
    };

    info!(
        bill_id = %response.bill_id,
        net = %response.totals.net,
        due = %response.due,
        status = ?response.status,
        "Bill preview built"
    );

    Ok(response)
}

/// Parses a JSON request, runs [`preview`], and renders the response
pub fn preview_json(input: &str, config: &PreviewConfig) -> Result<String, PreviewError> {
    let request: PreviewRequest = serde_json::from_str(input)?;
    let response = preview(request, config)?;
    Ok(serde_json::to_string_pretty(&response)?)
}
