//! Payment recording and due reconciliation
//!
//! Payments are appended to a ledger and only ever soft-deleted, so the due
//! amount can always be rebuilt from the log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use core_kernel::{Currency, Money, PaymentId};

use crate::error::BillingError;

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    Cash,
    Card,
    Upi,
    BankTransfer,
    Cheque,
    Insurance,
}

/// Settlement state of a bill given its payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    /// Nothing paid yet
    Unpaid,
    /// Some payment recorded, balance remaining
    PartiallyPaid,
    /// Due amount is zero or below
    Settled,
}

/// A payment against a bill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub amount: Money,
    pub mode: PaymentMode,
    /// Receipt or transaction reference
    pub reference: Option<String>,
    pub recorded_at: DateTime<Utc>,
    /// Set when the payment is soft-deleted
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Payment {
    /// Creates a new active payment
    pub fn new(amount: Money, mode: PaymentMode) -> Self {
        Self {
            id: PaymentId::new_v7(),
            amount,
            mode,
            reference: None,
            recorded_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Sets the external reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Sum of active payments, in `currency`
///
/// Payments in another currency are not counted; [`PaymentLedger`] never
/// holds any.
pub fn total_paid(payments: &[Payment], currency: Currency) -> Money {
    Money::new(
        payments
            .iter()
            .filter(|p| p.is_active() && p.amount.currency() == currency)
            .map(|p| p.amount.amount())
            .sum(),
        currency,
    )
}

/// Amount still owed: `net - Σ active payments`
///
/// Zero or below means the bill is settled.
pub fn due(net: Money, payments: &[Payment]) -> Money {
    net - total_paid(payments, net.currency())
}

/// Append/soft-delete log of payments for one bill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentLedger {
    currency: Currency,
    payments: Vec<Payment>,
}

impl PaymentLedger {
    /// Creates an empty ledger
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            payments: Vec::new(),
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// All payments, deleted ones included, in recording order
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Payments that still count towards the bill
    pub fn active(&self) -> impl Iterator<Item = &Payment> {
        self.payments.iter().filter(|p| p.is_active())
    }

    pub fn get(&self, id: PaymentId) -> Option<&Payment> {
        self.payments.iter().find(|p| p.id == id)
    }

    pub fn total_paid(&self) -> Money {
        total_paid(&self.payments, self.currency)
    }

    /// Due amount against the bill's current net
    pub fn due(&self, net: Money) -> Money {
        due(net, &self.payments)
    }

    /// Settlement state against the bill's current net
    pub fn status(&self, net: Money) -> SettlementStatus {
        if !self.due(net).is_positive() {
            SettlementStatus::Settled
        } else if self.total_paid().is_positive() {
            SettlementStatus::PartiallyPaid
        } else {
            SettlementStatus::Unpaid
        }
    }

    /// Records a payment against a bill whose net amount is `net`
    ///
    /// # Errors
    ///
    /// - `Money(CurrencyMismatch)` if `amount` or `net` is in another currency
    /// - `InvalidInput` if `amount` is not positive
    /// - `Overpayment` if `amount` exceeds the current due amount
    pub fn record(&mut self, net: Money, amount: Money, mode: PaymentMode) -> Result<PaymentId, BillingError> {
        self.record_payment(net, Payment::new(amount, mode))
    }

    /// Records a prepared payment, e.g. one carrying a reference
    pub fn record_payment(&mut self, net: Money, payment: Payment) -> Result<PaymentId, BillingError> {
        let zero = Money::zero(self.currency);
        zero.ensure_same_currency(&net)?;
        zero.ensure_same_currency(&payment.amount)?;

        if !payment.amount.is_positive() {
            return Err(BillingError::InvalidInput(format!(
                "Payment amount must be positive, got {}",
                payment.amount
            )));
        }

        let current_due = self.due(net);
        if payment.amount.amount() > current_due.amount() {
            warn!(amount = %payment.amount, due = %current_due, "Rejected overpayment");
            return Err(BillingError::Overpayment {
                amount: payment.amount,
                due: current_due,
            });
        }

        let id = payment.id;
        debug!(payment_id = %id, amount = %payment.amount, mode = ?payment.mode, "Recorded payment");
        self.payments.push(Payment {
            deleted_at: None,
            ..payment
        });
        Ok(id)
    }

    /// Soft-deletes a payment and returns the amount added back to the due
    ///
    /// # Errors
    ///
    /// Returns `PaymentNotFound` for an unknown id, or
    /// `PaymentAlreadyDeleted` if it was deleted before
    pub fn delete(&mut self, id: PaymentId) -> Result<Money, BillingError> {
        let payment = self
            .payments
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(BillingError::PaymentNotFound(id))?;

        if !payment.is_active() {
            return Err(BillingError::PaymentAlreadyDeleted(id));
        }

        payment.deleted_at = Some(Utc::now());
        debug!(payment_id = %id, amount = %payment.amount, "Deleted payment");
        Ok(payment.amount)
    }
}
