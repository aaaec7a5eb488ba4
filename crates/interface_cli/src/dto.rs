//! Request and response bodies for the bill preview

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{BillId, Currency, MedicineId, Money};
use domain_billing::{BillAdjustments, BillLineItem, BillTotals, Payment, PaymentMode, SettlementStatus};
use domain_pharmacy::StockBatch;

/// Stock snapshot for one medicine
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub medicine_id: MedicineId,
    pub batches: Vec<StockBatch>,
}

/// A requested bill line
#[derive(Debug, Clone, Deserialize)]
pub struct LineRequest {
    pub medicine_id: MedicineId,
    pub quantity: i64,
}

/// A payment to record after the bill is built
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    pub amount: Decimal,
    pub mode: PaymentMode,
    #[serde(default)]
    pub reference: Option<String>,
}

/// Full preview request
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewRequest {
    /// Overrides the configured currency
    #[serde(default)]
    pub currency: Option<Currency>,
    /// Reference date for expiry filtering; defaults to today
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    pub catalog: Vec<CatalogEntry>,
    pub lines: Vec<LineRequest>,
    #[serde(default)]
    pub adjustments: BillAdjustments,
    #[serde(default)]
    pub payments: Vec<PaymentRequest>,
}

/// Bill preview response
#[derive(Debug, Clone, Serialize)]
pub struct PreviewResponse {
    pub bill_id: BillId,
    pub currency: Currency,
    pub lines: Vec<BillLineItem>,
    pub adjustments: BillAdjustments,
    pub totals: BillTotals,
    pub payments: Vec<Payment>,
    pub total_paid: Money,
    pub due: Money,
    pub status: SettlementStatus,
}
