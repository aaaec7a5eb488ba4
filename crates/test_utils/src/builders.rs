//! Test Data Builders
//!
//! Builders that default everything a test does not care about.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use core_kernel::{Currency, MedicineId};
use domain_billing::{Bill, BillAdjustments, BillLineItem};
use domain_pharmacy::{allocate, StockBatch};

use crate::fixtures::DateFixtures;

/// Builder for stock batches
pub struct StockBatchBuilder {
    batch_number: String,
    quantity: i64,
    unit_price: Decimal,
    expiry_date: NaiveDate,
}

impl Default for StockBatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StockBatchBuilder {
    /// Creates a builder for 10 units at 10.00 expiring 2025-01-01
    pub fn new() -> Self {
        Self {
            batch_number: "B1".to_string(),
            quantity: 10,
            unit_price: dec!(10),
            expiry_date: DateFixtures::early_expiry(),
        }
    }

    pub fn batch_number(mut self, batch_number: impl Into<String>) -> Self {
        self.batch_number = batch_number.into();
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn unit_price(mut self, unit_price: Decimal) -> Self {
        self.unit_price = unit_price;
        self
    }

    pub fn expiry(mut self, expiry_date: NaiveDate) -> Self {
        self.expiry_date = expiry_date;
        self
    }

    pub fn build(self) -> StockBatch {
        StockBatch::new(self.batch_number, self.quantity, self.unit_price, self.expiry_date)
    }
}

/// Builds a bill line for `quantity` units drawn from `batches`
///
/// # Panics
///
/// Panics if the batches cannot cover the quantity
pub fn line_from_batches(batches: &[StockBatch], quantity: i64, currency: Currency) -> BillLineItem {
    let allocation = allocate(batches, quantity).expect("fixture stock covers the quantity");
    BillLineItem::from_allocation(MedicineId::new(), allocation, currency)
        .expect("fixture line amount fits")
}

/// Builds a bill line of `quantity` units at a flat `unit_price`
pub fn flat_line(quantity: i64, unit_price: Decimal, currency: Currency) -> BillLineItem {
    let batch = StockBatchBuilder::new()
        .quantity(quantity.max(0))
        .unit_price(unit_price)
        .build();
    line_from_batches(&[batch], quantity, currency)
}

/// Builder for bills
pub struct BillBuilder {
    currency: Currency,
    lines: Vec<BillLineItem>,
    adjustments: BillAdjustments,
}

impl Default for BillBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BillBuilder {
    /// Creates a builder for an empty INR bill
    pub fn new() -> Self {
        Self {
            currency: Currency::INR,
            lines: Vec::new(),
            adjustments: BillAdjustments::default(),
        }
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Adds a line of `quantity` units at a flat `unit_price`
    pub fn line(mut self, quantity: i64, unit_price: Decimal) -> Self {
        self.lines.push(flat_line(quantity, unit_price, self.currency));
        self
    }

    pub fn adjustments(mut self, adjustments: BillAdjustments) -> Self {
        self.adjustments = adjustments;
        self
    }

    /// Builds the bill
    ///
    /// # Panics
    ///
    /// Panics if any edit is rejected
    pub fn build(self) -> Bill {
        let bill = self
            .lines
            .into_iter()
            .try_fold(Bill::new(self.currency), Bill::with_line)
            .expect("fixture lines are valid");
        bill.with_adjustments(self.adjustments)
            .expect("fixture adjustments are valid")
    }
}

/// Builder for JSON preview requests
pub struct PreviewRequestBuilder {
    catalog: Vec<Value>,
    lines: Vec<Value>,
    adjustments: Value,
    payments: Vec<Value>,
    extra: Vec<(String, Value)>,
}

impl Default for PreviewRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewRequestBuilder {
    pub fn new() -> Self {
        Self {
            catalog: Vec::new(),
            lines: Vec::new(),
            adjustments: json!({}),
            payments: Vec::new(),
            extra: Vec::new(),
        }
    }

    /// Adds a stock snapshot for a medicine
    pub fn stock(mut self, medicine_id: MedicineId, batches: &[StockBatch]) -> Self {
        self.catalog.push(json!({
            "medicine_id": medicine_id,
            "batches": batches,
        }));
        self
    }

    /// Requests `quantity` units of a medicine
    pub fn line(mut self, medicine_id: MedicineId, quantity: i64) -> Self {
        self.lines.push(json!({
            "medicine_id": medicine_id,
            "quantity": quantity,
        }));
        self
    }

    pub fn adjustments(mut self, adjustments: BillAdjustments) -> Self {
        self.adjustments = json!(adjustments);
        self
    }

    /// Adds a payment; `mode` is the snake_case mode name
    pub fn payment(mut self, amount: Decimal, mode: &str) -> Self {
        self.payments.push(json!({
            "amount": amount,
            "mode": mode,
        }));
        self
    }

    /// Sets any other top-level field, e.g. `currency` or `as_of`
    pub fn field(mut self, name: &str, value: Value) -> Self {
        self.extra.push((name.to_string(), value));
        self
    }

    pub fn build(self) -> Value {
        let mut request = json!({
            "catalog": self.catalog,
            "lines": self.lines,
            "adjustments": self.adjustments,
            "payments": self.payments,
        });
        if let Value::Object(map) = &mut request {
            for (name, value) in self.extra {
                map.insert(name, value);
            }
        }
        request
    }
}
