//! Bill line items

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, LineItemId, MedicineId, Money};
use domain_pharmacy::{Allocation, DispensedLine};

use crate::error::BillingError;

/// One medicine + quantity entry on a bill
///
/// `amount == quantity * display_unit_price` holds for every line built
/// through the constructors here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillLineItem {
    pub id: LineItemId,
    pub medicine_id: MedicineId,
    pub quantity: i64,
    /// Batches the units are drawn from
    pub allocations: Allocation,
    /// Single unit price shown on the bill
    pub display_unit_price: Money,
    pub amount: Money,
    pub batch_label: String,
    pub expiry_label: String,
}

impl BillLineItem {
    /// Converts a quoted dispense line into a bill line in `currency`
    ///
    /// The amount is taken from the display price as stored, not from the
    /// quoted amount, so the two can never disagree after rounding.
    pub fn from_dispensed(line: DispensedLine, currency: Currency) -> Self {
        let display_unit_price = Money::new(line.unit_price, currency);

        Self {
            id: LineItemId::new_v7(),
            medicine_id: line.medicine_id,
            quantity: line.quantity,
            display_unit_price,
            amount: display_unit_price * Decimal::from(line.quantity),
            batch_label: line.batch_label,
            expiry_label: line.expiry_label,
            allocations: line.allocations,
        }
    }

    /// Prices an allocation and converts it into a bill line
    ///
    /// # Errors
    ///
    /// Returns `Pricing` if the line amount overflows
    pub fn from_allocation(
        medicine_id: MedicineId,
        allocation: Allocation,
        currency: Currency,
    ) -> Result<Self, BillingError> {
        let line = DispensedLine::from_allocation(medicine_id, allocation)?;
        Ok(Self::from_dispensed(line, currency))
    }

    pub fn currency(&self) -> Currency {
        self.amount.currency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain_pharmacy::{allocate, StockBatch};
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_is_quantity_times_display_price() {
        let expiry = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let batches = vec![
            StockBatch::new("B1", 2, dec!(3.25), expiry),
            StockBatch::new("B2", 5, dec!(4.10), expiry),
        ];
        let allocation = allocate(&batches, 4).unwrap();
        let item = BillLineItem::from_allocation(MedicineId::new(), allocation, Currency::INR).unwrap();

        assert_eq!(item.display_unit_price.amount(), dec!(4.10));
        assert_eq!(item.amount, item.display_unit_price * Decimal::from(item.quantity));
        assert_eq!(item.amount.amount(), dec!(16.40));
        assert_eq!(item.currency(), Currency::INR);
    }

    #[test]
    fn test_five_decimal_price_keeps_amount_consistent() {
        let expiry = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let batches = vec![StockBatch::new("B1", 10, dec!(1.23456), expiry)];
        let allocation = allocate(&batches, 3).unwrap();
        let item = BillLineItem::from_allocation(MedicineId::new(), allocation, Currency::INR).unwrap();

        assert_eq!(item.display_unit_price.amount(), dec!(1.2346));
        assert_eq!(item.amount.amount(), dec!(3.7038));
        assert_eq!(item.amount, item.display_unit_price * Decimal::from(item.quantity));
    }

    #[test]
    fn test_hand_built_dispense_line_amount_follows_display_price() {
        let line = DispensedLine {
            medicine_id: MedicineId::new(),
            quantity: 3,
            allocations: Allocation::empty(),
            unit_price: dec!(1.23456),
            amount: dec!(3.70368),
            batch_label: String::new(),
            expiry_label: String::new(),
        };
        let item = BillLineItem::from_dispensed(line, Currency::INR);
        assert_eq!(item.amount.amount(), dec!(3.7038));
    }
}
