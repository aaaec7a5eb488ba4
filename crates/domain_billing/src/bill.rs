//! Bill state and the totals recompute
//!
//! [`Bill`] is an immutable value. Each edit consumes the bill and returns a
//! new one with freshly recomputed totals, so the discount and tax can never
//! go stale relative to each other or to the lines.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::{BillId, Currency, LineItemId, Money, Rate};

use crate::error::BillingError;
use crate::line_item::BillLineItem;

/// Discount and tax inputs as typed by the user
///
/// A positive percentage takes precedence over the matching absolute
/// amount; the absolute amount only counts while its percentage is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillAdjustments {
    #[serde(default)]
    pub discount_percent: Decimal,
    #[serde(default)]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub tax_percent: Decimal,
    #[serde(default)]
    pub tax_amount: Decimal,
}

impl BillAdjustments {
    /// Checks the inputs at the edit boundary
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for any negative input or a discount
    /// percentage above 100
    pub fn validate(&self) -> Result<(), BillingError> {
        let fields = [
            ("discount_percent", self.discount_percent),
            ("discount_amount", self.discount_amount),
            ("tax_percent", self.tax_percent),
            ("tax_amount", self.tax_amount),
        ];

        if let Some((name, value)) = fields.iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(BillingError::InvalidInput(format!(
                "{} must not be negative, got {}",
                name, value
            )));
        }

        if self.discount_percent > dec!(100) {
            return Err(BillingError::InvalidInput(format!(
                "discount_percent must not exceed 100, got {}",
                self.discount_percent
            )));
        }

        Ok(())
    }
}

/// Derived bill totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillTotals {
    pub subtotal: Money,
    pub discount: Money,
    pub tax: Money,
    pub net: Money,
}

impl BillTotals {
    pub fn zero(currency: Currency) -> Self {
        Self {
            subtotal: Money::zero(currency),
            discount: Money::zero(currency),
            tax: Money::zero(currency),
            net: Money::zero(currency),
        }
    }
}

/// Recomputes bill totals from scratch
///
/// 1. `subtotal` is the sum of line amounts
/// 2. `discount` is `subtotal × discount%` if the percentage is positive,
///    otherwise the absolute discount amount
/// 3. `tax` is `(subtotal − discount) × tax%` if the percentage is positive,
///    otherwise the absolute tax amount
/// 4. `net = subtotal − discount + tax`
///
/// Pure and idempotent. Line amounts are taken to be in `currency`; [`Bill`]
/// guarantees that for the lines it holds.
pub fn recompute(lines: &[BillLineItem], adjustments: &BillAdjustments, currency: Currency) -> BillTotals {
    let subtotal = Money::new(lines.iter().map(|l| l.amount.amount()).sum(), currency);

    let discount_rate = Rate::from_percentage(adjustments.discount_percent);
    let discount = if discount_rate.is_positive() {
        discount_rate.apply(&subtotal)
    } else {
        Money::new(adjustments.discount_amount, currency)
    };

    let taxable = subtotal - discount;
    let tax_rate = Rate::from_percentage(adjustments.tax_percent);
    let tax = if tax_rate.is_positive() {
        tax_rate.apply(&taxable)
    } else {
        Money::new(adjustments.tax_amount, currency)
    };

    BillTotals {
        subtotal,
        discount,
        tax,
        net: taxable + tax,
    }
}

/// A bill being built in a dispensing session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bill {
    id: BillId,
    currency: Currency,
    lines: Vec<BillLineItem>,
    adjustments: BillAdjustments,
    totals: BillTotals,
}

impl Bill {
    /// Creates an empty bill
    pub fn new(currency: Currency) -> Self {
        Self {
            id: BillId::new_v7(),
            currency,
            lines: Vec::new(),
            adjustments: BillAdjustments::default(),
            totals: BillTotals::zero(currency),
        }
    }

    pub fn id(&self) -> BillId {
        self.id
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn lines(&self) -> &[BillLineItem] {
        &self.lines
    }

    /// Finds a line by id
    pub fn line(&self, id: LineItemId) -> Option<&BillLineItem> {
        self.lines.iter().find(|l| l.id == id)
    }

    pub fn adjustments(&self) -> &BillAdjustments {
        &self.adjustments
    }

    pub fn totals(&self) -> &BillTotals {
        &self.totals
    }

    /// Appends a line
    ///
    /// # Errors
    ///
    /// Returns `Money(CurrencyMismatch)` if the line is priced in another
    /// currency, or `InvalidInput` for a negative quantity or amount
    pub fn with_line(mut self, item: BillLineItem) -> Result<Self, BillingError> {
        self.check_line(&item)?;
        self.lines.push(item);
        Ok(self.recomputed())
    }

    /// Replaces the line `id` with `item`, keeping the line's id and position
    pub fn replace_line(mut self, id: LineItemId, mut item: BillLineItem) -> Result<Self, BillingError> {
        self.check_line(&item)?;
        let slot = self
            .lines
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(BillingError::LineItemNotFound(id))?;

        item.id = id;
        *slot = item;
        Ok(self.recomputed())
    }

    /// Removes the line `id`
    pub fn without_line(mut self, id: LineItemId) -> Result<Self, BillingError> {
        let position = self
            .lines
            .iter()
            .position(|l| l.id == id)
            .ok_or(BillingError::LineItemNotFound(id))?;

        self.lines.remove(position);
        Ok(self.recomputed())
    }

    pub fn with_discount_percent(self, percent: Decimal) -> Result<Self, BillingError> {
        let adjustments = BillAdjustments {
            discount_percent: percent,
            ..self.adjustments
        };
        self.with_adjustments(adjustments)
    }

    pub fn with_discount_amount(self, amount: Decimal) -> Result<Self, BillingError> {
        let adjustments = BillAdjustments {
            discount_amount: amount,
            ..self.adjustments
        };
        self.with_adjustments(adjustments)
    }

    pub fn with_tax_percent(self, percent: Decimal) -> Result<Self, BillingError> {
        let adjustments = BillAdjustments {
            tax_percent: percent,
            ..self.adjustments
        };
        self.with_adjustments(adjustments)
    }

    pub fn with_tax_amount(self, amount: Decimal) -> Result<Self, BillingError> {
        let adjustments = BillAdjustments {
            tax_amount: amount,
            ..self.adjustments
        };
        self.with_adjustments(adjustments)
    }

    /// Replaces all four discount/tax inputs at once
    pub fn with_adjustments(mut self, adjustments: BillAdjustments) -> Result<Self, BillingError> {
        adjustments.validate()?;
        self.adjustments = adjustments;
        Ok(self.recomputed())
    }

    fn check_line(&self, item: &BillLineItem) -> Result<(), BillingError> {
        Money::zero(self.currency).ensure_same_currency(&item.amount)?;
        Money::zero(self.currency).ensure_same_currency(&item.display_unit_price)?;

        if item.quantity < 0 || item.amount.is_negative() || item.display_unit_price.is_negative() {
            return Err(BillingError::InvalidInput(format!(
                "Line {} has a negative quantity or price",
                item.id
            )));
        }
        Ok(())
    }

    fn recomputed(mut self) -> Self {
        self.totals = recompute(&self.lines, &self.adjustments, self.currency);
        debug!(
            bill_id = %self.id,
            lines = self.lines.len(),
            subtotal = %self.totals.subtotal,
            net = %self.totals.net,
            "Recomputed bill totals"
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bill_totals_are_zero() {
        let bill = Bill::new(Currency::INR);
        assert_eq!(*bill.totals(), BillTotals::zero(Currency::INR));
    }

    #[test]
    fn test_absolute_tax_when_no_tax_percent() {
        let adjustments = BillAdjustments {
            tax_amount: dec!(12.5),
            ..Default::default()
        };
        let totals = recompute(&[], &adjustments, Currency::INR);
        assert_eq!(totals.tax.amount(), dec!(12.5));
        assert_eq!(totals.net.amount(), dec!(12.5));
    }

    #[test]
    fn test_validate_rejects_discount_over_hundred() {
        let adjustments = BillAdjustments {
            discount_percent: dec!(100.01),
            ..Default::default()
        };
        assert!(matches!(adjustments.validate(), Err(BillingError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_rejects_negative_tax_amount() {
        let adjustments = BillAdjustments {
            tax_amount: dec!(-1),
            ..Default::default()
        };
        let err = adjustments.validate().unwrap_err();
        assert!(err.to_string().contains("tax_amount"));
    }
}
