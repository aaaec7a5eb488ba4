//! Tests for domain_billing

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, LineItemId, Money, MoneyError, PaymentId};

use domain_billing::bill::{recompute, Bill, BillAdjustments};
use domain_billing::payment::{PaymentLedger, PaymentMode, SettlementStatus};
use domain_billing::BillingError;
use test_utils::{assert_bill_consistent, assert_money_zero, flat_line, BillBuilder};

fn inr(amount: Decimal) -> Money {
    Money::new(amount, Currency::INR)
}

/// Bill with a subtotal of 1000 across two lines
fn thousand_bill() -> Bill {
    BillBuilder::new().line(8, dec!(12)).line(1, dec!(904)).build()
}

// ============================================================================
// Recompute
// ============================================================================

mod recompute_tests {
    use super::*;

    #[test]
    fn test_percent_discount_and_tax() {
        let bill = thousand_bill()
            .with_discount_amount(dec!(250))
            .unwrap()
            .with_discount_percent(dec!(10))
            .unwrap()
            .with_tax_percent(dec!(5))
            .unwrap();

        let totals = bill.totals();
        assert_eq!(totals.subtotal, inr(dec!(1000)));
        assert_eq!(totals.discount, inr(dec!(100)));
        assert_eq!(totals.tax, inr(dec!(45)));
        assert_eq!(totals.net, inr(dec!(945)));
    }

    #[test]
    fn test_switching_from_percent_to_absolute_discount() {
        let bill = thousand_bill()
            .with_discount_percent(dec!(10))
            .unwrap()
            .with_tax_percent(dec!(5))
            .unwrap()
            .with_discount_percent(Decimal::ZERO)
            .unwrap()
            .with_discount_amount(dec!(50))
            .unwrap();

        let totals = bill.totals();
        assert_eq!(totals.discount, inr(dec!(50)));
        assert_eq!(totals.tax, inr(dec!(47.5)));
        assert_eq!(totals.net, inr(dec!(997.5)));
    }

    #[test]
    fn test_absolute_discount_ignored_while_percent_set() {
        for typed in [dec!(0), dec!(1), dec!(999)] {
            let adjustments = BillAdjustments {
                discount_percent: dec!(10),
                discount_amount: typed,
                ..Default::default()
            };
            let totals = recompute(thousand_bill().lines(), &adjustments, Currency::INR);
            assert_eq!(totals.discount, inr(dec!(100)));
        }
    }

    #[test]
    fn test_absolute_tax_ignored_while_percent_set() {
        let adjustments = BillAdjustments {
            tax_percent: dec!(5),
            tax_amount: dec!(123),
            ..Default::default()
        };
        let totals = recompute(thousand_bill().lines(), &adjustments, Currency::INR);
        assert_eq!(totals.tax, inr(dec!(50)));
    }

    #[test]
    fn test_tax_is_computed_on_discounted_base() {
        let bill = thousand_bill()
            .with_discount_amount(dec!(200))
            .unwrap()
            .with_tax_percent(dec!(10))
            .unwrap();
        assert_eq!(bill.totals().tax, inr(dec!(80)));
        assert_eq!(bill.totals().net, inr(dec!(880)));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let bill = thousand_bill()
            .with_discount_percent(dec!(7.5))
            .unwrap()
            .with_tax_percent(dec!(18))
            .unwrap();

        let first = recompute(bill.lines(), bill.adjustments(), Currency::INR);
        let second = recompute(bill.lines(), bill.adjustments(), Currency::INR);
        assert_eq!(first, second);
        assert_eq!(first, *bill.totals());
    }
}

// ============================================================================
// Line edits
// ============================================================================

mod line_edit_tests {
    use super::*;

    #[test]
    fn test_remove_line_recomputes_discount_and_tax() {
        let small = flat_line(2, dec!(50), Currency::INR);
        let small_id = small.id;
        let bill = thousand_bill()
            .with_line(small)
            .unwrap()
            .with_discount_percent(dec!(10))
            .unwrap()
            .with_tax_percent(dec!(5))
            .unwrap();
        assert_eq!(bill.totals().subtotal, inr(dec!(1100)));

        let bill = bill.without_line(small_id).unwrap();
        assert_eq!(bill.totals().subtotal, inr(dec!(1000)));
        assert_eq!(bill.totals().net, inr(dec!(945)));
    }

    #[test]
    fn test_replace_line_keeps_id_and_position() {
        let first = flat_line(1, dec!(10), Currency::INR);
        let first_id = first.id;
        let bill = Bill::new(Currency::INR)
            .with_line(first)
            .unwrap()
            .with_line(flat_line(1, dec!(20), Currency::INR))
            .unwrap();

        let bill = bill.replace_line(first_id, flat_line(3, dec!(10), Currency::INR)).unwrap();

        assert_eq!(bill.lines()[0].id, first_id);
        assert_eq!(bill.lines()[0].quantity, 3);
        assert_eq!(bill.totals().subtotal, inr(dec!(50)));
    }

    #[test]
    fn test_unknown_line_is_reported() {
        let missing = LineItemId::new();
        let err = thousand_bill().without_line(missing).unwrap_err();
        assert!(matches!(err, BillingError::LineItemNotFound(id) if id == missing));
    }

    #[test]
    fn test_line_in_other_currency_is_rejected() {
        let usd_line = flat_line(1, dec!(5), Currency::USD);

        let err = Bill::new(Currency::INR).with_line(usd_line).unwrap_err();
        assert!(matches!(err, BillingError::Money(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_rejected_edit_leaves_original_bill_untouched() {
        let bill = thousand_bill();
        let before = *bill.totals();
        let err = bill.clone().with_discount_amount(dec!(-5)).unwrap_err();

        assert!(matches!(err, BillingError::InvalidInput(_)));
        assert_eq!(*bill.totals(), before);
    }

    #[test]
    fn test_bill_serializes_totals() {
        let json = serde_json::to_value(thousand_bill()).unwrap();
        assert!(json.get("totals").is_some());
        assert_eq!(json["lines"].as_array().unwrap().len(), 2);
    }
}

// ============================================================================
// Payments
// ============================================================================

mod payment_tests {
    use super::*;

    #[test]
    fn test_payment_then_delete_restores_due_exactly() {
        let net = inr(dec!(945));
        let mut ledger = PaymentLedger::new(Currency::INR);

        let id = ledger.record(net, inr(dec!(500)), PaymentMode::Cash).unwrap();
        assert_eq!(ledger.due(net), inr(dec!(445)));

        let restored = ledger.delete(id).unwrap();
        assert_eq!(restored, inr(dec!(500)));
        assert_eq!(ledger.due(net), inr(dec!(945)));
        assert_eq!(ledger.payments().len(), 1);
        assert_eq!(ledger.active().count(), 0);
    }

    #[test]
    fn test_overpayment_is_rejected() {
        let net = inr(dec!(945));
        let mut ledger = PaymentLedger::new(Currency::INR);
        ledger.record(net, inr(dec!(500)), PaymentMode::Card).unwrap();

        let err = ledger.record(net, inr(dec!(445.01)), PaymentMode::Card).unwrap_err();
        assert!(matches!(err, BillingError::Overpayment { .. }));
        assert_eq!(ledger.due(net), inr(dec!(445)));
    }

    #[test]
    fn test_exact_payment_settles_bill() {
        let net = inr(dec!(997.5));
        let mut ledger = PaymentLedger::new(Currency::INR);
        ledger.record(net, inr(dec!(997.5)), PaymentMode::Upi).unwrap();

        assert_money_zero(&ledger.due(net));
        assert_eq!(ledger.status(net), SettlementStatus::Settled);
    }

    #[test]
    fn test_non_positive_payment_is_rejected() {
        let net = inr(dec!(100));
        let mut ledger = PaymentLedger::new(Currency::INR);
        assert!(matches!(
            ledger.record(net, inr(dec!(0)), PaymentMode::Cash),
            Err(BillingError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_payment_in_other_currency_is_rejected() {
        let net = inr(dec!(100));
        let mut ledger = PaymentLedger::new(Currency::INR);
        let err = ledger
            .record(net, Money::new(dec!(10), Currency::USD), PaymentMode::Cash)
            .unwrap_err();
        assert!(matches!(err, BillingError::Money(_)));
    }

    #[test]
    fn test_double_delete_is_rejected() {
        let net = inr(dec!(100));
        let mut ledger = PaymentLedger::new(Currency::INR);
        let id = ledger.record(net, inr(dec!(10)), PaymentMode::Cheque).unwrap();

        ledger.delete(id).unwrap();
        assert!(matches!(ledger.delete(id), Err(BillingError::PaymentAlreadyDeleted(_))));
        assert!(matches!(
            ledger.delete(PaymentId::new()),
            Err(BillingError::PaymentNotFound(_))
        ));
    }

    #[test]
    fn test_deleted_payment_frees_room_for_new_one() {
        let net = inr(dec!(100));
        let mut ledger = PaymentLedger::new(Currency::INR);
        let id = ledger.record(net, inr(dec!(100)), PaymentMode::Cash).unwrap();
        ledger.delete(id).unwrap();

        assert!(ledger.record(net, inr(dec!(100)), PaymentMode::Insurance).is_ok());
        assert_eq!(ledger.total_paid(), inr(dec!(100)));
    }
}

// ============================================================================
// Properties
// ============================================================================

mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use test_utils::{adjustments_strategy, currency_strategy, precise_unit_price_strategy};

    fn bill_strategy() -> impl Strategy<Value = Bill> {
        (
            currency_strategy(),
            prop::collection::vec((1i64..20, 1i64..100_000), 0..8),
            adjustments_strategy(),
        )
            .prop_map(|(currency, items, adjustments)| {
                items
                    .into_iter()
                    .fold(BillBuilder::new().currency(currency), |builder, (q, p)| {
                        builder.line(q, Decimal::new(p, 2))
                    })
                    .adjustments(adjustments)
                    .build()
            })
    }

    proptest! {
        #[test]
        fn recompute_is_idempotent(bill in bill_strategy()) {
            let first = recompute(bill.lines(), bill.adjustments(), bill.currency());
            let second = recompute(bill.lines(), bill.adjustments(), bill.currency());
            prop_assert_eq!(first, second);
            prop_assert_eq!(first.net.currency(), bill.currency());
        }

        #[test]
        fn totals_satisfy_bill_invariants(bill in bill_strategy()) {
            assert_bill_consistent(&bill);

            let expected_subtotal: Decimal = bill.lines().iter().map(|l| l.amount.amount()).sum();
            prop_assert_eq!(bill.totals().subtotal.amount(), expected_subtotal);
        }

        #[test]
        fn line_amount_matches_display_price_at_any_precision(
            items in prop::collection::vec((1i64..50, precise_unit_price_strategy()), 1..8),
            adjustments in adjustments_strategy()
        ) {
            let bill = items
                .iter()
                .fold(BillBuilder::new(), |builder, (q, p)| builder.line(*q, *p))
                .adjustments(adjustments)
                .build();

            for line in bill.lines() {
                prop_assert_eq!(line.amount, line.display_unit_price * Decimal::from(line.quantity));
            }
            assert_bill_consistent(&bill);
        }

        #[test]
        fn discount_amount_ignored_when_percent_positive(
            items in prop::collection::vec((1i64..20, 1i64..100_000), 1..8),
            percent_bp in 1i64..=10_000,
            first_amount in 0i64..100_000,
            second_amount in 0i64..100_000
        ) {
            let lines: Vec<_> = items
                .iter()
                .map(|(q, p)| flat_line(*q, Decimal::new(*p, 2), Currency::INR))
                .collect();
            let with_amount = |amount: i64| BillAdjustments {
                discount_percent: Decimal::new(percent_bp, 2),
                discount_amount: Decimal::new(amount, 2),
                ..Default::default()
            };

            let a = recompute(&lines, &with_amount(first_amount), Currency::INR);
            let b = recompute(&lines, &with_amount(second_amount), Currency::INR);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn edit_sequences_do_not_drift(
            percent_bp in 0i64..=10_000,
            amount_minor in 0i64..100_000
        ) {
            let target = BillAdjustments {
                discount_percent: Decimal::new(percent_bp, 2),
                discount_amount: Decimal::new(amount_minor, 2),
                tax_percent: dec!(5),
                tax_amount: Decimal::ZERO,
            };

            let direct = thousand_bill().with_adjustments(target).unwrap();
            let edited = thousand_bill()
                .with_discount_percent(dec!(50)).unwrap()
                .with_tax_amount(dec!(10)).unwrap()
                .with_discount_amount(Decimal::new(amount_minor, 2)).unwrap()
                .with_tax_percent(dec!(5)).unwrap()
                .with_tax_amount(Decimal::ZERO).unwrap()
                .with_discount_percent(Decimal::new(percent_bp, 2)).unwrap();

            prop_assert_eq!(direct.totals(), edited.totals());
        }
    }
}
