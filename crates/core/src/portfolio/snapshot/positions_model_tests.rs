#[cfg(test)]
mod tests {
    use crate::portfolio::snapshot::{Position, PositionKey, TransitionOutcome};
    use crate::transactions::{InvestmentTransaction, TransactionType};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn txn(
        transaction_type: TransactionType,
        quantity: Option<Decimal>,
        price: Option<Decimal>,
        fees: Option<Decimal>,
        currency: &str,
    ) -> InvestmentTransaction {
        InvestmentTransaction {
            id: "txn".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            account_id: Some("acc_1".to_string()),
            security_id: Some("AAPL".to_string()),
            transaction_type,
            quantity,
            price,
            fees,
            currency_code: currency.to_string(),
        }
    }

    fn empty_position() -> Position {
        Position::new(&PositionKey::new("acc_1", "AAPL"), "USD")
    }

    #[test]
    fn test_buy_adds_quantity_and_cost_with_fees() {
        let mut position = empty_position();
        let outcome = position
            .apply(&txn(
                TransactionType::Buy,
                Some(dec!(10)),
                Some(dec!(150)),
                Some(dec!(5)),
                "USD",
            ))
            .unwrap();

        assert_eq!(outcome, TransitionOutcome::Applied);
        assert_eq!(position.quantity, dec!(10));
        assert_eq!(position.cost_basis, dec!(1505));
        assert_eq!(position.average_cost().unwrap(), dec!(150.5));
        assert!(position.is_open());
    }

    #[test]
    fn test_cash_is_folded_like_buy() {
        let mut as_buy = empty_position();
        let mut as_cash = empty_position();
        as_buy
            .apply(&txn(TransactionType::Buy, Some(dec!(3)), Some(dec!(1)), None, "USD"))
            .unwrap();
        as_cash
            .apply(&txn(TransactionType::Cash, Some(dec!(3)), Some(dec!(1)), None, "USD"))
            .unwrap();
        assert_eq!(as_buy, as_cash);
    }

    #[test]
    fn test_buy_with_missing_fields_counts_as_zero() {
        let mut position = empty_position();
        position
            .apply(&txn(TransactionType::Buy, Some(dec!(4)), None, None, "USD"))
            .unwrap();
        assert_eq!(position.quantity, dec!(4));
        assert_eq!(position.cost_basis, dec!(0));
    }

    #[test]
    fn test_sell_relieves_average_cost() {
        let mut position = empty_position();
        position.add_units(dec!(10), dec!(10), dec!(0)).unwrap();
        position.reduce_units(dec!(5)).unwrap();
        assert_eq!(position.quantity, dec!(5));
        assert_eq!(position.cost_basis, dec!(50));
        assert_eq!(position.average_cost().unwrap(), dec!(10));
    }

    #[test]
    fn test_sell_after_two_buys_uses_blended_cost() {
        let mut position = empty_position();
        position.add_units(dec!(10), dec!(10), dec!(0)).unwrap();
        position.add_units(dec!(10), dec!(20), dec!(0)).unwrap();
        position.reduce_units(dec!(10)).unwrap();
        // Blended cost is 15/unit regardless of which shares were bought first.
        assert_eq!(position.quantity, dec!(10));
        assert_eq!(position.cost_basis, dec!(150));
    }

    #[test]
    fn test_sell_on_empty_position_is_noop() {
        let mut position = empty_position();
        let outcome = position.reduce_units(dec!(5)).unwrap();
        assert_eq!(outcome, TransitionOutcome::SellWithoutInventory);
        assert_eq!(position.quantity, dec!(0));
        assert_eq!(position.cost_basis, dec!(0));
    }

    #[test]
    fn test_oversell_closes_position() {
        let mut position = empty_position();
        position.add_units(dec!(10), dec!(10), dec!(0)).unwrap();
        position.reduce_units(dec!(15)).unwrap();
        assert!(!position.is_open());
        assert_eq!(position.quantity, dec!(-5));
        assert_eq!(position.average_cost().unwrap(), dec!(0));
    }

    #[test]
    fn test_fee_requires_quantity() {
        let mut position = empty_position();
        position.add_units(dec!(10), dec!(10), dec!(0)).unwrap();

        let outcome = position
            .apply(&txn(TransactionType::Fee, None, None, Some(dec!(7)), "USD"))
            .unwrap();
        assert_eq!(outcome, TransitionOutcome::FeeWithoutQuantity);
        assert_eq!(position.cost_basis, dec!(100));

        let outcome = position
            .apply(&txn(TransactionType::Fee, Some(dec!(0)), None, Some(dec!(7)), "USD"))
            .unwrap();
        assert_eq!(outcome, TransitionOutcome::FeeWithoutQuantity);
        assert_eq!(position.cost_basis, dec!(100));
    }

    #[test]
    fn test_fee_adds_absolute_amount_without_touching_quantity() {
        let mut position = empty_position();
        position.add_units(dec!(10), dec!(10), dec!(0)).unwrap();
        position
            .apply(&txn(TransactionType::Fee, Some(dec!(1)), None, Some(dec!(-2.5)), "USD"))
            .unwrap();
        assert_eq!(position.quantity, dec!(10));
        assert_eq!(position.cost_basis, dec!(102.5));
    }

    #[test]
    fn test_inert_types_only_refresh_currency() {
        for transaction_type in [
            TransactionType::Transfer,
            TransactionType::Dividend,
            TransactionType::Interest,
            TransactionType::Other,
        ] {
            let mut position = empty_position();
            position.add_units(dec!(2), dec!(50), dec!(0)).unwrap();
            let outcome = position
                .apply(&txn(
                    transaction_type,
                    Some(dec!(99)),
                    Some(dec!(99)),
                    Some(dec!(99)),
                    "CAD",
                ))
                .unwrap();
            assert_eq!(outcome, TransitionOutcome::Inert);
            assert_eq!(position.quantity, dec!(2));
            assert_eq!(position.cost_basis, dec!(100));
            assert_eq!(position.currency_code, "CAD");
        }
    }

    #[test]
    fn test_overflow_is_reported_not_panicking() {
        let mut position = empty_position();
        let result = position.add_units(Decimal::MAX, dec!(2), dec!(0));
        assert!(result.is_err());
    }

    #[test]
    fn test_average_cost_overflow_is_an_error() {
        let mut position = empty_position();
        position.quantity = dec!(0.0000000001);
        position.cost_basis = Decimal::MAX;
        assert!(position.average_cost().is_err());
    }

    #[test]
    fn test_foreign_transaction_is_rejected() {
        let mut position = Position::new(&PositionKey::new("acc_2", "AAPL"), "USD");
        let err = position
            .apply(&txn(TransactionType::Buy, Some(dec!(1)), Some(dec!(1)), None, "USD"))
            .unwrap_err();

        assert!(matches!(
            err,
            crate::errors::Error::Calculation(crate::errors::CalculatorError::InvalidTransaction(_))
        ));
        assert_eq!(position.quantity, dec!(0));
    }
}
