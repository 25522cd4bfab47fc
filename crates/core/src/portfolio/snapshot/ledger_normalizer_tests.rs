#[cfg(test)]
mod tests {
    use crate::errors::{Error, ValidationError};
    use crate::portfolio::snapshot::{normalize_ledger, PositionKey};
    use crate::transactions::{InvestmentTransaction, TransactionType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn txn(id: &str, account: Option<&str>, security: Option<&str>, date: &str) -> InvestmentTransaction {
        InvestmentTransaction {
            id: id.to_string(),
            date: NaiveDate::from_str(date).unwrap(),
            account_id: account.map(str::to_string),
            security_id: security.map(str::to_string),
            transaction_type: TransactionType::Buy,
            quantity: Some(dec!(1)),
            price: Some(dec!(1)),
            fees: None,
            currency_code: "USD".to_string(),
        }
    }

    fn ids(group: &[&InvestmentTransaction]) -> Vec<String> {
        group.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn test_groups_by_account_and_security() {
        let transactions = vec![
            txn("t1", Some("acc_1"), Some("AAPL"), "2024-01-01"),
            txn("t2", Some("acc_2"), Some("AAPL"), "2024-01-01"),
            txn("t3", Some("acc_1"), Some("MSFT"), "2024-01-01"),
            txn("t4", Some("acc_1"), Some("AAPL"), "2024-01-02"),
        ];

        let ledger = normalize_ledger(&transactions).unwrap();
        assert_eq!(ledger.groups.len(), 3);
        assert_eq!(ledger.transaction_count(), 4);

        let keys: Vec<PositionKey> = ledger.groups.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                PositionKey::new("acc_1", "AAPL"),
                PositionKey::new("acc_1", "MSFT"),
                PositionKey::new("acc_2", "AAPL"),
            ]
        );
        assert_eq!(
            ids(&ledger.groups[&PositionKey::new("acc_1", "AAPL")]),
            vec!["t1", "t4"]
        );
    }

    #[test]
    fn test_sorts_by_date_then_id() {
        let transactions = vec![
            txn("b", Some("acc_1"), Some("AAPL"), "2024-02-01"),
            txn("z", Some("acc_1"), Some("AAPL"), "2024-01-15"),
            txn("a", Some("acc_1"), Some("AAPL"), "2024-02-01"),
            txn("m", Some("acc_1"), Some("AAPL"), "2023-12-31"),
        ];

        let ledger = normalize_ledger(&transactions).unwrap();
        let group = &ledger.groups[&PositionKey::new("acc_1", "AAPL")];
        assert_eq!(ids(group), vec!["m", "z", "a", "b"]);
    }

    #[test]
    fn test_missing_security_is_skipped_silently() {
        let transactions = vec![
            txn("t1", Some("acc_1"), None, "2024-01-01"),
            txn("t2", Some("acc_1"), Some(" "), "2024-01-01"),
            txn("t3", Some("acc_1"), Some("AAPL"), "2024-01-01"),
        ];

        let ledger = normalize_ledger(&transactions).unwrap();
        assert_eq!(ledger.groups.len(), 1);
        assert_eq!(ids(&ledger.skipped), vec!["t1", "t2"]);
    }

    #[test]
    fn test_skipped_transactions_are_in_replay_order() {
        let transactions = vec![
            txn("t9", Some("acc_1"), None, "2024-01-03"),
            txn("t2", Some("acc_2"), None, "2024-01-01"),
            txn("t1", Some("acc_1"), None, "2024-01-01"),
        ];

        let ledger = normalize_ledger(&transactions).unwrap();
        assert_eq!(ids(&ledger.skipped), vec!["t1", "t2", "t9"]);
    }

    #[test]
    fn test_missing_account_aborts() {
        let transactions = vec![
            txn("t1", Some("acc_1"), Some("AAPL"), "2024-01-01"),
            txn("t2", None, Some("AAPL"), "2024-01-02"),
        ];

        let err = normalize_ledger(&transactions).unwrap_err();
        match err {
            Error::Validation(ValidationError::MissingAccountId { transaction_id }) => {
                assert_eq!(transaction_id, "t2")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_account_wins_over_missing_security() {
        let transactions = vec![txn("t1", Some(""), None, "2024-01-01")];
        let err = normalize_ledger(&transactions).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = normalize_ledger(&[]).unwrap();
        assert!(ledger.groups.is_empty());
        assert!(ledger.skipped.is_empty());
    }
}
