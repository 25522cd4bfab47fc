#[cfg(test)]
mod tests {
    use crate::accounts::{Account, AccountDirectory};

    fn account(id: &str, institution: Option<&str>) -> Account {
        Account {
            id: id.to_string(),
            name: Some(format!("Account {}", id)),
            institution_name: institution.map(str::to_string),
        }
    }

    #[test]
    fn test_institution_lookup() {
        let directory: AccountDirectory = vec![
            account("acc_1", Some("Fidelity")),
            account("acc_2", None),
        ]
        .into_iter()
        .collect();

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.institution_name("acc_1"), Some("Fidelity"));
        assert_eq!(directory.institution_name("acc_2"), None);
        assert_eq!(directory.institution_name("acc_404"), None);
    }

    #[test]
    fn test_deserialize_account_without_optional_fields() {
        let parsed: Account = serde_json::from_str(r#"{"id": "acc_9"}"#).unwrap();
        assert_eq!(parsed.id, "acc_9");
        assert!(parsed.name.is_none());
        assert!(parsed.institution_name.is_none());

        let mut directory = AccountDirectory::new();
        assert!(directory.is_empty());
        directory.insert(parsed);
        assert!(directory.get("acc_9").is_some());
    }
}
