//! Account domain models.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A linked bank or brokerage account.
///
/// The engine never computes anything from an account; it only copies the
/// institution name onto holdings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub institution_name: Option<String>,
}

/// Lookup of accounts by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountDirectory {
    accounts: HashMap<String, Account>,
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, account: Account) -> Option<Account> {
        self.accounts.insert(account.id.clone(), account)
    }

    pub fn get(&self, account_id: &str) -> Option<&Account> {
        self.accounts.get(account_id)
    }

    pub fn institution_name(&self, account_id: &str) -> Option<&str> {
        self.get(account_id)
            .and_then(|a| a.institution_name.as_deref())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl FromIterator<Account> for AccountDirectory {
    fn from_iter<I: IntoIterator<Item = Account>>(iter: I) -> Self {
        let mut directory = AccountDirectory::new();
        for account in iter {
            directory.insert(account);
        }
        directory
    }
}
