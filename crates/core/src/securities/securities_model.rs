//! Security domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A security as known to the price source, keyed by provider security id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Security {
    pub id: String,
    pub name: Option<String>,
    pub ticker_symbol: Option<String>,
    /// Latest close. `None` is a valid state and values the position at zero.
    pub close_price: Option<Decimal>,
    #[serde(default)]
    pub currency_code: Option<String>,
}

/// Latest-known prices for a set of securities.
///
/// Absence of a security is expected and never an error; lookups simply
/// return `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecuritySnapshot {
    securities: HashMap<String, Security>,
}

impl SecuritySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a security, keyed by its id.
    pub fn insert(&mut self, security: Security) -> Option<Security> {
        self.securities.insert(security.id.clone(), security)
    }

    pub fn get(&self, security_id: &str) -> Option<&Security> {
        self.securities.get(security_id)
    }

    /// Close price for `security_id`, or zero when unknown or unpriced.
    pub fn close_price_or_zero(&self, security_id: &str) -> Decimal {
        self.get(security_id)
            .and_then(|s| s.close_price)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn len(&self) -> usize {
        self.securities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.securities.is_empty()
    }
}

impl FromIterator<Security> for SecuritySnapshot {
    fn from_iter<I: IntoIterator<Item = Security>>(iter: I) -> Self {
        let mut snapshot = SecuritySnapshot::new();
        for security in iter {
            snapshot.insert(security);
        }
        snapshot
    }
}

impl From<HashMap<String, Security>> for SecuritySnapshot {
    fn from(securities: HashMap<String, Security>) -> Self {
        SecuritySnapshot { securities }
    }
}
