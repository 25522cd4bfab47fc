//! Investment transaction domain models.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of an investment transaction as reported by the aggregation provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Buy,
    Sell,
    Cash,
    Fee,
    Transfer,
    Dividend,
    Interest,
    Other,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        use crate::transactions::transactions_constants::*;
        match self {
            TransactionType::Buy => TRANSACTION_TYPE_BUY,
            TransactionType::Sell => TRANSACTION_TYPE_SELL,
            TransactionType::Cash => TRANSACTION_TYPE_CASH,
            TransactionType::Fee => TRANSACTION_TYPE_FEE,
            TransactionType::Transfer => TRANSACTION_TYPE_TRANSFER,
            TransactionType::Dividend => TRANSACTION_TYPE_DIVIDEND,
            TransactionType::Interest => TRANSACTION_TYPE_INTEREST,
            TransactionType::Other => TRANSACTION_TYPE_OTHER,
        }
    }

    /// Parses a provider label, mapping anything unrecognised to `Other`.
    pub fn parse_lenient(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            debug!(
                "Unrecognised transaction type '{}', treating as '{}'",
                label,
                TransactionType::Other
            );
            TransactionType::Other
        })
    }

    /// Types that add units to a position.
    pub fn is_acquisition(&self) -> bool {
        matches!(self, TransactionType::Buy | TransactionType::Cash)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        use crate::transactions::transactions_constants::*;
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.as_str() {
            TRANSACTION_TYPE_BUY => Ok(TransactionType::Buy),
            TRANSACTION_TYPE_SELL => Ok(TransactionType::Sell),
            TRANSACTION_TYPE_CASH => Ok(TransactionType::Cash),
            TRANSACTION_TYPE_FEE => Ok(TransactionType::Fee),
            TRANSACTION_TYPE_TRANSFER => Ok(TransactionType::Transfer),
            TRANSACTION_TYPE_DIVIDEND => Ok(TransactionType::Dividend),
            TRANSACTION_TYPE_INTEREST => Ok(TransactionType::Interest),
            TRANSACTION_TYPE_OTHER => Ok(TransactionType::Other),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl From<String> for TransactionType {
    fn from(label: String) -> Self {
        TransactionType::parse_lenient(&label)
    }
}

impl From<TransactionType> for String {
    fn from(value: TransactionType) -> Self {
        value.as_str().to_string()
    }
}

/// One row of the investment ledger. Immutable once supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentTransaction {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub security_id: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    #[serde(default)]
    #[serde(with = "optional_decimal_format")]
    pub quantity: Option<Decimal>,
    #[serde(default)]
    #[serde(with = "optional_decimal_format")]
    pub price: Option<Decimal>,
    #[serde(default)]
    #[serde(with = "optional_decimal_format")]
    pub fees: Option<Decimal>,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub currency_code: String,
}

impl InvestmentTransaction {
    /// Account id, treating blank strings as missing.
    pub fn account_key(&self) -> Option<&str> {
        non_blank(self.account_id.as_deref())
    }

    /// Security id, treating blank strings as missing.
    pub fn security_key(&self) -> Option<&str> {
        non_blank(self.security_id.as_deref())
    }

    /// Get quantity, defaulting to zero if not set
    pub fn qty(&self) -> Decimal {
        self.quantity.unwrap_or(Decimal::ZERO)
    }

    /// Get unit price, defaulting to zero if not set
    pub fn unit_price(&self) -> Decimal {
        self.price.unwrap_or(Decimal::ZERO)
    }

    /// Get fee as stored (may be signed), defaulting to zero if not set
    pub fn fee_amt(&self) -> Decimal {
        self.fees.unwrap_or(Decimal::ZERO)
    }

    /// True when a quantity is present and non-zero.
    pub fn has_quantity(&self) -> bool {
        self.quantity.is_some_and(|q| !q.is_zero())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts numbers, numeric strings (plain or scientific) and null/empty.
mod optional_decimal_format {
    use rust_decimal::Decimal;
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_str(&d.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DecimalOrString {
            Decimal(Decimal),
            String(String),
        }

        match Option::<DecimalOrString>::deserialize(deserializer)? {
            Some(DecimalOrString::Decimal(d)) => Ok(Some(d)),
            Some(DecimalOrString::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                Decimal::from_str(trimmed)
                    .or_else(|_| Decimal::from_scientific(trimmed))
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
            None => Ok(None),
        }
    }
}
