//! Position snapshot models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Position, PositionKey};

/// A non-fatal issue noticed while replaying the ledger.
///
/// Warnings never change the computed positions; they explain why a
/// transaction had no effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsCalculationWarning {
    pub transaction_id: String,
    pub account_id: String,
    pub security_id: Option<String>,
    pub date: NaiveDate,
    pub message: String,
}

impl std::fmt::Display for HoldingsCalculationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Transaction {} (account: {}, security: {}, date: {}): {}",
            self.transaction_id,
            self.account_id,
            self.security_id.as_deref().unwrap_or("-"),
            self.date,
            self.message
        )
    }
}

/// Open positions after a full replay, plus any warnings.
#[derive(Debug, Clone, Default)]
pub struct PositionsCalculationResult {
    /// Only positions with a strictly positive quantity, in key order.
    pub positions: BTreeMap<PositionKey, Position>,
    pub warnings: Vec<HoldingsCalculationWarning>,
}

impl PositionsCalculationResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn get(&self, account_id: &str, security_id: &str) -> Option<&Position> {
        self.positions.get(&PositionKey::new(account_id, security_id))
    }
}
