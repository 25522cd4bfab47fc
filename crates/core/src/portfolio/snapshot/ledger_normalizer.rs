//! Canonical processing order for the investment ledger.
//!
//! Average-cost arithmetic is order sensitive: a sell sees the cost basis
//! accumulated by everything before it. Transactions are therefore grouped per
//! `(account, security)` and replayed in `(date, id)` order, so the same set
//! of transactions always produces the same positions no matter how the ledger
//! source ordered them.

use log::debug;
use std::collections::BTreeMap;

use crate::errors::{Result, ValidationError};
use crate::portfolio::snapshot::PositionKey;
use crate::transactions::InvestmentTransaction;

/// Ledger grouped by position key, each group in replay order.
#[derive(Debug, Default)]
pub struct NormalizedLedger<'a> {
    /// Groups in ascending key order.
    pub groups: BTreeMap<PositionKey, Vec<&'a InvestmentTransaction>>,
    /// Transactions left out because they carry no security id, in replay order.
    pub skipped: Vec<&'a InvestmentTransaction>,
}

impl NormalizedLedger<'_> {
    pub fn transaction_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Groups and orders `transactions` for replay.
///
/// Fails if any transaction lacks an account id; grouping cannot proceed
/// safely, so the whole ledger is rejected. Transactions without a security id
/// can never form a position and are set aside in `skipped`.
pub fn normalize_ledger(transactions: &[InvestmentTransaction]) -> Result<NormalizedLedger<'_>> {
    let mut ledger = NormalizedLedger::default();

    for transaction in transactions {
        let account_id = transaction.account_key().ok_or_else(|| {
            ValidationError::MissingAccountId {
                transaction_id: transaction.id.clone(),
            }
        })?;
        let Some(security_id) = transaction.security_key() else {
            ledger.skipped.push(transaction);
            continue;
        };
        ledger
            .groups
            .entry(PositionKey::new(account_id, security_id))
            .or_default()
            .push(transaction);
    }

    for group in ledger.groups.values_mut() {
        sort_for_replay(group);
    }
    sort_for_replay(&mut ledger.skipped);

    debug!(
        "Normalized {} transactions into {} position groups ({} without security skipped)",
        ledger.transaction_count(),
        ledger.groups.len(),
        ledger.skipped.len()
    );
    Ok(ledger)
}

/// Sorts ascending by date, ties broken by id.
pub fn sort_for_replay(transactions: &mut [&InvestmentTransaction]) {
    transactions.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
}
