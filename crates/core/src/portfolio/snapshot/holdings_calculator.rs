use crate::errors::Result;
use crate::portfolio::snapshot::ledger_normalizer::normalize_ledger;
use crate::portfolio::snapshot::{
    HoldingsCalculationWarning, Position, PositionKey, PositionsCalculationResult,
    TransitionOutcome,
};
use crate::settings::HoldingsSettings;
use crate::transactions::InvestmentTransaction;

use log::{debug, warn};

/// Replays the investment ledger into open positions.
///
/// Stateless between calls: every invocation rebuilds positions from the full
/// ledger into a mapping it owns, so concurrent calls never share state.
/// Market values are not computed here.
#[derive(Debug, Clone)]
pub struct HoldingsCalculator {
    emit_warnings: bool,
}

impl Default for HoldingsCalculator {
    fn default() -> Self {
        Self::new(&HoldingsSettings::default())
    }
}

impl HoldingsCalculator {
    pub fn new(settings: &HoldingsSettings) -> Self {
        Self {
            emit_warnings: settings.emit_warnings,
        }
    }

    /// Calculates open positions from an arbitrarily ordered ledger.
    ///
    /// Errors only when a transaction has no account id. Transactions without
    /// a security id are excluded.
    pub fn calculate_positions(
        &self,
        transactions: &[InvestmentTransaction],
    ) -> Result<PositionsCalculationResult> {
        let ledger = normalize_ledger(transactions)?;
        let mut result = PositionsCalculationResult::default();

        for transaction in &ledger.skipped {
            self.record_warning(
                &mut result.warnings,
                transaction,
                "No security id. Excluded from position calculation.".to_string(),
            );
        }

        for (key, group) in &ledger.groups {
            if let Some(position) = self.replay_group(key, group, &mut result.warnings)? {
                result.positions.insert(key.clone(), position);
            }
        }

        debug!(
            "Calculated {} open positions from {} transactions ({} warnings)",
            result.positions.len(),
            transactions.len(),
            result.warnings.len()
        );
        Ok(result)
    }

    /// Folds one group's transactions, already in replay order.
    ///
    /// A position that reaches zero or below is dropped together with any
    /// remaining cost basis; a later acquisition starts over from zero.
    fn replay_group(
        &self,
        key: &PositionKey,
        group: &[&InvestmentTransaction],
        warnings: &mut Vec<HoldingsCalculationWarning>,
    ) -> Result<Option<Position>> {
        let mut open: Option<Position> = None;

        for &transaction in group {
            let was_open = open.is_some();
            let mut position = open
                .take()
                .unwrap_or_else(|| Position::new(key, &transaction.currency_code));

            match position.apply(transaction)? {
                TransitionOutcome::Applied | TransitionOutcome::Inert => {}
                TransitionOutcome::SellWithoutInventory => self.record_warning(
                    warnings,
                    transaction,
                    "Sell with no units held. Ignored.".to_string(),
                ),
                TransitionOutcome::FeeWithoutQuantity => self.record_warning(
                    warnings,
                    transaction,
                    "Fee without quantity. Ignored.".to_string(),
                ),
            }

            if position.is_open() {
                open = Some(position);
            } else if !was_open {
                debug!(
                    "Transaction {} did not open position {}. Discarded.",
                    transaction.id, key
                );
            } else if !position.cost_basis.is_zero() {
                self.record_warning(
                    warnings,
                    transaction,
                    format!(
                        "Position closed at quantity {}. Residual cost basis {} discarded.",
                        position.quantity, position.cost_basis
                    ),
                );
            }
        }

        Ok(open)
    }

    fn record_warning(
        &self,
        warnings: &mut Vec<HoldingsCalculationWarning>,
        transaction: &InvestmentTransaction,
        message: String,
    ) {
        if !self.emit_warnings {
            return;
        }
        let warning = HoldingsCalculationWarning {
            transaction_id: transaction.id.clone(),
            account_id: transaction.account_key().unwrap_or_default().to_string(),
            security_id: transaction.security_key().map(str::to_string),
            date: transaction.date,
            message,
        };
        warn!("{}", warning);
        warnings.push(warning);
    }
}
