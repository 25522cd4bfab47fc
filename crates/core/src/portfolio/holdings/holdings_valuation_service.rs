use crate::accounts::AccountDirectory;
use crate::constants::PERCENT_SCALE;
use crate::errors::{CalculatorError, Result};
use crate::portfolio::holdings::Holding;
use crate::portfolio::snapshot::{Position, PositionKey};
use crate::securities::SecuritySnapshot;
use log::{debug, warn};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

pub trait HoldingsValuationServiceTrait: Send + Sync {
    /// Values open positions against a price snapshot. One holding per position,
    /// in key order.
    fn value_positions(
        &self,
        positions: &BTreeMap<PositionKey, Position>,
        securities: &SecuritySnapshot,
        accounts: &AccountDirectory,
    ) -> Result<Vec<Holding>>;
}

/// Joins positions with the latest close prices and derives gain/loss.
///
/// Missing securities and missing prices are valued at zero, never dropped.
#[derive(Debug, Clone, Default)]
pub struct HoldingsValuationService {
    rounding_precision: Option<u32>,
}

impl HoldingsValuationService {
    pub fn new(rounding_precision: Option<u32>) -> Self {
        Self { rounding_precision }
    }

    fn value_position(
        &self,
        position: &Position,
        securities: &SecuritySnapshot,
        accounts: &AccountDirectory,
    ) -> Result<Holding> {
        let context_msg = format!(
            "HoldingValuation [{} in {}]",
            position.security_id, position.account_id
        );

        let security = securities.get(&position.security_id);
        match security {
            Some(s) if s.close_price.is_none() => {
                warn!("{}: Close price missing. Valuing at zero.", context_msg)
            }
            None => warn!("{}: Security not in price snapshot. Valuing at zero.", context_msg),
            _ => {}
        }
        let current_price = securities.close_price_or_zero(&position.security_id);

        let current_value = position
            .quantity
            .checked_mul(current_price)
            .ok_or_else(|| {
                CalculatorError::Calculation(format!("{}: market value overflowed", context_msg))
            })?;
        let gain_loss = current_value
            .checked_sub(position.cost_basis)
            .ok_or_else(|| {
                CalculatorError::Calculation(format!("{}: gain/loss overflowed", context_msg))
            })?;
        let gain_loss_percent = gain_loss_percent(gain_loss, position.cost_basis)?;

        let mut holding = Holding {
            account_id: position.account_id.clone(),
            security_id: position.security_id.clone(),
            security_name: security.and_then(|s| s.name.clone()),
            security_ticker: security.and_then(|s| s.ticker_symbol.clone()),
            institution_name: accounts
                .institution_name(&position.account_id)
                .map(str::to_string),
            quantity: position.quantity,
            cost_basis: position.cost_basis,
            currency_code: position.currency_code.clone(),
            current_price,
            current_value,
            gain_loss,
            gain_loss_percent,
        };

        if let Some(dp) = self.rounding_precision {
            round_monetary_fields(&mut holding, dp);
        }
        Ok(holding)
    }
}

impl HoldingsValuationServiceTrait for HoldingsValuationService {
    fn value_positions(
        &self,
        positions: &BTreeMap<PositionKey, Position>,
        securities: &SecuritySnapshot,
        accounts: &AccountDirectory,
    ) -> Result<Vec<Holding>> {
        let holdings = positions
            .values()
            .map(|position| self.value_position(position, securities, accounts))
            .collect::<Result<Vec<_>>>()?;
        debug!("Valued {} holdings.", holdings.len());
        Ok(holdings)
    }
}

/// `gain / cost * 100`, or zero when cost is not positive.
///
/// Fails when the ratio does not fit in a `Decimal`, e.g. a large gain over a
/// near-zero cost basis.
pub fn gain_loss_percent(gain_loss: Decimal, cost_basis: Decimal) -> Result<Decimal> {
    if cost_basis <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    gain_loss
        .checked_div(cost_basis)
        .and_then(|ratio| ratio.checked_mul(PERCENT_SCALE))
        .ok_or_else(|| {
            CalculatorError::Calculation(format!(
                "gain/loss percent overflowed for gain {} over cost basis {}",
                gain_loss, cost_basis
            ))
            .into()
        })
}

/// Rounds half away from zero.
pub fn round_money(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

fn round_monetary_fields(holding: &mut Holding, dp: u32) {
    holding.cost_basis = round_money(holding.cost_basis, dp);
    holding.current_value = round_money(holding.current_value, dp);
    holding.gain_loss = round_money(holding.gain_loss, dp);
    holding.gain_loss_percent = round_money(holding.gain_loss_percent, dp);
}
