//! Holdings module - valued, user-facing view of open positions.

mod holdings_model;
mod holdings_service;
mod holdings_valuation_service;

pub use holdings_model::*;
pub use holdings_service::{summarize_holdings, HoldingsService, HoldingsServiceTrait};
pub use holdings_valuation_service::{
    gain_loss_percent, round_money, HoldingsValuationService, HoldingsValuationServiceTrait,
};
