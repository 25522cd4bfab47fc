use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Multiplier applied to gain/loss ratios to express them as percentages
pub const PERCENT_SCALE: Decimal = dec!(100);

/// Largest number of decimal places a `Decimal` can be rounded to
pub const MAX_ROUNDING_PRECISION: u32 = 28;

/// Env var holding the number of decimal places for monetary outputs
pub const ENV_ROUNDING_DP: &str = "FINLINK_HOLDINGS_ROUNDING_DP";

/// Env var toggling collection of calculation warnings
pub const ENV_EMIT_WARNINGS: &str = "FINLINK_HOLDINGS_EMIT_WARNINGS";
