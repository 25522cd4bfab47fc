/// Investment transaction types
///
/// Each constant is the wire label of one transaction category as delivered by
/// the aggregation provider.

/// Purchase of a security. Increases quantity and cost basis.
pub const TRANSACTION_TYPE_BUY: &str = "buy";

/// Disposal of a security. Reduces quantity and cost basis at average cost.
pub const TRANSACTION_TYPE_SELL: &str = "sell";

/// Inflow into a security slot (e.g. money-market sweep). Folded like a buy.
pub const TRANSACTION_TYPE_CASH: &str = "cash";

/// Fee charged against a position. Adds to cost basis when a quantity is present.
pub const TRANSACTION_TYPE_FEE: &str = "fee";

/// Movement of securities between accounts. No effect on positions.
pub const TRANSACTION_TYPE_TRANSFER: &str = "transfer";

/// Dividend payment. No effect on positions.
pub const TRANSACTION_TYPE_DIVIDEND: &str = "dividend";

/// Interest payment. No effect on positions.
pub const TRANSACTION_TYPE_INTEREST: &str = "interest";

/// Anything else the provider reports. No effect on positions.
pub const TRANSACTION_TYPE_OTHER: &str = "other";
