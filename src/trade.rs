//! Trade - the immutable input record consumed by the engine
//!
//! A Trade is one executed order on one exchange, already normalized
//! upstream so that `price` and `cost` are in the unit of account of
//! the quote currency. The engine trusts `cost ≈ price × amount` and
//! does not re-validate it.

use crate::types::{Cash, Price, Quantity, Symbol, Timestamp};
use serde::{Deserialize, Serialize};

/// Trade side (buy/sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// One executed trade from the sync subsystem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    /// Market symbol in `BASE/QUOTE` form
    pub symbol: Symbol,
    /// Trade side (Buy/Sell)
    pub side: TradeSide,
    /// Price per unit of the base asset
    pub price: Price,
    /// Quantity of the base asset traded
    pub amount: Quantity,
    /// Total quote value of the trade (price × amount)
    pub cost: Cash,
    /// Fee as charged by the exchange, in `fee_currency`
    pub fee: Cash,
    /// Currency the fee was charged in
    pub fee_currency: Symbol,
    /// Execution timestamp (sub-day resolution expected)
    pub timestamp: Timestamp,
    /// Exchange the trade executed on
    pub exchange: String,
}

impl Trade {
    /// Base asset of the market symbol: everything before the `/`.
    ///
    /// Malformed symbols without a `/` yield the whole symbol, so a bad
    /// record still books under *some* asset instead of crashing.
    pub fn base_asset(&self) -> &str {
        self.symbol.split('/').next().unwrap_or(&self.symbol)
    }

    /// Splits `BASE/QUOTE` into its parts, with any contract suffix
    /// after `:` stripped from the quote (`BTC/USDT:USDT` → `USDT`).
    /// Returns `None` for symbols without a `/`.
    pub fn split_symbol(&self) -> Option<(&str, &str)> {
        let (base, quote) = self.symbol.split_once('/')?;
        let quote = quote.split(':').next().unwrap_or(quote);
        Some((base, quote))
    }

    /// Check if this is a buy trade
    pub fn is_buy(&self) -> bool {
        matches!(self.side, TradeSide::Buy)
    }

    /// Check if this is a sell trade
    pub fn is_sell(&self) -> bool {
        matches!(self.side, TradeSide::Sell)
    }
}
