//! Fee conversion into the unit of account
//!
//! Exchanges charge fees in whatever currency suits them: the quote,
//! the base, or their own token. Everything downstream wants one
//! number in the unit of account, so conversion happens here.
//!
//! Known limitation: a fee in a currency that never traded directly
//! against a unit of account is valued at 0 rather than estimated
//! through a multi-hop conversion path. This understates fees, by
//! policy; the dropped flag lets callers surface it.

use crate::config::EngineConfig;
use crate::prices::PriceMap;
use crate::trade::Trade;
use crate::types::Cash;

/// Result of valuing a trade's fee in the unit of account
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeConversion {
    /// Fee in the unit of account; zero when no conversion path exists
    pub amount: Cash,
    /// Set when a positive fee had no conversion path and was dropped
    pub dropped: bool,
}

impl FeeConversion {
    fn converted(amount: Cash) -> Self {
        Self {
            amount,
            dropped: false,
        }
    }
}

/// Value a trade's fee in the unit of account.
///
/// Non-positive fees are zero. A fee already charged in a unit of
/// account passes through unchanged. Otherwise the fee currency is
/// looked up in the price map; failing that, a fee charged in the
/// trade's own base asset on a unit-quoted market converts at the
/// trade's own price.
pub fn fee_to_unit(trade: &Trade, prices: &PriceMap, config: &EngineConfig) -> FeeConversion {
    if trade.fee <= 0.0 {
        return FeeConversion::converted(0.0);
    }

    if config.is_unit(&trade.fee_currency) {
        return FeeConversion::converted(trade.fee);
    }

    if let Some(price) = prices.get(&trade.fee_currency) {
        return FeeConversion::converted(trade.fee * price);
    }

    if let Some((base, quote)) = trade.split_symbol() {
        if trade.fee_currency == base && config.is_unit(quote) {
            return FeeConversion::converted(trade.fee * trade.price);
        }
    }

    log::debug!(
        "fee of {} {} on {} has no conversion path, valued at 0",
        trade.fee,
        trade.fee_currency,
        trade.symbol
    );
    FeeConversion {
        amount: 0.0,
        dropped: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trade::TradeSide;
    use chrono::{TimeZone, Utc};

    fn trade(symbol: &str, price: f64, fee: f64, fee_currency: &str) -> Trade {
        Trade {
            symbol: symbol.to_string(),
            side: TradeSide::Sell,
            price,
            amount: 1.0,
            cost: price,
            fee,
            fee_currency: fee_currency.to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            exchange: "kraken".to_string(),
        }
    }

    fn price_map(trades: &[Trade]) -> PriceMap {
        PriceMap::from_trades(trades, &EngineConfig::default())
    }

    #[test]
    fn test_zero_and_negative_fee() {
        let config = EngineConfig::default();
        let map = PriceMap::default();

        let conv = fee_to_unit(&trade("BTC/USDT", 20_000.0, 0.0, "USDT"), &map, &config);
        assert_eq!(conv.amount, 0.0);
        assert!(!conv.dropped);

        let conv = fee_to_unit(&trade("BTC/USDT", 20_000.0, -1.0, "USDT"), &map, &config);
        assert_eq!(conv.amount, 0.0);
        assert!(!conv.dropped);
    }

    #[test]
    fn test_unit_fee_passes_through() {
        let config = EngineConfig::default();
        let conv = fee_to_unit(
            &trade("BTC/USDT", 20_000.0, 12.5, "USDT"),
            &PriceMap::default(),
            &config,
        );
        assert_eq!(conv.amount, 12.5);
        assert!(!conv.dropped);
    }

    #[test]
    fn test_price_map_conversion() {
        let config = EngineConfig::default();
        let reference = vec![trade("BNB/USDT", 300.0, 0.0, "USDT")];
        let map = price_map(&reference);

        let conv = fee_to_unit(&trade("BTC/USDT", 20_000.0, 0.01, "BNB"), &map, &config);
        assert_eq!(conv.amount, 3.0);
        assert!(!conv.dropped);
    }

    #[test]
    fn test_own_base_fallback() {
        // Fee taken in ETH on the ETH/USDT market itself, with ETH
        // absent from the price map: the trade's own price applies.
        let config = EngineConfig::default();
        let conv = fee_to_unit(
            &trade("ETH/USDT", 2_000.0, 0.001, "ETH"),
            &PriceMap::default(),
            &config,
        );
        assert_eq!(conv.amount, 2.0);
        assert!(!conv.dropped);
    }

    #[test]
    fn test_own_base_fallback_requires_unit_quote() {
        let config = EngineConfig::default();
        let conv = fee_to_unit(
            &trade("ETH/BTC", 0.05, 0.001, "ETH"),
            &PriceMap::default(),
            &config,
        );
        assert_eq!(conv.amount, 0.0);
        assert!(conv.dropped);
    }

    #[test]
    fn test_unconvertible_fee_dropped() {
        let config = EngineConfig::default();
        let conv = fee_to_unit(
            &trade("BTC/USDT", 20_000.0, 5.0, "KCS"),
            &PriceMap::default(),
            &config,
        );
        assert_eq!(conv.amount, 0.0);
        assert!(conv.dropped);
    }
}
