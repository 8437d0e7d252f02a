//! Price normalization - most recent unit-of-account price per asset
//!
//! Built once per run from the entire trade set, independent of the
//! order sales are processed in. Assets that never traded directly
//! against a recognized unit of account get no entry; callers must
//! have a fallback.

use crate::config::EngineConfig;
use crate::trade::Trade;
use crate::types::Price;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Lookup from base asset to its most recent unit-of-account price
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceMap {
    prices: HashMap<String, Price>,
}

impl PriceMap {
    /// Build the map by scanning trades newest-first.
    ///
    /// The first trade seen for a base asset whose quote is in the
    /// unit-of-account set wins, which yields the most recent directly
    /// observed price. Symbols without a `/` are skipped.
    pub fn from_trades(trades: &[Trade], config: &EngineConfig) -> Self {
        let mut ordered: Vec<&Trade> = trades.iter().collect();
        ordered.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let mut prices = HashMap::new();
        for trade in ordered {
            let Some((base, quote)) = trade.split_symbol() else {
                continue;
            };
            if config.is_unit(quote) && !prices.contains_key(base) {
                prices.insert(base.to_string(), trade.price);
            }
        }

        log::debug!("price map covers {} assets", prices.len());
        Self { prices }
    }

    /// Most recent unit-of-account price for an asset, if one was
    /// ever observed
    pub fn get(&self, asset: &str) -> Option<Price> {
        self.prices.get(asset).copied()
    }

    /// Number of assets with a known price
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
