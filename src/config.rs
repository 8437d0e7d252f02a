//! Engine configuration
//!
//! The set of recognized unit-of-account symbols is explicit
//! configuration rather than a hidden constant, so jurisdictions and
//! reporting currencies are swappable without code changes.

use crate::error::{Result, TaxLotError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for the tax-lot engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Symbols recognized as the unit of account (stablecoins/fiat).
    /// A trade quoted in one of these contributes to the price map,
    /// and a fee charged in one of these needs no conversion.
    pub unit_symbols: HashSet<String>,
    /// Holding period in whole days at or beyond which a lot's gain
    /// is tax-exempt
    pub exemption_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let unit_symbols = ["USD", "USDT", "USDC", "BUSD", "DAI", "TUSD", "FDUSD", "EUR"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self {
            unit_symbols,
            exemption_days: 365,
        }
    }
}

impl EngineConfig {
    /// Check whether a symbol is a recognized unit of account
    pub fn is_unit(&self, symbol: &str) -> bool {
        self.unit_symbols.contains(symbol)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.unit_symbols.is_empty() {
            return Err(TaxLotError::ConfigError(
                "unit_symbols must name at least one unit-of-account symbol".to_string(),
            ));
        }
        if self.exemption_days < 0 {
            return Err(TaxLotError::ConfigError(format!(
                "exemption_days must be non-negative, got {}",
                self.exemption_days
            )));
        }
        Ok(())
    }
}
