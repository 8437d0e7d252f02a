//! Engine driver - chronological dispatch over the trade history
//!
//! A run is a pure, synchronous pass: sort the trades, build the price
//! map once, then walk the history in time order. Buys enqueue lots,
//! sells consume them and resolve into sale events. Nothing persists
//! between runs; callers re-run over the full history when they need
//! fresh figures.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::fees::fee_to_unit;
use crate::lots::{BuyLot, LotBook};
use crate::prices::PriceMap;
use crate::sales::{resolve_sale, SaleEvent};
use crate::trade::{Trade, TradeSide};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Output of one engine run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineReport {
    /// Open lots per base asset, oldest first; basis for unrealized
    /// gain display downstream
    pub lot_queues: BTreeMap<String, VecDeque<BuyLot>>,
    /// Sale events ordered by sell time; basis for realized gain and
    /// tax reporting downstream
    pub sales: Vec<SaleEvent>,
}

impl EngineReport {
    /// Serialize the report for the reporting layer
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// FIFO tax-lot accounting engine
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with a validated configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create an engine with the default configuration
    pub fn with_defaults() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the engine over a complete trade history.
    ///
    /// Trades are sorted ascending by timestamp with a stable sort, so
    /// trades sharing a timestamp keep their input order and FIFO
    /// matching stays deterministic.
    pub fn run(&self, trades: &[Trade]) -> EngineReport {
        let prices = PriceMap::from_trades(trades, &self.config);

        let mut ordered: Vec<&Trade> = trades.iter().collect();
        ordered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        log::info!(
            "processing {} trades, {} assets priced",
            ordered.len(),
            prices.len()
        );

        let mut book = LotBook::new();
        let mut sales = Vec::new();
        for trade in ordered {
            if let Some(sale) = self.dispatch(trade, &prices, &mut book) {
                sales.push(sale);
            }
        }

        log::info!(
            "run complete: {} sales, {} assets with open lots",
            sales.len(),
            book.asset_count()
        );
        EngineReport {
            lot_queues: book.into_queues(),
            sales,
        }
    }

    /// Run with per-asset fan-out.
    ///
    /// Lot queues are partitioned by base asset and a sale depends only
    /// on prior trades of the same asset, so the partitions process
    /// concurrently. One asset's stream stays strictly sequential.
    /// Produces the same report as [`Engine::run`].
    pub fn run_partitioned(&self, trades: &[Trade]) -> EngineReport {
        let prices = PriceMap::from_trades(trades, &self.config);

        let mut ordered: Vec<&Trade> = trades.iter().collect();
        ordered.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

        // Partition by base asset, tagging each trade with its position
        // in the global chronological order so sales merge back into
        // exactly the sequential order afterwards.
        let mut partitions: HashMap<&str, Vec<(usize, &Trade)>> = HashMap::new();
        for (pos, trade) in ordered.iter().enumerate() {
            partitions
                .entry(trade.base_asset())
                .or_default()
                .push((pos, *trade));
        }

        log::info!(
            "processing {} trades across {} asset partitions",
            trades.len(),
            partitions.len()
        );

        let results: Vec<(LotBook, Vec<(usize, SaleEvent)>)> = partitions
            .into_par_iter()
            .map(|(_, partition)| {
                let mut book = LotBook::new();
                let mut sales = Vec::new();
                for (pos, trade) in partition {
                    if let Some(sale) = self.dispatch(trade, &prices, &mut book) {
                        sales.push((pos, sale));
                    }
                }
                (book, sales)
            })
            .collect();

        let mut lot_queues = BTreeMap::new();
        let mut tagged: Vec<(usize, SaleEvent)> = Vec::new();
        for (book, partition_sales) in results {
            lot_queues.extend(book.into_queues());
            tagged.extend(partition_sales);
        }
        tagged.sort_by_key(|(pos, _)| *pos);
        let sales = tagged.into_iter().map(|(_, sale)| sale).collect();

        EngineReport { lot_queues, sales }
    }

    fn dispatch(&self, trade: &Trade, prices: &PriceMap, book: &mut LotBook) -> Option<SaleEvent> {
        let base = trade.base_asset();
        match trade.side {
            TradeSide::Buy => {
                book.enqueue(base, BuyLot::from_buy(trade));
                None
            }
            TradeSide::Sell => {
                let matched = book.consume(base, trade.amount);
                let fee = fee_to_unit(trade, prices, &self.config);
                let sale = resolve_sale(trade, base, &matched, fee, &self.config);
                log::debug!(
                    "sold {} {} for {:.2}, realized {:.2} across {} lots ({} still open)",
                    sale.amount,
                    sale.base_asset,
                    sale.revenue,
                    sale.realized_pnl,
                    sale.lots.len(),
                    book.open_amount(base)
                );
                Some(sale)
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_defaults()
    }
}
