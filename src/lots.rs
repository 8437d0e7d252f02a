//! Lot ledger - per-asset FIFO queues of open purchase lots
//!
//! Each buy creates a lot at the tail of its asset's queue; each sell
//! consumes from the head, oldest first. Lots are owned exclusively by
//! their queue and mutated in place as they are consumed.

use crate::trade::Trade;
use crate::types::{Cash, Price, Quantity, Symbol, Timestamp, LOT_EPSILON};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// An open purchase lot with its cost basis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuyLot {
    /// Acquisition timestamp
    pub date: Timestamp,
    /// Remaining quantity; decremented as later sells consume the lot
    pub amount: Quantity,
    /// Cost basis per unit
    pub price_per_unit: Price,
    /// Cost of the remaining quantity
    pub total_cost: Cash,
    /// Exchange the lot was acquired on
    pub exchange: String,
    /// Market symbol of the acquiring trade
    pub symbol: Symbol,
}

impl BuyLot {
    /// Create a lot from a buy trade
    pub fn from_buy(trade: &Trade) -> Self {
        Self {
            date: trade.timestamp,
            amount: trade.amount,
            price_per_unit: trade.price,
            total_cost: trade.cost,
            exchange: trade.exchange.clone(),
            symbol: trade.symbol.clone(),
        }
    }
}

/// A lot consumed (partially or fully) by a sale
#[derive(Debug, Clone)]
pub struct ConsumedLot {
    /// Snapshot of the lot's acquisition data
    pub lot: BuyLot,
    /// Quantity this sale took from the lot
    pub amount: Quantity,
}

/// Per-asset FIFO queues of open lots.
///
/// Keyed with a `BTreeMap` so reports serialize in a stable asset
/// order and identical runs produce identical output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LotBook {
    queues: BTreeMap<String, VecDeque<BuyLot>>,
}

impl LotBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lot to the tail of an asset's queue
    pub fn enqueue(&mut self, asset: &str, lot: BuyLot) {
        self.queues
            .entry(asset.to_string())
            .or_default()
            .push_back(lot);
    }

    /// Consume up to `amount` units from the head of an asset's queue.
    ///
    /// Returns the ordered lots matched against the sale. Stops early
    /// without error if the queue empties first; the caller sees the
    /// shortfall as a matched total below `amount`. Lots reduced below
    /// [`LOT_EPSILON`] are removed.
    pub fn consume(&mut self, asset: &str, amount: Quantity) -> Vec<ConsumedLot> {
        let mut matched = Vec::new();
        let Some(queue) = self.queues.get_mut(asset) else {
            return matched;
        };

        let mut remaining = amount;
        while remaining > LOT_EPSILON {
            let Some(front) = queue.front_mut() else {
                break;
            };

            if front.amount <= remaining + LOT_EPSILON {
                // Whole lot consumed
                if let Some(lot) = queue.pop_front() {
                    remaining -= lot.amount;
                    let taken = lot.amount;
                    matched.push(ConsumedLot { lot, amount: taken });
                }
            } else {
                // Partial: decrement in place, queue keeps the rest
                let snapshot = front.clone();
                front.amount -= remaining;
                front.total_cost = front.amount * front.price_per_unit;
                matched.push(ConsumedLot {
                    lot: snapshot,
                    amount: remaining,
                });
                remaining = 0.0;
            }
        }

        if queue.is_empty() {
            self.queues.remove(asset);
        }
        matched
    }

    /// Open lots for an asset, oldest first
    pub fn open_lots(&self, asset: &str) -> Option<&VecDeque<BuyLot>> {
        self.queues.get(asset)
    }

    /// Total open quantity for an asset
    pub fn open_amount(&self, asset: &str) -> Quantity {
        self.queues
            .get(asset)
            .map(|q| q.iter().map(|lot| lot.amount).sum())
            .unwrap_or(0.0)
    }

    /// Number of assets with open lots
    pub fn asset_count(&self) -> usize {
        self.queues.len()
    }

    /// Consume the book, yielding the final queues
    pub fn into_queues(self) -> BTreeMap<String, VecDeque<BuyLot>> {
        self.queues
    }
}
