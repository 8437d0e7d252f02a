//! Sale resolution - realized gains, holding periods, tax apportionment
//!
//! Resolving a sale against its matched lots produces the realized
//! figure (proceeds minus cost basis minus fee) plus a per-lot
//! breakdown classifying each matched quantity by holding period. A
//! sale whose lots straddle the exemption boundary is reported taxable
//! overall, with the split available per lot.
//!
//! This path never errors. Bad data degrades numerically and is
//! flagged through [`Diagnostic`] entries so callers can warn without
//! the figures changing.

use crate::config::EngineConfig;
use crate::fees::FeeConversion;
use crate::lots::ConsumedLot;
use crate::trade::Trade;
use crate::types::{Cash, Quantity, Symbol, Timestamp, LOT_EPSILON, PNL_EPSILON};
use serde::{Deserialize, Serialize};

/// Data-quality flag attached to a sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The sale consumed less inventory than the trade sold; cost
    /// basis covers only the lots that existed
    PartialInventory { missing: Quantity },
    /// A positive fee had no conversion path and was valued at zero
    UnconvertibleFee { currency: String },
}

/// One lot partially or fully consumed by a sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotMatch {
    /// Acquisition date of the matched lot
    pub buy_date: Timestamp,
    /// Quantity taken from the lot
    pub amount: Quantity,
    /// Cost basis of the matched quantity
    pub cost_basis: Cash,
    /// Whole days between acquisition and sale
    pub holding_days: i64,
    /// Whether the holding period reaches the exemption threshold
    pub is_tax_free: bool,
    /// Gain on the matched quantity, proceeds apportioned pro-rata
    /// by quantity
    pub pnl: Cash,
}

/// A completed sale with its tax classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleEvent {
    /// Sale timestamp
    pub date: Timestamp,
    /// Market symbol of the sell trade
    pub symbol: Symbol,
    /// Base asset sold
    pub base_asset: String,
    /// Quantity the trade sold (full trade amount even when recorded
    /// inventory fell short)
    pub amount: Quantity,
    /// Gross proceeds in the unit of account
    pub revenue: Cash,
    /// Fee in the unit of account
    pub fee: Cash,
    /// Exchange the sale executed on
    pub exchange: String,
    /// Cost basis of the matched lots
    pub cost_basis: Cash,
    /// Proceeds minus cost basis minus fee
    pub realized_pnl: Cash,
    /// Amount-weighted mean holding period across matched lots
    pub holding_days: f64,
    /// True only when every matched lot is individually tax-free
    pub is_tax_free: bool,
    /// Share of the realized gain attributed to exempt lots
    pub tax_free_portion: Cash,
    /// Share of the realized gain attributed to non-exempt lots
    pub taxable_portion: Cash,
    /// Per-lot breakdown, oldest lot first
    pub lots: Vec<LotMatch>,
    /// Data-quality flags for this sale
    pub diagnostics: Vec<Diagnostic>,
}

/// Resolve a sell trade against the lots matched for it.
///
/// The gross (pre-fee) gain is split into tax-free and taxable buckets
/// per lot, then both buckets are scaled by `realized / gross` so they
/// reconcile with the fee-inclusive realized figure. When the sale
/// breaks even before fees the fee impact is split evenly between the
/// buckets instead, avoiding a division by zero.
pub fn resolve_sale(
    trade: &Trade,
    base_asset: &str,
    matched: &[ConsumedLot],
    fee: FeeConversion,
    config: &EngineConfig,
) -> SaleEvent {
    let matched_amount: Quantity = matched.iter().map(|m| m.amount).sum();
    let cost_basis: Cash = matched.iter().map(|m| m.amount * m.lot.price_per_unit).sum();
    let realized_pnl = trade.cost - cost_basis - fee.amount;

    let mut lots = Vec::with_capacity(matched.len());
    let mut tax_free_pnl: Cash = 0.0;
    let mut taxable_pnl: Cash = 0.0;
    let mut weighted_days = 0.0;

    for m in matched {
        let holding_days = (trade.timestamp - m.lot.date).num_days();
        let is_tax_free = holding_days >= config.exemption_days;
        let lot_cost = m.amount * m.lot.price_per_unit;
        let lot_revenue = if trade.amount > 0.0 {
            (m.amount / trade.amount) * trade.cost
        } else {
            0.0
        };
        let pnl = lot_revenue - lot_cost;

        if is_tax_free {
            tax_free_pnl += pnl;
        } else {
            taxable_pnl += pnl;
        }
        weighted_days += holding_days as f64 * m.amount;

        lots.push(LotMatch {
            buy_date: m.lot.date,
            amount: m.amount,
            cost_basis: lot_cost,
            holding_days,
            is_tax_free,
            pnl,
        });
    }

    // Reconcile the pre-fee bucket split with the fee-inclusive
    // realized figure.
    let gross_pnl = tax_free_pnl + taxable_pnl;
    if gross_pnl.abs() > PNL_EPSILON {
        let factor = realized_pnl / gross_pnl;
        tax_free_pnl *= factor;
        taxable_pnl *= factor;
    } else {
        // Break-even before fees: the fee impact is all there is,
        // split evenly between the buckets.
        tax_free_pnl = -fee.amount / 2.0;
        taxable_pnl = -fee.amount / 2.0;
    }

    let holding_days = if matched_amount > 0.0 {
        weighted_days / matched_amount
    } else {
        0.0
    };
    let is_tax_free = !lots.is_empty() && lots.iter().all(|l| l.is_tax_free);

    let mut diagnostics = Vec::new();
    if matched_amount + LOT_EPSILON < trade.amount {
        diagnostics.push(Diagnostic::PartialInventory {
            missing: trade.amount - matched_amount,
        });
    }
    if fee.dropped {
        diagnostics.push(Diagnostic::UnconvertibleFee {
            currency: trade.fee_currency.clone(),
        });
    }

    SaleEvent {
        date: trade.timestamp,
        symbol: trade.symbol.clone(),
        base_asset: base_asset.to_string(),
        amount: trade.amount,
        revenue: trade.cost,
        fee: fee.amount,
        exchange: trade.exchange.clone(),
        cost_basis,
        realized_pnl,
        holding_days,
        is_tax_free,
        tax_free_portion: tax_free_pnl,
        taxable_portion: taxable_pnl,
        lots,
        diagnostics,
    }
}
