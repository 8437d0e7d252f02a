//! # taxlots
//!
//! A FIFO tax-lot accounting engine for multi-exchange crypto trade
//! histories.
//!
//! Given a complete trade list, the engine produces chronologically
//! consistent cost-basis lots, realized-gain events with
//! holding-period tax classification, and fees normalized into a
//! single unit of account. It is a pure function boundary: no I/O, no
//! persisted state, one synchronous pass per invocation.
//!
//! ## Example
//!
//! ```rust,no_run
//! use taxlots::prelude::*;
//!
//! let trades: Vec<Trade> = vec![/* from the sync subsystem */];
//! let engine = Engine::with_defaults();
//! let report = engine.run(&trades);
//!
//! for sale in &report.sales {
//!     println!(
//!         "{} {}: realized {:.2} ({} lots)",
//!         sale.date, sale.base_asset, sale.realized_pnl, sale.lots.len()
//!     );
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod fees;
pub mod lots;
pub mod prices;
pub mod sales;
pub mod trade;
pub mod types;

pub mod prelude {
    //! Commonly used types
    pub use crate::config::EngineConfig;
    pub use crate::engine::{Engine, EngineReport};
    pub use crate::error::{Result, TaxLotError};
    pub use crate::lots::{BuyLot, LotBook};
    pub use crate::prices::PriceMap;
    pub use crate::sales::{Diagnostic, LotMatch, SaleEvent};
    pub use crate::trade::{Trade, TradeSide};
    pub use crate::types::*;
}
