//! Core types and numeric constants

use chrono::{DateTime, Utc};

/// Timestamp type used throughout the library
pub type Timestamp = DateTime<Utc>;

/// Market or asset symbol
pub type Symbol = String;

/// Price type (using f64 for precision)
pub type Price = f64;

/// Quantity/volume type
pub type Quantity = f64;

/// Money type, denominated in the unit of account
pub type Cash = f64;

/// Lots whose remaining amount falls below this are dropped from their
/// queue, so float residue from partial consumption cannot accumulate.
pub const LOT_EPSILON: f64 = 1e-8;

/// Below this magnitude a sale's pre-fee gain is treated as zero when
/// apportioning it between the tax-free and taxable buckets.
pub const PNL_EPSILON: f64 = 1e-10;
