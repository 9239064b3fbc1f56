//! Derived profit and stock statistics.
//!
//! Every function here is a pure read over caller-owned snapshots of products
//! and transactions: nothing is cached, nothing is mutated, and the same
//! inputs always produce the same outputs. Data-quality gaps (missing values,
//! transactions pointing at unknown products) degrade to zero or excluded
//! contributions instead of errors.

mod dashboard;
mod error;
mod fifo;
mod ledger;
mod profit;
mod stats;

pub use dashboard::*;
pub use error::*;
pub use fifo::*;
pub use ledger::*;
pub use profit::*;
pub use stats::*;
