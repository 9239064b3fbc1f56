//! Inventory bookkeeping: products, stock movements, and the profit and
//! stock figures derived from them.

pub mod actor_framework;
pub mod adapters;
pub mod analytics;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod product_actor;
pub mod transaction_actor;

#[cfg(test)]
mod mock_framework;
