//! Typed clients over the resource actors.

#[macro_use]
mod macros;

pub mod product_client;
pub mod transaction_client;

pub use product_client::*;
pub use transaction_client::*;
