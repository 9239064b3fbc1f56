//! Stock movement records.

pub mod entity;
pub mod error;

pub use error::*;
