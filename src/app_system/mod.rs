//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod error;
pub mod inventory_system;
pub mod tracing;

pub use self::config::*;
pub use self::error::*;
pub use self::inventory_system::*;
pub use self::tracing::*;
