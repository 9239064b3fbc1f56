pub mod id;
pub mod product;
pub mod transaction;

pub use id::*;
pub use product::*;
pub use transaction::*;
