//! Product catalog module.
//!
//! Contains product metadata, stock records, and the ports used to query
//! the external catalog and stock services.

mod product;
mod source;
mod stock;

pub use product::Product;
pub use source::{ProductCatalog, StockValidator};
pub use stock::StockInfo;
