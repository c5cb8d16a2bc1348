//! HTTP clients for the StockCart stock and catalog services.
//!
//! [`FetchClient`] is a thin JSON client over `reqwest` with a base URL and
//! a request timeout. [`CatalogApi`] uses it to implement the
//! `StockValidator` and `ProductCatalog` ports against a REST backend
//! exposing `/stock/{id}` and `/products/{id}`.
//!
//! # Example
//!
//! ```rust,ignore
//! use stockcart_data::{CatalogApi, FetchClient};
//! use stockcart_commerce::prelude::*;
//!
//! let client = FetchClient::new("http://localhost:3333")?;
//! let api = CatalogApi::new(client);
//!
//! if let Some(stock) = api.stock(ProductId::new(1)).await? {
//!     println!("{} units left", stock.available);
//! }
//! ```

mod catalog;
mod client;
mod error;

pub use catalog::CatalogApi;
pub use client::{FetchClient, DEFAULT_TIMEOUT};
pub use error::FetchError;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CatalogApi, FetchClient, FetchError};
}
