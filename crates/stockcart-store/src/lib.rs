//! Stock-validated cart store for StockCart.
//!
//! [`CartStore`] owns the session's cart. It exposes three mutations, each
//! of which validates against the external stock service where needed and
//! then commits the new cart to durable storage and memory together:
//!
//! - [`CartStore::add_product`]
//! - [`CartStore::remove_product`]
//! - [`CartStore::update_product_amount`]
//!
//! Every mutation returns a typed [`CartError`] on rejection and also
//! reports user-facing failures to an [`AlertSink`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stockcart_cache::FileStore;
//! use stockcart_data::{CatalogApi, FetchClient};
//! use stockcart_store::{CartStore, TracingAlertSink};
//!
//! let api = Arc::new(CatalogApi::new(FetchClient::new("http://localhost:3333")?));
//! let store = CartStore::open(
//!     FileStore::open(".stockcart")?,
//!     api.clone(),
//!     api,
//!     TracingAlertSink,
//! );
//!
//! store.add_product(ProductId::new(1)).await?;
//! ```

mod alert;
mod error;
mod lock;
mod store;

pub use alert::{Alert, AlertSink, MemoryAlertSink, TracingAlertSink};
pub use error::{CartError, CartOperation};
pub use lock::{KeyGuard, KeyedLocks};
pub use store::{CartStore, UpdateProductAmount, DEFAULT_CART_KEY};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Alert, AlertSink, CartError, CartOperation, CartStore, UpdateProductAmount,
    };
}
