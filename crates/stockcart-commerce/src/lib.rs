//! Cart domain types for StockCart.
//!
//! This crate holds the values the cart store reasons about and the ports
//! it uses to reach external services:
//!
//! - **Catalog**: products, stock records, and the `StockValidator` /
//!   `ProductCatalog` traits
//! - **Cart**: line items and the immutable `Cart` aggregate
//!
//! # Example
//!
//! ```rust
//! use stockcart_commerce::prelude::*;
//!
//! let sneaker = Product::new(ProductId::new(1), "Runner", 179.9, "https://img/1.jpg");
//!
//! let cart = Cart::new().with_added(sneaker).unwrap();
//! let cart = cart.with_incremented(ProductId::new(1)).unwrap();
//!
//! assert_eq!(cart.amount_of(ProductId::new(1)), 2);
//! ```

pub mod error;
pub mod ids;

pub mod cart;
pub mod catalog;

pub use error::CommerceError;
pub use ids::{ParseProductIdError, ProductId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::ProductId;

    // Catalog
    pub use crate::catalog::{Product, ProductCatalog, StockInfo, StockValidator};

    // Cart
    pub use crate::cart::{Cart, LineItem};
}
