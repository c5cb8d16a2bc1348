//! Ports to the external stock and catalog services.

use async_trait::async_trait;
use std::sync::Arc;

use crate::catalog::{Product, StockInfo};
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Queries live availability for a product.
#[async_trait]
pub trait StockValidator: Send + Sync {
    /// Fetch the stock record for `product_id`.
    ///
    /// `Ok(None)` means the service answered but holds no record for the
    /// product. Unreachable services return `CommerceError::Transport`.
    async fn stock(&self, product_id: ProductId) -> Result<Option<StockInfo>, CommerceError>;
}

/// Queries product metadata for first-time additions.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch the product for `product_id`.
    ///
    /// Unknown ids are reported as `CommerceError::Transport`, the same as
    /// an unreachable service.
    async fn product(&self, product_id: ProductId) -> Result<Product, CommerceError>;
}

#[async_trait]
impl<T: StockValidator + ?Sized> StockValidator for Arc<T> {
    async fn stock(&self, product_id: ProductId) -> Result<Option<StockInfo>, CommerceError> {
        (**self).stock(product_id).await
    }
}

#[async_trait]
impl<T: ProductCatalog + ?Sized> ProductCatalog for Arc<T> {
    async fn product(&self, product_id: ProductId) -> Result<Product, CommerceError> {
        (**self).product(product_id).await
    }
}
