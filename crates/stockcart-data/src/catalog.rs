//! REST implementations of the stock and catalog ports.

use async_trait::async_trait;
use stockcart_commerce::prelude::*;

use crate::{FetchClient, FetchError};

/// Stock and product lookups against a REST backend.
///
/// Endpoints:
/// - `GET /stock/{id}` → `{ "id": 1, "amount": 3 }`
/// - `GET /products/{id}` → `{ "id": 1, "title": "...", "price": 179.9, "image": "..." }`
#[derive(Debug, Clone)]
pub struct CatalogApi {
    client: FetchClient,
}

impl CatalogApi {
    /// Create a new API wrapper.
    pub fn new(client: FetchClient) -> Self {
        Self { client }
    }

    /// The underlying client.
    pub fn client(&self) -> &FetchClient {
        &self.client
    }
}

#[async_trait]
impl StockValidator for CatalogApi {
    async fn stock(&self, product_id: ProductId) -> Result<Option<StockInfo>, CommerceError> {
        let stock: Option<StockInfo> = self
            .client
            .get_json_opt(&format!("/stock/{product_id}"))
            .await?;

        match stock {
            Some(stock) if stock.id != product_id => Err(FetchError::ParseError(format!(
                "stock record for {} returned for product {product_id}",
                stock.id
            ))
            .into()),
            other => Ok(other),
        }
    }
}

#[async_trait]
impl ProductCatalog for CatalogApi {
    async fn product(&self, product_id: ProductId) -> Result<Product, CommerceError> {
        let product: Product = self
            .client
            .get_json(&format!("/products/{product_id}"))
            .await?;

        if product.id != product_id {
            return Err(FetchError::ParseError(format!(
                "product {} returned for product {product_id}",
                product.id
            ))
            .into());
        }
        Ok(product)
    }
}
