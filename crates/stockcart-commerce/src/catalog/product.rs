//! Product metadata.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product as served by the external catalog.
///
/// Products are immutable once fetched; a cart line item carries a copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(rename = "title", alias = "name")]
    pub name: String,
    /// Unit price.
    pub price: f64,
    /// Image URL.
    #[serde(rename = "image", alias = "imageUrl")]
    pub image_url: String,
}

impl Product {
    /// Create a new product.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: f64,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image_url: image_url.into(),
        }
    }
}
