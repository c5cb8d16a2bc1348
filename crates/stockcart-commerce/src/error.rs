//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors that can occur in cart and catalog operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Line item amount below one.
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// Product already has a line item.
    #[error("Product already in cart: {0}")]
    DuplicateProduct(ProductId),

    /// Item not in cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(ProductId),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in amount calculation")]
    Overflow,

    /// External service unreachable or returned an unusable answer.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Serialization(e.to_string())
    }
}
