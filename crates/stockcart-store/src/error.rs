//! Cart store error types.

use std::fmt;

use stockcart_cache::CacheError;
use stockcart_commerce::{CommerceError, ProductId};
use thiserror::Error;

use crate::alert::Alert;

/// The three cart mutations, used to pick the alert for a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

impl CartOperation {
    /// The generic failure alert for this operation.
    pub fn failure_alert(&self) -> Alert {
        match self {
            CartOperation::Add => Alert::AddFailure,
            CartOperation::Remove => Alert::RemoveFailure,
            CartOperation::UpdateAmount => Alert::AmountChangeFailure,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CartOperation::Add => "add_product",
            CartOperation::Remove => "remove_product",
            CartOperation::UpdateAmount => "update_product_amount",
        }
    }
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a cart mutation did not commit.
///
/// A returned error always means neither memory nor storage changed.
#[derive(Error, Debug)]
pub enum CartError {
    /// The resulting amount would reach or exceed the available stock.
    #[error("Out of stock for {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// The product to remove is not in the cart.
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),

    /// The requested amount is below one.
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// The stock or catalog service could not be reached or gave an
    /// unusable answer.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// No stock record exists for the product being added.
    #[error("No stock record for {0}")]
    SilentAbsence(ProductId),

    /// The product whose amount is being changed is not in the cart.
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),

    /// No stock record exists for a product already in the cart.
    #[error("No stock record for {0}")]
    StockRecordMissing(ProductId),

    /// The snapshot could not be written.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] CacheError),

    /// The line item changed while the operation was waiting on a service.
    #[error("Concurrent modification of {0}")]
    ConcurrentModification(ProductId),

    /// The new cart would break a cart invariant.
    #[error("Rejected cart change: {0}")]
    Rejected(CommerceError),
}

impl CartError {
    /// Whether this rejection is a deliberate no-op that raises no alert.
    pub fn is_silent(&self) -> bool {
        matches!(self, CartError::SilentAbsence(_) | CartError::NotInCart(_))
    }

    /// The alert to raise for this error during `operation`, if any.
    pub fn alert(&self, operation: CartOperation) -> Option<Alert> {
        match self {
            e if e.is_silent() => None,
            CartError::OutOfStock { .. } => Some(Alert::OutOfStock),
            _ => Some(operation.failure_alert()),
        }
    }
}

impl From<CommerceError> for CartError {
    fn from(e: CommerceError) -> Self {
        match e {
            CommerceError::Transport(msg) => CartError::Transport(msg),
            other => CartError::Rejected(other),
        }
    }
}
