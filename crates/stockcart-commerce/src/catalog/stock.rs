//! Stock records.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Remaining inventory for a product, as reported by the stock service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockInfo {
    /// Product the record belongs to.
    pub id: ProductId,
    /// Units still available.
    #[serde(rename = "amount")]
    pub available: u32,
}

impl StockInfo {
    /// Create a new stock record.
    pub fn new(id: ProductId, available: u32) -> Self {
        Self { id, available }
    }

    /// Check whether holding `amount` units would reach or exceed the stock
    /// ceiling.
    ///
    /// A cart may never hold as many units as are available, so a request
    /// is rejected as soon as `available <= amount`.
    pub fn exhausted_at(&self, amount: u32) -> bool {
        self.available <= amount
    }
}
