//! Cart and line item types.

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use serde::{Deserialize, Deserializer, Serialize};

/// A shopping cart.
///
/// An ordered list of line items, unique by product id. A `Cart` is a
/// value: every change goes through one of the `with_*` / `without`
/// constructors, which leave `self` untouched and return the new cart.
///
/// Serializes as a bare JSON array of line items.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from existing line items.
    ///
    /// Returns an error if an amount is zero or a product id repeats.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CommerceError> {
        for (index, item) in items.iter().enumerate() {
            if item.amount == 0 {
                return Err(CommerceError::InvalidAmount(0));
            }
            if items[..index].iter().any(|i| i.id() == item.id()) {
                return Err(CommerceError::DuplicateProduct(item.id()));
            }
        }
        Ok(Self { items })
    }

    /// Return a cart with `product` appended at amount 1.
    pub fn with_added(&self, product: Product) -> Result<Self, CommerceError> {
        if self.contains(product.id) {
            return Err(CommerceError::DuplicateProduct(product.id));
        }
        let mut items = self.items.clone();
        items.push(LineItem::new(product, 1)?);
        Ok(Self { items })
    }

    /// Return a cart with the amount for `product_id` raised by one.
    pub fn with_incremented(&self, product_id: ProductId) -> Result<Self, CommerceError> {
        let current = self
            .find(product_id)
            .ok_or(CommerceError::ItemNotInCart(product_id))?;
        let amount = current.amount.checked_add(1).ok_or(CommerceError::Overflow)?;
        self.with_amount(product_id, amount)
    }

    /// Return a cart with the amount for `product_id` set to `amount`.
    pub fn with_amount(&self, product_id: ProductId, amount: u32) -> Result<Self, CommerceError> {
        if amount == 0 {
            return Err(CommerceError::InvalidAmount(0));
        }
        let index = self
            .position(product_id)
            .ok_or(CommerceError::ItemNotInCart(product_id))?;

        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == index {
                    LineItem {
                        product: item.product.clone(),
                        amount,
                    }
                } else {
                    item.clone()
                }
            })
            .collect();
        Ok(Self { items })
    }

    /// Return a cart without the line item for `product_id`.
    pub fn without(&self, product_id: ProductId) -> Result<Self, CommerceError> {
        let index = self
            .position(product_id)
            .ok_or(CommerceError::ItemNotInCart(product_id))?;
        let items = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| item.clone())
            .collect();
        Ok(Self { items })
    }

    /// Get the line item for a product.
    pub fn find(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id() == product_id)
    }

    /// Get the index of the line item for a product.
    pub fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|i| i.id() == product_id)
    }

    /// Check whether the cart holds a product.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.position(product_id).is_some()
    }

    /// Amount held for a product, or 0 if absent.
    pub fn amount_of(&self, product_id: ProductId) -> u32 {
        self.find(product_id).map(|i| i.amount).unwrap_or(0)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Iterate over line items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.items.iter()
    }

    /// Get number of unique items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get total item count (sum of amounts).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.amount)).sum()
    }

    /// Sum of price times amount over all line items.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Vec::<LineItem>::deserialize(deserializer)?;
        Cart::from_items(items).map_err(serde::de::Error::custom)
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A line item in the cart: a product and the amount held.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product metadata, flattened into the item on the wire.
    #[serde(flatten)]
    pub product: Product,
    /// Amount held, at least 1.
    pub amount: u32,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(product: Product, amount: u32) -> Result<Self, CommerceError> {
        if amount == 0 {
            return Err(CommerceError::InvalidAmount(0));
        }
        Ok(Self { product, amount })
    }

    /// Product id of this item.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Price times amount.
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.amount)
    }
}
