//! The cart store.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use stockcart_cache::{Cache, SnapshotStore};
use stockcart_commerce::prelude::*;
use tracing::{debug, info, warn};

use crate::alert::AlertSink;
use crate::error::{CartError, CartOperation};
use crate::lock::KeyedLocks;

/// Storage key the cart snapshot lives under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// Request to set the amount held for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Owns the session's cart and mediates every change to it.
///
/// The in-memory cart and the persisted snapshot change together or not
/// at all: a commit writes the snapshot first and replaces the in-memory
/// cart only once the write succeeded.
///
/// `add_product` and `update_product_amount` hold a per-product lock for
/// their whole run, so overlapping calls for one product are serialized
/// and cannot both pass the same stock check.
pub struct CartStore {
    key: String,
    cart: Mutex<Cart>,
    snapshots: Cache<Arc<dyn SnapshotStore>>,
    stock: Arc<dyn StockValidator>,
    catalog: Arc<dyn ProductCatalog>,
    alerts: Arc<dyn AlertSink>,
    locks: KeyedLocks<ProductId>,
}

impl CartStore {
    /// Open the store under [`DEFAULT_CART_KEY`].
    pub fn open<S, V, C, A>(store: S, stock: V, catalog: C, alerts: A) -> Self
    where
        S: SnapshotStore + 'static,
        V: StockValidator + 'static,
        C: ProductCatalog + 'static,
        A: AlertSink + 'static,
    {
        Self::open_with_key(DEFAULT_CART_KEY, store, stock, catalog, alerts)
    }

    /// Open the store under `key`, loading the persisted cart.
    ///
    /// A missing snapshot starts an empty cart. So does an unreadable or
    /// corrupt one, which is logged and left in place until the next
    /// commit overwrites it.
    pub fn open_with_key<S, V, C, A>(
        key: impl Into<String>,
        store: S,
        stock: V,
        catalog: C,
        alerts: A,
    ) -> Self
    where
        S: SnapshotStore + 'static,
        V: StockValidator + 'static,
        C: ProductCatalog + 'static,
        A: AlertSink + 'static,
    {
        let key = key.into();
        let snapshots = Cache::new(Arc::new(store) as Arc<dyn SnapshotStore>);

        let cart = match snapshots.get::<Cart>(&key) {
            Ok(Some(cart)) => {
                debug!(%key, items = cart.len(), "loaded cart snapshot");
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(%key, error = %e, "discarding unreadable cart snapshot");
                Cart::new()
            }
        };

        Self {
            key,
            cart: Mutex::new(cart),
            snapshots,
            stock: Arc::new(stock),
            catalog: Arc::new(catalog),
            alerts: Arc::new(alerts),
            locks: KeyedLocks::new(),
        }
    }

    /// Snapshot key this store writes to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The current cart.
    pub fn cart(&self) -> Cart {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart has its amount raised by one; a new
    /// product is fetched from the catalog and appended with amount 1.
    /// Rejected when the stock service has no record for the product
    /// (silently) or when the cart already holds as many units as are
    /// available.
    pub async fn add_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let result = self.try_add_product(product_id).await;
        self.report(CartOperation::Add, product_id, &result);
        result
    }

    /// Remove a product's line item.
    pub fn remove_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let result = self.try_remove_product(product_id);
        self.report(CartOperation::Remove, product_id, &result);
        result
    }

    /// Set the amount held for a product already in the cart.
    ///
    /// Rejected when `amount < 1` or when `amount` reaches the available
    /// stock. A product that is not in the cart is left alone without an
    /// alert.
    pub async fn update_product_amount(
        &self,
        request: UpdateProductAmount,
    ) -> Result<Cart, CartError> {
        let result = self.try_update_product_amount(request).await;
        self.report(CartOperation::UpdateAmount, request.product_id, &result);
        result
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let _guard = self.locks.lock(&product_id).await;

        let current = self.cart().amount_of(product_id);
        debug!(%product_id, current, "validating add against stock");

        let stock = self
            .stock
            .stock(product_id)
            .await?
            .ok_or(CartError::SilentAbsence(product_id))?;

        if stock.exhausted_at(current) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: current.saturating_add(1),
                available: stock.available,
            });
        }

        if current > 0 {
            self.commit(product_id, current, |cart| cart.with_incremented(product_id))
        } else {
            let product = self.catalog.product(product_id).await?;
            if product.id != product_id {
                return Err(CartError::Transport(format!(
                    "catalog returned product {} for {product_id}",
                    product.id
                )));
            }
            self.commit(product_id, current, move |cart| cart.with_added(product))
        }
    }

    fn try_remove_product(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let current = self.cart().amount_of(product_id);
        if current == 0 {
            return Err(CartError::NotFound(product_id));
        }
        self.commit(product_id, current, |cart| cart.without(product_id))
    }

    async fn try_update_product_amount(
        &self,
        UpdateProductAmount { product_id, amount }: UpdateProductAmount,
    ) -> Result<Cart, CartError> {
        let requested = match u32::try_from(amount) {
            Ok(requested) if requested >= 1 => requested,
            _ => return Err(CartError::InvalidAmount(amount)),
        };

        let _guard = self.locks.lock(&product_id).await;

        let current = self.cart().amount_of(product_id);
        debug!(%product_id, current, requested, "validating amount change against stock");

        let stock = self.stock.stock(product_id).await?;

        if current == 0 {
            return Err(CartError::NotInCart(product_id));
        }
        let stock = stock.ok_or(CartError::StockRecordMissing(product_id))?;

        if stock.exhausted_at(requested) {
            return Err(CartError::OutOfStock {
                product_id,
                requested,
                available: stock.available,
            });
        }

        self.commit(product_id, current, |cart| cart.with_amount(product_id, requested))
    }

    /// Apply `change` to the current cart and publish the result.
    ///
    /// `expected` is the amount for `product_id` the caller validated
    /// against; if the cart moved on since then, nothing is written.
    fn commit<F>(&self, product_id: ProductId, expected: u32, change: F) -> Result<Cart, CartError>
    where
        F: FnOnce(&Cart) -> Result<Cart, CommerceError>,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);

        if cart.amount_of(product_id) != expected {
            return Err(CartError::ConcurrentModification(product_id));
        }

        let next = change(&*cart)?;
        self.snapshots.set(&self.key, &next)?;
        *cart = next.clone();

        info!(
            %product_id,
            amount = next.amount_of(product_id),
            items = next.len(),
            "cart committed"
        );
        Ok(next)
    }

    fn report(&self, operation: CartOperation, product_id: ProductId, result: &Result<Cart, CartError>) {
        let Err(error) = result else {
            return;
        };

        match error.alert(operation) {
            Some(alert) => {
                warn!(%operation, %product_id, %error, "cart change rejected");
                self.alerts.notify(&alert);
            }
            None => debug!(%operation, %product_id, %error, "cart change skipped"),
        }
    }
}
