//! Scripted stock and catalog services for cart store tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use stockcart_cache::{MemoryStore, SnapshotStore};
use stockcart_commerce::prelude::*;
use stockcart_store::{CartStore, MemoryAlertSink, DEFAULT_CART_KEY};

/// What the scripted stock service answers for a product.
#[derive(Debug, Clone, Copy)]
pub enum StockReply {
    Available(u32),
    Missing,
    Down,
}

/// Stock service answering from a table, optionally after a delay.
#[derive(Default)]
pub struct ScriptedStock {
    replies: Mutex<HashMap<ProductId, StockReply>>,
    delay: Mutex<Option<Duration>>,
    calls: AtomicUsize,
}

impl ScriptedStock {
    pub fn set(&self, id: u64, reply: StockReply) {
        self.replies.lock().unwrap().insert(ProductId::new(id), reply);
    }

    pub fn delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StockValidator for ScriptedStock {
    async fn stock(&self, id: ProductId) -> Result<Option<StockInfo>, CommerceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get(&id)
            .copied()
            .unwrap_or(StockReply::Missing);
        match reply {
            StockReply::Available(n) => Ok(Some(StockInfo::new(id, n))),
            StockReply::Missing => Ok(None),
            StockReply::Down => Err(CommerceError::Transport("stock service unreachable".into())),
        }
    }
}

/// Catalog serving generated products, unless switched off.
#[derive(Default)]
pub struct ScriptedCatalog {
    down: Mutex<bool>,
    serve_instead: Mutex<Option<u64>>,
    calls: AtomicUsize,
}

impl ScriptedCatalog {
    /// Answer every lookup with product `id`, whatever was asked for.
    pub fn serve_instead(&self, id: u64) {
        *self.serve_instead.lock().unwrap() = Some(id);
    }

    pub fn set_down(&self, down: bool) {
        *self.down.lock().unwrap() = down;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductCatalog for ScriptedCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, CommerceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.down.lock().unwrap() {
            return Err(CommerceError::Transport("catalog unreachable".into()));
        }
        let served = self.serve_instead.lock().unwrap().unwrap_or(id.get());
        Ok(sample_product(served))
    }
}

pub fn sample_product(id: u64) -> Product {
    Product::new(
        ProductId::new(id),
        format!("Sneaker {id}"),
        100.0 + id as f64 + 0.9,
        format!("https://cdn.example.com/sneakers/{id}.jpg"),
    )
}

/// A cart store wired to scripted services, with handles kept for
/// assertions.
pub struct Harness {
    pub store: CartStore,
    pub snapshots: Arc<MemoryStore>,
    pub alerts: Arc<MemoryAlertSink>,
    pub stock: Arc<ScriptedStock>,
    pub catalog: Arc<ScriptedCatalog>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_snapshots(Arc::new(MemoryStore::new()))
    }

    pub fn with_snapshots(snapshots: Arc<MemoryStore>) -> Self {
        let alerts = Arc::new(MemoryAlertSink::new());
        let stock = Arc::new(ScriptedStock::default());
        let catalog = Arc::new(ScriptedCatalog::default());
        let store = CartStore::open(
            snapshots.clone(),
            stock.clone(),
            catalog.clone(),
            alerts.clone(),
        );
        Self {
            store,
            snapshots,
            alerts,
            stock,
            catalog,
        }
    }

    /// Raw bytes of the persisted snapshot.
    pub fn snapshot_bytes(&self) -> Option<Vec<u8>> {
        self.snapshots.read(DEFAULT_CART_KEY).unwrap()
    }

    /// The persisted snapshot decoded as a cart.
    pub fn persisted_cart(&self) -> Cart {
        let bytes = self.snapshot_bytes().expect("snapshot written");
        serde_json::from_slice(&bytes).unwrap()
    }
}
