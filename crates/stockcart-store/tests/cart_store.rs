//! Cart store behaviour against scripted stock and catalog services.

mod support;

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use stockcart_cache::{FileStore, MemoryStore, SnapshotStore};
use stockcart_commerce::prelude::*;
use stockcart_store::{
    Alert, CartError, CartStore, MemoryAlertSink, UpdateProductAmount, DEFAULT_CART_KEY,
};

use support::{sample_product, Harness, ScriptedCatalog, ScriptedStock, StockReply};

fn id(n: u64) -> ProductId {
    ProductId::new(n)
}

fn update(product: u64, amount: i64) -> UpdateProductAmount {
    UpdateProductAmount {
        product_id: id(product),
        amount,
    }
}

// ============================================================================
// add_product
// ============================================================================

#[tokio::test]
async fn add_to_empty_cart_holds_one_unit() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(3));

    let cart = h.store.add_product(id(1)).await.unwrap();

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].product, sample_product(1));
    assert_eq!(cart.items()[0].amount, 1);
    assert_eq!(h.store.cart(), cart);
    assert!(h.alerts.alerts().is_empty());
}

#[tokio::test]
async fn sequential_adds_increment() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(2));

    h.store.add_product(id(1)).await.unwrap();
    let cart = h.store.add_product(id(1)).await.unwrap();

    assert_eq!(cart.len(), 1);
    assert_eq!(cart.amount_of(id(1)), 2);
    assert_eq!(h.catalog.calls(), 1);
}

#[tokio::test]
async fn add_without_stock_record_is_silent() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(5));
    h.store.add_product(id(1)).await.unwrap();
    let before = h.snapshot_bytes();

    let result = h.store.add_product(id(2)).await;

    assert!(matches!(result, Err(CartError::SilentAbsence(p)) if p == id(2)));
    assert_eq!(h.snapshot_bytes(), before);
    assert_eq!(h.store.cart().len(), 1);
    assert!(h.alerts.alerts().is_empty());
    assert_eq!(h.catalog.calls(), 1);
}

#[tokio::test]
async fn add_without_stock_record_on_empty_cart_writes_nothing() {
    let h = Harness::new();

    let result = h.store.add_product(id(7)).await;

    assert!(matches!(result, Err(CartError::SilentAbsence(_))));
    assert_eq!(h.snapshot_bytes(), None);
    assert!(h.alerts.alerts().is_empty());
}

#[tokio::test]
async fn add_at_stock_ceiling_is_out_of_stock() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(1));
    h.store.add_product(id(1)).await.unwrap();
    let before = h.snapshot_bytes();

    let result = h.store.add_product(id(1)).await;

    assert!(matches!(
        result,
        Err(CartError::OutOfStock { requested: 2, available: 1, .. })
    ));
    assert_eq!(h.store.cart().amount_of(id(1)), 1);
    assert_eq!(h.snapshot_bytes(), before);
    assert_eq!(h.alerts.alerts(), vec![Alert::OutOfStock]);
}

#[tokio::test]
async fn add_with_zero_stock_is_out_of_stock() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(0));

    let result = h.store.add_product(id(1)).await;

    assert!(matches!(result, Err(CartError::OutOfStock { .. })));
    assert!(h.store.cart().is_empty());
    assert_eq!(h.catalog.calls(), 0);
}

#[tokio::test]
async fn add_with_stock_service_down_alerts() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Down);

    let result = h.store.add_product(id(1)).await;

    assert!(matches!(result, Err(CartError::Transport(_))));
    assert!(h.store.cart().is_empty());
    assert_eq!(h.alerts.alerts(), vec![Alert::AddFailure]);
}

#[tokio::test]
async fn add_with_catalog_down_alerts() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(4));
    h.catalog.set_down(true);

    let result = h.store.add_product(id(1)).await;

    assert!(matches!(result, Err(CartError::Transport(_))));
    assert!(h.store.cart().is_empty());
    assert_eq!(h.snapshot_bytes(), None);
    assert_eq!(h.alerts.alerts(), vec![Alert::AddFailure]);
}

#[tokio::test]
async fn add_rejects_product_with_other_id() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(5));
    h.catalog.serve_instead(99);

    let result = h.store.add_product(id(1)).await;

    assert!(matches!(result, Err(CartError::Transport(msg)) if msg.contains("99")));
    assert!(h.store.cart().is_empty());
    assert_eq!(h.snapshot_bytes(), None);
    assert_eq!(h.alerts.alerts(), vec![Alert::AddFailure]);
}

#[tokio::test]
async fn repeated_out_of_stock_never_mutates() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(2));
    h.store.add_product(id(1)).await.unwrap();
    h.store.add_product(id(1)).await.unwrap();
    let cart = h.store.cart();
    let bytes = h.snapshot_bytes();

    for _ in 0..5 {
        assert!(h.store.add_product(id(1)).await.is_err());
    }

    assert_eq!(h.store.cart(), cart);
    assert_eq!(h.snapshot_bytes(), bytes);
    assert_eq!(h.alerts.alerts(), vec![Alert::OutOfStock; 5]);
}

// ============================================================================
// remove_product
// ============================================================================

#[tokio::test]
async fn remove_drops_line_item() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(5));
    h.stock.set(2, StockReply::Available(5));
    h.store.add_product(id(1)).await.unwrap();
    h.store.add_product(id(2)).await.unwrap();

    let cart = h.store.remove_product(id(1)).unwrap();

    assert!(!cart.contains(id(1)));
    assert!(cart.contains(id(2)));
    assert_eq!(h.persisted_cart(), cart);
}

#[test]
fn remove_absent_reports_not_found_every_time() {
    let h = Harness::new();

    for _ in 0..2 {
        let result = h.store.remove_product(id(3));
        assert!(matches!(result, Err(CartError::NotFound(p)) if p == id(3)));
    }

    assert!(h.store.cart().is_empty());
    assert_eq!(h.snapshot_bytes(), None);
    assert_eq!(
        h.alerts.alerts(),
        vec![Alert::RemoveFailure, Alert::RemoveFailure]
    );
}

#[tokio::test]
async fn remove_needs_no_stock_check() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(5));
    h.store.add_product(id(1)).await.unwrap();
    h.stock.set(1, StockReply::Down);

    h.store.remove_product(id(1)).unwrap();

    assert_eq!(h.stock.calls(), 1);
    assert!(h.persisted_cart().is_empty());
}

// ============================================================================
// update_product_amount
// ============================================================================

#[tokio::test]
async fn update_sets_amount() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(10));
    h.store.add_product(id(1)).await.unwrap();

    let cart = h.store.update_product_amount(update(1, 4)).await.unwrap();

    assert_eq!(cart.amount_of(id(1)), 4);
    assert_eq!(h.persisted_cart(), cart);
}

#[tokio::test]
async fn update_to_zero_is_invalid() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(10));
    h.store.add_product(id(1)).await.unwrap();
    let bytes = h.snapshot_bytes();

    let result = h.store.update_product_amount(update(1, 0)).await;

    assert!(matches!(result, Err(CartError::InvalidAmount(0))));
    assert_eq!(h.store.cart().amount_of(id(1)), 1);
    assert_eq!(h.snapshot_bytes(), bytes);
    assert_eq!(h.alerts.alerts(), vec![Alert::AmountChangeFailure]);
    assert_eq!(h.stock.calls(), 1);
}

#[tokio::test]
async fn update_negative_is_invalid() {
    let h = Harness::new();

    let result = h.store.update_product_amount(update(1, -3)).await;

    assert!(matches!(result, Err(CartError::InvalidAmount(-3))));
    assert_eq!(h.stock.calls(), 0);
}

#[tokio::test]
async fn update_absent_item_is_silent() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(10));

    let result = h.store.update_product_amount(update(1, 2)).await;

    assert!(matches!(result, Err(CartError::NotInCart(_))));
    assert!(h.store.cart().is_empty());
    assert!(h.alerts.alerts().is_empty());
    assert_eq!(h.stock.calls(), 1);
}

#[tokio::test]
async fn update_at_stock_ceiling_is_out_of_stock() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(3));
    h.store.add_product(id(1)).await.unwrap();

    let result = h.store.update_product_amount(update(1, 3)).await;

    assert!(matches!(
        result,
        Err(CartError::OutOfStock { requested: 3, available: 3, .. })
    ));
    assert_eq!(h.store.cart().amount_of(id(1)), 1);
    assert_eq!(h.alerts.alerts(), vec![Alert::OutOfStock]);
}

#[tokio::test]
async fn update_without_stock_record_alerts() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(3));
    h.store.add_product(id(1)).await.unwrap();
    h.stock.set(1, StockReply::Missing);

    let result = h.store.update_product_amount(update(1, 2)).await;

    assert!(matches!(result, Err(CartError::StockRecordMissing(_))));
    assert_eq!(h.alerts.alerts(), vec![Alert::AmountChangeFailure]);
}

#[tokio::test]
async fn update_with_stock_service_down_alerts() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(3));
    h.store.add_product(id(1)).await.unwrap();
    h.stock.set(1, StockReply::Down);

    let result = h.store.update_product_amount(update(1, 2)).await;

    assert!(matches!(result, Err(CartError::Transport(_))));
    assert_eq!(h.store.cart().amount_of(id(1)), 1);
    assert_eq!(h.alerts.alerts(), vec![Alert::AmountChangeFailure]);
}

// ============================================================================
// Persistence
// ============================================================================

#[tokio::test]
async fn snapshot_matches_memory_after_every_commit() {
    let h = Harness::new();
    for n in 1..=3 {
        h.stock.set(n, StockReply::Available(10));
    }

    h.store.add_product(id(2)).await.unwrap();
    assert_eq!(h.persisted_cart(), h.store.cart());
    h.store.add_product(id(1)).await.unwrap();
    assert_eq!(h.persisted_cart(), h.store.cart());
    h.store.add_product(id(3)).await.unwrap();
    assert_eq!(h.persisted_cart(), h.store.cart());
    h.store.update_product_amount(update(1, 6)).await.unwrap();
    assert_eq!(h.persisted_cart(), h.store.cart());
    h.store.remove_product(id(2)).unwrap();
    assert_eq!(h.persisted_cart(), h.store.cart());

    let ids: Vec<u64> = h.store.cart().iter().map(|i| i.id().get()).collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn reopening_restores_cart() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(10));
    h.stock.set(2, StockReply::Available(10));
    h.store.add_product(id(1)).await.unwrap();
    h.store.add_product(id(2)).await.unwrap();
    h.store.update_product_amount(update(2, 3)).await.unwrap();

    let reopened = Harness::with_snapshots(h.snapshots.clone());

    assert_eq!(reopened.store.cart(), h.store.cart());
}

#[test]
fn corrupt_snapshot_starts_empty() {
    let snapshots = Arc::new(MemoryStore::with_entry(DEFAULT_CART_KEY, b"{oops".to_vec()));
    let h = Harness::with_snapshots(snapshots);

    assert!(h.store.cart().is_empty());
    assert_eq!(h.snapshot_bytes(), Some(b"{oops".to_vec()));
}

#[tokio::test]
async fn failed_write_leaves_memory_untouched() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(10));
    h.store.add_product(id(1)).await.unwrap();
    let bytes = h.snapshot_bytes();

    h.snapshots.fail_writes(true);
    let add = h.store.add_product(id(1)).await;
    let remove = h.store.remove_product(id(1));
    let change = h.store.update_product_amount(update(1, 5)).await;

    assert!(matches!(add, Err(CartError::Persistence(_))));
    assert!(matches!(remove, Err(CartError::Persistence(_))));
    assert!(matches!(change, Err(CartError::Persistence(_))));
    assert_eq!(h.store.cart().amount_of(id(1)), 1);
    assert_eq!(h.snapshot_bytes(), bytes);
    assert_eq!(
        h.alerts.alerts(),
        vec![
            Alert::AddFailure,
            Alert::RemoveFailure,
            Alert::AmountChangeFailure
        ]
    );

    h.snapshots.fail_writes(false);
    let cart = h.store.add_product(id(1)).await.unwrap();
    assert_eq!(cart.amount_of(id(1)), 2);
    assert_eq!(h.persisted_cart(), cart);
}

#[tokio::test]
async fn file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let stock = Arc::new(ScriptedStock::default());
    stock.set(1, StockReply::Available(5));
    stock.set(2, StockReply::Available(5));

    let open = || {
        CartStore::open(
            FileStore::open(dir.path()).unwrap(),
            stock.clone(),
            ScriptedCatalog::default(),
            MemoryAlertSink::new(),
        )
    };

    let first = open();
    first.add_product(id(1)).await.unwrap();
    first.add_product(id(2)).await.unwrap();
    first.add_product(id(2)).await.unwrap();

    let second = open();
    assert_eq!(second.cart(), first.cart());

    let bytes = FileStore::open(dir.path())
        .unwrap()
        .read(DEFAULT_CART_KEY)
        .unwrap()
        .unwrap();
    let persisted: Cart = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(persisted, first.cart());
}

// ============================================================================
// Overlapping calls
// ============================================================================

#[tokio::test]
async fn overlapping_adds_never_exceed_stock() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(2));
    h.stock.delay(Duration::from_millis(20));

    let results = join_all((0..3).map(|_| h.store.add_product(id(1)))).await;

    let committed = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(committed, 2);
    assert_eq!(h.store.cart().amount_of(id(1)), 2);
    assert_eq!(h.persisted_cart(), h.store.cart());
    assert_eq!(h.alerts.alerts(), vec![Alert::OutOfStock]);
    assert_eq!(h.catalog.calls(), 1);
}

#[tokio::test]
async fn overlapping_adds_for_different_products_both_land() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(5));
    h.stock.set(2, StockReply::Available(5));
    h.stock.delay(Duration::from_millis(20));

    let (a, b) = tokio::join!(h.store.add_product(id(1)), h.store.add_product(id(2)));
    a.unwrap();
    b.unwrap();

    let cart = h.store.cart();
    assert!(cart.contains(id(1)));
    assert!(cart.contains(id(2)));
    assert_eq!(h.persisted_cart(), cart);
}

#[tokio::test]
async fn remove_during_update_wins() {
    let h = Harness::new();
    h.stock.set(1, StockReply::Available(5));
    h.store.add_product(id(1)).await.unwrap();
    h.stock.delay(Duration::from_millis(50));

    let remove_soon = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        h.store.remove_product(id(1))
    };
    let (changed, removed) = tokio::join!(h.store.update_product_amount(update(1, 3)), remove_soon);

    removed.unwrap();
    assert!(matches!(changed, Err(CartError::ConcurrentModification(_))));
    assert!(h.store.cart().is_empty());
    assert!(h.persisted_cart().is_empty());
    assert_eq!(h.alerts.alerts(), vec![Alert::AmountChangeFailure]);
}
