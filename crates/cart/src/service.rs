//! Cart service: clamped mutations in front of the durable slot.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use catalog::Product;
use common::{Money, ProductId};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::item::LineItem;
use crate::snapshot::CartSnapshot;
use crate::storage::CartStorage;

/// The cart store.
///
/// Mutations apply in memory first and persist the whole snapshot as
/// the final step, so the slot always holds a fully-applied cart.
/// Out-of-bounds requests clamp or do nothing and never error; the
/// only failures that surface are storage failures.
///
/// Clones share the same cart.
#[derive(Clone)]
pub struct CartService<S: CartStorage> {
    storage: S,
    state: Arc<RwLock<CartSnapshot>>,
    checkout_hold: Arc<AtomicBool>,
}

impl<S: CartStorage> CartService<S> {
    /// Creates an empty cart over the given slot without reading it.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: Arc::new(RwLock::new(CartSnapshot::new())),
            checkout_hold: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Creates a cart hydrated from the slot.
    ///
    /// An empty slot yields an empty cart. A slot that fails to load or
    /// parse is logged and treated as empty rather than failing the
    /// session; the next persisted mutation overwrites it.
    pub async fn hydrate(storage: S) -> Self {
        let snapshot = match storage.load().await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => CartSnapshot::new(),
            Err(e) => {
                tracing::warn!(error = %e, "cart slot unreadable, starting empty");
                CartSnapshot::new()
            }
        };

        Self {
            storage,
            state: Arc::new(RwLock::new(snapshot)),
            checkout_hold: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Adds one unit of the product, snapshotting its price and stock
    /// on first add. At the stock limit this is a silent no-op.
    #[tracing::instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_item(&self, product: &Product) -> Result<()> {
        if self.checkout_held() {
            tracing::debug!("cart frozen during checkout, add ignored");
            return Ok(());
        }
        let changed = self.state.write().await.add(product);
        self.persist_if(changed).await
    }

    /// Removes the line for the product. Idempotent.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(&self, product_id: ProductId) -> Result<()> {
        if self.checkout_held() {
            tracing::debug!("cart frozen during checkout, remove ignored");
            return Ok(());
        }
        let changed = self.state.write().await.remove(product_id);
        self.persist_if(changed).await
    }

    /// Sets a line's quantity, clamped to its stock limit. Zero removes
    /// the line; unknown ids are ignored.
    #[tracing::instrument(skip(self))]
    pub async fn set_quantity(&self, product_id: ProductId, quantity: u32) -> Result<()> {
        if self.checkout_held() {
            tracing::debug!("cart frozen during checkout, set_quantity ignored");
            return Ok(());
        }
        let changed = self.state.write().await.set_quantity(product_id, quantity);
        self.persist_if(changed).await
    }

    /// Adds one unit to a line, clamped to its stock limit.
    #[tracing::instrument(skip(self))]
    pub async fn increment(&self, product_id: ProductId) -> Result<()> {
        if self.checkout_held() {
            tracing::debug!("cart frozen during checkout, increment ignored");
            return Ok(());
        }
        let changed = self.state.write().await.increment(product_id);
        self.persist_if(changed).await
    }

    /// Removes one unit from a line; at quantity 1 the line goes away.
    #[tracing::instrument(skip(self))]
    pub async fn decrement(&self, product_id: ProductId) -> Result<()> {
        if self.checkout_held() {
            tracing::debug!("cart frozen during checkout, decrement ignored");
            return Ok(());
        }
        let changed = self.state.write().await.decrement(product_id);
        self.persist_if(changed).await
    }

    /// Empties the cart and the slot.
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> Result<()> {
        if self.checkout_held() {
            tracing::debug!("cart frozen during checkout, clear ignored");
            return Ok(());
        }
        let changed = self.state.write().await.clear();
        if changed {
            metrics::counter!("cart_mutations_total").increment(1);
            self.storage.clear().await?;
        }
        Ok(())
    }

    /// Total units across all lines.
    pub async fn total_items(&self) -> u64 {
        self.state.read().await.total_items()
    }

    /// Sum of line totals.
    pub async fn subtotal(&self) -> Money {
        self.state.read().await.subtotal()
    }

    /// Returns all lines in insertion order.
    pub async fn items(&self) -> Vec<LineItem> {
        self.state.read().await.items().to_vec()
    }

    /// Returns the line for a product, if present.
    pub async fn line(&self, product_id: ProductId) -> Option<LineItem> {
        self.state.read().await.line(product_id).cloned()
    }

    /// Returns true if the cart holds no lines.
    pub async fn is_empty(&self) -> bool {
        self.state.read().await.is_empty()
    }

    /// Returns a copy of the current cart state.
    pub async fn snapshot(&self) -> CartSnapshot {
        self.state.read().await.clone()
    }

    /// Takes the cart's checkout hold.
    ///
    /// While the returned guard lives, every mutation is a silent
    /// no-op, so the submitted request keeps describing what is
    /// actually in the cart. Returns `None` if a hold is already out.
    pub fn begin_checkout(&self) -> Option<CheckoutHold> {
        self.checkout_hold
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| CheckoutHold {
                flag: Arc::clone(&self.checkout_hold),
            })
    }

    /// Returns true if a checkout hold is currently out.
    pub fn checkout_held(&self) -> bool {
        self.checkout_hold.load(Ordering::Acquire)
    }

    /// Empties the cart regardless of an outstanding checkout hold.
    ///
    /// This is the post-submission reconciliation path: the order now
    /// exists on the server, so the cart must not keep its inputs.
    #[tracing::instrument(skip(self))]
    pub async fn clear_for_reconciliation(&self) -> Result<()> {
        let changed = self.state.write().await.clear();
        if changed {
            metrics::counter!("cart_mutations_total").increment(1);
            self.storage.clear().await?;
        }
        Ok(())
    }

    async fn persist_if(&self, changed: bool) -> Result<()> {
        if !changed {
            return Ok(());
        }
        metrics::counter!("cart_mutations_total").increment(1);
        let start = std::time::Instant::now();
        let snapshot = self.state.read().await.clone();
        self.storage.save(&snapshot).await?;
        metrics::histogram!("cart_persist_seconds").record(start.elapsed().as_secs_f64());
        Ok(())
    }
}

/// RAII guard freezing cart mutations while a checkout is in flight.
///
/// Dropping it reopens the cart.
pub struct CheckoutHold {
    flag: Arc<AtomicBool>,
}

impl Drop for CheckoutHold {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCartStorage;

    fn product(id: i64, price: i64, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Money::from_rupiah(price),
            stock,
            image: None,
            category: None,
        }
    }

    fn setup() -> (CartService<InMemoryCartStorage>, InMemoryCartStorage) {
        let storage = InMemoryCartStorage::new();
        let service = CartService::new(storage.clone());
        (service, storage)
    }

    #[tokio::test]
    async fn test_mutation_persists_to_slot() {
        let (service, storage) = setup();

        service.add_item(&product(1, 1_000, 5)).await.unwrap();
        assert_eq!(storage.save_count().await, 1);

        let persisted = storage.load().await.unwrap().unwrap();
        assert_eq!(persisted, service.snapshot().await);
    }

    #[tokio::test]
    async fn test_noop_mutations_do_not_persist() {
        let (service, storage) = setup();
        let p = product(1, 1_000, 1);

        service.add_item(&p).await.unwrap();
        assert_eq!(storage.save_count().await, 1);

        // At the stock limit, unknown remove, same-value set: no writes.
        service.add_item(&p).await.unwrap();
        service.remove_item(ProductId::new(9)).await.unwrap();
        service.set_quantity(p.id, 1).await.unwrap();
        assert_eq!(storage.save_count().await, 1);
    }

    #[tokio::test]
    async fn test_hydrate_restores_persisted_cart() {
        let (service, storage) = setup();
        service.add_item(&product(1, 1_000, 5)).await.unwrap();
        service.add_item(&product(2, 2_000, 5)).await.unwrap();

        let revived = CartService::hydrate(storage).await;
        assert_eq!(revived.total_items().await, 2);
        assert_eq!(revived.subtotal().await, Money::from_rupiah(3_000));
    }

    #[tokio::test]
    async fn test_hydrate_with_corrupt_slot_starts_empty() {
        let storage = InMemoryCartStorage::new();
        storage.set_raw_payload("]]garbage[[").await;

        let service = CartService::hydrate(storage).await;
        assert!(service.is_empty().await);
    }

    #[tokio::test]
    async fn test_clear_empties_cart_and_slot() {
        let (service, storage) = setup();
        service.add_item(&product(1, 1_000, 5)).await.unwrap();

        service.clear().await.unwrap();
        assert!(service.is_empty().await);
        assert!(storage.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_checkout_hold_freezes_mutations() {
        let (service, storage) = setup();
        service.add_item(&product(1, 1_000, 5)).await.unwrap();
        let saves_before = storage.save_count().await;

        let hold = service.begin_checkout().unwrap();
        service.add_item(&product(2, 2_000, 5)).await.unwrap();
        service.remove_item(ProductId::new(1)).await.unwrap();
        service.clear().await.unwrap();

        assert_eq!(service.total_items().await, 1);
        assert_eq!(storage.save_count().await, saves_before);

        drop(hold);
        service.add_item(&product(2, 2_000, 5)).await.unwrap();
        assert_eq!(service.total_items().await, 2);
    }

    #[tokio::test]
    async fn test_begin_checkout_is_exclusive() {
        let (service, _) = setup();

        let hold = service.begin_checkout().unwrap();
        assert!(service.begin_checkout().is_none());

        drop(hold);
        assert!(service.begin_checkout().is_some());
    }

    #[tokio::test]
    async fn test_clear_for_reconciliation_ignores_hold() {
        let (service, storage) = setup();
        service.add_item(&product(1, 1_000, 5)).await.unwrap();

        let _hold = service.begin_checkout().unwrap();
        service.clear_for_reconciliation().await.unwrap();

        assert!(service.is_empty().await);
        assert!(storage.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let (service, storage) = setup();
        storage.set_fail_on_save(true).await;

        let result = service.add_item(&product(1, 1_000, 5)).await;
        assert!(result.is_err());
    }
}
