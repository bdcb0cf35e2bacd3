//! TTL-based read-through cache over the order gateway, with
//! snapshot/restore support for optimistic checkout.

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::OrderId;
use tokio::sync::RwLock;

use crate::error::OrdersError;
use crate::gateway::OrderGateway;
use crate::model::OrderSummary;
use crate::proof::PaymentProof;

/// How long a fetched listing stays fresh before the next read goes
/// back to the backend.
pub const DEFAULT_ORDERS_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
struct CachedOrders {
    orders: Vec<OrderSummary>,
    fetched_at: Instant,
}

#[derive(Debug, Default)]
struct OrdersState {
    listing: Option<CachedOrders>,
}

/// A point-in-time copy of the cache contents.
///
/// Taken with [`OrdersCache::snapshot`] before an optimistic operation
/// and put back with [`OrdersCache::restore`] when the operation fails.
/// Restoring carries the original fetch time, so a listing that was
/// already stale stays stale.
#[derive(Debug, Clone)]
pub struct OrdersSnapshot {
    listing: Option<CachedOrders>,
}

/// Read-through cache for the customer's order history.
#[derive(Debug, Clone)]
pub struct OrdersCache<G> {
    gateway: G,
    state: Arc<RwLock<OrdersState>>,
    ttl: Duration,
}

impl<G: OrderGateway> OrdersCache<G> {
    /// Creates a cache with the default TTL.
    pub fn new(gateway: G) -> Self {
        Self::with_ttl(gateway, DEFAULT_ORDERS_TTL)
    }

    /// Creates a cache with a custom TTL.
    pub fn with_ttl(gateway: G, ttl: Duration) -> Self {
        Self {
            gateway,
            state: Arc::new(RwLock::new(OrdersState::default())),
            ttl,
        }
    }

    /// Returns the order listing, fetching it when absent or stale.
    pub async fn orders(&self) -> Result<Vec<OrderSummary>, OrdersError> {
        {
            let state = self.state.read().await;
            if let Some(listing) = &state.listing
                && listing.fetched_at.elapsed() < self.ttl
            {
                return Ok(listing.orders.clone());
            }
        }
        self.refresh().await
    }

    /// Fetches the listing from the backend unconditionally and caches
    /// the result.
    pub async fn refresh(&self) -> Result<Vec<OrderSummary>, OrdersError> {
        tracing::debug!("orders cache miss, fetching");
        let orders = self.gateway.list_orders().await?;
        let mut state = self.state.write().await;
        state.listing = Some(CachedOrders {
            orders: orders.clone(),
            fetched_at: Instant::now(),
        });
        Ok(orders)
    }

    /// Returns one order, serving it from a fresh listing when
    /// possible. Falls through to the backend otherwise; the single
    /// order is not cached on its own.
    pub async fn order(&self, id: OrderId) -> Result<Option<OrderSummary>, OrdersError> {
        {
            let state = self.state.read().await;
            if let Some(listing) = &state.listing
                && listing.fetched_at.elapsed() < self.ttl
            {
                return Ok(listing.orders.iter().find(|o| o.id == id).cloned());
            }
        }
        self.gateway.order(id).await
    }

    /// Copies the current cache contents.
    pub async fn snapshot(&self) -> OrdersSnapshot {
        let state = self.state.read().await;
        OrdersSnapshot {
            listing: state.listing.clone(),
        }
    }

    /// Puts a previously taken snapshot back, discarding whatever the
    /// cache holds now.
    pub async fn restore(&self, snapshot: OrdersSnapshot) {
        let mut state = self.state.write().await;
        state.listing = snapshot.listing;
    }

    /// Drops the cached listing. The next read re-fetches.
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        state.listing = None;
    }

    /// Uploads a payment proof and patches the cached listing with the
    /// updated order.
    ///
    /// The proof is validated before anything is sent; an order that is
    /// already cached as past the payment step is refused without a
    /// backend call.
    #[tracing::instrument(skip(self, proof), fields(order_id = %id))]
    pub async fn upload_payment_proof(
        &self,
        id: OrderId,
        proof: PaymentProof,
    ) -> Result<OrderSummary, OrdersError> {
        proof.validate()?;

        {
            let state = self.state.read().await;
            if let Some(listing) = &state.listing
                && let Some(order) = listing.orders.iter().find(|o| o.id == id)
                && !order.status.awaits_payment_proof()
            {
                return Err(OrdersError::Rejected(
                    "Pesanan tidak menunggu pembayaran".to_string(),
                ));
            }
        }

        let updated = self.gateway.upload_payment_proof(id, proof).await?;

        let mut state = self.state.write().await;
        if let Some(listing) = &mut state.listing
            && let Some(order) = listing.orders.iter_mut().find(|o| o.id == id)
        {
            *order = updated.clone();
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::InMemoryOrderGateway;
    use crate::model::{OrderRequest, OrderRequestItem};
    use crate::status::OrderStatus;
    use common::{Money, ProductId};

    async fn gateway_with_order() -> (InMemoryOrderGateway, OrderId) {
        let gateway = InMemoryOrderGateway::new();
        gateway.seed_product(
            ProductId::new(1),
            "Kopi Robusta",
            Money::from_rupiah(40_000),
            10,
        );
        let confirmation = gateway
            .create_order(OrderRequest::new(vec![OrderRequestItem {
                product_id: ProductId::new(1),
                quantity: 1,
            }]))
            .await
            .unwrap();
        (gateway, confirmation.order_id)
    }

    #[tokio::test]
    async fn test_fresh_listing_skips_backend() {
        let (gateway, _) = gateway_with_order().await;
        let cache = OrdersCache::new(gateway.clone());

        cache.orders().await.unwrap();
        cache.orders().await.unwrap();

        assert_eq!(gateway.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_stale_listing_refetches() {
        let (gateway, _) = gateway_with_order().await;
        let cache = OrdersCache::with_ttl(gateway.clone(), Duration::ZERO);

        cache.orders().await.unwrap();
        cache.orders().await.unwrap();

        assert_eq!(gateway.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_order_is_served_from_fresh_listing() {
        let (gateway, order_id) = gateway_with_order().await;
        let cache = OrdersCache::new(gateway.clone());

        cache.orders().await.unwrap();
        let order = cache.order(order_id).await.unwrap();

        assert_eq!(order.unwrap().id, order_id);
        assert_eq!(gateway.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_then_restore_round_trips() {
        let (gateway, _) = gateway_with_order().await;
        let cache = OrdersCache::new(gateway.clone());
        cache.orders().await.unwrap();

        let snapshot = cache.snapshot().await;
        cache.invalidate().await;
        cache.restore(snapshot).await;

        // Restored listing is still fresh, so no second fetch.
        cache.orders().await.unwrap();
        assert_eq!(gateway.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_restore_of_empty_snapshot_clears() {
        let (gateway, _) = gateway_with_order().await;
        let cache = OrdersCache::new(gateway.clone());

        let empty = cache.snapshot().await;
        cache.orders().await.unwrap();
        cache.restore(empty).await;

        cache.orders().await.unwrap();
        assert_eq!(gateway.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let (gateway, _) = gateway_with_order().await;
        let cache = OrdersCache::new(gateway.clone());

        cache.orders().await.unwrap();
        cache.invalidate().await;
        cache.orders().await.unwrap();

        assert_eq!(gateway.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_proof_upload_patches_cached_listing() {
        let (gateway, order_id) = gateway_with_order().await;
        let cache = OrdersCache::new(gateway.clone());
        cache.orders().await.unwrap();

        let proof = PaymentProof::new("bukti.jpg", "image/jpeg", vec![0xFF; 64]);
        cache.upload_payment_proof(order_id, proof).await.unwrap();

        // Patched in place, no refetch needed.
        let orders = cache.orders().await.unwrap();
        assert_eq!(orders[0].status, OrderStatus::WaitingVerification);
        assert_eq!(gateway.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_invalid_proof_never_reaches_backend() {
        let (gateway, order_id) = gateway_with_order().await;
        let cache = OrdersCache::new(gateway.clone());

        let proof = PaymentProof::new("bukti.pdf", "application/pdf", vec![0x00; 64]);
        let result = cache.upload_payment_proof(order_id, proof).await;

        assert!(matches!(result, Err(OrdersError::InvalidProof(_))));
        let order = gateway.order(order_id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_proof_upload_refused_from_cached_status() {
        let (gateway, order_id) = gateway_with_order().await;
        let cache = OrdersCache::new(gateway.clone());

        gateway.set_status(order_id, OrderStatus::Paid);
        cache.orders().await.unwrap();

        let proof = PaymentProof::new("bukti.jpg", "image/jpeg", vec![0xFF; 64]);
        let result = cache.upload_payment_proof(order_id, proof).await;
        assert!(matches!(result, Err(OrdersError::Rejected(_))));
    }
}
