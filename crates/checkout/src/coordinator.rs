//! Checkout coordinator for submitting the cart as an order.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use cart::{CartService, CartStorage};
use catalog::{CatalogGateway, ProductsCache};
use chrono::{DateTime, Utc};
use common::{CheckoutId, Money, OrderId};
use orders::{OrderGateway, OrderRequest, OrderRequestItem, OrderStatus, OrdersCache, OrdersError};
use serde::{Deserialize, Serialize};

use crate::error::CheckoutError;
use crate::phase::CheckoutPhase;

/// How long a submission may stay in flight before it is treated as
/// failed.
pub const DEFAULT_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(30);

/// What a successful submission hands back.
///
/// `total` is the backend's own pricing of the order, not the cart's
/// subtotal; the request carries no prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    /// Client-side id of this submission attempt, for log correlation.
    pub attempt: CheckoutId,
    /// The order the backend created.
    pub order_id: OrderId,
    /// Status the order starts in, normally [`OrderStatus::Pending`].
    pub status: OrderStatus,
    /// Backend-priced order total.
    pub total: Money,
    /// When the backend recorded the order.
    pub created_at: DateTime<Utc>,
}

/// Orchestrates a cart submission end to end.
///
/// The coordinator freezes the cart, sends product ids and quantities
/// to the order backend, and reconciles caches and cart with the
/// outcome: invalidate-and-clear on success, rollback on failure. One
/// submission runs at a time; a second call while one is in flight is
/// rejected without touching anything.
pub struct CheckoutCoordinator<S, G, C>
where
    S: CartStorage,
    G: OrderGateway,
    C: CatalogGateway,
{
    cart: CartService<S>,
    gateway: G,
    orders: OrdersCache<G>,
    products: ProductsCache<C>,
    phase: Arc<Mutex<CheckoutPhase>>,
    timeout: Duration,
}

impl<S, G, C> CheckoutCoordinator<S, G, C>
where
    S: CartStorage,
    G: OrderGateway,
    C: CatalogGateway,
{
    /// Creates a coordinator with the default submission timeout.
    ///
    /// The caches are shared handles; the caller keeps serving reads
    /// from its own clones while the coordinator invalidates or
    /// restores them.
    pub fn new(
        cart: CartService<S>,
        gateway: G,
        orders: OrdersCache<G>,
        products: ProductsCache<C>,
    ) -> Self {
        Self::with_timeout(cart, gateway, orders, products, DEFAULT_CHECKOUT_TIMEOUT)
    }

    /// Creates a coordinator with a custom submission timeout.
    pub fn with_timeout(
        cart: CartService<S>,
        gateway: G,
        orders: OrdersCache<G>,
        products: ProductsCache<C>,
        timeout: Duration,
    ) -> Self {
        Self {
            cart,
            gateway,
            orders,
            products,
            phase: Arc::new(Mutex::new(CheckoutPhase::default())),
            timeout,
        }
    }

    /// Returns the current submission phase.
    pub fn phase(&self) -> CheckoutPhase {
        *self.phase.lock().unwrap()
    }

    /// Submits the cart as an order.
    ///
    /// On success the order and product caches are invalidated, the
    /// cart is cleared, and the backend's receipt comes back. On any
    /// failure, including timeout, the order cache is restored from its
    /// pre-submission snapshot and the cart is left exactly as it was.
    #[tracing::instrument(skip(self))]
    pub async fn submit(&self) -> Result<CheckoutReceipt, CheckoutError> {
        // 1. Fast-fail on an empty cart, before any phase or network work.
        if self.cart.is_empty().await {
            tracing::debug!("checkout rejected, cart is empty");
            return Err(CheckoutError::EmptyCart);
        }

        // 2. Claim the submission slot.
        {
            let mut phase = self.phase.lock().unwrap();
            if !phase.can_submit() {
                metrics::counter!("checkout_rejected_in_flight").increment(1);
                return Err(CheckoutError::AlreadyInFlight);
            }
            *phase = CheckoutPhase::Submitting;
        }

        metrics::counter!("checkout_attempts_total").increment(1);
        let attempt = CheckoutId::new();
        let started = std::time::Instant::now();

        // 3. Freeze the cart so the request matches what ships.
        let Some(hold) = self.cart.begin_checkout() else {
            self.set_phase(CheckoutPhase::Idle);
            return Err(CheckoutError::AlreadyInFlight);
        };

        let request = self.build_request().await;
        let rollback = self.orders.snapshot().await;

        tracing::info!(
            %attempt,
            lines = request.items.len(),
            quantity = request.total_quantity(),
            "submitting order"
        );

        // 4. Send, bounded by the submission timeout.
        let outcome =
            match tokio::time::timeout(self.timeout, self.gateway.create_order(request)).await {
                Ok(result) => result,
                Err(_) => Err(OrdersError::Timeout),
            };

        match outcome {
            Ok(confirmation) => {
                self.set_phase(CheckoutPhase::Succeeded);

                // 5. Drop the stale caches and empty the cart.
                self.orders.invalidate().await;
                self.products.invalidate().await;
                if let Err(error) = self.cart.clear_for_reconciliation().await {
                    // The order exists on the backend; hand back the
                    // receipt anyway and let the next persisted
                    // mutation overwrite the stale slot.
                    metrics::counter!("checkout_cart_clear_failures").increment(1);
                    tracing::error!(
                        %attempt,
                        %error,
                        order_id = %confirmation.order_id,
                        "order placed but cart clear failed"
                    );
                }
                drop(hold);
                self.set_phase(CheckoutPhase::Idle);

                let duration = started.elapsed().as_secs_f64();
                metrics::histogram!("checkout_duration_seconds").record(duration);
                metrics::counter!("checkout_succeeded").increment(1);
                tracing::info!(
                    %attempt,
                    order_id = %confirmation.order_id,
                    total = %confirmation.total,
                    "checkout succeeded"
                );

                Ok(CheckoutReceipt {
                    attempt,
                    order_id: confirmation.order_id,
                    status: confirmation.status,
                    total: confirmation.total,
                    created_at: confirmation.created_at,
                })
            }
            Err(error) => {
                self.set_phase(CheckoutPhase::Failed);

                // 6. Roll the order cache back and reopen the cart,
                // contents untouched.
                self.orders.restore(rollback).await;
                drop(hold);
                self.set_phase(CheckoutPhase::Idle);

                let duration = started.elapsed().as_secs_f64();
                metrics::histogram!("checkout_duration_seconds").record(duration);
                metrics::counter!("checkout_failed").increment(1);
                tracing::warn!(%attempt, %error, "checkout failed");

                Err(CheckoutError::Submission(error))
            }
        }
    }

    /// Builds the order request from the frozen cart: ids and
    /// quantities only, the backend does its own pricing.
    async fn build_request(&self) -> OrderRequest {
        let items = self
            .cart
            .items()
            .await
            .iter()
            .map(|line| OrderRequestItem {
                product_id: line.product_id,
                quantity: line.quantity,
            })
            .collect();
        OrderRequest::new(items)
    }

    fn set_phase(&self, next: CheckoutPhase) {
        *self.phase.lock().unwrap() = next;
    }
}
