//! Order gateway trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use common::{Money, OrderId, ProductId};

use crate::error::OrdersError;
use crate::model::{OrderConfirmation, OrderLine, OrderRequest, OrderSummary};
use crate::proof::PaymentProof;
use crate::status::OrderStatus;

/// Trait for the backend order endpoints.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Submits an order. The backend prices the lines from its own
    /// catalog and decrements stock.
    async fn create_order(&self, request: OrderRequest) -> Result<OrderConfirmation, OrdersError>;

    /// Fetches the customer's orders, newest first.
    async fn list_orders(&self) -> Result<Vec<OrderSummary>, OrdersError>;

    /// Fetches one order. `None` when the backend has no such order.
    async fn order(&self, id: OrderId) -> Result<Option<OrderSummary>, OrdersError>;

    /// Uploads a payment proof for a pending order and returns the
    /// updated order.
    async fn upload_payment_proof(
        &self,
        id: OrderId,
        proof: PaymentProof,
    ) -> Result<OrderSummary, OrdersError>;
}

#[derive(Debug, Clone)]
struct ListedProduct {
    name: String,
    price: Money,
    stock: u32,
}

#[derive(Debug, Default)]
struct InMemoryOrderState {
    products: HashMap<ProductId, ListedProduct>,
    orders: Vec<OrderSummary>,
    next_order_id: i64,
    fail_on_create: bool,
    create_delay: Option<Duration>,
    create_calls: u64,
    list_calls: u64,
}

/// In-memory order backend for tests and local sessions.
///
/// Behaves like the real thing where it matters for the checkout path:
/// it prices lines from its own listing, enforces stock, assigns
/// sequential order ids, and runs the pending/verification status flow.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderGateway {
    state: Arc<RwLock<InMemoryOrderState>>,
}

impl InMemoryOrderGateway {
    /// Creates a backend with an empty listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a product in the backend listing.
    pub fn seed_product(&self, id: ProductId, name: impl Into<String>, price: Money, stock: u32) {
        self.state.write().unwrap().products.insert(
            id,
            ListedProduct {
                name: name.into(),
                price,
                stock,
            },
        );
    }

    /// Overrides the backend stock for a product.
    pub fn set_stock(&self, id: ProductId, stock: u32) {
        if let Some(product) = self.state.write().unwrap().products.get_mut(&id) {
            product.stock = stock;
        }
    }

    /// Returns the backend's remaining stock for a product.
    pub fn stock_of(&self, id: ProductId) -> Option<u32> {
        self.state
            .read()
            .unwrap()
            .products
            .get(&id)
            .map(|p| p.stock)
    }

    /// Moves an order to the given status, the way an admin would.
    pub fn set_status(&self, id: OrderId, status: OrderStatus) {
        if let Some(order) = self
            .state
            .write()
            .unwrap()
            .orders
            .iter_mut()
            .find(|o| o.id == id)
        {
            order.status = status;
            order.updated_at = Utc::now();
        }
    }

    /// Configures the backend to refuse order creation.
    pub fn set_fail_on_create(&self, fail: bool) {
        self.state.write().unwrap().fail_on_create = fail;
    }

    /// Delays order creation, for timeout behavior.
    pub fn set_create_delay(&self, delay: Option<Duration>) {
        self.state.write().unwrap().create_delay = delay;
    }

    /// Returns how many creation attempts reached the backend.
    pub fn create_calls(&self) -> u64 {
        self.state.read().unwrap().create_calls
    }

    /// Returns how many listing fetches reached the backend.
    pub fn list_calls(&self) -> u64 {
        self.state.read().unwrap().list_calls
    }
}

#[async_trait]
impl OrderGateway for InMemoryOrderGateway {
    async fn create_order(&self, request: OrderRequest) -> Result<OrderConfirmation, OrdersError> {
        let delay = {
            let mut state = self.state.write().unwrap();
            state.create_calls += 1;
            state.create_delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state.write().unwrap();
        if state.fail_on_create {
            return Err(OrdersError::Unavailable(
                "connection reset by peer".to_string(),
            ));
        }
        if request.items.is_empty() {
            return Err(OrdersError::Rejected(
                "Keranjang belanja kosong".to_string(),
            ));
        }

        // Validate every line before touching any stock.
        for item in &request.items {
            let Some(product) = state.products.get(&item.product_id) else {
                return Err(OrdersError::Rejected(format!(
                    "Produk {} tidak ditemukan",
                    item.product_id
                )));
            };
            if product.stock < item.quantity {
                return Err(OrdersError::InsufficientStock {
                    product_id: item.product_id,
                    available: product.stock,
                });
            }
        }

        let now = Utc::now();
        state.next_order_id += 1;
        let order_id = OrderId::new(state.next_order_id);

        let mut lines = Vec::with_capacity(request.items.len());
        let mut total = Money::zero();
        for item in &request.items {
            let product = state
                .products
                .get_mut(&item.product_id)
                .ok_or_else(|| OrdersError::Rejected("Produk tidak ditemukan".to_string()))?;
            product.stock -= item.quantity;
            let line_total = product.price.multiply(item.quantity);
            total += line_total;
            lines.push(OrderLine {
                product_id: item.product_id,
                name: product.name.clone(),
                quantity: item.quantity,
                unit_price: product.price,
                line_total,
            });
        }

        state.orders.push(OrderSummary {
            id: order_id,
            status: OrderStatus::Pending,
            total,
            lines,
            payment_proof: None,
            created_at: now,
            updated_at: now,
        });

        Ok(OrderConfirmation {
            order_id,
            status: OrderStatus::Pending,
            total,
            created_at: now,
        })
    }

    async fn list_orders(&self) -> Result<Vec<OrderSummary>, OrdersError> {
        let mut state = self.state.write().unwrap();
        state.list_calls += 1;
        Ok(state.orders.iter().rev().cloned().collect())
    }

    async fn order(&self, id: OrderId) -> Result<Option<OrderSummary>, OrdersError> {
        let state = self.state.read().unwrap();
        Ok(state.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn upload_payment_proof(
        &self,
        id: OrderId,
        proof: PaymentProof,
    ) -> Result<OrderSummary, OrdersError> {
        proof.validate()?;

        let mut state = self.state.write().unwrap();
        let Some(order) = state.orders.iter_mut().find(|o| o.id == id) else {
            return Err(OrdersError::UnknownOrder(id));
        };
        if !order.status.awaits_payment_proof() {
            return Err(OrdersError::Rejected(
                "Pesanan tidak menunggu pembayaran".to_string(),
            ));
        }

        order.payment_proof = Some(proof.file_name.clone());
        order.status = OrderStatus::WaitingVerification;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }
}
