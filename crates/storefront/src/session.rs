//! The storefront session: one object tying cart, catalog, orders and
//! checkout together.

use cart::{CartService, CartStorage, LineItem};
use catalog::{CatalogGateway, Product, ProductsCache};
use checkout::{CheckoutCoordinator, CheckoutPhase, CheckoutReceipt};
use common::{Money, OrderId, ProductId};
use orders::{OrderGateway, OrderSummary, OrdersCache, PaymentProof};

use crate::config::Config;
use crate::error::{Result, SessionError};

/// Derived cart aggregates, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    pub items: u64,
    pub subtotal: Money,
}

/// A shopper's session over injected collaborators.
///
/// Construct one per logical session with [`Session::start`]; every
/// operation the UI drives goes through it. Cart mutations are silent
/// no-ops while a checkout is in flight.
pub struct Session<S, G, C>
where
    S: CartStorage,
    G: OrderGateway,
    C: CatalogGateway,
{
    cart: CartService<S>,
    products: ProductsCache<C>,
    orders: OrdersCache<G>,
    coordinator: CheckoutCoordinator<S, G, C>,
}

impl<S, G, C> Session<S, G, C>
where
    S: CartStorage,
    G: OrderGateway,
    C: CatalogGateway,
{
    /// Builds a session: hydrates the cart from the storage slot and
    /// wires caches and coordinator with the configured TTLs and
    /// timeout.
    pub async fn start(config: &Config, catalog: C, gateway: G, storage: S) -> Self
    where
        S: Clone,
        G: Clone,
        C: Clone,
    {
        let cart = CartService::hydrate(storage).await;
        let products = ProductsCache::with_ttl(catalog, config.products_ttl);
        let orders = OrdersCache::with_ttl(gateway.clone(), config.orders_ttl);
        let coordinator = CheckoutCoordinator::with_timeout(
            cart.clone(),
            gateway,
            orders.clone(),
            products.clone(),
            config.checkout_timeout,
        );

        Self {
            cart,
            products,
            orders,
            coordinator,
        }
    }

    /// Returns the product listing through the cache.
    pub async fn browse(&self) -> Result<Vec<Product>> {
        Ok(self.products.list().await?)
    }

    /// Returns one product through the cache.
    pub async fn product(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.products.product(id).await?)
    }

    /// Looks the product up and adds one unit of it to the cart.
    #[tracing::instrument(skip(self))]
    pub async fn add_to_cart(&self, product_id: ProductId) -> Result<()> {
        let product = self
            .products
            .product(product_id)
            .await?
            .ok_or(SessionError::ProductNotFound(product_id))?;
        self.cart.add_item(&product).await?;
        Ok(())
    }

    /// Removes the product's line from the cart.
    pub async fn remove_from_cart(&self, product_id: ProductId) -> Result<()> {
        Ok(self.cart.remove_item(product_id).await?)
    }

    /// Sets a line's quantity; zero removes the line.
    pub async fn set_quantity(&self, product_id: ProductId, quantity: u32) -> Result<()> {
        Ok(self.cart.set_quantity(product_id, quantity).await?)
    }

    /// Adds one unit to a line.
    pub async fn increment(&self, product_id: ProductId) -> Result<()> {
        Ok(self.cart.increment(product_id).await?)
    }

    /// Removes one unit from a line.
    pub async fn decrement(&self, product_id: ProductId) -> Result<()> {
        Ok(self.cart.decrement(product_id).await?)
    }

    /// Empties the cart.
    pub async fn clear_cart(&self) -> Result<()> {
        Ok(self.cart.clear().await?)
    }

    /// Returns the cart lines in insertion order.
    pub async fn cart_lines(&self) -> Vec<LineItem> {
        self.cart.items().await
    }

    /// Returns the derived cart totals.
    pub async fn cart_totals(&self) -> CartTotals {
        CartTotals {
            items: self.cart.total_items().await,
            subtotal: self.cart.subtotal().await,
        }
    }

    /// Submits the cart as an order.
    pub async fn checkout(&self) -> Result<CheckoutReceipt> {
        Ok(self.coordinator.submit().await?)
    }

    /// Returns the current checkout phase.
    pub fn checkout_phase(&self) -> CheckoutPhase {
        self.coordinator.phase()
    }

    /// Returns the order history through the cache.
    pub async fn orders(&self) -> Result<Vec<OrderSummary>> {
        Ok(self.orders.orders().await?)
    }

    /// Forces a fresh order history fetch.
    pub async fn refresh_orders(&self) -> Result<Vec<OrderSummary>> {
        Ok(self.orders.refresh().await?)
    }

    /// Returns one order.
    pub async fn order(&self, id: OrderId) -> Result<Option<OrderSummary>> {
        Ok(self.orders.order(id).await?)
    }

    /// Uploads a payment proof for a pending order.
    pub async fn upload_payment_proof(
        &self,
        id: OrderId,
        proof: PaymentProof,
    ) -> Result<OrderSummary> {
        Ok(self.orders.upload_payment_proof(id, proof).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart::InMemoryCartStorage;
    use catalog::InMemoryCatalogGateway;
    use orders::InMemoryOrderGateway;

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

    async fn session() -> Session<InMemoryCartStorage, InMemoryOrderGateway, InMemoryCatalogGateway>
    {
        let catalog = InMemoryCatalogGateway::with_products(vec![
            product(1, 25_000, 4),
            product(2, 9_000, 0),
        ]);
        let backend = InMemoryOrderGateway::new();
        backend.seed_product(ProductId::new(1), "Product 1", Money::from_rupiah(25_000), 4);

        Session::start(
            &Config::default(),
            catalog,
            backend,
            InMemoryCartStorage::new(),
        )
        .await
    }

    #[tokio::test]
    async fn test_add_to_cart_resolves_product() {
        let session = session().await;

        session.add_to_cart(ProductId::new(1)).await.unwrap();
        session.add_to_cart(ProductId::new(1)).await.unwrap();

        let totals = session.cart_totals().await;
        assert_eq!(totals.items, 2);
        assert_eq!(totals.subtotal, Money::from_rupiah(50_000));
    }

    #[tokio::test]
    async fn test_unknown_product_is_an_error() {
        let session = session().await;

        let result = session.add_to_cart(ProductId::new(99)).await;
        assert!(matches!(result, Err(SessionError::ProductNotFound(_))));
        assert!(session.cart_lines().await.is_empty());
    }

    #[tokio::test]
    async fn test_out_of_stock_product_never_lands() {
        let session = session().await;

        // Known product, zero stock: the cart silently refuses it.
        session.add_to_cart(ProductId::new(2)).await.unwrap();
        assert!(session.cart_lines().await.is_empty());
    }
}
