//! Catalog gateway trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::ProductId;

use crate::error::CatalogError;
use crate::product::Product;

/// Trait for the backend product endpoints.
///
/// The storefront only reads the catalog; stock changes happen on the
/// server as orders are placed.
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Fetches one product by id. `None` when the backend has no such
    /// product.
    async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError>;

    /// Fetches the full product listing.
    async fn list(&self) -> Result<Vec<Product>, CatalogError>;
}

#[derive(Debug, Default)]
struct InMemoryCatalogState {
    products: HashMap<ProductId, Product>,
    order: Vec<ProductId>,
    fail_on_fetch: bool,
    fetch_calls: u64,
}

/// In-memory catalog gateway for tests and local sessions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogGateway {
    state: Arc<RwLock<InMemoryCatalogState>>,
}

impl InMemoryCatalogGateway {
    /// Creates an empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-seeded with the given products.
    pub fn with_products(products: Vec<Product>) -> Self {
        let gateway = Self::new();
        for product in products {
            gateway.insert(product);
        }
        gateway
    }

    /// Adds or replaces a product.
    pub fn insert(&self, product: Product) {
        let mut state = self.state.write().unwrap();
        if !state.products.contains_key(&product.id) {
            state.order.push(product.id);
        }
        state.products.insert(product.id, product);
    }

    /// Configures the gateway to fail fetches.
    pub fn set_fail_on_fetch(&self, fail: bool) {
        self.state.write().unwrap().fail_on_fetch = fail;
    }

    /// Returns how many fetches the backend has served.
    pub fn fetch_calls(&self) -> u64 {
        self.state.read().unwrap().fetch_calls
    }
}

#[async_trait]
impl CatalogGateway for InMemoryCatalogGateway {
    async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_fetch {
            return Err(CatalogError::Unavailable("connection refused".to_string()));
        }
        state.fetch_calls += 1;
        Ok(state.products.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_fetch {
            return Err(CatalogError::Unavailable("connection refused".to_string()));
        }
        state.fetch_calls += 1;
        let listing = state
            .order
            .iter()
            .filter_map(|id| state.products.get(id).cloned())
            .collect();
        Ok(listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Money;

    #[tokio::test]
    async fn test_fetch_seeded_product() {
        let gateway = InMemoryCatalogGateway::with_products(vec![Product {
            id: ProductId::new(1),
            name: "Teh Hijau".to_string(),
            description: String::new(),
            price: Money::from_rupiah(15_000),
            stock: 4,
            image: None,
            category: None,
        }]);

        let product = gateway.product(ProductId::new(1)).await.unwrap().unwrap();
        assert_eq!(product.name, "Teh Hijau");

        let missing = gateway.product(ProductId::new(99)).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_listing_preserves_insertion_order() {
        let gateway = InMemoryCatalogGateway::new();
        for id in [5, 2, 9] {
            gateway.insert(Product {
                id: ProductId::new(id),
                name: format!("Product {id}"),
                description: String::new(),
                price: Money::from_rupiah(1_000),
                stock: 1,
                image: None,
                category: None,
            });
        }

        let listing = gateway.list().await.unwrap();
        let ids: Vec<i64> = listing.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[tokio::test]
    async fn test_fail_on_fetch() {
        let gateway = InMemoryCatalogGateway::new();
        gateway.set_fail_on_fetch(true);

        let result = gateway.list().await;
        assert!(matches!(result, Err(CatalogError::Unavailable(_))));
        assert_eq!(gateway.fetch_calls(), 0);
    }
}
