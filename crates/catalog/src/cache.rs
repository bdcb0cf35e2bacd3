//! TTL-based read-through cache over the catalog gateway.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::ProductId;
use tokio::sync::RwLock;

use crate::error::CatalogError;
use crate::gateway::CatalogGateway;
use crate::product::Product;

/// How long fetched products stay fresh before the next read goes back
/// to the backend.
pub const DEFAULT_PRODUCTS_TTL: Duration = Duration::from_secs(300);

#[derive(Debug)]
struct CachedListing {
    products: Vec<Product>,
    fetched_at: Instant,
}

#[derive(Debug)]
struct CachedProduct {
    product: Product,
    fetched_at: Instant,
}

#[derive(Debug, Default)]
struct ProductsState {
    listing: Option<CachedListing>,
    details: HashMap<ProductId, CachedProduct>,
}

/// Read-through product cache.
///
/// Listing and per-product lookups are cached independently, each with
/// the same TTL. [`ProductsCache::invalidate`] drops everything so the
/// next read observes the backend's current stock.
#[derive(Debug, Clone)]
pub struct ProductsCache<G> {
    gateway: G,
    state: Arc<RwLock<ProductsState>>,
    ttl: Duration,
}

impl<G: CatalogGateway> ProductsCache<G> {
    /// Creates a cache with the default TTL.
    pub fn new(gateway: G) -> Self {
        Self::with_ttl(gateway, DEFAULT_PRODUCTS_TTL)
    }

    /// Creates a cache with a custom TTL.
    pub fn with_ttl(gateway: G, ttl: Duration) -> Self {
        Self {
            gateway,
            state: Arc::new(RwLock::new(ProductsState::default())),
            ttl,
        }
    }

    /// Returns one product, fetching it when the cached copy is absent
    /// or stale. `None` means the backend has no such product; misses
    /// are not cached.
    pub async fn product(&self, id: ProductId) -> Result<Option<Product>, CatalogError> {
        {
            let state = self.state.read().await;
            if let Some(cached) = state.details.get(&id)
                && cached.fetched_at.elapsed() < self.ttl
            {
                return Ok(Some(cached.product.clone()));
            }
        }

        tracing::debug!(%id, "product cache miss, fetching");
        let fetched = self.gateway.product(id).await?;
        if let Some(product) = &fetched {
            let mut state = self.state.write().await;
            state.details.insert(
                id,
                CachedProduct {
                    product: product.clone(),
                    fetched_at: Instant::now(),
                },
            );
        }
        Ok(fetched)
    }

    /// Returns the product listing, fetching it when absent or stale.
    pub async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        {
            let state = self.state.read().await;
            if let Some(listing) = &state.listing
                && listing.fetched_at.elapsed() < self.ttl
            {
                return Ok(listing.products.clone());
            }
        }

        tracing::debug!("listing cache miss, fetching");
        let products = self.gateway.list().await?;
        let mut state = self.state.write().await;
        state.listing = Some(CachedListing {
            products: products.clone(),
            fetched_at: Instant::now(),
        });
        Ok(products)
    }

    /// Drops every cached entry. The next read re-fetches.
    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        state.listing = None;
        state.details.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::InMemoryCatalogGateway;
    use common::Money;

    fn product(id: i64, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Money::from_rupiah(10_000),
            stock,
            image: None,
            category: None,
        }
    }

    #[tokio::test]
    async fn test_fresh_hit_skips_backend() {
        let gateway = InMemoryCatalogGateway::with_products(vec![product(1, 5)]);
        let cache = ProductsCache::new(gateway.clone());

        cache.product(ProductId::new(1)).await.unwrap();
        cache.product(ProductId::new(1)).await.unwrap();

        assert_eq!(gateway.fetch_calls(), 1);
    }

    #[tokio::test]
    async fn test_stale_entry_refetches() {
        let gateway = InMemoryCatalogGateway::with_products(vec![product(1, 5)]);
        let cache = ProductsCache::with_ttl(gateway.clone(), Duration::ZERO);

        cache.product(ProductId::new(1)).await.unwrap();
        cache.product(ProductId::new(1)).await.unwrap();

        assert_eq!(gateway.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let gateway = InMemoryCatalogGateway::with_products(vec![product(1, 5)]);
        let cache = ProductsCache::new(gateway.clone());

        assert_eq!(cache.list().await.unwrap().len(), 1);
        gateway.insert(product(2, 3));

        // Still fresh, still the old listing.
        assert_eq!(cache.list().await.unwrap().len(), 1);

        cache.invalidate().await;
        assert_eq!(cache.list().await.unwrap().len(), 2);
        assert_eq!(gateway.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_misses_are_not_cached() {
        let gateway = InMemoryCatalogGateway::new();
        let cache = ProductsCache::new(gateway.clone());

        assert!(cache.product(ProductId::new(7)).await.unwrap().is_none());
        assert!(cache.product(ProductId::new(7)).await.unwrap().is_none());

        assert_eq!(gateway.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let gateway = InMemoryCatalogGateway::new();
        let cache = ProductsCache::new(gateway.clone());
        gateway.set_fail_on_fetch(true);

        let result = cache.list().await;
        assert!(matches!(result, Err(CatalogError::Unavailable(_))));
    }
}
