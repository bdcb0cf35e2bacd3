//! Product catalog access for the storefront.
//!
//! This crate provides the read side of the catalog:
//! - [`CatalogGateway`] trait for the backend product endpoints
//! - [`InMemoryCatalogGateway`] for tests and local sessions
//! - [`ProductsCache`] for TTL-based read-through caching of products

pub mod cache;
pub mod error;
pub mod gateway;
pub mod product;

pub use cache::ProductsCache;
pub use error::{CatalogError, Result};
pub use gateway::{CatalogGateway, InMemoryCatalogGateway};
pub use product::{Category, Product};
