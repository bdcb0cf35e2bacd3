use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a catalog product.
///
/// Wraps the numeric id assigned by the backend to prevent mixing
/// product ids with other numeric identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Creates a product ID from a backend-assigned number.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying numeric id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// Unique identifier for a placed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Creates an order ID from a backend-assigned number.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying numeric id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for OrderId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<OrderId> for i64 {
    fn from(id: OrderId) -> Self {
        id.0
    }
}

/// Unique identifier for a product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(i64);

impl CategoryId {
    /// Creates a category ID from a backend-assigned number.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying numeric id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CategoryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<CategoryId> for i64 {
    fn from(id: CategoryId) -> Self {
        id.0
    }
}

/// Client-generated identifier for one checkout attempt.
///
/// Minted when a submission starts and carried through log spans so a
/// single attempt can be correlated across cart, cache, and gateway
/// activity. It never appears in the wire request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutId(Uuid);

impl CheckoutId {
    /// Creates a new random checkout ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a checkout ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for CheckoutId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CheckoutId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CheckoutId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<CheckoutId> for Uuid {
    fn from(id: CheckoutId) -> Self {
        id.0
    }
}
