use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{NewProduct, Product};

/// Persistence port for products.
///
/// Implementations assign ids on insert and report failures as
/// `ProductError::Storage`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product and return its assigned id
    async fn insert(&self, product: NewProduct) -> ProductResult<i64>;

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// Exact name match, in store order
    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>>;

    /// All products, in store order
    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    /// Overwrite the product with the same id. Absent ids are ignored.
    async fn replace(&self, product: Product) -> ProductResult<()>;

    /// Remove by id. Absent ids are ignored.
    async fn remove_by_id(&self, id: i64) -> ProductResult<()>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Ids start at 1 and are never reused. Store order is id order.
#[derive(Debug, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<BTreeMap<i64, Product>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: NewProduct) -> ProductResult<i64> {
        let mut products = self.products.write().await;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        products.insert(id, product.with_id(id));

        tracing::info!(product_id = id, "Created product");
        Ok(id)
    }

    async fn find_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| p.name == name)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().cloned().collect())
    }

    async fn replace(&self, product: Product) -> ProductResult<()> {
        let mut products = self.products.write().await;

        if let Some(existing) = products.get_mut(&product.id) {
            tracing::info!(product_id = product.id, "Updated product");
            *existing = product;
        }
        Ok(())
    }

    async fn remove_by_id(&self, id: i64) -> ProductResult<()> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(())
    }
}
