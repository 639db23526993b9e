use std::sync::Arc;
use tokio::sync::Mutex;

use crate::models::{Cart, CartResult, ProductId, RepositoryError, UpdateProductAmount};
use crate::services::CartStore;

/// Cloneable handle giving every consumer access to the same [`CartStore`].
///
/// Operations are serialized through an async mutex: each one runs to
/// completion, network calls included, before the next starts.
#[derive(Clone)]
pub struct CartContext {
    store: Arc<Mutex<CartStore>>,
}

impl CartContext {
    pub fn new(store: CartStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Snapshot of the current cart
    pub async fn cart(&self) -> Cart {
        self.store.lock().await.cart().clone()
    }

    pub async fn add_product(&self, product_id: ProductId) -> CartResult<()> {
        self.store.lock().await.add_product(product_id).await
    }

    pub async fn remove_product(&self, product_id: ProductId) -> CartResult<()> {
        self.store.lock().await.remove_product(product_id).await
    }

    pub async fn update_product_amount(&self, request: UpdateProductAmount) -> CartResult<()> {
        self.store.lock().await.update_product_amount(request).await
    }

    pub async fn clear_cart(&self) -> Result<(), RepositoryError> {
        self.store.lock().await.clear_cart()
    }
}
