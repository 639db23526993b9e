use std::sync::Arc;
use tracing::{info, instrument};

use crate::models::{Cart, CartItem, RepositoryResult};
use crate::repositories::LocalStorage;

/// Local storage key holding the serialized cart
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Trait defining the interface for cart persistence
#[cfg_attr(test, mockall::automock)]
pub trait CartRepository: Send + Sync {
    /// Read the stored cart, `None` if nothing was ever stored
    fn load_cart(&self) -> RepositoryResult<Option<Cart>>;

    /// Overwrite the stored cart wholesale
    fn save_cart(&self, cart: &Cart) -> RepositoryResult<()>;

    /// Drop the stored cart
    fn delete_cart(&self) -> RepositoryResult<()>;
}

/// Cart repository keeping the cart as a JSON array under a single storage key
pub struct LocalStorageCartRepository {
    storage: Arc<dyn LocalStorage>,
    key: String,
}

impl LocalStorageCartRepository {
    /// Create a repository using the default cart key
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self::with_key(storage, CART_STORAGE_KEY)
    }

    pub fn with_key(storage: Arc<dyn LocalStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Get the storage key (for testing)
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Parse the stored JSON array into a cart
    pub fn parse_cart(value: &str) -> RepositoryResult<Cart> {
        let items: Vec<CartItem> = serde_json::from_str(value)?;
        Cart::from_items(items)
    }
}

impl CartRepository for LocalStorageCartRepository {
    #[instrument(skip(self), fields(key = %self.key))]
    fn load_cart(&self) -> RepositoryResult<Option<Cart>> {
        match self.storage.get_item(&self.key)? {
            Some(value) => {
                let cart = Self::parse_cart(&value)?;
                info!("Cart loaded with {} items", cart.size());
                Ok(Some(cart))
            }
            None => {
                info!("No stored cart");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, cart), fields(key = %self.key, item_count = cart.size()))]
    fn save_cart(&self, cart: &Cart) -> RepositoryResult<()> {
        let value = serde_json::to_string(cart)?;
        self.storage.set_item(&self.key, &value)?;
        info!("Cart saved");
        Ok(())
    }

    #[instrument(skip(self), fields(key = %self.key))]
    fn delete_cart(&self) -> RepositoryResult<()> {
        self.storage.remove_item(&self.key)?;
        info!("Cart deleted");
        Ok(())
    }
}
