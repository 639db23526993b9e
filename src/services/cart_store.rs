use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{
    Cart, CartError, CartItem, CartResult, FailureCause, ProductId, RepositoryError,
    UpdateProductAmount, Validate,
};
use crate::repositories::CartRepository;
use crate::services::{CatalogService, StockService};

/// Cart state container.
///
/// Holds the authoritative in-memory cart and mirrors it to the repository
/// after every successful mutation. Each mutation persists the candidate
/// cart first and only then swaps it into memory, so a failed write leaves
/// the visible cart untouched.
pub struct CartStore {
    catalog: Arc<dyn CatalogService>,
    stock: Arc<dyn StockService>,
    repository: Arc<dyn CartRepository>,
    cart: Cart,
}

impl CartStore {
    /// Create a store, hydrating the cart from the repository.
    ///
    /// A missing or unreadable stored cart yields an empty cart.
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        stock: Arc<dyn StockService>,
        repository: Arc<dyn CartRepository>,
    ) -> Self {
        let cart = match repository.load_cart() {
            Ok(Some(cart)) => cart,
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Stored cart could not be read, starting empty");
                Cart::new()
            }
        };

        info!("Cart store ready with {} items", cart.size());

        Self {
            catalog,
            stock,
            repository,
            cart,
        }
    }

    /// Current cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart goes through [`CartStore::update_product_amount`]
    /// with its amount plus one, so the stock check applies.
    #[instrument(skip(self))]
    pub async fn add_product(&mut self, product_id: ProductId) -> CartResult<()> {
        if let Some(item) = self.cart.find(product_id) {
            let amount = item.amount.saturating_add(1);
            return self
                .update_product_amount(UpdateProductAmount { product_id, amount })
                .await;
        }

        let add_failed = |cause: FailureCause| CartError::AddFailed { product_id, cause };

        let product = self
            .catalog
            .find_product(product_id)
            .await
            .map_err(|e| add_failed(e.into()))?
            .ok_or_else(|| add_failed(FailureCause::ProductNotFound))?;

        let next = self.cart.with_item(CartItem::from_product(product));
        self.commit(next).map_err(add_failed)?;

        info!("Product added to cart");
        Ok(())
    }

    /// Remove a product from the cart
    #[instrument(skip(self))]
    pub async fn remove_product(&mut self, product_id: ProductId) -> CartResult<()> {
        let remove_failed = |cause: FailureCause| CartError::RemoveFailed { product_id, cause };

        if !self.cart.contains(product_id) {
            warn!("Product is not in the cart");
            return Err(remove_failed(FailureCause::NotInCart));
        }

        let next = self.cart.without(product_id);
        self.commit(next).map_err(remove_failed)?;

        info!("Product removed from cart");
        Ok(())
    }

    /// Set the amount of a product already in the cart.
    ///
    /// The amount is validated before the stock is fetched; stock is fetched
    /// fresh on every call.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&mut self, request: UpdateProductAmount) -> CartResult<()> {
        let UpdateProductAmount { product_id, amount } = request;
        let update_failed = |cause: FailureCause| CartError::UpdateFailed { product_id, cause };

        if !self.cart.contains(product_id) {
            warn!("Product is not in the cart");
            return Err(update_failed(FailureCause::NotInCart));
        }

        if request.validate().is_err() {
            warn!("Rejected amount below minimum");
            return Err(CartError::InvalidAmount { product_id, amount });
        }

        let stock = self
            .stock
            .get_stock(product_id)
            .await
            .map_err(|e| update_failed(e.into()))?;

        if amount > stock.amount {
            warn!(available = stock.amount, "Requested amount exceeds stock");
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        // Checked above; the cart cannot change across the await while `&mut self` is held.
        let next = self
            .cart
            .with_amount(product_id, amount)
            .ok_or_else(|| update_failed(FailureCause::NotInCart))?;
        self.commit(next).map_err(update_failed)?;

        info!("Product amount updated");
        Ok(())
    }

    /// Empty the cart and drop the stored copy
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<(), RepositoryError> {
        self.repository.delete_cart()?;
        self.cart = Cart::new();
        info!("Cart cleared");
        Ok(())
    }

    /// Persist `next`, then make it the in-memory cart
    fn commit(&mut self, next: Cart) -> Result<(), FailureCause> {
        self.repository.save_cart(&next)?;
        self.cart = next;
        Ok(())
    }
}
