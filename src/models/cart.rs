use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{RepositoryError, RepositoryResult, MIN_CART_AMOUNT};

/// Catalog identifier of a product
pub type ProductId = u64;

/// Product record as served by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
}

/// Available quantity for a product as served by the stock service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

/// A product placed in the cart together with the requested quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image: String,
    pub amount: u32,
}

impl CartItem {
    /// Create a cart line for a freshly added product
    pub fn from_product(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image: product.image,
            amount: 1,
        }
    }

    /// Price of this line: unit price times amount
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.amount)
    }
}

/// Request to set the quantity of a product already in the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: u32,
}

/// Ordered, id-unique collection of cart items, each with an amount of at
/// least one.
///
/// Serializes transparently as a JSON array of [`CartItem`], which is the
/// format kept in local storage. Reading goes through [`Cart::from_items`] so
/// the stored items are checked before they become a cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored items in insertion order.
    ///
    /// Rejects a product listed twice or an item below the minimum amount.
    pub fn from_items(items: Vec<CartItem>) -> RepositoryResult<Self> {
        let mut seen = std::collections::HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(RepositoryError::DuplicateProduct {
                    product_id: item.id,
                });
            }
            if item.amount < MIN_CART_AMOUNT {
                return Err(RepositoryError::InvalidAmount {
                    product_id: item.id,
                    amount: item.amount,
                });
            }
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn find(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.find(product_id).is_some()
    }

    /// Number of distinct products in the cart
    pub fn size(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the amounts of every item
    pub fn total_amount(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Sum of every line subtotal
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Copy of this cart with `item` appended.
    ///
    /// The caller guarantees the product is not already present.
    pub fn with_item(&self, item: CartItem) -> Self {
        debug_assert!(!self.contains(item.id));
        let mut items = self.items.clone();
        items.push(item);
        Self { items }
    }

    /// Copy of this cart without `product_id`
    pub fn without(&self, product_id: ProductId) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.id != product_id)
                .cloned()
                .collect(),
        }
    }

    /// Copy of this cart with the amount of `product_id` replaced.
    ///
    /// Returns `None` if the product is not in the cart.
    pub fn with_amount(&self, product_id: ProductId, amount: u32) -> Option<Self> {
        let mut items = self.items.clone();
        let item = items.iter_mut().find(|item| item.id == product_id)?;
        item.amount = amount;
        Some(Self { items })
    }
}
