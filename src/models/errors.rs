use thiserror::Error;

use super::ProductId;

/// Cart-level errors returned by every store operation
#[derive(Debug, Error)]
pub enum CartError {
    #[error("Product addition failed: product_id={product_id}: {cause}")]
    AddFailed {
        product_id: ProductId,
        #[source]
        cause: FailureCause,
    },

    #[error("Product removal failed: product_id={product_id}: {cause}")]
    RemoveFailed {
        product_id: ProductId,
        #[source]
        cause: FailureCause,
    },

    #[error("Quantity change failed: product_id={product_id}: {cause}")]
    UpdateFailed {
        product_id: ProductId,
        #[source]
        cause: FailureCause,
    },

    #[error("Amount below 1 not allowed: product_id={product_id}, amount={amount}")]
    InvalidAmount { product_id: ProductId, amount: u32 },

    #[error("Requested quantity not in stock: product_id={product_id}, requested={requested}, available={available}")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },
}

impl CartError {
    /// Product the failed operation was about
    pub fn product_id(&self) -> ProductId {
        match self {
            CartError::AddFailed { product_id, .. }
            | CartError::RemoveFailed { product_id, .. }
            | CartError::UpdateFailed { product_id, .. }
            | CartError::InvalidAmount { product_id, .. }
            | CartError::OutOfStock { product_id, .. } => *product_id,
        }
    }
}

/// Underlying reason behind an add, remove or update failure
#[derive(Debug, Error)]
pub enum FailureCause {
    #[error("product is not in the cart")]
    NotInCart,

    #[error("product not found in catalog")]
    ProductNotFound,

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors raised by the catalog and stock HTTP client
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status from {url}: {status}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Invalid response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid base URL: {message}")]
    InvalidBaseUrl { message: String },
}

/// Repository-level errors for cart persistence
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Storage I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("Storage lock poisoned")]
    LockPoisoned,

    #[error("Duplicate product in stored cart: {product_id}")]
    DuplicateProduct { product_id: ProductId },

    #[error("Stored amount {amount} below minimum for product {product_id}")]
    InvalidAmount { product_id: ProductId, amount: u32 },
}

/// Validation errors for input data
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Value out of range: {field}, min={min}, value={value}")]
    BelowMinimum { field: String, min: u32, value: u32 },
}

/// Result type alias for cart operations
pub type CartResult<T> = Result<T, CartError>;

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;
