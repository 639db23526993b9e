// Services module - cart state and its external collaborators

pub mod api;
pub mod cart_store;
pub mod context;

pub use api::{ApiClient, CatalogService, StockService};
#[cfg(test)]
pub use api::{MockCatalogService, MockStockService};
pub use cart_store::CartStore;
pub use context::CartContext;
