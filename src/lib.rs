//! Shopping-cart state for the RocketShoes storefront.
//!
//! [`services::CartStore`] keeps the cart, checks quantities against live
//! stock, and mirrors every successful change to local storage under
//! [`repositories::CART_STORAGE_KEY`]. Operations return
//! [`models::CartResult`]; turning failures into shopper notifications is
//! left to the caller (see [`handlers::notification_for`]).

pub mod config;
pub mod handlers;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod services;

pub use self::config::Config;
pub use observability::init_observability;
