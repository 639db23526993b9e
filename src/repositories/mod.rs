pub mod cart_repository;
pub mod local_storage;

pub use cart_repository::*;
pub use local_storage::*;
