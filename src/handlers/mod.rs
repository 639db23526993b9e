pub mod commands;
pub mod notification;

pub use commands::*;
pub use notification::*;
