//! Cars module: car registry, fuel log and per-car statistics

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
