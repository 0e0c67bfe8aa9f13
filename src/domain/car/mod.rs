//! Car aggregate
//!
//! Contains the Car entity, its fuel entries, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{Car, CarId, FuelEntry, FuelEntryId};
pub use repository::CarRepository;
