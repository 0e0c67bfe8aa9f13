pub mod car;
pub mod fuel_stats;

pub use car::{Car, CarId, CarRepository, FuelEntry, FuelEntryId};
pub use fuel_stats::FuelStats;

pub use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
