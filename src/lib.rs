//! # Car Fuel Tracker
//!
//! Records refills per car and derives fuel consumption statistics.
//!
//! ## Architecture
//!
//! - **domain**: car aggregate, fuel entries, statistics, repository trait
//! - **application**: `FuelService` business rules
//! - **infrastructure**: in-memory car store
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: error type and shutdown coordination
//! - **server**: runtime that wires everything together

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use application::FuelService;
pub use domain::{Car, CarId, CarRepository, DomainError, FuelEntry, FuelStats};
pub use infrastructure::InMemoryCarStore;
pub use interfaces::{create_api_router, ApiContext};
