pub mod services;

pub use services::FuelService;
