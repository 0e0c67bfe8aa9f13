//! Application services

pub mod fuel;

pub use fuel::FuelService;
